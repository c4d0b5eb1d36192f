// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The timer capability.
//!
//! Components never hold callbacks. They ask a [`Scheduler`] to deliver a typed token
//! back to them after a delay, and the host routes each fired token to its owner. This
//! keeps every piece of lifecycle state owned by exactly one object.
//!
//! Firing precision is only "no earlier than the requested delay". A timer that fires late
//! simply runs late; nothing is compensated or retried.

extern crate alloc;

use alloc::collections::BTreeMap;
use core::marker::PhantomData;
use core::time::Duration;

use hashbrown::HashMap;

/// Identifies one scheduled timer.
///
/// Handles are never reused by a scheduler, so a handle held past its timer's lifetime can
/// never alias a newer timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Run-once, cancelable, delayed delivery of tokens.
pub trait Scheduler<T> {
    /// Current time, measured from an arbitrary fixed origin (usually page start).
    fn now(&self) -> Duration;

    /// Schedules `token` to be delivered no earlier than `delay` from now.
    fn after(&mut self, delay: Duration, token: T) -> TimerHandle;

    /// Prevents a pending timer from firing.
    ///
    /// Returns `false` if the timer already fired, was already canceled, or is unknown.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A timer popped from a [`ManualScheduler`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle returned when the timer was scheduled.
    pub handle: TimerHandle,
    /// Time the timer was due.
    pub due: Duration,
    /// The delivered token.
    pub token: T,
}

/// A deterministic scheduler over a virtual clock.
///
/// Timers fire in `(due, creation order)` order. The owner drains due timers with
/// [`ManualScheduler::pop_due`] and dispatches them; nothing fires on its own.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), T>,
    due_by_handle: HashMap<TimerHandle, Duration>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ManualScheduler<T> {
    /// Creates an empty scheduler at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            due_by_handle: HashMap::new(),
        }
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if `handle` is still pending.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_by_handle.contains_key(&handle)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Pops the earliest timer due no later than `deadline`, advancing the clock to its due
    /// time (the clock never moves backwards).
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Fired<T>> {
        let (&(due, id), _) = self.queue.first_key_value()?;
        if due > deadline {
            return None;
        }
        let token = self.queue.remove(&(due, id))?;
        let handle = TimerHandle(id);
        self.due_by_handle.remove(&handle);
        self.now = self.now.max(due);
        Some(Fired { handle, due, token })
    }

    /// Moves the clock forward to `deadline` without firing anything.
    ///
    /// Timers due before `deadline` stay pending and will be popped (late) by the next
    /// [`ManualScheduler::pop_due`].
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, token: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let due = self.now + delay;
        self.queue.insert((due, id), token);
        let handle = TimerHandle(id);
        self.due_by_handle.insert(handle, due);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_handle.remove(&handle) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }
}

/// Adapts a `Scheduler<T>` into a `Scheduler<U>` by wrapping every token.
///
/// This lets a component schedule its own token type while the host keeps a single
/// combined token enum.
pub struct MappedScheduler<'a, S: ?Sized, T, F> {
    inner: &'a mut S,
    wrap: F,
    _token: PhantomData<fn() -> T>,
}

impl<'a, S: ?Sized, T, F> MappedScheduler<'a, S, T, F> {
    /// Wraps `inner`, converting tokens with `wrap`.
    pub fn new(inner: &'a mut S, wrap: F) -> Self {
        Self {
            inner,
            wrap,
            _token: PhantomData,
        }
    }
}

impl<S: ?Sized, T, F> core::fmt::Debug for MappedScheduler<'_, S, T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappedScheduler").finish_non_exhaustive()
    }
}

impl<U, S, T, F> Scheduler<U> for MappedScheduler<'_, S, T, F>
where
    S: Scheduler<T> + ?Sized,
    F: FnMut(U) -> T,
{
    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn after(&mut self, delay: Duration, token: U) -> TimerHandle {
        let token = (self.wrap)(token);
        self.inner.after(delay, token)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.inner.cancel(handle)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_due_order_then_creation_order() {
        let mut s = ManualScheduler::new();
        s.after(ms(30), 'c');
        s.after(ms(10), 'a');
        s.after(ms(10), 'b');

        let mut got = Vec::new();
        while let Some(f) = s.pop_due(ms(100)) {
            got.push((f.due, f.token));
        }
        assert_eq!(got, [(ms(10), 'a'), (ms(10), 'b'), (ms(30), 'c')]);
        assert_eq!(s.now(), ms(30), "clock follows the last fired timer");
    }

    #[test]
    fn never_fires_before_the_requested_delay() {
        let mut s = ManualScheduler::new();
        s.after(ms(50), ());
        assert!(s.pop_due(ms(49)).is_none(), "49ms is too early");
        assert!(s.pop_due(ms(50)).is_some(), "due exactly at 50ms");
    }

    #[test]
    fn canceled_timer_never_fires() {
        let mut s = ManualScheduler::new();
        let a = s.after(ms(10), 1);
        let b = s.after(ms(20), 2);
        assert!(s.cancel(a), "first cancel succeeds");
        assert!(!s.cancel(a), "second cancel is a no-op");
        assert!(!s.is_pending(a), "canceled handle is gone");

        let f = s.pop_due(ms(100)).unwrap();
        assert_eq!(f.handle, b);
        assert!(s.pop_due(ms(100)).is_none(), "nothing left");
        assert!(!s.cancel(b), "cancel after firing is a no-op");
    }

    #[test]
    fn delays_are_relative_to_the_advanced_clock() {
        let mut s = ManualScheduler::new();
        s.advance_to(ms(100));
        s.after(ms(5), ());
        assert_eq!(s.next_due(), Some(ms(105)));
        s.advance_to(ms(50));
        assert_eq!(s.now(), ms(100), "clock never moves backwards");
    }

    #[test]
    fn mapped_scheduler_wraps_tokens() {
        let mut s: ManualScheduler<(u8, char)> = ManualScheduler::new();
        {
            let mut mapped = MappedScheduler::new(&mut s, |c: char| (7, c));
            let h = mapped.after(ms(1), 'x');
            assert!(mapped.cancel(h), "mapped cancel reaches the inner scheduler");
            mapped.after(ms(2), 'y');
        }
        let f = s.pop_due(ms(10)).unwrap();
        assert_eq!(f.token, (7, 'y'));
    }
}
