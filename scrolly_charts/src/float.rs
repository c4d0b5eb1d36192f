// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::floor`, `f64::exp` and friends are not available in `core`. This trait dispatches
//! to `libm` when `std` is off; with `std` the inherent methods win and this module is not
//! compiled at all.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    /// Largest integer less than or equal to `self`.
    fn floor(self) -> Self;
    /// Smallest integer greater than or equal to `self`.
    fn ceil(self) -> Self;
    /// Nearest integer, half away from zero.
    fn round(self) -> Self;
    /// Base-10 logarithm.
    fn log10(self) -> Self;
    /// `self^n`.
    fn powf(self, n: Self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn ceil(self) -> Self {
        libm::ceil(self)
    }

    fn round(self) -> Self {
        libm::round(self)
    }

    fn log10(self) -> Self {
        libm::log10(self)
    }

    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("scrolly_charts requires either the `std` or `libm` feature");
