// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scrolly_charts::escape_xml;

/// One captured moment of one page section.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

/// A standalone page listing every capture in order.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
    out.push_str(
        "<style>\n\
         body { background: #111; color: #ddd; font-family: system-ui, sans-serif; margin: 2rem; }\n\
         section { margin-bottom: 3rem; }\n\
         h2 { font-weight: 500; margin-bottom: 0.25rem; }\n\
         p { color: #999; margin-top: 0; }\n\
         svg { display: block; border: 1px solid #333; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(&section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        out.push_str(&section.svg);
        out.push_str("\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_escaped() {
        let html = render_report(
            "a < b",
            &[HtmlSection {
                title: "x & y".into(),
                description: String::new(),
                svg: "<svg/>".into(),
            }],
        );
        assert!(html.contains("<title>a &lt; b</title>"), "{html}");
        assert!(html.contains("<h2>x &amp; y</h2>"), "{html}");
        assert!(html.contains("<svg/>"), "svg markup is embedded verbatim");
    }
}
