//! PresentationML rendering.
//!
//! A deck is written as an OPC package: a zip of XML parts tied together by
//! relationship parts and a content-types manifest. One master, one
//! "Title and Content" layout and one theme are shared by every slide.

mod package;
mod parts;
mod writer;

pub use package::Package;
pub use writer::SlidesWriter;

/// Escape text for element content and attribute values.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not legal XML 1.0.
            c if c.is_control() && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}
