use std::fmt::Write;

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};
use tracing::{debug, trace};

use crate::error::ParseError;

/// Anchor name of the "back to top" link; never a day marker.
const TOP_MARKER: &str = "oben";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Split a concatenated bulletin into one markup fragment per day marker.
///
/// The document is parsed once and serialized once; while serializing, the
/// output offset of every day marker is recorded as it is written. Fragment
/// `i` is the serialized markup from marker `i` up to marker `i + 1` (or the
/// end of the document), so boundaries never depend on searching for marker
/// text and duplicate markers segment correctly.
pub fn split_days(markup: &str) -> Result<Vec<String>, ParseError> {
    let document = Html::parse_document(markup);
    trace!(parse_errors = document.errors.len(), "parsed bulletin");

    let mut writer = MarkupWriter::default();
    writer
        .write_node(document.tree.root(), false)
        .map_err(|e| ParseError::Document(e.to_string()))?;

    let MarkupWriter { out, markers } = writer;
    debug!(markers = markers.len(), "located day markers");

    let fragments = markers
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = markers.get(i + 1).copied().unwrap_or(out.len());
            out[start..end].to_string()
        })
        .collect();
    Ok(fragments)
}

fn is_day_marker(element: &Element) -> bool {
    element.name() == "a" && element.attr("name").is_some_and(|name| name != TOP_MARKER)
}

/// HTML serializer that remembers where each day marker starts.
#[derive(Default)]
struct MarkupWriter {
    out: String,
    markers: Vec<usize>,
}

impl MarkupWriter {
    fn write_node(&mut self, node: NodeRef<'_, Node>, raw_text: bool) -> std::fmt::Result {
        match node.value() {
            Node::Doctype(doctype) => write!(self.out, "<!DOCTYPE {}>", doctype.name())?,
            Node::Comment(comment) => write!(self.out, "<!--{}-->", &**comment)?,
            Node::Text(text) if raw_text => self.out.push_str(text),
            Node::Text(text) => escape_into(&mut self.out, text, false),
            Node::Element(element) => {
                if is_day_marker(element) {
                    self.markers.push(self.out.len());
                }
                let name = element.name();
                write!(self.out, "<{}", name)?;
                for (key, value) in element.attrs() {
                    write!(self.out, " {}=\"", key)?;
                    escape_into(&mut self.out, value, true);
                    self.out.push('"');
                }
                self.out.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    return Ok(());
                }
                let raw = RAW_TEXT_ELEMENTS.contains(&name);
                for child in node.children() {
                    self.write_node(child, raw)?;
                }
                write!(self.out, "</{}>", name)?;
            }
            _ => {
                for child in node.children() {
                    self.write_node(child, raw_text)?;
                }
            }
        }
        Ok(())
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

// ── Tests ──
