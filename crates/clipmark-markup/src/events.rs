//! Event source: drives the tolerant HTML parser over a source string and
//! replays the resulting tree to a [`MarkupSink`] in document order.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::trace;

use clipmark_types::Result;

/// An attribute as reported by the parser: source order, value decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Consumer interface for the markup event stream.
///
/// Events arrive in document order: `on_open`, text and comment events,
/// `on_close` (emitted for void elements too, the way a SAX parser reports
/// them), and a single `on_end` once the stream is exhausted.
pub trait MarkupSink {
    fn on_open(&mut self, name: &str, attributes: &[Attribute]);
    fn on_text(&mut self, text: &str);
    fn on_comment(&mut self, text: &str);
    fn on_close(&mut self, name: &str);
    fn on_end(&mut self);
}

/// Parse `source` leniently and replay it to `sink`.
///
/// The parser is browser-grade: it recovers from unclosed tags, normalizes
/// void elements, and keeps attributes in source order. Its recoveries are
/// logged at trace level, never surfaced as errors; only an I/O failure from
/// the reader propagates.
pub fn drive<S: MarkupSink>(source: &str, sink: &mut S) -> Result<()> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut source.as_bytes())?;
    for recovery in dom.errors.iter() {
        trace!(%recovery, "parser recovered");
    }
    replay(&dom.document, sink);
    sink.on_end();
    Ok(())
}

fn replay<S: MarkupSink>(node: &Handle, sink: &mut S) {
    match &node.data {
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                replay(child, sink);
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            let attributes: Vec<Attribute> = attrs
                .borrow()
                .iter()
                .map(|attr| Attribute {
                    name: attr.name.local.as_ref().to_string(),
                    value: attr.value.to_string(),
                })
                .collect();
            sink.on_open(tag, &attributes);
            for child in node.children.borrow().iter() {
                replay(child, sink);
            }
            sink.on_close(tag);
        }
        NodeData::Text { contents } => sink.on_text(&contents.borrow()),
        NodeData::Comment { contents } => sink.on_comment(contents),
        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
    }
}
