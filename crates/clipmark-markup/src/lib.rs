//! Markup collaborators for the clipmark truncation engine.
//!
//! The truncation core never parses markup itself. This crate supplies its
//! collaborators:
//! - [`drive`] runs the tolerant HTML parser over a source string and
//!   replays the document to a [`MarkupSink`] as a SAX-style event stream.
//! - [`entities`] encodes text and attribute values for serialized output.
//! - [`tags`] classifies element names (void, structural, synthetic root).

pub mod entities;
mod events;
pub mod tags;

pub use events::{drive, Attribute, MarkupSink};
