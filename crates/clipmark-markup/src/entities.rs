//! Minimal entity encoding for serialized output.
//!
//! Decoding is not needed here: the parser decodes character references
//! while tokenizing, so the event stream always carries decoded text.

use std::borrow::Cow;

/// Entity replacement for a character in text content, if any.
fn text_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Entity replacement in attribute position. Attributes are rendered
/// single-quoted, so the apostrophe must be escaped too.
fn attribute_entity(c: char) -> Option<&'static str> {
    match c {
        '\'' => Some("&#39;"),
        other => text_entity(other),
    }
}

fn encode_with(text: &str, entity: fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = text.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(text);
    };
    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match entity(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Encode text content for an element body.
pub fn encode_text(text: &str) -> Cow<'_, str> {
    encode_with(text, text_entity)
}

/// Encode an attribute value for a single-quoted attribute position.
pub fn encode_attribute(value: &str) -> Cow<'_, str> {
    encode_with(value, attribute_entity)
}

/// Width in output bytes of one character of text content once encoded.
pub fn encoded_width(c: char) -> usize {
    match text_entity(c) {
        Some(entity) => entity.len(),
        None => c.len_utf8(),
    }
}
