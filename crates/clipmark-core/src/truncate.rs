//! The dispatcher: default resolution, unicode canonicalization, the
//! two-pass parse, and the plain-text fallback for sources with no
//! renderable markup.

use std::borrow::Cow;

use tracing::debug;
use unicode_normalization::{is_nfc, UnicodeNormalization};

use clipmark_markup::{drive, tags};
use clipmark_types::{Result, TruncateOptions, TruncationConfig};

use crate::fallback;
use crate::sink::TruncationSink;

/// Truncate `source` to the configured budget, keeping the markup
/// well-formed.
///
/// Returns the input unchanged (modulo parser normalization and entity
/// re-encoding) when it fits, a truncated fragment otherwise, or a
/// plain-text truncation when the parser finds no renderable content.
pub fn truncate(source: &str, options: &TruncateOptions) -> Result<String> {
    let config = options.resolve();
    // Surface configuration errors before any parsing happens.
    TruncationSink::new(config.clone())?;

    let source = normalize(source);
    debug!(unit = ?config.budget.unit, max = config.budget.max, "truncating");

    let first = run_pass(&source, &config)?;
    if first.is_empty() {
        debug!("no renderable markup, falling back to plain-text truncation");
        return Ok(fallback::truncate_plain(
            &source,
            config.budget.unit,
            config.budget.max,
            &config.tail.marker,
        ));
    }

    // Second pass with a synthetic single root, so the parser always sees
    // one root element. The root is structural and never reaches the output.
    let wrapped = format!(
        "<{root}>{source}</{root}>",
        root = tags::SYNTHETIC_ROOT,
        source = source
    );
    run_pass(&wrapped, &config)
}

fn run_pass(source: &str, config: &TruncationConfig) -> Result<String> {
    let mut sink = TruncationSink::new(config.clone())?;
    drive(source, &mut sink)?;
    Ok(sink.into_output())
}

/// Canonicalize to NFC so composed and decomposed inputs truncate the same
/// way. Already-normalized input is borrowed, not copied.
fn normalize(source: &str) -> Cow<'_, str> {
    if is_nfc(source) {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(source.nfc().collect())
    }
}
