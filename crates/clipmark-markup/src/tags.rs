//! Static element classification.

/// Name of the synthetic root element the dispatcher wraps fragments in.
///
/// Hyphenated so the HTML5 tokenizer reads it as a custom element. The
/// truncation sink suppresses it as structural, so it never appears in
/// output even if a source happens to contain it.
pub const SYNTHETIC_ROOT: &str = "clipmark-root";

/// HTML5 void elements: no content, no closing tag, rendered self-closing.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements that never appear in output regardless of budget: the document
/// structure a lenient parser adds implicitly, plus the synthetic root.
pub fn is_structural_element(name: &str) -> bool {
    matches!(name, "html" | "head" | "body") || name == SYNTHETIC_ROOT
}
