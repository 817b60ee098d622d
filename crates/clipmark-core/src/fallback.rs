//! Plain-text truncation for sources with no renderable markup.

use clipmark_types::BudgetUnit;

/// Take the first `max` units of `source`, appending `tail` only when the
/// source actually exceeds the budget. Byte cuts land on character
/// boundaries.
pub fn truncate_plain(source: &str, unit: BudgetUnit, max: usize, tail: &str) -> String {
    let kept = match unit {
        BudgetUnit::Characters => match source.char_indices().nth(max) {
            Some((idx, _)) => &source[..idx],
            None => source,
        },
        BudgetUnit::Bytes => {
            if source.len() <= max {
                source
            } else {
                let mut end = max;
                while !source.is_char_boundary(end) {
                    end -= 1;
                }
                &source[..end]
            }
        }
    };
    if kept.len() == source.len() {
        source.to_string()
    } else {
        format!("{kept}{tail}")
    }
}
