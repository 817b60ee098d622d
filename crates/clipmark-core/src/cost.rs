//! Cost of spans of output under the active budget unit.
//!
//! Character budgets count decoded characters: a named entity in the output
//! reads as one character. Byte budgets count encoded output bytes, so
//! entity expansion is never underestimated and cuts always land on
//! character boundaries.

use clipmark_markup::entities;
use clipmark_types::BudgetUnit;

/// Cost of already-rendered markup (tags, comment delimiters).
pub(crate) fn markup_cost(unit: BudgetUnit, rendered: &str) -> usize {
    match unit {
        BudgetUnit::Characters => rendered.chars().count(),
        BudgetUnit::Bytes => rendered.len(),
    }
}

/// Cost of a decoded text span as it will land in the output.
pub(crate) fn text_cost(unit: BudgetUnit, decoded: &str) -> usize {
    match unit {
        BudgetUnit::Characters => decoded.chars().count(),
        BudgetUnit::Bytes => decoded.chars().map(entities::encoded_width).sum(),
    }
}

/// Longest prefix of decoded text whose [`text_cost`] fits in `room`.
pub(crate) fn cut_text_to_fit(unit: BudgetUnit, decoded: &str, room: usize) -> &str {
    let mut used = 0;
    for (idx, c) in decoded.char_indices() {
        let width = match unit {
            BudgetUnit::Characters => 1,
            BudgetUnit::Bytes => entities::encoded_width(c),
        };
        if used + width > room {
            return &decoded[..idx];
        }
        used += width;
    }
    decoded
}

/// Longest prefix of already-rendered markup (comment content) whose
/// [`markup_cost`] fits in `room`.
pub(crate) fn cut_markup_to_fit(unit: BudgetUnit, rendered: &str, room: usize) -> &str {
    let mut used = 0;
    for (idx, c) in rendered.char_indices() {
        let width = match unit {
            BudgetUnit::Characters => 1,
            BudgetUnit::Bytes => c.len_utf8(),
        };
        if used + width > room {
            return &rendered[..idx];
        }
        used += width;
    }
    rendered
}

/// Cost of the tail marker. A single named entity reads as one character.
pub(crate) fn tail_cost(unit: BudgetUnit, tail: &str) -> usize {
    match unit {
        BudgetUnit::Characters if is_single_entity(tail) => 1,
        BudgetUnit::Characters => tail.chars().count(),
        BudgetUnit::Bytes => tail.len(),
    }
}

fn is_single_entity(tail: &str) -> bool {
    tail.len() >= 3 && tail.starts_with('&') && tail.ends_with(';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_costs_count_decoded_glyphs() {
        assert_eq!(text_cost(BudgetUnit::Characters, ">some"), 5);
        assert_eq!(text_cost(BudgetUnit::Characters, "落霞孤"), 3);
    }

    #[test]
    fn byte_costs_count_encoded_output() {
        // '>' encodes to "&gt;" (4 bytes), '語' stays 3 bytes.
        assert_eq!(text_cost(BudgetUnit::Bytes, ">a"), 5);
        assert_eq!(text_cost(BudgetUnit::Bytes, "語"), 3);
    }

    #[test]
    fn cut_never_splits_a_character() {
        assert_eq!(cut_text_to_fit(BudgetUnit::Bytes, "日本語", 7), "日本");
        assert_eq!(cut_text_to_fit(BudgetUnit::Bytes, "日本語", 2), "");
        assert_eq!(cut_text_to_fit(BudgetUnit::Characters, "日本語", 2), "日本");
    }

    #[test]
    fn cut_accounts_for_entity_expansion() {
        // "a&" is 1 + 5 encoded bytes; room for 5 keeps only "a".
        assert_eq!(cut_text_to_fit(BudgetUnit::Bytes, "a&b", 5), "a");
        assert_eq!(cut_text_to_fit(BudgetUnit::Bytes, "a&b", 6), "a&");
    }

    #[test]
    fn whole_text_survives_when_it_fits() {
        assert_eq!(cut_text_to_fit(BudgetUnit::Characters, "some", 9), "some");
    }

    #[test]
    fn entity_tails_cost_one_character() {
        assert_eq!(tail_cost(BudgetUnit::Characters, "&hellip;"), 1);
        assert_eq!(tail_cost(BudgetUnit::Characters, "..."), 3);
        assert_eq!(tail_cost(BudgetUnit::Bytes, "&hellip;"), 8);
    }
}
