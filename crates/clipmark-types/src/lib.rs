//! Shared types for the clipmark truncation engine.
//!
//! This crate provides the foundational types used across the other clipmark
//! crates:
//! - `ClipmarkError` — unified error taxonomy
//! - `TruncateOptions` — user-facing options, serializable with serde
//! - `TruncationConfig` — resolved, immutable per-call configuration

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Unified error type for all clipmark subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ClipmarkError {
    // === Configuration Errors ===
    #[error("byte budgets require count_tags: tag markup must be counted for byte accounting to be exact")]
    ByteBudgetWithoutTagCount,

    #[error("byte budgets require count_tail: the tail must be counted for byte accounting to be exact")]
    ByteBudgetWithoutTailCount,

    // === Parser Collaborator Errors ===
    #[error("event source failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipmarkError {
    /// Returns `true` for errors caused by an invalid option combination,
    /// which are reported before any parsing happens.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ClipmarkError::ByteBudgetWithoutTagCount | ClipmarkError::ByteBudgetWithoutTailCount
        )
    }
}

/// A convenience alias for `Result<T, ClipmarkError>`.
pub type Result<T> = std::result::Result<T, ClipmarkError>;

// ---------------------------------------------------------------------------
// BudgetUnit — character vs. byte accounting
// ---------------------------------------------------------------------------

/// The unit a budget is measured in.
///
/// Character budgets count decoded characters (a named entity in the output
/// reads as one character); byte budgets count encoded output bytes and must
/// never split a multi-byte character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetUnit {
    Characters,
    Bytes,
}

// ---------------------------------------------------------------------------
// TruncateOptions — the user-facing option surface
// ---------------------------------------------------------------------------

/// Default character budget.
pub const DEFAULT_MAX_LENGTH: usize = 30;

/// Default truncation marker.
pub const DEFAULT_TAIL: &str = "...";

/// User-facing truncation options.
///
/// Every field has a default, so a partial JSON document deserializes
/// cleanly and `TruncateOptions::default()` matches the character-budget
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateOptions {
    /// Character budget. Ignored when `max_bytes` is set.
    pub max_length: usize,

    /// Byte budget. Setting this switches the whole call to byte accounting.
    pub max_bytes: Option<usize>,

    /// Marker inserted where content was cut.
    pub tail: String,

    /// Whether tag markup consumes budget.
    pub count_tags: bool,

    /// Whether the tail's own cost is reserved from the budget in advance.
    /// Defaults to `false` for character budgets and `true` for byte budgets.
    pub count_tail: Option<bool>,

    /// Place the tail before the innermost closing tag instead of after all
    /// forced closings.
    pub tail_before_final_tag: bool,

    /// Attribute names omitted from the output.
    pub filtered_attributes: Vec<String>,

    /// Element names whose entire subtree is dropped from output and budget.
    pub filtered_tags: Vec<String>,

    /// Whether comments are preserved.
    pub comments: bool,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_bytes: None,
            tail: DEFAULT_TAIL.to_string(),
            count_tags: true,
            count_tail: None,
            tail_before_final_tag: false,
            filtered_attributes: Vec::new(),
            filtered_tags: Vec::new(),
            comments: false,
        }
    }
}

impl TruncateOptions {
    /// Resolve the per-unit defaults into an immutable configuration.
    ///
    /// `max_bytes` wins over `max_length` when both are set, and flips the
    /// `count_tail` default to `true`.
    pub fn resolve(&self) -> TruncationConfig {
        let (unit, max) = match self.max_bytes {
            Some(max) => (BudgetUnit::Bytes, max),
            None => (BudgetUnit::Characters, self.max_length),
        };
        TruncationConfig {
            budget: Budget {
                max,
                unit,
                count_tags: self.count_tags,
            },
            tail: TailPolicy {
                marker: self.tail.clone(),
                count_tail: self.count_tail.unwrap_or(unit == BudgetUnit::Bytes),
                before_final_tag: self.tail_before_final_tag,
            },
            filters: FilterSet {
                attributes: self.filtered_attributes.iter().cloned().collect(),
                tags: self.filtered_tags.iter().cloned().collect(),
            },
            comments: self.comments,
        }
    }
}

// ---------------------------------------------------------------------------
// TruncationConfig — resolved, immutable per-call configuration
// ---------------------------------------------------------------------------

/// The length budget: a maximum, its unit, and whether markup counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub max: usize,
    pub unit: BudgetUnit,
    pub count_tags: bool,
}

/// Where and how the truncation marker is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailPolicy {
    pub marker: String,
    pub count_tail: bool,
    pub before_final_tag: bool,
}

/// Names filtered out of the output entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub attributes: HashSet<String>,
    pub tags: HashSet<String>,
}

/// Everything one truncation call needs, resolved once up front.
#[derive(Debug, Clone)]
pub struct TruncationConfig {
    pub budget: Budget,
    pub tail: TailPolicy,
    pub filters: FilterSet,
    pub comments: bool,
}
