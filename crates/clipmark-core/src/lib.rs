//! Budget-aware truncation of HTML/XML fragments that keeps the output
//! well-formed: every opened tag that survives truncation is closed, a
//! configurable tail marker shows where content was cut, and filtering
//! policies shape what counts against the budget.
//!
//! # Example
//! ```
//! use clipmark_types::TruncateOptions;
//!
//! let options = TruncateOptions { max_length: 4, ..Default::default() };
//! let out = clipmark_core::truncate("<p>some text</p>", &options).unwrap();
//! assert_eq!(out, "<p>s...</p>");
//! ```

mod cost;
mod fallback;
mod sink;
mod truncate;

pub use fallback::truncate_plain;
pub use sink::TruncationSink;
pub use truncate::truncate;
