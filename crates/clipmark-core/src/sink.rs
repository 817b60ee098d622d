//! The truncation state machine.
//!
//! [`TruncationSink`] consumes one markup event stream, spending a length
//! budget as it buffers output. Once the budget is exhausted it flips to a
//! truncated state that suppresses all further structural events; the final
//! `on_end` event then force-closes every element still open and places the
//! tail marker.

use tracing::trace;

use clipmark_markup::{entities, tags, Attribute, MarkupSink};
use clipmark_types::{BudgetUnit, ClipmarkError, Result, TruncationConfig};

use crate::cost;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// State machine for one truncation pass.
///
/// Feed it events through the [`MarkupSink`] impl, then take the buffered
/// output with [`into_output`](TruncationSink::into_output). An empty output
/// means the pass found nothing renderable.
pub struct TruncationSink {
    config: TruncationConfig,
    out: String,
    consumed: usize,
    /// Budget exhausted; only forced closure may still write structure.
    truncated: bool,
    /// Some content was cut or lost, so the tail is owed.
    content_cut: bool,
    tail_written: bool,
    /// Elements currently open in the output, innermost last.
    open_tags: Vec<String>,
    /// Nesting depth of filtered-tag subtrees.
    ignored_levels: usize,
    /// Nesting depth below an element whose opening tag did not fit.
    skipped_levels: usize,
}

impl TruncationSink {
    /// Build a sink for one pass.
    ///
    /// Byte budgets are only exact when every contributor to output length
    /// is counted, so they require both `count_tags` and `count_tail`.
    pub fn new(config: TruncationConfig) -> Result<Self> {
        if config.budget.unit == BudgetUnit::Bytes {
            if !config.budget.count_tags {
                return Err(ClipmarkError::ByteBudgetWithoutTagCount);
            }
            if !config.tail.count_tail {
                return Err(ClipmarkError::ByteBudgetWithoutTailCount);
            }
        }
        Ok(Self {
            config,
            out: String::new(),
            consumed: 0,
            truncated: false,
            content_cut: false,
            tail_written: false,
            open_tags: Vec::new(),
            ignored_levels: 0,
            skipped_levels: 0,
        })
    }

    /// The accumulated output.
    pub fn into_output(self) -> String {
        self.out
    }

    fn unit(&self) -> BudgetUnit {
        self.config.budget.unit
    }

    fn remaining(&self) -> usize {
        self.config.budget.max.saturating_sub(self.consumed)
    }

    fn charge(&mut self, amount: usize) {
        self.consumed += amount;
        if self.consumed >= self.config.budget.max {
            self.truncated = true;
        }
    }

    /// Cost the tail will claim from the budget, zero when it is not counted.
    fn tail_reserve(&self) -> usize {
        if self.config.tail.count_tail {
            cost::tail_cost(self.unit(), &self.config.tail.marker)
        } else {
            0
        }
    }

    /// Write the tail marker. Under a counted tail the marker only lands
    /// when its reserved cost actually fits, keeping exact budgets exact.
    fn append_tail(&mut self) {
        if self.config.tail.count_tail {
            let reserve = self.tail_reserve();
            if reserve > self.remaining() {
                trace!("no room left for the tail marker");
                return;
            }
            self.charge(reserve);
        }
        self.out.push_str(&self.config.tail.marker);
        self.tail_written = true;
    }

    fn render_open_tag(&self, name: &str, attributes: &[Attribute], is_void: bool) -> String {
        let mut tag = String::with_capacity(name.len() + 2);
        tag.push('<');
        tag.push_str(name);
        for attr in attributes {
            if self.config.filters.attributes.contains(attr.name.as_str()) {
                continue;
            }
            tag.push(' ');
            tag.push_str(&attr.name);
            tag.push_str("='");
            tag.push_str(&entities::encode_attribute(&attr.value));
            tag.push('\'');
        }
        if is_void {
            tag.push('/');
        }
        tag.push('>');
        tag
    }

    fn render_close_tag(name: &str) -> String {
        format!("</{name}>")
    }

    /// Budget cost of emitting this opening tag now.
    ///
    /// When the tail is counted, the eventual closing tag is pre-charged
    /// here too, so the forced closure at the end can never blow an exact
    /// budget; the close is then emitted at zero cost.
    fn open_cost(&self, name: &str, rendered: &str, is_void: bool) -> usize {
        if !self.config.budget.count_tags {
            return 0;
        }
        let mut total = cost::markup_cost(self.unit(), rendered);
        if self.config.tail.count_tail && !is_void {
            total += cost::markup_cost(self.unit(), &Self::render_close_tag(name));
        }
        total
    }

    /// Closing tags cost nothing when they were pre-charged at open time.
    fn close_cost(&self, rendered: &str) -> usize {
        if self.config.budget.count_tags && !self.config.tail.count_tail {
            cost::markup_cost(self.unit(), rendered)
        } else {
            0
        }
    }
}

impl MarkupSink for TruncationSink {
    fn on_open(&mut self, name: &str, attributes: &[Attribute]) {
        if self.config.filters.tags.contains(name) {
            self.ignored_levels += 1;
            return;
        }
        if self.truncated || tags::is_structural_element(name) || self.ignored_levels > 0 {
            return;
        }
        let is_void = tags::is_void_element(name);
        if self.skipped_levels > 0 {
            if !is_void {
                self.skipped_levels += 1;
            }
            return;
        }

        let rendered = self.render_open_tag(name, attributes, is_void);
        let open_cost = self.open_cost(name, &rendered, is_void);
        if open_cost > self.remaining() {
            // Markup is never cut mid-tag: a tag that does not fit drops the
            // whole element, and trailing siblings still get a chance at the
            // remaining budget. No truncation flag, no tail.
            trace!(name, open_cost, remaining = self.remaining(), "dropping element that does not fit");
            if !is_void {
                self.skipped_levels = 1;
            }
            return;
        }
        self.out.push_str(&rendered);
        self.charge(open_cost);
        if !is_void {
            self.open_tags.push(name.to_string());
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.truncated {
            // Content past the cut point is definitely lost.
            self.content_cut = true;
            return;
        }
        if self.ignored_levels > 0 || self.skipped_levels > 0 {
            return;
        }
        let full_cost = cost::text_cost(self.unit(), text);
        if full_cost <= self.remaining() {
            self.out.push_str(&entities::encode_text(text));
            self.charge(full_cost);
            return;
        }

        let room = self.remaining().saturating_sub(self.tail_reserve());
        let kept = cost::cut_text_to_fit(self.unit(), text, room);
        let kept_cost = cost::text_cost(self.unit(), kept);
        trace!(room, kept_cost, "cutting text node");
        self.out.push_str(&entities::encode_text(kept));
        self.content_cut = true;
        self.charge(kept_cost);
        if !self.config.tail.before_final_tag {
            self.append_tail();
        }
        self.truncated = true;
    }

    fn on_comment(&mut self, text: &str) {
        // Comments deliberately bypass filtered- and dropped-subtree
        // suppression; only the preserve flag and the truncated state gate
        // them.
        if !self.config.comments || self.truncated {
            return;
        }
        let overhead = cost::markup_cost(self.unit(), COMMENT_OPEN)
            + cost::markup_cost(self.unit(), COMMENT_CLOSE);
        let full_cost = overhead + cost::markup_cost(self.unit(), text);
        if full_cost <= self.remaining() {
            self.out.push_str(COMMENT_OPEN);
            self.out.push_str(text);
            self.out.push_str(COMMENT_CLOSE);
            self.charge(full_cost);
            return;
        }

        // Cut the inner content after reserving the delimiters and the tail.
        let inline_tail = !self.config.tail.before_final_tag;
        let tail_room = if inline_tail || self.config.tail.count_tail {
            cost::tail_cost(self.unit(), &self.config.tail.marker)
        } else {
            0
        };
        if self.config.tail.count_tail && overhead + tail_room > self.remaining() {
            // An exact budget has no room even for the skeleton: the comment
            // is dropped whole, like a tag that does not fit.
            trace!("dropping comment that does not fit an exact budget");
            return;
        }
        let room = self.remaining().saturating_sub(overhead + tail_room);
        let kept = cost::cut_markup_to_fit(self.unit(), text, room);
        self.out.push_str(COMMENT_OPEN);
        self.out.push_str(kept);
        let mut spent = overhead + cost::markup_cost(self.unit(), kept);
        if inline_tail {
            self.out.push_str(&self.config.tail.marker);
            self.tail_written = true;
            spent += self.tail_reserve();
        }
        self.out.push_str(COMMENT_CLOSE);
        self.content_cut = true;
        self.charge(spent);
        self.truncated = true;
    }

    fn on_close(&mut self, name: &str) {
        if self.config.filters.tags.contains(name) && self.ignored_levels > 0 {
            self.ignored_levels -= 1;
            return;
        }
        if self.truncated || tags::is_structural_element(name) || self.ignored_levels > 0 {
            return;
        }
        let is_void = tags::is_void_element(name);
        if self.skipped_levels > 0 {
            if !is_void {
                self.skipped_levels -= 1;
            }
            return;
        }
        if is_void {
            // Rendered self-closing at open time, never pushed.
            return;
        }
        let rendered = Self::render_close_tag(name);
        self.open_tags.pop();
        self.out.push_str(&rendered);
        let close_cost = self.close_cost(&rendered);
        self.charge(close_cost);
    }

    fn on_end(&mut self) {
        if !self.truncated {
            return;
        }
        trace!(open = self.open_tags.len(), "forcing closure of open elements");
        if self.config.tail.before_final_tag {
            if let Some(name) = self.open_tags.pop() {
                self.out.push_str(&Self::render_close_tag(&name));
            }
        }
        if self.content_cut && !self.tail_written {
            self.append_tail();
        }
        while let Some(name) = self.open_tags.pop() {
            self.out.push_str(&Self::render_close_tag(&name));
        }
    }
}
