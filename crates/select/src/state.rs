//! Render-facing control state.

use crate::source::Candidate;

/// The state a host renders from.
///
/// Owned exclusively by the control. Hosts read it through
/// [`SearchSelect::state`](crate::SearchSelect::state) and write only through
/// the control's operations; the invariants below hold between any two calls.
///
/// Invariants:
/// - `highlighted` is `None` or a valid index into `candidates`
/// - `is_loading` is true only while the most recently issued lookup is
///   outstanding
/// - `candidates` reflects the response to the most recent lookup; superseded
///   responses never land here, whatever order they arrive in
#[derive(Debug, Default)]
pub struct SelectState {
	/// Raw text currently in the input box.
	pub search_term: String,
	/// Committed selection, if any.
	pub selected_value: Option<String>,
	/// Label of the committed selection. `None` for a host-injected value
	/// whose label could not be resolved.
	pub selected_label: Option<String>,
	/// Latest accepted lookup result, in response order.
	pub candidates: Vec<Candidate>,
	/// True while the most recent lookup is outstanding.
	pub is_loading: bool,
	/// Whether the dropdown is shown.
	pub dropdown_open: bool,
	/// Highlighted candidate, if any.
	pub highlighted: Option<usize>,
	/// Scroll offset of the dropdown viewport.
	pub scroll_offset: usize,
	/// Set once the input has lost focus at least once.
	pub touched: bool,
}

impl SelectState {
	/// Maximum number of candidates visible in the dropdown at once.
	pub const MAX_VISIBLE: usize = 8;

	/// Ensures the highlighted candidate stays inside the viewport.
	pub fn ensure_highlight_visible(&mut self) {
		let Some(highlighted) = self.highlighted else {
			return;
		};
		if highlighted < self.scroll_offset {
			self.scroll_offset = highlighted;
		}
		let visible_end = self.scroll_offset + Self::MAX_VISIBLE;
		if highlighted >= visible_end {
			self.scroll_offset = highlighted.saturating_sub(Self::MAX_VISIBLE - 1);
		}
	}

	/// Returns the range of candidate indices the host should draw.
	pub fn visible_range(&self) -> std::ops::Range<usize> {
		let end = (self.scroll_offset + Self::MAX_VISIBLE).min(self.candidates.len());
		self.scroll_offset..end
	}

	/// Drops the current result set and everything positioned on it.
	pub(crate) fn reset_results(&mut self) {
		self.candidates.clear();
		self.highlighted = None;
		self.scroll_offset = 0;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state_with(len: usize) -> SelectState {
		SelectState {
			candidates: (0..len)
				.map(|i| Candidate::new(format!("v{i}"), format!("label {i}")))
				.collect(),
			..SelectState::default()
		}
	}

	#[test]
	fn viewport_follows_highlight_downwards() {
		let mut state = state_with(20);
		state.highlighted = Some(11);
		state.ensure_highlight_visible();
		assert_eq!(state.scroll_offset, 11 - (SelectState::MAX_VISIBLE - 1));
		assert!(state.visible_range().contains(&11));
	}

	#[test]
	fn viewport_follows_highlight_upwards() {
		let mut state = state_with(20);
		state.scroll_offset = 10;
		state.highlighted = Some(3);
		state.ensure_highlight_visible();
		assert_eq!(state.scroll_offset, 3);
		assert!(state.visible_range().contains(&3));
	}

	#[test]
	fn visible_range_clamps_to_candidate_count() {
		let state = state_with(3);
		assert_eq!(state.visible_range(), 0..3);
	}

	#[test]
	fn reset_results_clears_positioning() {
		let mut state = state_with(5);
		state.highlighted = Some(4);
		state.scroll_offset = 2;
		state.reset_results();
		assert!(state.candidates.is_empty());
		assert_eq!(state.highlighted, None);
		assert_eq!(state.scroll_offset, 0);
	}
}
