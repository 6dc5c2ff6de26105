//! Control configuration.

use std::time::Duration;

/// Tunables and display strings for a [`SearchSelect`](crate::SearchSelect).
///
/// Every field has a usable default; hosts override the ones they care about.
/// There are no invalid configurations, so construction cannot fail.
#[derive(Debug, Clone)]
pub struct SelectConfig {
	/// Minimum trimmed term length, in chars, before a non-empty search runs.
	/// Shorter terms clear the candidate list instead of searching.
	pub min_search_length: usize,
	/// Quiet period a keystroke burst must observe before a lookup fires.
	pub debounce_interval: Duration,
	/// Delay between input blur and dropdown close, so a click on an option
	/// that caused the blur still lands.
	pub blur_grace: Duration,
	/// Hint the host shows while the input is empty.
	pub placeholder: String,
	/// Dropdown text when a finished lookup matched nothing.
	pub no_results_text: String,
	/// Dropdown text while a lookup is outstanding.
	pub loading_text: String,
	/// Whether the host treats an empty committed value as invalid.
	pub required: bool,
}

impl Default for SelectConfig {
	fn default() -> Self {
		Self {
			min_search_length: 3,
			debounce_interval: Duration::from_millis(300),
			blur_grace: Duration::from_millis(200),
			placeholder: "Search...".to_string(),
			no_results_text: "No results found".to_string(),
			loading_text: "Searching...".to_string(),
			required: false,
		}
	}
}
