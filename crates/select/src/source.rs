//! The candidate supply boundary.
//!
//! The control never performs I/O itself; the host injects an async capability
//! that maps a search term to candidates. Everything the control knows about
//! the outside world goes through [`CandidateSource`].

use async_trait::async_trait;

/// A single selectable candidate: an opaque identifier plus its display text.
///
/// `value` is assumed unique within one result set; nothing enforces global
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	/// Opaque identifier reported to the host on commit.
	pub value: String,
	/// Human-readable text shown in the dropdown and the input box.
	pub label: String,
}

impl Candidate {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
		}
	}
}

/// Asynchronous candidate lookup, supplied by the host.
///
/// The control may call this with overlapping terms and discards superseded
/// responses itself, so implementations need no cancellation support. An empty
/// term means "show all" and returns whatever full set the host is willing to
/// offer; it is a real lookup, never a no-op. Timeout and retry policy belong
/// to the implementation, not the control.
///
/// Failures are opaque to the control: it logs them and renders the no-results
/// state, never an error surface of its own.
#[async_trait]
pub trait CandidateSource: Send + Sync {
	async fn fetch(&self, term: &str) -> anyhow::Result<Vec<Candidate>>;
}
