//! The control proper: host-facing surface and event application.
//!
//! Four concerns cooperate here:
//! - input/display state ([`SelectState`], the single source of render truth)
//! - the debounce scheduler (armed on every text change, true cancellation)
//! - the search executor (ticketed lookups, stale results discarded)
//! - the keyboard navigator ([`SelectKey`] handling, pointer parity)
//!
//! Synchronous handlers never suspend; the only suspension points are the
//! timers and the lookup itself, both of which report back as
//! [`SelectEvent`]s pumped through [`SearchSelect::apply`].

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::SelectConfig;
use crate::executor::{SearchExecutor, SelectEvent};
use crate::keys::{self, KeyAction, SelectKey};
use crate::source::{Candidate, CandidateSource};
use crate::state::SelectState;

type CommitFn = Box<dyn FnMut(Option<&Candidate>) + Send>;
type TouchedFn = Box<dyn FnMut() + Send>;

/// What the host should render below the input box.
#[derive(Debug, PartialEq, Eq)]
pub enum DropdownView<'a> {
	/// Dropdown is closed; render nothing.
	Hidden,
	/// A lookup is outstanding; render the configured loading text.
	Loading(&'a str),
	/// The latest lookup matched nothing; render the configured empty text.
	NoResults(&'a str),
	/// Candidates to draw. `window` is the visible slice, `offset` its first
	/// absolute index, `highlighted` the absolute highlighted index if any.
	Candidates {
		window: &'a [Candidate],
		offset: usize,
		highlighted: Option<usize>,
	},
}

/// Incremental search-select control over an injected [`CandidateSource`].
///
/// The control owns its state exclusively. Hosts feed it input events
/// (`on_text_changed`, `on_focus`, `on_blur`, `on_key`, `click`), pump its
/// async notifications (`next_event`/`poll_event` into [`apply`]), and read
/// the committed value through `value`/`label`. Programmatic writes go
/// through [`set_value`].
///
/// [`apply`]: SearchSelect::apply
/// [`set_value`]: SearchSelect::set_value
pub struct SearchSelect<S: CandidateSource + ?Sized> {
	config: SelectConfig,
	source: Arc<S>,
	state: SelectState,
	executor: SearchExecutor,
	events: mpsc::UnboundedReceiver<SelectEvent>,
	/// Bumped on every term write; pending debounce timers carry the revision
	/// they were armed under and are ignored on mismatch.
	input_revision: u64,
	/// Bumped on every blur and focus; a grace timer from a previous blur
	/// cannot close the dropdown.
	blur_epoch: u64,
	/// A pointer went down on an option; the next blur-close is suppressed.
	suppress_blur_close: bool,
	/// Host-injected value awaiting label resolution from a "show all" lookup.
	pending_resolve: Option<String>,
	on_commit: Option<CommitFn>,
	on_touched: Option<TouchedFn>,
}

impl<S: CandidateSource + ?Sized + 'static> SearchSelect<S> {
	/// Creates a control over the given source.
	///
	/// Must be called inside a Tokio runtime; timers and lookups are spawned
	/// onto it. The source is required here, so a missing fetch capability is
	/// a compile error rather than a runtime one.
	pub fn new(config: SelectConfig, source: Arc<S>) -> Self {
		let (tx, events) = mpsc::unbounded_channel();
		Self {
			config,
			source,
			state: SelectState::default(),
			executor: SearchExecutor::new(tx),
			events,
			input_revision: 0,
			blur_epoch: 0,
			suppress_blur_close: false,
			pending_resolve: None,
			on_commit: None,
			on_touched: None,
		}
	}

	/// Registers the host callback observed on every commit and clear.
	///
	/// Receives the committed candidate, or `None` when the selection is
	/// cleared by the user.
	pub fn set_on_commit(&mut self, notify: impl FnMut(Option<&Candidate>) + Send + 'static) {
		self.on_commit = Some(Box::new(notify));
	}

	/// Registers the host callback invoked when the input is blurred.
	pub fn set_on_touched(&mut self, notify: impl FnMut() + Send + 'static) {
		self.on_touched = Some(Box::new(notify));
	}

	/// Committed value, if any.
	pub fn value(&self) -> Option<&str> {
		self.state.selected_value.as_deref()
	}

	/// Label of the committed value, when known.
	pub fn label(&self) -> Option<&str> {
		self.state.selected_label.as_deref()
	}

	pub fn state(&self) -> &SelectState {
		&self.state
	}

	pub fn config(&self) -> &SelectConfig {
		&self.config
	}

	/// Hint for the empty input box.
	pub fn placeholder(&self) -> &str {
		&self.config.placeholder
	}

	/// True when a required control has been touched and still has no value.
	pub fn missing_required(&self) -> bool {
		self.config.required && self.state.touched && self.state.selected_value.is_none()
	}

	/// Host-driven programmatic write (e.g. when editing an existing record).
	///
	/// A non-null value with no cached matching label issues one lookup with
	/// an empty term to resolve it; if nothing matches, the value is honored
	/// with no label. A null value clears state without notifying the host,
	/// since the host initiated the write.
	pub fn set_value(&mut self, value: Option<&str>) {
		self.invalidate_typing();
		let Some(value) = value else {
			self.state.selected_value = None;
			self.state.selected_label = None;
			self.state.search_term.clear();
			self.pending_resolve = None;
			return;
		};

		self.state.selected_value = Some(value.to_string());
		if let Some(found) = self.state.candidates.iter().find(|c| c.value == value) {
			self.state.selected_label = Some(found.label.clone());
			self.state.search_term = found.label.clone();
			self.pending_resolve = None;
		} else {
			self.pending_resolve = Some(value.to_string());
			self.begin_search(String::new());
		}
	}

	/// User-driven clear: resets value, label, term and results, closes the
	/// dropdown, and notifies the host with `None`.
	pub fn clear_selection(&mut self) {
		self.invalidate_typing();
		self.state.selected_value = None;
		self.state.selected_label = None;
		self.state.search_term.clear();
		self.state.reset_results();
		self.state.dropdown_open = false;
		self.pending_resolve = None;
		if let Some(notify) = self.on_commit.as_mut() {
			notify(None);
		}
	}

	/// The input text changed. Opens the dropdown, resets the highlight and
	/// arms the debounce scheduler; no lookup happens synchronously.
	pub fn on_text_changed(&mut self, text: &str) {
		self.state.search_term = text.to_string();
		self.state.dropdown_open = true;
		self.state.highlighted = None;
		self.pending_resolve = None;
		self.input_revision = self.input_revision.wrapping_add(1);
		self.executor
			.arm_debounce(self.input_revision, self.config.debounce_interval);
	}

	/// The input gained focus. Opens the dropdown when the term is empty or
	/// long enough to have produced results, and cancels a pending blur-close.
	pub fn on_focus(&mut self) {
		self.executor.cancel_blur();
		self.blur_epoch = self.blur_epoch.wrapping_add(1);
		let term_len = self.state.search_term.chars().count();
		if self.state.search_term.is_empty() || term_len >= self.config.min_search_length {
			self.state.dropdown_open = true;
		}
	}

	/// The input lost focus. Marks the control touched and schedules the
	/// dropdown close after the grace delay, so a click on an option that
	/// caused the blur still lands.
	pub fn on_blur(&mut self) {
		self.state.touched = true;
		if let Some(notify) = self.on_touched.as_mut() {
			notify();
		}
		self.blur_epoch = self.blur_epoch.wrapping_add(1);
		self.executor.arm_blur(self.blur_epoch, self.config.blur_grace);
	}

	/// A pointer went down on a dropdown option. The next blur-close is
	/// suppressed so the click cannot lose the race against the grace timer.
	pub fn note_pointer_down(&mut self) {
		self.suppress_blur_close = true;
	}

	/// Keyboard navigation. The host must suppress its framework's default
	/// handling for every key it forwards here.
	pub fn on_key(&mut self, key: SelectKey) {
		let action = keys::decide(
			key,
			self.state.dropdown_open,
			self.state.highlighted,
			self.state.candidates.len(),
		);
		match action {
			KeyAction::Open => self.state.dropdown_open = true,
			KeyAction::Highlight(index) => {
				self.state.highlighted = Some(index);
				self.state.ensure_highlight_visible();
			}
			KeyAction::Commit(index) => self.commit(index),
			KeyAction::Close => self.state.dropdown_open = false,
			KeyAction::Ignore => {}
		}
	}

	/// Pointer selection of the candidate at `index`. Shares the commit path
	/// with [`SelectKey::Enter`].
	pub fn click(&mut self, index: usize) {
		self.commit(index);
	}

	/// Waits for the next notification from a timer or lookup task.
	///
	/// Returns `None` only if the internal channel closed, which cannot
	/// happen while the control is alive.
	pub async fn next_event(&mut self) -> Option<SelectEvent> {
		self.events.recv().await
	}

	/// Non-blocking variant of [`Self::next_event`].
	pub fn poll_event(&mut self) -> Option<SelectEvent> {
		self.events.try_recv().ok()
	}

	/// Applies every notification that is already ready. Returns how many.
	pub fn drain_ready(&mut self) -> usize {
		let mut applied = 0;
		while let Some(event) = self.poll_event() {
			self.apply(event);
			applied += 1;
		}
		applied
	}

	/// Applies one notification to the state.
	pub fn apply(&mut self, event: SelectEvent) {
		match event {
			SelectEvent::DebounceElapsed { revision } => {
				if revision != self.input_revision {
					// superseded by later typing or a programmatic write
					return;
				}
				self.run_search();
			}
			SelectEvent::SearchResolved { ticket, outcome } => self.apply_search(ticket, outcome),
			SelectEvent::BlurElapsed { epoch } => {
				if epoch != self.blur_epoch {
					return;
				}
				if std::mem::take(&mut self.suppress_blur_close) {
					// a pointer is mid-click on an option
					return;
				}
				self.state.dropdown_open = false;
			}
		}
	}

	/// Projects what the host should render below the input box.
	pub fn dropdown_view(&self) -> DropdownView<'_> {
		if !self.state.dropdown_open {
			return DropdownView::Hidden;
		}
		if self.state.is_loading {
			return DropdownView::Loading(&self.config.loading_text);
		}
		if self.state.candidates.is_empty() {
			return DropdownView::NoResults(&self.config.no_results_text);
		}
		let range = self.state.visible_range();
		let offset = range.start;
		DropdownView::Candidates {
			window: &self.state.candidates[range],
			offset,
			highlighted: self.state.highlighted,
		}
	}

	/// Evaluates the trimmed term once the quiet period has elapsed.
	fn run_search(&mut self) {
		let term = self.state.search_term.trim().to_string();
		let term_len = term.chars().count();
		if term_len > 0 && term_len < self.config.min_search_length {
			// too short to search; the empty term stays a real lookup
			self.state.reset_results();
			self.state.is_loading = false;
			return;
		}
		self.begin_search(term);
	}

	/// Issues a ticketed lookup: loading set and stale candidates dropped
	/// before the source is called, so an older result set is never shown
	/// while a newer search is pending.
	fn begin_search(&mut self, term: String) {
		self.state.is_loading = true;
		self.state.reset_results();
		self.executor.begin_search(Arc::clone(&self.source), term);
	}

	fn apply_search(&mut self, ticket: u64, outcome: anyhow::Result<Vec<Candidate>>) {
		let current = self.executor.generation();
		match outcome {
			Ok(candidates) => {
				if ticket != current {
					// a newer lookup owns the loading flag; drop this silently
					tracing::trace!(ticket, current, "discarding superseded lookup result");
					return;
				}
				self.install(candidates);
			}
			Err(error) => {
				tracing::warn!(ticket, error = %error, "candidate lookup failed");
				if ticket == current {
					self.state.reset_results();
					self.state.is_loading = false;
				}
			}
		}
	}

	/// Installs the current lookup's result and settles any pending
	/// programmatic value against it.
	fn install(&mut self, candidates: Vec<Candidate>) {
		self.state.candidates = candidates;
		self.state.is_loading = false;
		self.state.highlighted = None;
		self.state.scroll_offset = 0;
		if let Some(wanted) = self.pending_resolve.take() {
			match self.state.candidates.iter().find(|c| c.value == wanted) {
				Some(found) => {
					self.state.selected_label = Some(found.label.clone());
					self.state.search_term = found.label.clone();
				}
				None => {
					tracing::debug!(value = %wanted, "no candidate matched the programmatic value");
				}
			}
		}
	}

	/// Shared commit path for keyboard and pointer selection.
	fn commit(&mut self, index: usize) {
		let Some(chosen) = self.state.candidates.get(index).cloned() else {
			return;
		};
		self.invalidate_typing();
		self.state.selected_value = Some(chosen.value.clone());
		self.state.selected_label = Some(chosen.label.clone());
		self.state.search_term = chosen.label.clone();
		self.state.dropdown_open = false;
		self.pending_resolve = None;
		self.suppress_blur_close = false;
		if let Some(notify) = self.on_commit.as_mut() {
			notify(Some(&chosen));
		}
	}

	/// Any programmatic term write invalidates pending keystroke handling:
	/// the armed timer is cancelled and its revision retired.
	fn invalidate_typing(&mut self) {
		self.input_revision = self.input_revision.wrapping_add(1);
		self.executor.cancel_debounce();
	}
}
