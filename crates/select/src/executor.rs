//! Timer arming and ticketed candidate lookups.
//!
//! Timers support true cancellation: a superseded debounce or blur timer is
//! cancelled outright. Lookups are not cancelled; one that loses the race is
//! discarded by ticket comparison in
//! [`SearchSelect::apply`](crate::SearchSelect::apply), so the source needs no
//! abort support.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::source::{Candidate, CandidateSource};

/// Notifications delivered back to the control from its spawned tasks.
///
/// Each variant carries the counter value it was issued under; the control
/// ignores anything that no longer matches the current counter.
#[derive(Debug)]
pub enum SelectEvent {
	/// The debounce quiet period elapsed for this input revision.
	DebounceElapsed { revision: u64 },
	/// A candidate lookup resolved.
	SearchResolved {
		ticket: u64,
		outcome: anyhow::Result<Vec<Candidate>>,
	},
	/// The blur grace delay elapsed for this blur.
	BlurElapsed { epoch: u64 },
}

/// Owns the lookup sequence counter and the cancellable timers.
pub(crate) struct SearchExecutor {
	tx: mpsc::UnboundedSender<SelectEvent>,
	generation: u64,
	debounce: Option<CancellationToken>,
	blur: Option<CancellationToken>,
}

impl SearchExecutor {
	pub(crate) fn new(tx: mpsc::UnboundedSender<SelectEvent>) -> Self {
		Self {
			tx,
			generation: 0,
			debounce: None,
			blur: None,
		}
	}

	/// Ticket of the most recently issued lookup.
	pub(crate) fn generation(&self) -> u64 {
		self.generation
	}

	/// Arms the debounce timer, cancelling any pending one.
	pub(crate) fn arm_debounce(&mut self, revision: u64, quiet: Duration) {
		self.cancel_debounce();
		let cancel = CancellationToken::new();
		self.debounce = Some(cancel.clone());
		let tx = self.tx.clone();
		tokio::spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => return,
				_ = sleep(quiet) => {}
			}
			let _ = tx.send(SelectEvent::DebounceElapsed { revision });
		});
	}

	pub(crate) fn cancel_debounce(&mut self) {
		if let Some(pending) = self.debounce.take() {
			pending.cancel();
		}
	}

	/// Arms the blur grace timer, cancelling any pending one.
	pub(crate) fn arm_blur(&mut self, epoch: u64, grace: Duration) {
		self.cancel_blur();
		let cancel = CancellationToken::new();
		self.blur = Some(cancel.clone());
		let tx = self.tx.clone();
		tokio::spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => return,
				_ = sleep(grace) => {}
			}
			let _ = tx.send(SelectEvent::BlurElapsed { epoch });
		});
	}

	pub(crate) fn cancel_blur(&mut self) {
		if let Some(pending) = self.blur.take() {
			pending.cancel();
		}
	}

	/// Issues a lookup tagged with a fresh ticket.
	///
	/// The ticket is compared against [`Self::generation`] when the result
	/// arrives; only the newest lookup may land.
	pub(crate) fn begin_search<S>(&mut self, source: Arc<S>, term: String) -> u64
	where
		S: CandidateSource + ?Sized + 'static,
	{
		self.generation = self.generation.wrapping_add(1);
		let ticket = self.generation;
		tracing::debug!(ticket, term = %term, "candidate lookup issued");
		let tx = self.tx.clone();
		tokio::spawn(async move {
			let outcome = source.fetch(&term).await;
			let _ = tx.send(SelectEvent::SearchResolved { ticket, outcome });
		});
		ticket
	}
}
