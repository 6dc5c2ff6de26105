//! Headless incremental search-select ("autocomplete") control.
//!
//! Goals:
//! - coalesce keystroke bursts into at most one candidate lookup per quiet period
//! - never let a superseded lookup overwrite a newer one (sequence ticketing)
//! - keyboard-only selection parity with pointer selection
//! - host form integration (get/set/commit/touched) without knowing the UI framework
//!
//! The control performs no I/O of its own: candidates come from an injected
//! [`CandidateSource`]. Timers and lookups run as Tokio tasks that report back
//! through [`SelectEvent`]s; the host's event loop pumps those into
//! [`SearchSelect::apply`], so every state mutation happens on one thread.

pub mod config;
pub mod control;
pub mod keys;
pub mod source;
pub mod state;

mod executor;

pub use config::SelectConfig;
pub use control::{DropdownView, SearchSelect};
pub use executor::SelectEvent;
pub use keys::SelectKey;
pub use source::{Candidate, CandidateSource};
pub use state::SelectState;
