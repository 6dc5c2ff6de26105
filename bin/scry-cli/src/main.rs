//! Line-driven terminal host for the search-select control.
//!
//! Wires a [`SearchSelect`] to a canned city directory behind an artificial
//! latency, so the whole surface (debounced lookups, stale-result handling,
//! keyboard navigation, blur grace, programmatic writes) can be exercised
//! interactively. One command per line; `help` lists them.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use scry_select::{Candidate, CandidateSource, DropdownView, SearchSelect, SelectConfig, SelectEvent, SelectKey};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "scry", about = "Interactive demo of the incremental search-select control")]
struct Args {
	/// Quiet period before a lookup fires, in milliseconds.
	#[arg(long, default_value_t = 300)]
	debounce_ms: u64,
	/// Minimum term length before a non-empty search runs.
	#[arg(long, default_value_t = 3)]
	min_search_length: usize,
	/// Artificial lookup latency, in milliseconds.
	#[arg(long, default_value_t = 150)]
	latency_ms: u64,
	/// Treat an empty committed value as invalid.
	#[arg(long)]
	required: bool,
}

/// In-memory stand-in for the host application's REST lookup.
struct CityDirectory {
	latency: Duration,
	entries: Vec<Candidate>,
}

impl CityDirectory {
	fn new(latency: Duration) -> Self {
		let entries = [
			("AMS", "Amsterdam"),
			("BCN", "Barcelona"),
			("BER", "Berlin"),
			("BGO", "Bergen"),
			("BRE", "Bremen"),
			("BRN", "Bern"),
			("BRU", "Brussels"),
			("GVA", "Geneva"),
			("HAM", "Hamburg"),
			("LIS", "Lisbon"),
			("LYS", "Lyon"),
			("MAD", "Madrid"),
			("MUC", "Munich"),
			("OSL", "Oslo"),
			("PAR", "Paris"),
			("PRG", "Prague"),
			("VIE", "Vienna"),
			("ZRH", "Zurich"),
		]
		.into_iter()
		.map(|(value, label)| Candidate::new(value, label))
		.collect();
		Self { latency, entries }
	}
}

#[async_trait]
impl CandidateSource for CityDirectory {
	async fn fetch(&self, term: &str) -> Result<Vec<Candidate>> {
		tokio::time::sleep(self.latency).await;
		let needle = term.to_lowercase();
		Ok(self
			.entries
			.iter()
			.filter(|candidate| candidate.label.to_lowercase().contains(&needle))
			.cloned()
			.collect())
	}
}

enum Step {
	Line(Option<String>),
	Event(Option<SelectEvent>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.init();
	let args = Args::parse();

	let config = SelectConfig {
		min_search_length: args.min_search_length,
		debounce_interval: Duration::from_millis(args.debounce_ms),
		required: args.required,
		..SelectConfig::default()
	};
	let source = Arc::new(CityDirectory::new(Duration::from_millis(args.latency_ms)));
	let mut control = SearchSelect::new(config, source);
	control.set_on_commit(|candidate| match candidate {
		Some(candidate) => println!("=> committed {} ({})", candidate.label, candidate.value),
		None => println!("=> cleared"),
	});
	tracing::info!(
		debounce_ms = args.debounce_ms,
		min_search_length = args.min_search_length,
		latency_ms = args.latency_ms,
		"control ready"
	);

	print_help();
	render(&control);

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	loop {
		let step = tokio::select! {
			line = lines.next_line() => Step::Line(line?),
			event = control.next_event() => Step::Event(event),
		};
		match step {
			Step::Line(None) => break,
			Step::Line(Some(line)) => {
				if !handle_command(&mut control, line.trim()) {
					break;
				}
				render(&control);
			}
			Step::Event(event) => {
				if let Some(event) = event {
					control.apply(event);
				}
				control.drain_ready();
				render(&control);
			}
		}
	}
	Ok(())
}

fn handle_command(control: &mut SearchSelect<CityDirectory>, line: &str) -> bool {
	let (command, rest) = match line.split_once(' ') {
		Some((command, rest)) => (command, rest.trim()),
		None => (line, ""),
	};
	match command {
		"t" | "type" => control.on_text_changed(rest),
		"f" | "focus" => control.on_focus(),
		"b" | "blur" => control.on_blur(),
		"p" | "press" => match rest {
			"down" => control.on_key(SelectKey::Down),
			"up" => control.on_key(SelectKey::Up),
			"enter" => control.on_key(SelectKey::Enter),
			"esc" => control.on_key(SelectKey::Escape),
			other => println!("unknown key: {other} (down, up, enter, esc)"),
		},
		"c" | "click" => match rest.parse::<usize>() {
			Ok(index) => {
				control.note_pointer_down();
				control.click(index);
			}
			Err(_) => println!("usage: click <index>"),
		},
		"v" | "value" => {
			if rest == "-" {
				control.set_value(None);
			} else {
				control.set_value(Some(rest));
			}
		}
		"x" | "clear" => control.clear_selection(),
		"s" | "state" => {}
		"h" | "help" => print_help(),
		"q" | "quit" => return false,
		"" => {}
		other => println!("unknown command: {other} (h for help)"),
	}
	true
}

fn render(control: &SearchSelect<CityDirectory>) {
	let state = control.state();
	let input = if state.search_term.is_empty() {
		format!("({})", control.placeholder())
	} else {
		state.search_term.clone()
	};
	let required = if control.missing_required() { "  [required]" } else { "" };
	println!(
		"input: {input}   value: {}   label: {}{required}",
		control.value().unwrap_or("-"),
		control.label().unwrap_or("-"),
	);
	match control.dropdown_view() {
		DropdownView::Hidden => {}
		DropdownView::Loading(text) => println!("  {text}"),
		DropdownView::NoResults(text) => println!("  {text}"),
		DropdownView::Candidates {
			window,
			offset,
			highlighted,
		} => {
			for (position, candidate) in window.iter().enumerate() {
				let index = offset + position;
				let marker = if highlighted == Some(index) { ">" } else { " " };
				println!("  {marker} [{index}] {}  {}", candidate.label, candidate.value);
			}
		}
	}
}

fn print_help() {
	println!("commands:");
	println!("  t <text>   type into the input (t alone clears the text)");
	println!("  f / b      focus / blur the input");
	println!("  p <key>    press down, up, enter or esc");
	println!("  c <index>  click the candidate at index");
	println!("  v <value>  set the value programmatically (v - clears it)");
	println!("  x          clear the selection");
	println!("  s          reprint the current state");
	println!("  q          quit");
}
