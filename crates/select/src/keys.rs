//! Keyboard-only interaction.
//!
//! The host maps its framework's key events onto [`SelectKey`] and suppresses
//! default handling (caret movement, form submit, scrolling) for any key it
//! forwards. Navigation decisions are pure; state changes happen in
//! [`SearchSelect::on_key`](crate::SearchSelect::on_key).

/// Keys the control understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
	Down,
	Up,
	Enter,
	Escape,
}

/// What a key press should do to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
	Open,
	Highlight(usize),
	Commit(usize),
	Close,
	Ignore,
}

/// Pure navigation decision over the current dropdown shape.
pub(crate) fn decide(key: SelectKey, open: bool, highlighted: Option<usize>, len: usize) -> KeyAction {
	match key {
		SelectKey::Down if !open => KeyAction::Open,
		SelectKey::Down => {
			if len == 0 {
				return KeyAction::Ignore;
			}
			let next = match highlighted {
				Some(index) => (index + 1).min(len - 1),
				None => 0,
			};
			KeyAction::Highlight(next)
		}
		SelectKey::Up => match highlighted {
			Some(index) if open => KeyAction::Highlight(index.saturating_sub(1)),
			_ => KeyAction::Ignore,
		},
		SelectKey::Enter => match highlighted {
			Some(index) if open && index < len => KeyAction::Commit(index),
			_ => KeyAction::Ignore,
		},
		SelectKey::Escape if open => KeyAction::Close,
		SelectKey::Escape => KeyAction::Ignore,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn down_opens_a_closed_dropdown() {
		assert_eq!(decide(SelectKey::Down, false, None, 3), KeyAction::Open);
	}

	#[test]
	fn down_enters_the_list_from_no_highlight() {
		assert_eq!(decide(SelectKey::Down, true, None, 3), KeyAction::Highlight(0));
	}

	#[test]
	fn down_sticks_at_the_last_index() {
		assert_eq!(decide(SelectKey::Down, true, Some(2), 3), KeyAction::Highlight(2));
	}

	#[test]
	fn down_with_no_candidates_is_inert() {
		assert_eq!(decide(SelectKey::Down, true, None, 0), KeyAction::Ignore);
	}

	#[test]
	fn up_sticks_at_the_first_index() {
		assert_eq!(decide(SelectKey::Up, true, Some(0), 3), KeyAction::Highlight(0));
		assert_eq!(decide(SelectKey::Up, true, Some(2), 3), KeyAction::Highlight(1));
	}

	#[test]
	fn up_without_highlight_is_inert() {
		assert_eq!(decide(SelectKey::Up, true, None, 3), KeyAction::Ignore);
	}

	#[test]
	fn enter_commits_only_a_valid_highlight() {
		assert_eq!(decide(SelectKey::Enter, true, Some(1), 3), KeyAction::Commit(1));
		assert_eq!(decide(SelectKey::Enter, true, None, 3), KeyAction::Ignore);
		assert_eq!(decide(SelectKey::Enter, false, Some(1), 3), KeyAction::Ignore);
	}

	#[test]
	fn escape_closes_an_open_dropdown() {
		assert_eq!(decide(SelectKey::Escape, true, Some(1), 3), KeyAction::Close);
		assert_eq!(decide(SelectKey::Escape, false, None, 3), KeyAction::Ignore);
	}
}
