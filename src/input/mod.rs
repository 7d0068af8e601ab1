//! Maps raw terminal key events to logical navigation actions.
//!
//! Hosts own their input layer; this adapter covers the common crossterm
//! case so demos and simple embedders do not re-derive the mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::NavEvent;
use crate::topology::Direction;

/// Logical action decoded from one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    /// Confirm: open a detail for the focused entry.
    Activate,
    /// Direct selection of a cell by index.
    Select(usize),
    /// Back action: dismiss an open detail.
    Back,
}

impl InputAction {
    /// Convert into the engine event it drives.
    pub fn into_event<T>(self) -> NavEvent<T> {
        match self {
            Self::Move(direction) => NavEvent::Direction(direction),
            Self::Activate => NavEvent::Activate,
            Self::Select(index) => NavEvent::Select { index },
            Self::Back => NavEvent::DetailDismissed,
        }
    }
}

/// Decode a crossterm key event. Returns `None` for key releases, repeats
/// of modifier-chorded characters, and anything outside the navigation
/// vocabulary.
pub fn map_key(key: &KeyEvent) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(InputAction::Move(Direction::Up)),
        KeyCode::Down => Some(InputAction::Move(Direction::Down)),
        KeyCode::Left => Some(InputAction::Move(Direction::Left)),
        KeyCode::Right => Some(InputAction::Move(Direction::Right)),
        KeyCode::Enter => Some(InputAction::Activate),
        KeyCode::Esc => Some(InputAction::Back),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return None;
            }
            // Digit keys act as direct selection of the first nine cells.
            ch.to_digit(10)
                .filter(|digit| *digit >= 1)
                .map(|digit| InputAction::Select(digit as usize - 1))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(
            map_key(&press(KeyCode::Up)),
            Some(InputAction::Move(Direction::Up))
        );
        assert_eq!(
            map_key(&press(KeyCode::Right)),
            Some(InputAction::Move(Direction::Right))
        );
    }

    #[test]
    fn confirm_and_back_map() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(InputAction::Activate));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputAction::Back));
    }

    #[test]
    fn digits_select_directly() {
        assert_eq!(
            map_key(&press(KeyCode::Char('1'))),
            Some(InputAction::Select(0))
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('9'))),
            Some(InputAction::Select(8))
        );
        assert_eq!(map_key(&press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn releases_and_chords_are_ignored() {
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release), None);

        let chord = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&chord), None);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        assert_eq!(map_key(&press(KeyCode::Tab)), None);
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
    }
}
