//! Key mapping for console input
//!
//! Converts crossterm key events to console input events.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::InputEvent;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// What a key press asks the application to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an event to the console
    Input(InputEvent),
    /// Paste the system clipboard into the input line
    PasteClipboard,
    /// Leave the program
    Quit,
}

/// Key mapper for converting key events to console actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent; `None` means the key is ignored
    pub fn map(event: &KeyEvent) -> Option<KeyAction> {
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) => Self::map_char(ch, mods),

            KeyCode::Enter => Some(KeyAction::Input(InputEvent::Enter)),
            KeyCode::Backspace => Some(KeyAction::Input(InputEvent::Backspace)),

            KeyCode::Left => Some(KeyAction::Input(InputEvent::Left)),
            KeyCode::Right => Some(KeyAction::Input(InputEvent::Right)),
            KeyCode::Up => Some(KeyAction::Input(InputEvent::Up)),
            KeyCode::Down => Some(KeyAction::Input(InputEvent::Down)),

            _ => None,
        }
    }

    /// Map a character with modifiers
    fn map_char(ch: char, mods: Modifiers) -> Option<KeyAction> {
        let ctrl = mods.contains(Modifiers::CTRL);
        let alt = mods.contains(Modifiers::ALT);

        if ctrl && !alt {
            return match ch.to_ascii_lowercase() {
                'c' | 'd' => Some(KeyAction::Quit),
                'v' => Some(KeyAction::PasteClipboard),
                _ => None,
            };
        }

        // Ctrl+Alt + symbol is how AltGr characters arrive on Windows
        if ctrl && alt && ch.is_ascii_alphabetic() {
            return None;
        }

        // Alt combinations produce nothing printable
        if (alt && !ctrl) || ch.is_control() {
            return None;
        }

        Some(KeyAction::Input(InputEvent::Char(ch)))
    }
}
