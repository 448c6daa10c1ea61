//! Line editor
//!
//! Owns the input line being typed, the cursor inside it and the history
//! of submitted lines. The cursor counts characters, not bytes.

use crate::history::History;

/// Cursor movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// In-progress input line
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
    /// Insertion point, `0..=buffer.chars().count()`
    cursor: usize,
    history: History,
}

impl LineEditor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            history: History::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[allow(dead_code)]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Insert one character at the cursor.
    ///
    /// Control characters are ignored. Returns whether the buffer changed.
    pub fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let at = self.byte_pos();
        self.buffer.insert(at, ch);
        self.cursor += 1;
        self.history.reset_recall();
        true
    }

    /// Insert every printable character of `text` (used for paste)
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars() {
            changed |= self.insert(ch);
        }
        changed
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_pos();
        self.buffer.remove(at);
        self.history.reset_recall();
        true
    }

    /// Move the cursor one character; stays put at either end
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Direction::Right if self.cursor < self.len() => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Take the current line, record it in history and reset the editor
    pub fn submit(&mut self) -> String {
        let line = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.history.push(line.clone());
        line
    }

    /// Replace the buffer with the previous history entry
    pub fn recall_previous(&mut self) -> bool {
        match self.history.previous(&self.buffer) {
            Some(entry) => {
                let entry = entry.to_string();
                self.set_buffer(entry);
                true
            }
            None => false,
        }
    }

    /// Replace the buffer with the next history entry or the saved draft
    pub fn recall_next(&mut self) -> bool {
        match self.history.next() {
            Some(entry) => {
                let entry = entry.to_string();
                self.set_buffer(entry);
                true
            }
            None => false,
        }
    }

    fn set_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_pos(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for ch in text.chars() {
            editor.insert(ch);
        }
        editor
    }

    fn assert_cursor_in_bounds(editor: &LineEditor) {
        assert!(editor.cursor() <= editor.buffer().chars().count());
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut editor = typed("hlp");
        editor.move_cursor(Direction::Left);
        editor.move_cursor(Direction::Left);
        editor.insert('e');

        assert_eq!(editor.buffer(), "help");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_insert_ignores_control_chars() {
        let mut editor = typed("ab");
        assert!(!editor.insert('\n'));
        assert!(!editor.insert('\u{7f}'));
        assert_eq!(editor.buffer(), "ab");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn test_insert_multibyte() {
        let mut editor = typed("héllo");
        editor.move_cursor(Direction::Left);
        editor.insert('ö');
        assert_eq!(editor.buffer(), "héllöo");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_insert_str_drops_newlines() {
        let mut editor = LineEditor::new();
        editor.insert_str("ga\r\nmes");
        assert_eq!(editor.buffer(), "games");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn test_backspace() {
        let mut editor = typed("games");
        editor.move_cursor(Direction::Left);
        assert!(editor.backspace());
        assert_eq!(editor.buffer(), "gams");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = typed("x");
        editor.move_cursor(Direction::Left);
        assert!(!editor.backspace());
        assert_eq!(editor.buffer(), "x");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut editor = typed("ab");
        assert!(!editor.move_cursor(Direction::Right));
        assert_eq!(editor.cursor(), 2);

        assert!(editor.move_cursor(Direction::Left));
        assert!(editor.move_cursor(Direction::Left));
        assert!(!editor.move_cursor(Direction::Left));
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut editor = LineEditor::new();
        for round in 0..40usize {
            match (round * 7 + round / 3) % 5 {
                0 => {
                    editor.insert('a');
                }
                1 => {
                    editor.backspace();
                }
                2 => {
                    editor.move_cursor(Direction::Left);
                }
                3 => {
                    editor.move_cursor(Direction::Right);
                }
                _ => {
                    editor.insert('z');
                }
            }
            assert_cursor_in_bounds(&editor);
        }
    }

    #[test]
    fn test_submit_resets_and_records() {
        let mut editor = typed("games");
        editor.move_cursor(Direction::Left);

        assert_eq!(editor.submit(), "games");
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.history().entries(), &["games"]);
    }

    #[test]
    fn test_submit_empty_line() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.submit(), "");
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_recall_round_trip() {
        let mut editor = typed("help");
        editor.submit();
        editor.insert_str("gam");

        assert!(editor.recall_previous());
        assert_eq!(editor.buffer(), "help");
        assert_eq!(editor.cursor(), 4);

        assert!(editor.recall_next());
        assert_eq!(editor.buffer(), "gam");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_editing_ends_recall() {
        let mut editor = typed("help");
        editor.submit();
        editor.recall_previous();
        editor.insert('!');

        assert!(!editor.recall_next());
        assert_eq!(editor.buffer(), "help!");
    }
}
