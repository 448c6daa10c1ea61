//! Console
//!
//! Binds a [`LineEditor`] and a [`Dispatcher`] to an [`OutputSurface`].
//! Input events arrive one at a time and are handled to completion before
//! the next one; every handler redraws only what it changed.

use std::io;

use tracing::debug;

use super::dispatcher::{Dispatcher, Response};
use super::editor::{Direction, LineEditor};
use super::surface::OutputSurface;

/// Discrete input events understood by the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character was typed
    Char(char),
    Backspace,
    /// Submit the current line
    Enter,
    Left,
    Right,
    /// Recall the previous history entry
    Up,
    /// Recall the next history entry
    Down,
    /// Text pasted in one go
    Paste(String),
}

/// One interactive terminal: an input line plus the command dispatcher
pub struct Console {
    prompt: String,
    editor: LineEditor,
    dispatcher: Dispatcher,
}

impl Console {
    pub fn new(prompt: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            prompt: prompt.into(),
            editor: LineEditor::new(),
            dispatcher,
        }
    }

    #[allow(dead_code)]
    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    #[allow(dead_code)]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Show the greeting and the empty input line
    pub fn start(&mut self, surface: &mut impl OutputSurface, greeting: &str) -> io::Result<()> {
        if !greeting.is_empty() {
            surface.append(greeting)?;
        }
        self.render_input(surface)
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent, surface: &mut impl OutputSurface) -> io::Result<()> {
        let changed = match event {
            InputEvent::Char(ch) => self.editor.insert(ch),
            InputEvent::Paste(text) => self.editor.insert_str(&text),
            InputEvent::Backspace => self.editor.backspace(),
            InputEvent::Left => self.editor.move_cursor(Direction::Left),
            InputEvent::Right => self.editor.move_cursor(Direction::Right),
            InputEvent::Up => self.editor.recall_previous(),
            InputEvent::Down => self.editor.recall_next(),
            InputEvent::Enter => {
                return self.submit(surface);
            }
        };

        if changed {
            self.render_input(surface)?;
        }
        Ok(())
    }

    /// Submit a whole line as if it had been typed and entered
    pub fn submit_line(&mut self, line: &str, surface: &mut impl OutputSurface) -> io::Result<()> {
        self.handle(InputEvent::Paste(line.to_string()), surface)?;
        self.handle(InputEvent::Enter, surface)
    }

    fn submit(&mut self, surface: &mut impl OutputSurface) -> io::Result<()> {
        let line = self.editor.submit();
        debug!("Submitted: {:?}", line);

        // Echo the line as typed, without the prompt.
        surface.append(&line)?;

        match self.dispatcher.submit_line(&line) {
            Response::Silent => {}
            Response::Append(text) => surface.append(&text)?,
            Response::Replace(text) => surface.replace(&text)?,
        }
        self.render_input(surface)
    }

    fn render_input(&self, surface: &mut impl OutputSurface) -> io::Result<()> {
        surface.render_input(&self.prompt, self.editor.buffer(), self.editor.cursor())
    }
}
