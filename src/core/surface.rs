//! Output surface abstraction
//!
//! The console never draws anything itself; it talks to whatever shows
//! the terminal through this trait.

use std::io;

/// Something that can display console output and the input line
pub trait OutputSurface {
    /// Append text below what is already shown. `text` may span several lines.
    fn append(&mut self, text: &str) -> io::Result<()>;

    /// Throw away everything shown and display `text` instead
    fn replace(&mut self, text: &str) -> io::Result<()>;

    /// Redraw the input line: prompt, buffer and cursor (a char index into `buffer`)
    fn render_input(&mut self, prompt: &str, buffer: &str, cursor: usize) -> io::Result<()>;
}
