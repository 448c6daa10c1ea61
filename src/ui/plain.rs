//! Line-oriented surface for `--plain` mode
//!
//! Writes output as plain text. A clear is marked with a form feed since
//! earlier output cannot be taken back from a pipe.

use std::io::{self, Write};

use crate::core::OutputSurface;

pub struct PlainSurface<W: Write> {
    out: W,
}

impl<W: Write> PlainSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSurface for PlainSurface<W> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn replace(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\x0c{}", text)?;
        self.out.flush()
    }

    // The input line is echoed on submit; nothing to draw while typing
    fn render_input(&mut self, _prompt: &str, _buffer: &str, _cursor: usize) -> io::Result<()> {
        Ok(())
    }
}
