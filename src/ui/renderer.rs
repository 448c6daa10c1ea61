//! Console renderer using crossterm
//!
//! Draws the output scrollback on the upper rows of the alternate screen
//! and the prompt line on the bottom row.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ColorScheme;
use crate::core::OutputSurface;

/// Output lines kept for redraws, oldest dropped first
#[derive(Debug)]
pub struct Scrollback {
    lines: VecDeque<String>,
    limit: usize,
}

impl Scrollback {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Append text, splitting it on newlines
    pub fn push(&mut self, text: &str) {
        for line in text.split('\n') {
            self.lines.push_back(line.trim_end_matches('\r').to_string());
        }
        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Cut `text` to at most `cols` display columns
pub fn fit_width(text: &str, cols: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > cols {
            return &text[..i];
        }
        used += w;
    }
    text
}

/// Work out which part of the input line fits after the prompt.
///
/// Returns the visible slice of `buffer` and the screen column of the
/// cursor. The line scrolls horizontally so the cursor always has a cell.
pub fn visible_input(prompt: &str, buffer: &str, cursor: usize, cols: u16) -> (String, u16) {
    let prompt_width = prompt.width();
    let avail = usize::from(cols).saturating_sub(prompt_width).max(1);
    let chars: Vec<char> = buffer.chars().collect();
    let cursor = cursor.min(chars.len());
    let width_of = |slice: &[char]| -> usize { slice.iter().map(|c| c.width().unwrap_or(0)).sum() };

    let mut start = 0;
    while start < cursor && width_of(&chars[start..cursor]) >= avail {
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for &ch in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if used + w > avail {
            break;
        }
        used += w;
        visible.push(ch);
    }

    let col = prompt_width + width_of(&chars[start..cursor]);
    (visible, u16::try_from(col).unwrap_or(u16::MAX))
}

/// Full-screen console renderer
pub struct Renderer {
    scheme: ColorScheme,
    scrollback: Scrollback,
    /// Last input line drawn: prompt, buffer, cursor
    input: (String, String, usize),
    /// Current terminal size (cols, rows)
    size: (u16, u16),
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Renderer {
    pub fn new(scheme: ColorScheme, scrollback: usize) -> Self {
        Self {
            scheme,
            scrollback: Scrollback::new(scrollback),
            input: (String::new(), String::new(), 0),
            size: (80, 24),
            initialized: false,
        }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.size = Self::size()?;
        debug!("Renderer init, size {}x{}", self.size.0, self.size.1);

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableBracketedPaste,
            DisableLineWrap,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        self.initialized = true;
        self.draw()
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(stdout, Show);
        let _ = execute!(stdout, EnableLineWrap);
        let _ = execute!(stdout, DisableBracketedPaste);
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();

        // Disable raw mode - this is the most important part
        terminal::disable_raw_mode()
    }

    /// Handle a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        debug!("Resize: {}x{}", cols, rows);
        self.size = (cols, rows);
        self.draw()
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Redraw everything
    fn draw(&self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        let stdout = io::stdout();
        let mut stdout = io::BufWriter::new(stdout.lock());
        let (cols, rows) = self.size;
        let body_rows = usize::from(rows.saturating_sub(1));

        queue!(
            stdout,
            Hide,
            SetBackgroundColor(self.scheme.background.to_crossterm()),
            Clear(ClearType::All),
            SetForegroundColor(self.scheme.output.to_crossterm())
        )?;
        for (row, line) in self.scrollback.tail(body_rows).enumerate() {
            queue!(
                stdout,
                MoveTo(0, row as u16),
                Print(fit_width(line, usize::from(cols)))
            )?;
        }

        self.draw_input(&mut stdout)?;
        stdout.flush()
    }

    /// Redraw only the prompt line
    fn draw_input<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (cols, rows) = self.size;
        let row = rows.saturating_sub(1);
        let (prompt, buffer, cursor) = &self.input;
        let prompt = fit_width(prompt, usize::from(cols));
        let (visible, cursor_col) = visible_input(prompt, buffer, *cursor, cols);

        queue!(
            out,
            Hide,
            MoveTo(0, row),
            SetBackgroundColor(self.scheme.background.to_crossterm()),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(self.scheme.prompt.to_crossterm()),
            Print(prompt),
            SetForegroundColor(self.scheme.input.to_crossterm()),
            Print(visible),
            MoveTo(cursor_col.min(cols.saturating_sub(1)), row),
            Show
        )?;
        Ok(())
    }
}

impl OutputSurface for Renderer {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.scrollback.push(text);
        self.draw()
    }

    fn replace(&mut self, text: &str) -> io::Result<()> {
        self.scrollback.clear();
        self.scrollback.push(text);
        self.draw()
    }

    fn render_input(&mut self, prompt: &str, buffer: &str, cursor: usize) -> io::Result<()> {
        self.input = (prompt.to_string(), buffer.to_string(), cursor);
        if !self.initialized {
            return Ok(());
        }
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        self.draw_input(&mut stdout)?;
        stdout.flush()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
