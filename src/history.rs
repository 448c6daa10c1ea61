//! Command history for mockterm
//!
//! Keeps every submitted line in memory and lets the line editor step
//! back through it with the arrow keys. Nothing is written to disk.

/// Append-only record of submitted lines with a recall cursor
#[derive(Debug, Default)]
pub struct History {
    /// All submitted lines (newest last)
    entries: Vec<String>,
    /// Index of the entry currently recalled into the buffer
    recall: Option<usize>,
    /// Buffer contents saved when recall started
    draft: String,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and end any recall in progress.
    ///
    /// Blank lines are recorded too; they are only skipped while recalling.
    pub fn push(&mut self, line: String) {
        self.entries.push(line);
        self.reset_recall();
    }

    /// Step to the next older non-blank entry.
    ///
    /// `current` is the live buffer; it is stashed as the draft on the
    /// first step so that stepping forward past the newest entry restores it.
    /// Returns `None` when there is nothing older to show.
    pub fn previous(&mut self, current: &str) -> Option<&str> {
        let start = self.recall.unwrap_or(self.entries.len());
        let idx = self.entries[..start]
            .iter()
            .rposition(|e| !e.trim().is_empty())?;

        if self.recall.is_none() {
            self.draft = current.to_string();
        }
        self.recall = Some(idx);
        Some(&self.entries[idx])
    }

    /// Step to the next newer non-blank entry, or back to the draft.
    ///
    /// Returns `None` when no recall is in progress.
    pub fn next(&mut self) -> Option<&str> {
        let current = self.recall?;
        let newer = self.entries[current + 1..]
            .iter()
            .position(|e| !e.trim().is_empty())
            .map(|offset| current + 1 + offset);

        match newer {
            Some(idx) => {
                self.recall = Some(idx);
                Some(&self.entries[idx])
            }
            None => {
                self.recall = None;
                Some(&self.draft)
            }
        }
    }

    /// Forget the recall position (the buffer was edited by hand)
    pub fn reset_recall(&mut self) {
        self.recall = None;
        self.draft.clear();
    }

    #[allow(dead_code)]
    pub fn is_recalling(&self) -> bool {
        self.recall.is_some()
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
