//! Tower of Hanoi
//!
//! Three towers, three disks. The player moves one disk per two-line turn
//! (source tower, then destination tower) until every disk sits on the
//! third tower.

use thiserror::Error;

use super::{GameSession, Turn};

/// Number of disks (and rows in the board)
const DISKS: u8 = 3;
/// Number of towers
const TOWERS: usize = 3;

const FROM_PROMPT: &str = "Which tower do you want to move from? (1-3): ";
const TO_PROMPT: &str = "Which tower do you want to move to? (1-3): ";
const BAD_TOWER: &str = "No... input should be 1, 2, or 3";
const FOOTER: &str = " ----1----  ----2----  ----3---- ";

/// Why a move was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid move: No disk to move from that tower")]
    EmptySource,

    #[error("Invalid move: Cannot place a larger disk on a smaller one")]
    LargerOnSmaller,
}

/// The three stacks of disks.
///
/// Each stack lists disk sizes from the bottom up and is always strictly
/// decreasing; together the stacks hold every disk exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Towers {
    stacks: [Vec<u8>; TOWERS],
}

impl Default for Towers {
    fn default() -> Self {
        Self::new()
    }
}

impl Towers {
    /// All disks on the first tower
    pub fn new() -> Self {
        Self {
            stacks: [(1..=DISKS).rev().collect(), Vec::new(), Vec::new()],
        }
    }

    #[allow(dead_code)]
    pub fn stack(&self, tower: usize) -> &[u8] {
        &self.stacks[tower]
    }

    /// Check a move without performing it
    pub fn check_move(&self, from: usize, to: usize) -> Result<(), MoveError> {
        let disk = self.stacks[from].last().ok_or(MoveError::EmptySource)?;
        match self.stacks[to].last() {
            Some(top) if disk > top => Err(MoveError::LargerOnSmaller),
            _ => Ok(()),
        }
    }

    /// Move the top disk of `from` onto `to`
    pub fn move_disk(&mut self, from: usize, to: usize) -> Result<(), MoveError> {
        self.check_move(from, to)?;
        if let Some(disk) = self.stacks[from].pop() {
            self.stacks[to].push(disk);
        }
        Ok(())
    }

    /// Every disk is on the third tower
    pub fn is_solved(&self) -> bool {
        self.stacks[TOWERS - 1].len() == usize::from(DISKS)
    }

    /// Draw the towers, top row first, followed by the tower labels
    pub fn render(&self) -> String {
        let mut rows: Vec<String> = (0..usize::from(DISKS))
            .map(|row| {
                self.stacks
                    .iter()
                    .map(|stack| disk_glyph(stack.get(row).copied().unwrap_or(0)))
                    .collect()
            })
            .collect();
        rows.reverse();
        rows.push(FOOTER.to_string());
        rows.join("\n")
    }
}

/// Fixed-width glyph for a disk; size 0 is a bare peg
fn disk_glyph(size: u8) -> &'static str {
    match size {
        1 => "   [=|=]   ",
        2 => "  [==|==]  ",
        3 => " [===|===] ",
        _ => "     |     ",
    }
}

/// Parse a 1-based tower number into a tower index.
///
/// Only the leading integer matters ("2abc" is tower 2); anything without
/// one, or outside 1..=3, is rejected.
fn parse_tower(input: &str) -> Option<usize> {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: usize = digits[..end].parse().ok()?;
    if negative || value == 0 || value > TOWERS {
        return None;
    }
    Some(value - 1)
}

/// Where the game is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HanoiState {
    /// Nothing shown yet
    Intro,
    /// Waiting for the source tower
    AwaitingFrom,
    /// Waiting for the destination tower
    AwaitingTo { from: usize },
    /// Solved; waiting for the play-again answer
    GameOver,
}

/// A Tower of Hanoi session
#[derive(Debug)]
pub struct TowerOfHanoi {
    towers: Towers,
    moves: u32,
    state: HanoiState,
}

impl Default for TowerOfHanoi {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerOfHanoi {
    pub fn new() -> Self {
        Self {
            towers: Towers::new(),
            moves: 0,
            state: HanoiState::Intro,
        }
    }

    #[allow(dead_code)]
    pub fn towers(&self) -> &Towers {
        &self.towers
    }

    #[allow(dead_code)]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[allow(dead_code)]
    pub fn state(&self) -> HanoiState {
        self.state
    }

    fn board_and_prompt(&self) -> String {
        format!("{}\n{}", self.towers.render(), FROM_PROMPT)
    }

    fn choose_from(&mut self, input: &str) -> Turn {
        match parse_tower(input) {
            Some(from) => {
                self.state = HanoiState::AwaitingTo { from };
                Turn::output(TO_PROMPT)
            }
            None => Turn::output(format!("{}\n{}", BAD_TOWER, FROM_PROMPT)),
        }
    }

    fn choose_to(&mut self, from: usize, input: &str) -> Turn {
        let Some(to) = parse_tower(input) else {
            return Turn::output(format!("{}\n{}", BAD_TOWER, TO_PROMPT));
        };

        if let Err(e) = self.towers.move_disk(from, to) {
            tracing::debug!("Rejected move {} -> {}: {:?}", from + 1, to + 1, e);
            self.state = HanoiState::AwaitingFrom;
            return Turn::output(format!("{}\n{}", e, self.board_and_prompt()));
        }

        self.moves += 1;
        if self.towers.is_solved() {
            tracing::info!("Tower of Hanoi solved in {} moves", self.moves);
            self.state = HanoiState::GameOver;
            return Turn::output(format!(
                "{}\nCongratulations! You won in {} moves!\nPlay again? (y/n): ",
                self.towers.render(),
                self.moves
            ));
        }

        self.state = HanoiState::AwaitingFrom;
        Turn::output(self.board_and_prompt())
    }

    fn play_again(&mut self, input: &str) -> Turn {
        if input.eq_ignore_ascii_case("y") {
            self.towers = Towers::new();
            self.moves = 0;
            self.state = HanoiState::AwaitingFrom;
            Turn::output(format!("Starting a new game!\n{}", self.board_and_prompt()))
        } else {
            Turn::finished("Thanks for playing Tower of Hanoi!")
        }
    }
}

impl GameSession for TowerOfHanoi {
    fn process_input(&mut self, line: &str) -> Turn {
        let input = line.to_lowercase();
        if input == "exit" {
            return Turn::finished("Exiting Tower of Hanoi. Goodbye!");
        }

        match self.state {
            HanoiState::Intro => {
                self.state = HanoiState::AwaitingFrom;
                Turn::output(self.board_and_prompt())
            }
            HanoiState::AwaitingFrom => self.choose_from(&input),
            HanoiState::AwaitingTo { from } => self.choose_to(from, &input),
            HanoiState::GameOver => self.play_again(&input),
        }
    }
}
