//! Turn-based text games.
//!
//! A game runs as a [`GameSession`]: while a session is active it receives
//! every submitted line instead of the built-in command table.
//!
//! - **hanoi**: Tower of Hanoi with three disks
//!
//! # Adding a game
//!
//! Implement [`GameSession`] and register a factory in
//! [`GameRegistry::builtin`]. The dispatcher never needs to change.

pub mod hanoi;

use std::collections::BTreeMap;

pub use hanoi::TowerOfHanoi;

/// Result of feeding one line to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Text to show the player
    pub output: String,
    /// The session has finished and should be dropped
    pub done: bool,
}

impl Turn {
    pub fn output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            done: false,
        }
    }

    pub fn finished(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            done: true,
        }
    }
}

/// A multi-turn interactive handler that owns the input line while active.
///
/// The first call after creation is made with an empty line and must
/// return the game's introduction.
pub trait GameSession {
    fn process_input(&mut self, line: &str) -> Turn;
}

/// Creates a fresh session
pub type SessionFactory = fn() -> Box<dyn GameSession>;

/// A registered game
#[derive(Clone, Copy)]
pub struct GameEntry {
    pub name: &'static str,
    /// Line shown before the session's introduction
    pub welcome: &'static str,
    pub factory: SessionFactory,
}

impl std::fmt::Debug for GameEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEntry")
            .field("name", &self.name)
            .field("welcome", &self.welcome)
            .finish_non_exhaustive()
    }
}

/// Games keyed by the number the player types to start them
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: BTreeMap<u32, GameEntry>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every game shipped in this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            1,
            GameEntry {
                name: "Tower of Hanoi",
                welcome: "Welcome to the Tower of Hanoi!",
                factory: || Box::new(TowerOfHanoi::new()),
            },
        );
        registry
    }

    /// Add or replace a game under `id`
    pub fn register(&mut self, id: u32, entry: GameEntry) {
        self.games.insert(id, entry);
    }

    pub fn get(&self, id: u32) -> Option<&GameEntry> {
        self.games.get(&id)
    }

    /// Games in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &GameEntry)> {
        self.games.iter().map(|(id, entry)| (*id, entry))
    }

    /// The `games` command listing
    pub fn listing(&self) -> String {
        let mut output = String::from("Available games:");
        for (id, entry) in self.iter() {
            output.push_str(&format!("\n  {}: {}", id, entry.name));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl GameSession for Echo {
        fn process_input(&mut self, line: &str) -> Turn {
            Turn::finished(format!("echo: {}", line))
        }
    }

    #[test]
    fn test_builtin_listing() {
        let registry = GameRegistry::builtin();
        assert_eq!(registry.listing(), "Available games:\n  1: Tower of Hanoi");
    }

    #[test]
    fn test_listing_is_sorted_by_id() {
        let mut registry = GameRegistry::builtin();
        registry.register(
            7,
            GameEntry {
                name: "Echo",
                welcome: "hi",
                factory: || Box::new(Echo),
            },
        );
        registry.register(
            3,
            GameEntry {
                name: "Echo Again",
                welcome: "hi",
                factory: || Box::new(Echo),
            },
        );

        let ids: Vec<u32> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 3, 7]);
        assert!(registry.listing().ends_with("\n  3: Echo Again\n  7: Echo"));
    }

    #[test]
    fn test_factory_creates_fresh_session() {
        let registry = GameRegistry::builtin();
        let entry = registry.get(1).unwrap();
        let mut session = (entry.factory)();
        let turn = session.process_input("");
        assert!(!turn.done);
        assert!(turn.output.ends_with("Which tower do you want to move from? (1-3): "));
        assert!(registry.get(2).is_none());
    }
}
