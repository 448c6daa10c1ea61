//! Command dispatcher
//!
//! Decides who consumes a submitted line: the active game session if
//! there is one, otherwise the built-in command table.

use tracing::{debug, info};

use crate::games::{GameRegistry, GameSession};

const HELP: &str = "Available commands:
  help - Show this help message
  games - Show available games
  clear - Clear the terminal
  exit - Exit (just kidding, this is a browser!)";

const GAMES_HINT: &str = "Type the game number to start playing.";
const PLAY_ANOTHER: &str = "Want to play another game? Type 'games' to see available games.";
const CLEARED: &str = "Terminal cleared";
const NO_EXIT: &str = "Nice try! This is a browser, you can't exit. Type 'games' to play games.";
const UNKNOWN: &str = "Command not recognized. Type 'help' for available commands.";

/// What the surface should do with a submitted line's result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing to show
    Silent,
    /// Append text below the existing output
    Append(String),
    /// Wipe the output and show only this text
    Replace(String),
}

/// Routes lines to built-in commands or the active game
pub struct Dispatcher {
    registry: GameRegistry,
    active: Option<Box<dyn GameSession>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(GameRegistry::builtin())
    }
}

impl Dispatcher {
    pub fn new(registry: GameRegistry) -> Self {
        Self {
            registry,
            active: None,
        }
    }

    /// A game session currently owns the input
    #[allow(dead_code)]
    pub fn in_game(&self) -> bool {
        self.active.is_some()
    }

    /// Handle one submitted line
    pub fn submit_line(&mut self, raw: &str) -> Response {
        let line = raw.trim().to_lowercase();

        if let Some(session) = self.active.as_mut() {
            let turn = session.process_input(&line);
            if !turn.done {
                return Response::Append(turn.output);
            }
            info!("Game session finished");
            self.active = None;
            return Response::Append(format!("{}\n{}", turn.output, PLAY_ANOTHER));
        }

        match line.as_str() {
            "" => Response::Silent,
            "help" => Response::Append(HELP.to_string()),
            "games" => Response::Append(format!("{}\n{}", self.registry.listing(), GAMES_HINT)),
            "clear" => Response::Replace(CLEARED.to_string()),
            "exit" => Response::Append(NO_EXIT.to_string()),
            other => match self.game_id(other) {
                Some(id) => self.start_game(id),
                None => {
                    debug!("Unrecognized command: {:?}", other);
                    Response::Append(UNKNOWN.to_string())
                }
            },
        }
    }

    /// A line spelling a registered game id exactly, no leading zeros
    fn game_id(&self, line: &str) -> Option<u32> {
        if !line.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let id: u32 = line.parse().ok()?;
        if id.to_string() != line {
            return None;
        }
        self.registry.get(id).map(|_| id)
    }

    fn start_game(&mut self, id: u32) -> Response {
        let Some(entry) = self.registry.get(id) else {
            return Response::Append(UNKNOWN.to_string());
        };
        info!("Starting game {}: {}", id, entry.name);

        let welcome = entry.welcome;
        let mut session = (entry.factory)();
        let intro = session.process_input("");
        if intro.done {
            return Response::Append(format!("{}\n{}\n{}", welcome, intro.output, PLAY_ANOTHER));
        }
        self.active = Some(session);
        Response::Append(format!("{}\n{}", welcome, intro.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameEntry, Turn};

    const FROM_PROMPT: &str = "Which tower do you want to move from? (1-3): ";

    fn text(response: Response) -> String {
        match response {
            Response::Append(text) | Response::Replace(text) => text,
            Response::Silent => String::new(),
        }
    }

    struct OneShot;

    impl GameSession for OneShot {
        fn process_input(&mut self, _line: &str) -> Turn {
            Turn::finished("over already")
        }
    }

    #[test]
    fn test_empty_line_is_silent() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.submit_line(""), Response::Silent);
        assert_eq!(dispatcher.submit_line("   \t"), Response::Silent);
        assert!(!dispatcher.in_game());
    }

    #[test]
    fn test_help() {
        let mut dispatcher = Dispatcher::default();
        let output = text(dispatcher.submit_line("  HELP "));
        assert!(output.starts_with("Available commands:\n"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_games_listing() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.submit_line("games"),
            Response::Append(
                "Available games:\n  1: Tower of Hanoi\nType the game number to start playing."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_clear_replaces_output() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.submit_line("Clear"),
            Response::Replace("Terminal cleared".to_string())
        );
    }

    #[test]
    fn test_exit_refused() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.submit_line("exit"), Response::Append(NO_EXIT.to_string()));
    }

    #[test]
    fn test_unknown_command() {
        let mut dispatcher = Dispatcher::default();
        for line in ["ls -la", "2", "1x", "-1", "01", "001", "+1"] {
            assert_eq!(dispatcher.submit_line(line), Response::Append(UNKNOWN.to_string()));
        }
        assert!(!dispatcher.in_game());
    }

    #[test]
    fn test_start_game() {
        let mut dispatcher = Dispatcher::default();
        let output = text(dispatcher.submit_line("1"));

        assert!(dispatcher.in_game());
        assert!(output.starts_with("Welcome to the Tower of Hanoi!\n   [=|=]   "));
        assert!(output.ends_with(FROM_PROMPT));
    }

    #[test]
    fn test_lines_go_to_active_game() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.submit_line("1");

        // Built-in names are game input now.
        let output = text(dispatcher.submit_line("help"));
        assert!(output.starts_with("No... input should be 1, 2, or 3"));

        let output = text(dispatcher.submit_line(" 2 "));
        assert_eq!(output, "Which tower do you want to move to? (1-3): ");

        let output = text(dispatcher.submit_line("1"));
        assert!(output.starts_with("Invalid move: No disk to move from that tower\n"));
        assert!(output.ends_with(FROM_PROMPT));
        assert!(dispatcher.in_game());
    }

    #[test]
    fn test_exit_game_clears_session() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.submit_line("1");

        assert_eq!(
            dispatcher.submit_line("EXIT"),
            Response::Append(format!("Exiting Tower of Hanoi. Goodbye!\n{}", PLAY_ANOTHER))
        );
        assert!(!dispatcher.in_game());

        // Back at the command table.
        assert_eq!(dispatcher.submit_line("exit"), Response::Append(NO_EXIT.to_string()));
    }

    #[test]
    fn test_full_game_then_decline() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.submit_line("1");
        let moves = ["1", "3", "1", "2", "3", "2", "1", "3", "2", "1", "2", "3", "1", "3"];
        let mut last = Response::Silent;
        for line in moves {
            last = dispatcher.submit_line(line);
        }
        assert!(text(last).contains("You won in 7 moves!"));

        let output = text(dispatcher.submit_line("n"));
        assert_eq!(output, format!("Thanks for playing Tower of Hanoi!\n{}", PLAY_ANOTHER));
        assert!(!dispatcher.in_game());
    }

    #[test]
    fn test_session_finishing_on_intro() {
        let mut registry = GameRegistry::new();
        registry.register(
            5,
            GameEntry {
                name: "One Shot",
                welcome: "Hello",
                factory: || Box::new(OneShot),
            },
        );
        let mut dispatcher = Dispatcher::new(registry);

        let output = text(dispatcher.submit_line("5"));
        assert_eq!(output, format!("Hello\nover already\n{}", PLAY_ANOTHER));
        assert!(!dispatcher.in_game());
    }
}
