//! mockterm - a mock terminal with a handful of commands and text games
//!
//! mockterm echoes what you type and runs it against a tiny command table.
//! Starting a game hands the input line to the game until it finishes.
//!
//! # Commands
//!
//! | Command | Action |
//! |---------|--------|
//! | help | List commands |
//! | games | List games |
//! | 1 | Play Tower of Hanoi |
//! | clear | Clear the screen |
//! | exit | Refuses politely |
//!
//! # Quick Start
//!
//! ```text
//! mockterm                      # Full-screen terminal
//! mockterm --plain < moves.txt  # Read lines from stdin, print a transcript
//! ```
//!
//! Ctrl+C or Ctrl+D quits.

mod config;
mod core;
mod games;
mod history;
mod ui;

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ColorScheme, Config, ConfigError};
use crate::core::{Console, Dispatcher, InputEvent, OutputSurface};
use crate::games::GameRegistry;
use crate::ui::{KeyAction, KeyMapper, PlainSurface, Renderer};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Line mode on stdin/stdout instead of the full-screen UI
    plain: bool,
    /// Config file given with --config
    config_path: Option<PathBuf>,
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Invocation {
    Run(Options),
    Help,
    Version,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("mockterm {}", VERSION);
}

fn print_help() {
    eprintln!("mockterm {} - a mock terminal with text games", VERSION);
    eprintln!();
    eprintln!("Usage: mockterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --plain               Read lines from stdin, write plain text to stdout");
    eprintln!("  --config <PATH>       Use this config file");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter                 Submit the line");
    eprintln!("  Left/Right            Move the cursor");
    eprintln!("  Up/Down               Recall earlier lines");
    eprintln!("  Ctrl+V                Paste from the clipboard");
    eprintln!("  Ctrl+C, Ctrl+D        Quit");
    eprintln!();
    eprintln!("Color schemes: {}", ColorScheme::list().join(", "));
    eprintln!();
    eprintln!("Configuration: ~/.mockterm/config.toml");
    eprintln!("Log file:      ~/.mockterm/mockterm.log");
}

/// Parse command line arguments (without the program name)
fn parse_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "-v" | "--version" => return Ok(Invocation::Version),
            "--plain" => options.plain = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(Invocation::Run(options))
}

/// Send tracing output to ~/.mockterm/mockterm.log
fn init_logging(level: &str) {
    let log_path = config::data_dir()
        .map(|dir| dir.join("mockterm.log"))
        .unwrap_or_else(|| PathBuf::from("mockterm.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args(env::args().skip(1)) {
        Ok(Invocation::Run(options)) => options,
        Ok(Invocation::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Invocation::Version) => {
            print_version();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    // Config first: it decides the log level
    let loaded = Config::load(options.config_path.as_deref());
    let config_error = loaded.as_ref().err().map(ConfigError::to_string);
    let config = loaded.unwrap_or_default();

    init_logging(&config.log_level);
    info!("mockterm {} starting...", VERSION);

    if let Some(e) = config_error {
        // An unusable --config is fatal; a broken default file is not
        if options.config_path.is_some() {
            error!("{}", e);
            anyhow::bail!(e);
        }
        warn!("{}; using defaults", e);
    }

    let console = Console::new(config.prompt.clone(), Dispatcher::new(GameRegistry::builtin()));

    if options.plain {
        run_plain(console, &config)
    } else {
        run_terminal(console, &config)
    }
}

/// Line mode: every stdin line is submitted as typed
fn run_plain(mut console: Console, config: &Config) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut surface = PlainSurface::new(stdout.lock());
    console.start(&mut surface, &config.greeting)?;

    submit_lines(&mut console, io::stdin().lock(), &mut surface)?;

    info!("End of input");
    Ok(())
}

/// Submit each line of `input`; bytes that are not UTF-8 become U+FFFD
fn submit_lines<R, S>(console: &mut Console, mut input: R, surface: &mut S) -> io::Result<()>
where
    R: BufRead,
    S: OutputSurface,
{
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(());
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }
        let line = String::from_utf8_lossy(&raw);
        console.submit_line(&line, surface)?;
    }
}

/// Full-screen mode
fn run_terminal(mut console: Console, config: &Config) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(config.get_color_scheme(), config.scrollback);
    renderer.init()?;
    info!("Color scheme: {}", config.color_scheme);

    let result = console
        .start(&mut renderer, &config.greeting)
        .map_err(anyhow::Error::from)
        .and_then(|()| run_main_loop(&mut console, &mut renderer));

    // Restore the terminal before any error is reported
    let _ = renderer.cleanup();

    if let Err(ref e) = result {
        error!("Terminal loop failed: {}", e);
    }
    result
}

/// Main event loop
fn run_main_loop(console: &mut Console, renderer: &mut Renderer) -> anyhow::Result<()> {
    loop {
        match event::read()? {
            Event::Key(key_event) => {
                // Only process key press events
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                match KeyMapper::map(&key_event) {
                    Some(KeyAction::Input(input)) => console.handle(input, renderer)?,
                    Some(KeyAction::PasteClipboard) => {
                        if let Some(text) = clipboard_text() {
                            console.handle(InputEvent::Paste(text), renderer)?;
                        }
                    }
                    Some(KeyAction::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    None => {}
                }
            }

            Event::Paste(text) => console.handle(InputEvent::Paste(text), renderer)?,

            Event::Resize(cols, rows) => renderer.resize(cols, rows)?,

            _ => {}
        }
    }

    Ok(())
}

/// Read text from the system clipboard
fn clipboard_text() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Clipboard unavailable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args(args(&[])), Ok(Invocation::Run(Options::default())));
    }

    #[test]
    fn test_plain_and_config() {
        let parsed = parse_args(args(&["--plain", "--config", "/tmp/m.toml"])).unwrap();
        assert_eq!(
            parsed,
            Invocation::Run(Options {
                plain: true,
                config_path: Some(PathBuf::from("/tmp/m.toml")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["--plain", "-h"])), Ok(Invocation::Help));
        assert_eq!(parse_args(args(&["--version"])), Ok(Invocation::Version));
    }

    fn plain_run(input: &[u8]) -> String {
        let mut console = Console::new("$ ", Dispatcher::default());
        let mut surface = PlainSurface::new(Vec::new());
        submit_lines(&mut console, input, &mut surface).unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_submit_lines_crlf_and_no_trailing_newline() {
        let output = plain_run(b"exit\r\nhelp");
        assert!(output.starts_with("exit\nNice try!"));
        assert!(output.contains("help\nAvailable commands:\n"));
    }

    #[test]
    fn test_submit_lines_invalid_utf8() {
        let output = plain_run(b"ga\xffmes\nexit\n");
        assert!(output.starts_with("ga\u{fffd}mes\nCommand not recognized."));
        assert!(output.contains("exit\nNice try!"));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse_args(args(&["--config"])).is_err());
        assert_eq!(
            parse_args(args(&["--shell"])),
            Err("Unknown option: --shell".to_string())
        );
    }
}
