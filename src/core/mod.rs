//! Core console logic.
//!
//! Nothing in here knows about the real terminal:
//!
//! - **editor**: input line buffer, cursor and history
//! - **dispatcher**: built-in commands and the active game slot
//! - **console**: routes input events between the two and a surface
//! - **surface**: the output interface the console draws through
//!
//! # Architecture
//!
//! ```text
//! Console
//! ├── LineEditor (buffer + cursor)
//! │   └── History
//! └── Dispatcher
//!     ├── GameRegistry (id -> factory)
//!     └── active GameSession (at most one)
//! ```

pub mod console;
pub mod dispatcher;
pub mod editor;
pub mod surface;

pub use console::{Console, InputEvent};
pub use dispatcher::Dispatcher;
pub use surface::OutputSurface;
