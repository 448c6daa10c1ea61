//! User interface rendering and input handling.
//!
//! - **keymapper**: crossterm key events to console actions
//! - **renderer**: full-screen crossterm surface with scrollback
//! - **plain**: line-oriented surface for pipes (`--plain`)

pub mod keymapper;
pub mod plain;
pub mod renderer;

pub use keymapper::{KeyAction, KeyMapper};
pub use plain::PlainSurface;
pub use renderer::Renderer;
