//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout frameworks: a pure [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and a
//! [`TerminalRenderer`] flushes that buffer through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use trifall_core as core;
pub use trifall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
