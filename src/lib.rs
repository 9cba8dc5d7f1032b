//! Dino Dash - Terminal Endless Runner Library
//!
//! This module exposes the simulation core, persistence, and input mapping
//! for testing and external use. The binary in `main.rs` wires them to a
//! real terminal.

// Allow dead code in library - some items are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod game;
pub mod highscore;
pub mod input;
pub mod ui;

pub use game::{DinoGame, GameEvent, GamePhase, SpeedTier, FRAME_MS};
pub use highscore::ScoreStore;
pub use input::GameAction;
