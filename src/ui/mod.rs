//! Terminal rendering. The scene only ever reads the game state; all
//! mutation happens in the simulation core.

pub mod game_common;
pub mod scene;

pub use scene::render_scene;
