//! The dino runner simulation core: data model and tick logic.

pub mod logic;
pub mod types;

pub use logic::{check_collision, GameEvent, FRAME_MS};
pub use types::{
    Cloud, DinoGame, Enemy, GamePhase, Obstacle, ObstacleKind, Projectile, SpeedTier,
};
