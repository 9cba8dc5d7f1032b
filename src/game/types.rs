//! Dino runner data structures.
//!
//! World coordinates are float "pixels" in a 600-unit-wide strip, keeping the
//! tuning constants the game was originally balanced around. The scene
//! renderer scales the world onto whatever terminal cells are available.

use rand::Rng;

/// World dimensions in world units.
pub const WORLD_W: f64 = 600.0;
pub const WORLD_H: f64 = 190.0;

/// Y of the ground surface. Ground obstacles and the standing player rest here.
pub const GROUND_LINE: f64 = 182.0;

/// The player is a fixed-column square; `y` tracks its top edge.
pub const PLAYER_SIZE: f64 = 32.0;
pub const PLAYER_X: f64 = 40.0;

/// Player top edge while standing on the ground.
pub const GROUND_Y: f64 = GROUND_LINE - PLAYER_SIZE;

/// Vertical kinematics, world units per 16ms frame. Negative velocity is up.
pub const GRAVITY: f64 = 0.9;
pub const JUMP_VELOCITY: f64 = -13.0;

/// Run animation phase toggles every this many frames while grounded.
pub const ANIM_INTERVAL: u64 = 8;

/// Obstacle spawn gap range (world units). Resampled on every spawn decision,
/// so consecutive gaps are independent draws.
pub const GAP_MIN: f64 = 300.0;
pub const GAP_MAX: f64 = 500.0;

/// Smallest dimension the spawner may emit after jitter.
pub const MIN_OBSTACLE_DIM: f64 = 8.0;

/// Enemy (bird) sprite size and the altitude band its top edge spawns in.
/// The low end of the band clips a grounded player's head, the high end can
/// only be hit mid-jump.
pub const ENEMY_W: f64 = 24.0;
pub const ENEMY_H: f64 = 16.0;
pub const ENEMY_BAND_TOP: f64 = 90.0;
pub const ENEMY_BAND_BOTTOM: f64 = 140.0;

/// Minimum horizontal spacing behind the previous enemy before another
/// Bernoulli spawn trial is allowed.
pub const ENEMY_MIN_SPACING: f64 = 220.0;
/// Per-frame spawn probability once spacing allows.
pub const ENEMY_SPAWN_CHANCE: f64 = 0.008;

/// Cloud band and cadence. Clouds are scenery: no collision, no score, and
/// they survive session resets.
pub const CLOUD_W: f64 = 48.0;
pub const CLOUD_BAND_TOP: f64 = 10.0;
pub const CLOUD_BAND_BOTTOM: f64 = 70.0;
pub const CLOUD_MIN_SPACING: f64 = 160.0;
pub const CLOUD_SPAWN_CHANCE: f64 = 0.004;

/// Projectile kinematics.
pub const PROJECTILE_SPEED: f64 = 14.0;
pub const PROJECTILE_RADIUS: f64 = 4.0;

/// Wall-clock gap enforced between shots, independent of frame rate.
pub const FIRE_COOLDOWN_MS: u64 = 400;

/// Projectile hits test against target boxes inset by this margin, so shots
/// must land cleaner than the player-collision overlap.
pub const HIT_TOLERANCE: f64 = 3.0;

/// Score beyond which scroll speed stops scaling.
pub const SPEED_SCORE_CAP: u32 = 80;

// Per-collection speed formula constants: BASE + min(score, cap) * SCALE,
// then multiplied by the speed tier factor.
pub const OBSTACLE_SPEED_BASE: f64 = 6.0;
pub const OBSTACLE_SPEED_SCALE: f64 = 0.05;
pub const ENEMY_SPEED_BASE: f64 = 7.5;
pub const ENEMY_SPEED_SCALE: f64 = 0.06;
pub const CLOUD_SPEED_BASE: f64 = 1.2;
pub const CLOUD_SPEED_SCALE: f64 = 0.01;

/// Session phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh game, waiting for the first start.
    Idle,
    /// Simulation advancing.
    Running,
    /// Terminal until an explicit restart.
    GameOver,
}

/// Global pace multiplier selected by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    Relaxed,
    Standard,
    Swift,
    Frantic,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 4] = [
        SpeedTier::Relaxed,
        SpeedTier::Standard,
        SpeedTier::Swift,
        SpeedTier::Frantic,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(SpeedTier::Standard)
    }

    /// The next tier, wrapping, for a cycle keybinding.
    pub fn next(&self) -> Self {
        match self {
            Self::Relaxed => Self::Standard,
            Self::Standard => Self::Swift,
            Self::Swift => Self::Frantic,
            Self::Frantic => Self::Relaxed,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Relaxed => "Relaxed",
            Self::Standard => "Standard",
            Self::Swift => "Swift",
            Self::Frantic => "Frantic",
        }
    }

    /// Multiplier applied on top of the score-scaled speeds.
    pub fn factor(&self) -> f64 {
        match self {
            Self::Relaxed => 0.85,
            Self::Standard => 1.0,
            Self::Swift => 1.2,
            Self::Frantic => 1.4,
        }
    }
}

/// Ground obstacle variants. Adding a variant means a new enum arm plus table
/// entries below and a glyph in the scene, not a new simulation code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cactus,
    Rock,
    Bush,
    Sign,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Cactus,
        ObstacleKind::Rock,
        ObstacleKind::Bush,
        ObstacleKind::Sign,
    ];

    /// Width jitter range in world units.
    pub fn width_range(&self) -> (f64, f64) {
        match self {
            Self::Cactus => (12.0, 22.0),
            Self::Rock => (18.0, 30.0),
            Self::Bush => (20.0, 34.0),
            Self::Sign => (14.0, 20.0),
        }
    }

    /// Height jitter range in world units.
    pub fn height_range(&self) -> (f64, f64) {
        match self {
            Self::Cactus => (28.0, 44.0),
            Self::Rock => (14.0, 24.0),
            Self::Bush => (12.0, 20.0),
            Self::Sign => (24.0, 36.0),
        }
    }

    /// Score awarded when this obstacle scrolls off the left edge undestroyed.
    pub fn score_value(&self) -> u32 {
        match self {
            Self::Cactus | Self::Rock | Self::Bush | Self::Sign => 1,
        }
    }
}

/// Score awarded when a bird scrolls off the left edge undestroyed.
pub const ENEMY_SCORE_VALUE: u32 = 2;

/// A ground-anchored obstacle.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// X of the left edge (world units from the left world bound).
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub kind: ObstacleKind,
}

/// An aerial enemy. Fixed size, altitude chosen at spawn.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f64,
    /// Top edge of the sprite.
    pub y: f64,
}

/// A player shot travelling right at fixed velocity.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Center position.
    pub x: f64,
    pub y: f64,
}

/// Decorative background cloud.
#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
}

/// Complete simulation state. The host loop owns exactly one of these; the
/// renderer only ever sees it behind a shared borrow.
#[derive(Debug, Clone)]
pub struct DinoGame {
    pub phase: GamePhase,
    pub speed_tier: SpeedTier,
    pub night_mode: bool,

    // -- Player --
    /// Top edge of the player square. `GROUND_Y` when standing.
    pub player_y: f64,
    /// Vertical velocity in units/frame (negative = upward).
    pub player_vy: f64,
    /// Cosmetic run animation phase, 0 or 1. No collision effect.
    pub anim_phase: u8,

    // -- World collections, each ordered by spawn time --
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub clouds: Vec<Cloud>,

    // -- Scoring --
    pub score: u32,
    /// Highest score seen, updated at the game-over transition only.
    pub best: u32,
    /// Whether the last game-over transition raised `best`.
    pub best_improved: bool,

    // -- Intent flags, set between ticks and consumed at the next frame --
    pub jump_requested: bool,
    pub fire_requested: bool,

    // -- Timing --
    /// Sub-frame accumulator for the fixed 16ms step (milliseconds).
    pub accumulated_ms: u64,
    /// Frames stepped this session.
    pub tick_count: u64,
    /// Wall-clock milliseconds fed in by the host. Never reset, so the fire
    /// cooldown stays fair across restarts.
    pub clock_ms: u64,
    /// Wall-clock stamp of the last shot. `None` means the cooldown is clear.
    pub last_fire_ms: Option<u64>,
}

impl DinoGame {
    /// Create an idle game. `best` comes from the persistence handle.
    pub fn new(best: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            speed_tier: SpeedTier::Standard,
            night_mode: false,

            player_y: GROUND_Y,
            player_vy: 0.0,
            anim_phase: 0,

            obstacles: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            clouds: Vec::new(),

            score: 0,
            best,
            best_improved: false,

            jump_requested: false,
            fire_requested: false,

            accumulated_ms: 0,
            tick_count: 0,
            clock_ms: 0,
            last_fire_ms: None,
        }
    }

    /// True while the player is above the ground.
    pub fn airborne(&self) -> bool {
        self.player_y < GROUND_Y
    }

    /// Begin a session from Idle or GameOver. Transient collections are
    /// emptied; clouds deliberately survive.
    pub fn start(&mut self) {
        self.phase = GamePhase::Running;

        self.player_y = GROUND_Y;
        self.player_vy = 0.0;
        self.anim_phase = 0;

        self.obstacles.clear();
        self.enemies.clear();
        self.projectiles.clear();

        self.score = 0;
        self.best_improved = false;
        self.tick_count = 0;
        self.accumulated_ms = 0;
        self.last_fire_ms = None;

        self.jump_requested = false;
        self.fire_requested = false;
    }

    /// Flip the scene palette. Render-only, allowed in any phase.
    pub fn toggle_night_mode(&mut self) {
        self.night_mode = !self.night_mode;
    }

    pub fn set_speed_tier(&mut self, tier: SpeedTier) {
        self.speed_tier = tier;
    }

    /// Clear the stored best in memory. The host persists the reset.
    pub fn reset_best(&mut self) {
        self.best = 0;
    }

    fn scaled_speed(&self, base: f64, scale: f64) -> f64 {
        let capped = self.score.min(SPEED_SCORE_CAP) as f64;
        (base + capped * scale) * self.speed_tier.factor()
    }

    /// Obstacle scroll speed for the current score, units/frame.
    pub fn obstacle_speed(&self) -> f64 {
        self.scaled_speed(OBSTACLE_SPEED_BASE, OBSTACLE_SPEED_SCALE)
    }

    /// Enemy fly speed, slightly ahead of the world scroll.
    pub fn enemy_speed(&self) -> f64 {
        self.scaled_speed(ENEMY_SPEED_BASE, ENEMY_SPEED_SCALE)
    }

    /// Cloud drift speed.
    pub fn cloud_speed(&self) -> f64 {
        self.scaled_speed(CLOUD_SPEED_BASE, CLOUD_SPEED_SCALE)
    }

    /// Spawn an obstacle at the right world bound with a uniformly sampled
    /// kind and jittered dimensions. Dimensions are clamped so a degenerate
    /// hitbox can never be emitted.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let kind = ObstacleKind::ALL[rng.gen_range(0..ObstacleKind::ALL.len())];
        let (w_lo, w_hi) = kind.width_range();
        let (h_lo, h_hi) = kind.height_range();
        let width = rng.gen_range(w_lo..=w_hi).max(MIN_OBSTACLE_DIM);
        let height = rng.gen_range(h_lo..=h_hi).max(MIN_OBSTACLE_DIM);

        self.obstacles.push(Obstacle {
            x: WORLD_W,
            width,
            height,
            kind,
        });
    }

    /// Spawn a bird at the right world bound, altitude sampled from the band.
    pub fn spawn_enemy<R: Rng>(&mut self, rng: &mut R) {
        let y = rng.gen_range(ENEMY_BAND_TOP..=ENEMY_BAND_BOTTOM);
        self.enemies.push(Enemy { x: WORLD_W, y });
    }

    /// Spawn a cloud at the right world bound.
    pub fn spawn_cloud<R: Rng>(&mut self, rng: &mut R) {
        let y = rng.gen_range(CLOUD_BAND_TOP..=CLOUD_BAND_BOTTOM);
        self.clouds.push(Cloud { x: WORLD_W, y });
    }
}
