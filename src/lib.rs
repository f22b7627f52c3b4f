//! Quiz Rumble - a top-down quiz battle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, encounters, progression)
//! - `quiz`: Genre-tagged question bank and per-genre draw pools
//! - `input`: Directional intent merging (keyboard + virtual pad)
//! - `best_score`: Single best-score persistence

pub mod best_score;
pub mod input;
pub mod quiz;
pub mod sim;

pub use best_score::BestScore;
pub use input::Intent;
pub use quiz::{Question, QuestionBank};
pub use sim::{SessionState, Snapshot, TickInput, submit_answer, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Player bounding box edge (px)
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Enemy bounding box edge (px)
    pub const ENEMY_SIZE: f32 = 64.0;
    /// Boss bounding box edge (px)
    pub const BOSS_SIZE: f32 = 96.0;

    /// Player speed (px/s; 4 px per tick at 60 Hz)
    pub const PLAYER_SPEED: f32 = 240.0;
    /// Enemy speed range, rolled once at spawn (px/s)
    pub const ENEMY_SPEED_MIN: f32 = 60.0;
    pub const ENEMY_SPEED_MAX: f32 = 180.0;
    /// Boss speed (px/s)
    pub const BOSS_SPEED: f32 = 120.0;
    /// Dash enemies move in a straight line at this multiple of their speed
    pub const DASH_MULTIPLIER: f32 = 1.5;
    /// Per-tick chance that a wandering enemy resamples its heading
    pub const WANDER_TURN_CHANCE: f64 = 0.05;
    /// Heading jitter applied after a wall bounce (radians, centered on zero)
    pub const BOUNCE_JITTER: f32 = 0.2;
    /// Enemy speed scalar once the player reaches `DIFFICULTY_LEVEL`
    pub const DIFFICULTY_SCALAR: f32 = 1.1;
    pub const DIFFICULTY_LEVEL: u32 = 5;

    /// Enemies per spawn batch
    pub const SPAWN_BATCH: usize = 10;
    /// Minimum spawn distance from the player (px)
    pub const SPAWN_KEEPOUT: f32 = 150.0;
    /// Placement attempts before accepting a spot inside the keep-out radius
    pub const SPAWN_ATTEMPTS: u32 = 100;

    /// Wall-clock cooldown before a once-fought enemy can re-trigger (ms)
    pub const ENCOUNTER_COOLDOWN_MS: u64 = 1_000;

    /// Starting hit points
    pub const START_HP: i32 = 3;
    /// EXP required for the first level-up
    pub const START_EXP_TO_NEXT: u32 = 100;
    /// EXP granted per defeated enemy
    pub const EXP_REWARD: u32 = 25;
    /// Score granted per defeated enemy
    pub const SCORE_REWARD: u64 = 100;
    /// EXP-to-next growth factor per level (floored)
    pub const EXP_GROWTH: f32 = 1.2;
    /// Levels that also grant +1 current and max HP
    pub const HP_BONUS_LEVELS: [u32; 2] = [2, 3];
    /// Reaching this level starts the boss battle
    pub const BOSS_LEVEL: u32 = 10;
    /// HP cost of a wrong answer during the boss battle
    pub const BOSS_WRONG_PENALTY: i32 = 3;
    /// Quiz genre reserved for the boss encounter
    pub const BOSS_GENRE: &str = "Final";

    /// Display durations for timed toast events (ms)
    pub const TOAST_SHORT_MS: u32 = 1_200;
    pub const TOAST_LONG_MS: u32 = 2_500;
}

/// Clamp a box coordinate so a box of `size` stays inside `[0, extent]`
#[inline]
pub fn clamp_to_extent(value: f32, size: f32, extent: f32) -> f32 {
    value.clamp(0.0, (extent - size).max(0.0))
}
