//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Wall clock injected by the host (encounter cooldowns only)
//! - No rendering or platform dependencies

pub mod collision;
pub mod encounter;
pub mod movement;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, find_encounter};
pub use encounter::submit_answer;
pub use snapshot::{EnemyView, PromptView, Snapshot};
pub use state::{
    Arena, Behavior, Enemy, EncounterState, GameEvent, GamePhase, Player, SessionState,
};
pub use tick::{TickInput, tick};
