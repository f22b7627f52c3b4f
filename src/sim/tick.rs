//! Fixed timestep session tick
//!
//! One tick runs movement, collision, the encounter pass, and population
//! housekeeping in that fixed order. Terminal phases make the whole tick a
//! no-op so the host scheduler can keep firing for UI transitions; an open
//! encounter suspends movement/collision only (cooperative suspension, the
//! answer entry point stays live).

use crate::input::Intent;

use super::encounter;
use super::progression;
use super::state::{Arena, EncounterState, SessionState};
use super::{collision, movement};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Merged directional intent, each axis in {-1, 0, 1}
    pub intent: Intent,
    /// Current playable area, re-read from the host every tick
    pub arena: Arena,
    /// Host wall-clock in milliseconds, used only for encounter cooldowns
    pub now_ms: u64,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.is_ended() {
        return;
    }

    if !state.paused() {
        movement::move_player(state, input.intent, input.arena, dt);
        movement::move_enemies(state, input.arena, dt);

        if let Some(enemy_id) = collision::find_encounter(state, input.now_ms) {
            state.encounter = EncounterState::Triggered { enemy_id };
        }
    }

    // Open the question for a collision from this tick (or a scripted boss
    // engagement from the previous one)
    encounter::open_pending(state, input.now_ms);

    progression::ensure_population(state, input.arena);
}
