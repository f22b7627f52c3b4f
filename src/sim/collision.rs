//! Player-enemy collision detection
//!
//! Axis-aligned overlap between the player and every live enemy, gated by a
//! wall-clock re-trigger cooldown. At most one enemy is engaged per tick;
//! the detector is a no-op while the session is paused, and during a boss
//! battle only the boss itself can collide.

use glam::Vec2;

use crate::consts::{ENCOUNTER_COOLDOWN_MS, PLAYER_SIZE};

use super::state::SessionState;

/// Standard rectangle overlap test between two axis-aligned boxes given by
/// their top-left corners and edge lengths
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.x < b_pos.x + b_size
        && a_pos.x + a_size > b_pos.x
        && a_pos.y < b_pos.y + b_size
        && a_pos.y + a_size > b_pos.y
}

/// Find the first enemy in list order overlapping the player, honoring the
/// per-enemy cooldown. Returns at most one id; the caller engages it.
pub fn find_encounter(state: &SessionState, now_ms: u64) -> Option<u32> {
    if state.paused() {
        return None;
    }
    state
        .enemies
        .iter()
        .filter(|e| !state.boss_battle || e.boss)
        .filter(|e| {
            e.last_encounter_ms
                .is_none_or(|t| now_ms.saturating_sub(t) >= ENCOUNTER_COOLDOWN_MS)
        })
        .find(|e| aabb_overlap(state.player.pos, PLAYER_SIZE, e.pos, e.size))
        .map(|e| e.id)
}
