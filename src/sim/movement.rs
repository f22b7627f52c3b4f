//! Movement engine
//!
//! Advances the player from directional intent and each enemy per its
//! behavior variant, then clamps everything into the arena. Both passes are
//! no-ops while the session is paused.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::clamp_to_extent;
use crate::consts::*;
use crate::input::Intent;

use super::state::{Arena, Behavior, Enemy, SessionState};

/// Advance the player by `intent * speed * dt`, each axis clamped
/// independently into `[0, arena - size]`
pub fn move_player(state: &mut SessionState, intent: Intent, arena: Arena, dt: f32) {
    if state.paused() {
        return;
    }
    let delta = Vec2::new(intent.x as f32, intent.y as f32) * PLAYER_SPEED * dt;
    let pos = state.player.pos + delta;
    state.player.pos = Vec2::new(
        clamp_to_extent(pos.x, PLAYER_SIZE, arena.width),
        clamp_to_extent(pos.y, PLAYER_SIZE, arena.height),
    );
}

/// Advance every live enemy per its behavior, then hard-clamp into bounds
pub fn move_enemies(state: &mut SessionState, arena: Arena, dt: f32) {
    if state.paused() {
        return;
    }
    let player_center = state.player.center();
    let scalar = if state.player.level >= DIFFICULTY_LEVEL {
        DIFFICULTY_SCALAR
    } else {
        1.0
    };

    let SessionState { enemies, rng, .. } = state;
    for enemy in enemies.iter_mut() {
        steer(enemy, player_center, rng);

        let mut speed = enemy.speed * scalar;
        if enemy.behavior == Behavior::Dash {
            speed *= DASH_MULTIPLIER;
        }
        enemy.pos += Vec2::new(enemy.heading.cos(), enemy.heading.sin()) * speed * dt;

        reflect_on_walls(enemy, arena, rng);
        enemy.pos.x = clamp_to_extent(enemy.pos.x, enemy.size, arena.width);
        enemy.pos.y = clamp_to_extent(enemy.pos.y, enemy.size, arena.height);
    }
}

/// Update the heading for heading-driven variants
fn steer(enemy: &mut Enemy, player_center: Vec2, rng: &mut Pcg32) {
    match enemy.behavior {
        Behavior::Wander => {
            if rng.random_bool(WANDER_TURN_CHANCE) {
                enemy.heading = rng.random_range(0.0..TAU);
            }
        }
        // Bounce steers only on wall contact; Dash keeps its spawn heading
        Behavior::Bounce | Behavior::Dash => {}
        Behavior::Chase => {
            let to_player = player_center - enemy.center();
            enemy.heading = to_player.y.atan2(to_player.x);
        }
        Behavior::Flee => {
            let away = enemy.center() - player_center;
            enemy.heading = away.y.atan2(away.x);
        }
    }
}

/// Reflect a bouncing enemy's heading off the walls it touched this tick,
/// with a small jitter to avoid perfect loops
fn reflect_on_walls(enemy: &mut Enemy, arena: Arena, rng: &mut Pcg32) {
    if enemy.behavior != Behavior::Bounce {
        return;
    }
    let max_x = (arena.width - enemy.size).max(0.0);
    let max_y = (arena.height - enemy.size).max(0.0);
    let mut bounced = false;
    if enemy.pos.x <= 0.0 || enemy.pos.x >= max_x {
        enemy.heading = PI - enemy.heading;
        bounced = true;
    }
    if enemy.pos.y <= 0.0 || enemy.pos.y >= max_y {
        enemy.heading = -enemy.heading;
        bounced = true;
    }
    if bounced {
        enemy.heading += rng.random_range(-BOUNCE_JITTER / 2.0..BOUNCE_JITTER / 2.0);
    }
}
