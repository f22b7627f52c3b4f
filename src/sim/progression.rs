//! Progression controller
//!
//! EXP accumulation with carry-over level-ups, HP grants at early levels,
//! the boss-battle trigger, and the two terminal states. Population
//! housekeeping (batch respawn, boss spawn) also lives here since both are
//! progression-gated.

use crate::consts::*;

use super::state::{Arena, EncounterState, GameEvent, GamePhase, SessionState};

/// Add EXP, carrying remainders across as many level-ups as it pays for
pub fn grant_exp(state: &mut SessionState, amount: u32) {
    state.player.exp += amount;
    while state.player.exp >= state.player.exp_to_next {
        state.player.exp -= state.player.exp_to_next;
        state.player.level += 1;
        state.player.exp_to_next =
            (state.player.exp_to_next as f32 * EXP_GROWTH).floor() as u32;

        if HP_BONUS_LEVELS.contains(&state.player.level) {
            state.player.hp += 1;
            state.player.max_hp += 1;
        }

        log::info!("Level up: {}", state.player.level);
        state.push_event(GameEvent::LevelUp {
            level: state.player.level,
        });
        state.push_event(GameEvent::Toast {
            text: "LEVEL UP!".to_string(),
            duration_ms: TOAST_SHORT_MS,
        });
    }

    if state.player.level >= BOSS_LEVEL && !state.boss_battle {
        state.boss_battle = true;
        state.push_event(GameEvent::Toast {
            text: "The boss approaches...".to_string(),
            duration_ms: TOAST_LONG_MS,
        });
        log::info!("Boss battle triggered at level {}", state.player.level);
    }
}

/// Deduct HP; at zero the session ends in `GameOver`
pub fn apply_damage(state: &mut SessionState, amount: i32) {
    state.player.hp -= amount;
    if state.player.hp <= 0 {
        state.player.hp = 0;
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!("Game over (score {})", state.score);
    }
}

/// Terminal clear, entered when the boss question is answered correctly
pub fn game_clear(state: &mut SessionState) {
    state.phase = GamePhase::GameClear;
    state.push_event(GameEvent::GameCleared { score: state.score });
    log::info!("Game clear (score {})", state.score);
}

/// Keep the arena populated:
/// - an emptied live set respawns a full batch (outside a boss battle)
/// - a pending boss battle spawns the boss and opens its scripted encounter
///
/// Runs only while gameplay is live; a paused or ended session is left
/// untouched.
pub fn ensure_population(state: &mut SessionState, arena: Arena) {
    if state.paused() {
        return;
    }

    if state.boss_battle {
        if !state.enemies.iter().any(|e| e.boss) {
            let enemy_id = state.spawn_boss(arena);
            state.push_event(GameEvent::BossSpawned { enemy_id });
            // Scripted engagement: the boss encounter opens without a collision
            state.encounter = EncounterState::Triggered { enemy_id };
        }
    } else if state.enemies.is_empty() {
        let count = state.spawn_batch(arena);
        state.push_event(GameEvent::BatchRespawned { count });
        log::info!("Respawned {count} enemies");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionBank;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    fn session() -> SessionState {
        SessionState::new(42, QuestionBank::fallback(), arena())
    }

    #[test]
    fn test_exp_accumulates_below_threshold() {
        let mut state = session();
        grant_exp(&mut state, 40);
        assert_eq!(state.player.exp, 40);
        assert_eq!(state.player.level, 1);
    }

    #[test]
    fn test_level_up_carries_remainder() {
        let mut state = session();
        state.player.exp = 90;

        grant_exp(&mut state, 25);

        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.exp, 15);
        assert_eq!(state.player.exp_to_next, 120);
        // Level 2 is an HP bonus level
        assert_eq!(state.player.hp, START_HP + 1);
        assert_eq!(state.player.max_hp, START_HP + 1);
    }

    #[test]
    fn test_hp_bonus_only_at_threshold_levels() {
        let mut state = session();
        state.player.level = 3;
        state.player.exp_to_next = 100;
        state.player.exp = 99;

        grant_exp(&mut state, 1);

        assert_eq!(state.player.level, 4);
        assert_eq!(state.player.hp, START_HP);
        assert_eq!(state.player.max_hp, START_HP);
    }

    #[test]
    fn test_one_grant_can_pay_for_two_levels() {
        let mut state = session();
        state.player.exp = 99;

        grant_exp(&mut state, 122);

        // 99+122 = 221 -> level 2 (carry 121), threshold 120 -> level 3 (carry 1)
        assert_eq!(state.player.level, 3);
        assert_eq!(state.player.exp, 1);
        assert_eq!(state.player.hp, START_HP + 2);
    }

    #[test]
    fn test_boss_level_sets_the_flag_once() {
        let mut state = session();
        state.player.level = BOSS_LEVEL - 1;
        state.player.exp = state.player.exp_to_next - 1;

        grant_exp(&mut state, 1);

        assert_eq!(state.player.level, BOSS_LEVEL);
        assert!(state.boss_battle);
    }

    #[test]
    fn test_damage_to_zero_is_game_over() {
        let mut state = session();
        apply_damage(&mut state, 1);
        assert_eq!(state.phase, GamePhase::Roaming);

        apply_damage(&mut state, 2);
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.paused());
    }

    #[test]
    fn test_overkill_damage_floors_at_zero() {
        let mut state = session();
        apply_damage(&mut state, BOSS_WRONG_PENALTY + 5);
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_empty_set_respawns_a_batch() {
        let mut state = session();
        state.enemies.clear();

        ensure_population(&mut state, arena());

        assert_eq!(state.enemies.len(), SPAWN_BATCH);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BatchRespawned { .. })));
    }

    #[test]
    fn test_boss_battle_spawns_and_engages_the_boss() {
        let mut state = session();
        state.boss_battle = true;

        ensure_population(&mut state, arena());

        let boss = state.enemies.iter().find(|e| e.boss).expect("boss spawned");
        assert_eq!(boss.genre, BOSS_GENRE);
        assert_eq!(
            state.encounter,
            EncounterState::Triggered { enemy_id: boss.id }
        );
        // Scripted engagement spawns exactly one boss, once
        let boss_count = state.enemies.iter().filter(|e| e.boss).count();
        assert_eq!(boss_count, 1);
    }

    #[test]
    fn test_no_respawn_during_boss_battle() {
        let mut state = session();
        state.enemies.clear();
        state.boss_battle = true;

        ensure_population(&mut state, arena());

        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].boss);
    }

    #[test]
    fn test_population_untouched_while_ended() {
        let mut state = session();
        state.enemies.clear();
        state.phase = GamePhase::GameOver;

        ensure_population(&mut state, arena());

        assert!(state.enemies.is_empty());
    }
}
