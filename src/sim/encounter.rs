//! Encounter / quiz state machine
//!
//! A collision engages one enemy and suspends gameplay. The next encounter
//! pass draws a question from the enemy's genre pool and presents it; the
//! session then waits, with ticks still firing, until an answer index is
//! submitted. Resolution is atomic with submission: the enemy is defeated
//! or the player takes damage, and gameplay resumes unless a terminal state
//! was reached.

use crate::consts::*;

use super::progression;
use super::state::{EncounterState, GameEvent, SessionState};

/// Advance `Triggered` to `AwaitingAnswer` by drawing a question from the
/// engaged enemy's genre pool.
///
/// A genre with no entries in the bank resolves immediately as an automatic
/// wrong answer instead of crashing the encounter.
pub fn open_pending(state: &mut SessionState, now_ms: u64) {
    let EncounterState::Triggered { enemy_id } = state.encounter else {
        return;
    };
    let Some(enemy) = state.enemy(enemy_id) else {
        // Engaged enemy vanished; nothing to ask
        state.encounter = EncounterState::Idle;
        return;
    };
    let genre = enemy.genre.clone();

    let SessionState {
        pools, bank, rng, ..
    } = state;
    match pools.draw(&genre, bank, rng) {
        Some(question) => {
            state.push_event(GameEvent::EncounterStarted {
                enemy_id,
                genre: genre.clone(),
            });
            log::debug!("Encounter with enemy {enemy_id}: {genre} question");
            state.encounter = EncounterState::AwaitingAnswer { enemy_id, question };
        }
        None => {
            log::warn!("No questions for genre '{genre}', counting as a wrong answer");
            resolve(state, enemy_id, false, now_ms);
        }
    }
}

/// Submit a choice index for the awaiting encounter.
///
/// Ignored when nothing is awaiting or the index is out of range; the
/// encounter stays open in the latter case.
pub fn submit_answer(state: &mut SessionState, choice: usize, now_ms: u64) {
    let EncounterState::AwaitingAnswer {
        enemy_id,
        ref question,
    } = state.encounter
    else {
        return;
    };
    if choice >= question.choices.len() {
        log::debug!("Ignoring out-of-range answer index {choice}");
        return;
    }
    let correct = choice == question.correct;
    resolve(state, enemy_id, correct, now_ms);
}

/// Resolve the open encounter: defeat the enemy or damage the player, then
/// return to `Idle` (or a terminal phase).
fn resolve(state: &mut SessionState, enemy_id: u32, correct: bool, now_ms: u64) {
    state.encounter = EncounterState::Idle;
    state.push_event(GameEvent::AnswerJudged { enemy_id, correct });

    if correct {
        let was_boss = state
            .remove_enemy(enemy_id)
            .map(|enemy| enemy.boss)
            .unwrap_or(false);
        state.score += SCORE_REWARD;
        state.defeated += 1;
        state.push_event(GameEvent::EnemyDefeated { enemy_id });
        log::info!(
            "Enemy {enemy_id} defeated (score {}, defeated {})",
            state.score,
            state.defeated
        );

        if was_boss {
            progression::game_clear(state);
        } else {
            progression::grant_exp(state, EXP_REWARD);
        }
    } else {
        // The enemy survives; stamp it so it cannot re-trigger immediately
        if let Some(enemy) = state.enemy_mut(enemy_id) {
            enemy.last_encounter_ms = Some(now_ms);
        }
        let penalty = if state.boss_battle {
            BOSS_WRONG_PENALTY
        } else {
            1
        };
        progression::apply_damage(state, penalty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionBank;
    use crate::sim::state::{Arena, GamePhase};

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    /// Session with one engaged enemy, advanced to AwaitingAnswer
    fn awaiting_session() -> SessionState {
        let mut state = SessionState::new(42, QuestionBank::fallback(), arena());
        state.enemies.truncate(1);
        let id = state.enemies[0].id;
        state.encounter = EncounterState::Triggered { enemy_id: id };
        open_pending(&mut state, 0);
        assert!(matches!(
            state.encounter,
            EncounterState::AwaitingAnswer { .. }
        ));
        state
    }

    fn awaited_question(state: &SessionState) -> (u32, usize, usize) {
        match &state.encounter {
            EncounterState::AwaitingAnswer { enemy_id, question } => {
                (*enemy_id, question.correct, question.choices.len())
            }
            other => panic!("expected AwaitingAnswer, got {other:?}"),
        }
    }

    #[test]
    fn test_open_pending_presents_a_question() {
        let state = awaiting_session();
        let events = &state.events;
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EncounterStarted { .. })));
        assert!(state.paused());
    }

    #[test]
    fn test_correct_answer_defeats_enemy() {
        let mut state = awaiting_session();
        let (enemy_id, correct, _) = awaited_question(&state);

        submit_answer(&mut state, correct, 100);

        assert!(state.enemy(enemy_id).is_none());
        assert_eq!(state.score, SCORE_REWARD);
        assert_eq!(state.defeated, 1);
        assert_eq!(state.player.exp, EXP_REWARD);
        assert!(!state.paused());
    }

    #[test]
    fn test_wrong_answer_damages_player_and_keeps_enemy() {
        let mut state = awaiting_session();
        let (enemy_id, correct, len) = awaited_question(&state);
        let wrong = (correct + 1) % len;

        submit_answer(&mut state, wrong, 100);

        assert_eq!(state.player.hp, START_HP - 1);
        assert!(state.enemy(enemy_id).is_some());
        assert_eq!(state.enemy(enemy_id).unwrap().last_encounter_ms, Some(100));
        assert_eq!(state.player.exp, 0);
        assert!(!state.paused());
    }

    #[test]
    fn test_out_of_range_answer_is_ignored() {
        let mut state = awaiting_session();
        let (_, _, len) = awaited_question(&state);

        submit_answer(&mut state, len + 5, 100);

        assert!(matches!(
            state.encounter,
            EncounterState::AwaitingAnswer { .. }
        ));
        assert_eq!(state.player.hp, START_HP);
    }

    #[test]
    fn test_submit_with_no_encounter_is_a_noop() {
        let mut state = SessionState::new(42, QuestionBank::fallback(), arena());
        let hp = state.player.hp;
        let count = state.enemies.len();

        submit_answer(&mut state, 0, 100);

        assert_eq!(state.player.hp, hp);
        assert_eq!(state.enemies.len(), count);
        assert!(matches!(state.encounter, EncounterState::Idle));
    }

    #[test]
    fn test_missing_genre_counts_as_wrong_answer() {
        let mut state = SessionState::new(42, QuestionBank::fallback(), arena());
        state.enemies.truncate(1);
        state.enemies[0].genre = "NoSuchGenre".to_string();
        let id = state.enemies[0].id;
        state.encounter = EncounterState::Triggered { enemy_id: id };

        open_pending(&mut state, 700);

        assert_eq!(state.player.hp, START_HP - 1);
        assert!(matches!(state.encounter, EncounterState::Idle));
        assert_eq!(state.enemy(id).unwrap().last_encounter_ms, Some(700));
    }

    #[test]
    fn test_fatal_wrong_answer_ends_the_session() {
        let mut state = awaiting_session();
        state.player.hp = 1;
        let (_, correct, len) = awaited_question(&state);

        submit_answer(&mut state, (correct + 1) % len, 100);

        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.paused());
    }

    #[test]
    fn test_boss_wrong_answer_costs_three() {
        let mut state = SessionState::new(42, QuestionBank::fallback(), arena());
        state.enemies.clear();
        state.boss_battle = true;
        state.player.hp = 5;
        state.player.max_hp = 5;
        let boss_id = state.spawn_boss(arena());
        state.encounter = EncounterState::Triggered { enemy_id: boss_id };
        open_pending(&mut state, 0);

        let (_, correct, len) = awaited_question(&state);
        submit_answer(&mut state, (correct + 1) % len, 100);

        assert_eq!(state.player.hp, 5 - BOSS_WRONG_PENALTY);
        assert!(state.enemy(boss_id).is_some());
    }

    #[test]
    fn test_boss_correct_answer_clears_the_game() {
        let mut state = SessionState::new(42, QuestionBank::fallback(), arena());
        state.enemies.clear();
        state.boss_battle = true;
        let boss_id = state.spawn_boss(arena());
        state.encounter = EncounterState::Triggered { enemy_id: boss_id };
        open_pending(&mut state, 0);

        let (_, correct, _) = awaited_question(&state);
        submit_answer(&mut state, correct, 100);

        assert_eq!(state.phase, GamePhase::GameClear);
        assert!(state.enemies.is_empty());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameCleared { .. })));
    }
}
