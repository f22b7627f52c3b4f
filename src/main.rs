//! Quiz Rumble entry point
//!
//! Headless demo driver: runs a scripted session against the shipped
//! question bank and logs the outcome. The auto-pilot walks toward the
//! nearest eligible enemy and answers most questions correctly.

use std::fs;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use quiz_rumble::consts::SIM_DT;
use quiz_rumble::sim::{
    Arena, EncounterState, GamePhase, SessionState, TickInput, submit_answer, tick,
};
use quiz_rumble::{BestScore, Intent, QuestionBank};

const BANK_PATH: &str = "assets/questions.json";
const BEST_SCORE_PATH: &str = "best_score.json";
/// Stop a runaway demo after an hour of simulated play
const MAX_TICKS: u64 = 60 * 60 * 60;
/// Auto-pilot answer accuracy
const ACCURACY: f64 = 0.95;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    log::info!("Quiz Rumble demo starting (seed {seed})");

    let bank = QuestionBank::load_or_fallback(fs::read_to_string(BANK_PATH).ok().as_deref());
    let arena = Arena::new(960.0, 720.0);
    let mut state = SessionState::new(seed, bank, arena);
    let mut pilot = Pcg32::seed_from_u64(seed ^ 0xF00D);

    let mut now_ms: u64 = 0;
    for _ in 0..MAX_TICKS {
        let input = TickInput {
            intent: seek_intent(&state),
            arena,
            now_ms,
        };
        tick(&mut state, &input, SIM_DT);
        now_ms += (SIM_DT * 1000.0) as u64;

        if let EncounterState::AwaitingAnswer { question, .. } = &state.encounter {
            let choice = if pilot.random_bool(ACCURACY) {
                question.correct
            } else {
                (question.correct + 1) % question.choices.len()
            };
            submit_answer(&mut state, choice, now_ms);
        }

        for event in state.drain_events() {
            log::debug!("event: {event:?}");
        }

        if state.is_ended() {
            break;
        }
    }

    let snap = state.snapshot();
    match snap.phase {
        GamePhase::GameClear => {
            let mut best = BestScore::load(BEST_SCORE_PATH);
            let previous = best.best();
            if best.record(snap.score) {
                log::info!("Cleared with score {} - new best (was {previous})", snap.score);
            } else {
                log::info!("Cleared with score {} (best remains {previous})", snap.score);
            }
        }
        GamePhase::GameOver => {
            log::info!(
                "Game over at level {} with score {} ({} defeated)",
                snap.level,
                snap.score,
                snap.defeated
            );
        }
        GamePhase::Roaming => log::warn!("Demo hit the tick limit without finishing"),
    }
}

/// Walk toward the nearest eligible enemy (only the boss during a boss battle)
fn seek_intent(state: &SessionState) -> Intent {
    let player = state.player.center();
    let target = state
        .enemies
        .iter()
        .filter(|e| !state.boss_battle || e.boss)
        .min_by(|a, b| {
            a.center()
                .distance_squared(player)
                .total_cmp(&b.center().distance_squared(player))
        });
    match target {
        Some(enemy) => {
            let to = enemy.center() - player;
            Intent {
                x: axis(to.x),
                y: axis(to.y),
            }
        }
        None => Intent::default(),
    }
}

fn axis(v: f32) -> i32 {
    if v > 1.0 {
        1
    } else if v < -1.0 {
        -1
    } else {
        0
    }
}
