//! Per-tick render view
//!
//! The presentation layer receives a flat snapshot of everything it may
//! want to draw and holds no other access to the core; the core never
//! queries the display for truth.

use serde::Serialize;

use super::state::{EncounterState, GamePhase, SessionState};

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub genre: String,
    pub boss: bool,
}

/// The open question as the player sees it (no correct index)
#[derive(Debug, Clone, Serialize)]
pub struct PromptView {
    pub genre: String,
    pub prompt: String,
    pub choices: Vec<String>,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub player_x: f32,
    pub player_y: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    /// exp / exp_to_next, for the EXP bar
    pub exp_fraction: f32,
    pub score: u64,
    pub defeated: u32,
    pub boss_battle: bool,
    pub enemies: Vec<EnemyView>,
    pub prompt: Option<PromptView>,
}

impl SessionState {
    /// Build the render view for the current frame
    pub fn snapshot(&self) -> Snapshot {
        let prompt = match &self.encounter {
            EncounterState::AwaitingAnswer { enemy_id, question } => {
                let genre = self
                    .enemy(*enemy_id)
                    .map(|e| e.genre.clone())
                    .unwrap_or_default();
                Some(PromptView {
                    genre,
                    prompt: question.prompt.clone(),
                    choices: question.choices.clone(),
                })
            }
            _ => None,
        };

        Snapshot {
            phase: self.phase,
            paused: self.paused(),
            player_x: self.player.pos.x,
            player_y: self.player.pos.y,
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            level: self.player.level,
            exp: self.player.exp,
            exp_to_next: self.player.exp_to_next,
            exp_fraction: if self.player.exp_to_next > 0 {
                self.player.exp as f32 / self.player.exp_to_next as f32
            } else {
                0.0
            },
            score: self.score,
            defeated: self.defeated,
            boss_battle: self.boss_battle,
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    size: e.size,
                    genre: e.genre.clone(),
                    boss: e.boss,
                })
                .collect(),
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_BATCH;
    use crate::quiz::QuestionBank;
    use crate::sim::encounter::open_pending;
    use crate::sim::state::Arena;

    #[test]
    fn test_snapshot_mirrors_session() {
        let state = SessionState::new(42, QuestionBank::fallback(), Arena::new(800.0, 600.0));
        let snap = state.snapshot();

        assert_eq!(snap.enemies.len(), SPAWN_BATCH);
        assert_eq!(snap.hp, state.player.hp);
        assert_eq!(snap.level, 1);
        assert!(!snap.paused);
        assert!(snap.prompt.is_none());
        assert_eq!(snap.exp_fraction, 0.0);
    }

    #[test]
    fn test_snapshot_prompt_hides_the_answer() {
        let mut state = SessionState::new(42, QuestionBank::fallback(), Arena::new(800.0, 600.0));
        let id = state.enemies[0].id;
        state.encounter = crate::sim::state::EncounterState::Triggered { enemy_id: id };
        open_pending(&mut state, 0);

        let snap = state.snapshot();
        let prompt = snap.prompt.as_ref().expect("prompt present while awaiting");
        assert!(!prompt.prompt.is_empty());
        assert!(prompt.choices.len() >= 2);
        assert!(snap.paused);

        // Serialized form carries no correct index
        let json = serde_json::to_string(&snap).unwrap();
        assert!(!json.contains("correct"));
    }
}
