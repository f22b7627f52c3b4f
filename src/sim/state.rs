//! Session state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::quiz::{DrawPools, Question, QuestionBank};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal gameplay; movement and collision passes run
    Roaming,
    /// HP reached zero; gameplay is permanently frozen
    GameOver,
    /// The boss question was answered correctly; gameplay is permanently frozen
    GameClear,
}

/// Playable area, re-read from the host every tick so a resize re-clamps
/// entities on the next pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Enemy movement behaviors, dispatched per tick by the movement engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Keep a heading, occasionally resample it
    Wander,
    /// Reflect the heading off arena walls
    Bounce,
    /// Re-aim at the player every tick
    Chase,
    /// Re-aim away from the player every tick
    Flee,
    /// One heading for life, at 1.5× speed
    Dash,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub level: u32,
}

impl Player {
    fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hp: START_HP,
            max_hp: START_HP,
            exp: 0,
            exp_to_next: START_EXP_TO_NEXT,
            level: 1,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }
}

/// A roaming enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub size: f32,
    /// Base speed in px/s (before the difficulty scalar)
    pub speed: f32,
    pub behavior: Behavior,
    /// Current heading in radians; scratch state for the movement engine
    pub heading: f32,
    /// Question genre this enemy asks from
    pub genre: String,
    /// Wall-clock stamp of the last resolved encounter, for the re-trigger
    /// cooldown
    pub last_encounter_ms: Option<u64>,
    pub boss: bool,
}

impl Enemy {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Encounter machine states that persist between ticks
///
/// A collision engages an enemy (`Triggered`); the next encounter pass draws
/// its question and presents it (`AwaitingAnswer`). Resolution happens
/// atomically inside [`crate::sim::submit_answer`] and returns to `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterState {
    Idle,
    /// Collision detected; no question drawn yet
    Triggered { enemy_id: u32 },
    /// A question is on screen, gameplay is suspended until an answer arrives
    AwaitingAnswer { enemy_id: u32, question: Question },
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    EncounterStarted { enemy_id: u32, genre: String },
    AnswerJudged { enemy_id: u32, correct: bool },
    EnemyDefeated { enemy_id: u32 },
    BatchRespawned { count: usize },
    LevelUp { level: u32 },
    BossSpawned { enemy_id: u32 },
    GameOver { score: u64 },
    GameCleared { score: u64 },
    /// Timed message; the host displays it and expires it after `duration_ms`
    Toast { text: String, duration_ms: u32 },
}

/// Complete session state, owned by the simulation core
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub encounter: EncounterState,
    pub player: Player,
    /// Live enemies; no duplicate ids, otherwise unordered
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub defeated: u32,
    pub boss_battle: bool,
    pub(crate) bank: QuestionBank,
    pub(crate) pools: DrawPools,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Non-boss genres assigned round-robin at spawn
    genre_rotation: Vec<String>,
    next_id: u32,
}

impl SessionState {
    /// Create a session with the player centered and an initial enemy batch
    pub fn new(seed: u64, bank: QuestionBank, arena: Arena) -> Self {
        let mut rotation: Vec<String> = bank
            .genres()
            .filter(|g| *g != BOSS_GENRE)
            .map(|g| g.to_string())
            .collect();
        if rotation.is_empty() {
            rotation = bank.genres().map(|g| g.to_string()).collect();
        }

        let player_pos = Vec2::new(
            ((arena.width - PLAYER_SIZE) / 2.0).max(0.0),
            ((arena.height - PLAYER_SIZE) / 2.0).max(0.0),
        );

        let mut state = Self {
            seed,
            phase: GamePhase::Roaming,
            encounter: EncounterState::Idle,
            player: Player::new(player_pos),
            enemies: Vec::new(),
            score: 0,
            defeated: 0,
            boss_battle: false,
            bank,
            pools: DrawPools::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            genre_rotation: rotation,
            next_id: 1,
        };
        state.spawn_batch(arena);
        state
    }

    /// Gameplay is suspended iff an encounter is open or the session ended
    pub fn paused(&self) -> bool {
        self.is_ended() || !matches!(self.encounter, EncounterState::Idle)
    }

    /// True once a terminal phase was reached
    pub fn is_ended(&self) -> bool {
        self.phase != GamePhase::Roaming
    }

    /// Allocate a new entity id
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub(crate) fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Remove an enemy from the live set, returning it
    pub(crate) fn remove_enemy(&mut self, id: u32) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Spawn a full enemy batch at random positions outside the keep-out
    /// radius around the player. Returns the number spawned.
    pub(crate) fn spawn_batch(&mut self, arena: Arena) -> usize {
        let player_center = self.player.center();
        let max_x = (arena.width - ENEMY_SIZE).max(0.0);
        let max_y = (arena.height - ENEMY_SIZE).max(0.0);
        let keepout_sq = SPAWN_KEEPOUT * SPAWN_KEEPOUT;

        for i in 0..SPAWN_BATCH {
            // Reject positions near the player; a cramped arena gives up
            // after SPAWN_ATTEMPTS and accepts the last roll
            let mut pos = Vec2::ZERO;
            for _ in 0..SPAWN_ATTEMPTS {
                pos = Vec2::new(
                    self.rng.random_range(0.0..=max_x),
                    self.rng.random_range(0.0..=max_y),
                );
                if pos.distance_squared(player_center) >= keepout_sq {
                    break;
                }
            }

            let behavior = match self.rng.random_range(0..5u8) {
                0 => Behavior::Bounce,
                1 => Behavior::Chase,
                2 => Behavior::Flee,
                3 => Behavior::Dash,
                _ => Behavior::Wander,
            };
            let speed = self.rng.random_range(ENEMY_SPEED_MIN..ENEMY_SPEED_MAX);
            let heading = self.rng.random_range(0.0..std::f32::consts::TAU);
            let genre = if self.genre_rotation.is_empty() {
                String::new()
            } else {
                self.genre_rotation[i % self.genre_rotation.len()].clone()
            };

            let id = self.next_entity_id();
            self.enemies.push(Enemy {
                id,
                pos,
                size: ENEMY_SIZE,
                speed,
                behavior,
                heading,
                genre,
                last_encounter_ms: None,
                boss: false,
            });
        }
        SPAWN_BATCH
    }

    /// Spawn the single boss entity at the arena center
    pub(crate) fn spawn_boss(&mut self, arena: Arena) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos: Vec2::new(
                ((arena.width - BOSS_SIZE) / 2.0).max(0.0),
                ((arena.height - BOSS_SIZE) / 2.0).max(0.0),
            ),
            size: BOSS_SIZE,
            speed: BOSS_SPEED,
            behavior: Behavior::Chase,
            heading: 0.0,
            genre: BOSS_GENRE.to_string(),
            last_encounter_ms: None,
            boss: true,
        });
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's pending notifications for the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
