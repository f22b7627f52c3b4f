//! Genre-tagged question bank and draw pools
//!
//! The bank is fetched once as a JSON document mapping genre names to
//! question arrays. A missing or empty document falls back to a built-in
//! set so a session can always start.

use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::BOSS_GENRE;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub choices: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct: usize,
}

/// Mapping from genre name to its questions, immutable after load
///
/// Genres iterate in name order so enemy genre assignment is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(flatten)]
    genres: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    /// Parse a bank document (`{"genre": [{question, choices, correctIndex}, ...]}`)
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse the fetched document, substituting the built-in fallback bank
    /// on a missing source, a parse error, or an empty result
    pub fn load_or_fallback(source: Option<&str>) -> Self {
        match source.map(Self::from_json_str) {
            Some(Ok(bank)) if !bank.is_empty() => {
                log::info!(
                    "Loaded question bank: {} genres, {} questions",
                    bank.genres.len(),
                    bank.question_count()
                );
                bank
            }
            Some(Ok(_)) => {
                log::warn!("Question bank is empty, using fallback bank");
                Self::fallback()
            }
            Some(Err(err)) => {
                log::warn!("Failed to parse question bank ({err}), using fallback bank");
                Self::fallback()
            }
            None => {
                log::warn!("Question bank unavailable, using fallback bank");
                Self::fallback()
            }
        }
    }

    /// Built-in bank used when the fetched document cannot be used
    pub fn fallback() -> Self {
        fn q(prompt: &str, choices: &[&str], correct: usize) -> Question {
            Question {
                prompt: prompt.to_string(),
                choices: choices.iter().map(|c| c.to_string()).collect(),
                correct,
            }
        }

        let mut genres = BTreeMap::new();
        genres.insert(
            "Math".to_string(),
            vec![
                q("What is 7 × 8?", &["54", "56", "64", "72"], 1),
                q("What is the square root of 144?", &["10", "11", "12", "14"], 2),
                q("What is 15% of 200?", &["20", "25", "30", "35"], 2),
            ],
        );
        genres.insert(
            "Science".to_string(),
            vec![
                q("What planet is known as the Red Planet?", &["Venus", "Mars", "Jupiter"], 1),
                q("What gas do plants absorb?", &["Oxygen", "Nitrogen", "Carbon dioxide"], 2),
            ],
        );
        genres.insert(
            "History".to_string(),
            vec![
                q("In which year did World War II end?", &["1943", "1945", "1947"], 1),
                q("Who was the first president of the USA?", &["Lincoln", "Washington", "Adams"], 1),
            ],
        );
        genres.insert(
            BOSS_GENRE.to_string(),
            vec![q(
                "What is the only number that equals twice the sum of its digits?",
                &["9", "18", "27", "81"],
                1,
            )],
        );
        Self { genres }
    }

    /// True when no genre holds any question
    pub fn is_empty(&self) -> bool {
        self.genres.values().all(|qs| qs.is_empty())
    }

    /// Total question count across genres
    pub fn question_count(&self) -> usize {
        self.genres.values().map(|qs| qs.len()).sum()
    }

    /// Genre names in stable (sorted) order
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(|g| g.as_str())
    }

    /// Questions for a genre, if it exists
    pub fn questions(&self, genre: &str) -> Option<&[Question]> {
        self.genres.get(genre).map(|qs| qs.as_slice())
    }
}

/// Per-genre working set of not-yet-asked question indices
///
/// Draws sample without replacement; an exhausted pool is refilled to the
/// full genre list before the next draw.
#[derive(Debug, Clone, Default)]
pub struct DrawPools {
    pools: BTreeMap<String, Vec<usize>>,
}

impl DrawPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next question for `genre`, refilling the pool when dry.
    /// `None` when the bank has no questions for the genre.
    pub fn draw(&mut self, genre: &str, bank: &QuestionBank, rng: &mut Pcg32) -> Option<Question> {
        let questions = bank.questions(genre)?;
        if questions.is_empty() {
            return None;
        }
        let pool = self.pools.entry(genre.to_string()).or_default();
        if pool.is_empty() {
            pool.extend(0..questions.len());
        }
        let slot = rng.random_range(0..pool.len());
        let index = pool.swap_remove(slot);
        Some(questions[index].clone())
    }

    /// Not-yet-asked count for a genre (full size if never drawn from)
    pub fn remaining(&self, genre: &str, bank: &QuestionBank) -> usize {
        match self.pools.get(genre) {
            Some(pool) => pool.len(),
            None => bank.questions(genre).map_or(0, |qs| qs.len()),
        }
    }
}
