pub mod blank;
pub mod exercise;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_BLANK_PLACEHOLDER;
use crate::session::SessionMode;

pub use exercise::ExerciseGenerator;

/// Source of permutations for exercise order and option order.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Uniform shuffles backed by any `rand` generator.
pub struct RngShuffler<R> {
    rng: R,
}

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngShuffler<SmallRng> {
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves every slice untouched. Makes generation fully deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct InOrder;

impl Shuffler for InOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    MultipleChoice,
    FillBlank,
    Write,
}

impl ExerciseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::MultipleChoice => "multiple_choice",
            ExerciseKind::FillBlank => "fill_blank",
            ExerciseKind::Write => "write",
        }
    }

    /// Learning mode is multiple-choice only; Test mode rotates by position.
    pub fn for_position(mode: SessionMode, index: usize) -> Self {
        match mode {
            SessionMode::Learning => ExerciseKind::MultipleChoice,
            SessionMode::Test => match index % 3 {
                0 => ExerciseKind::MultipleChoice,
                1 => ExerciseKind::Write,
                _ => ExerciseKind::FillBlank,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub kind: ExerciseKind,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
}

impl Exercise {
    pub fn is_correct(&self, answer: &str) -> bool {
        match self.kind {
            ExerciseKind::MultipleChoice | ExerciseKind::FillBlank => answer == self.correct_answer,
            ExerciseKind::Write => {
                answer.trim().to_lowercase() == self.correct_answer.trim().to_lowercase()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorLimits {
    pub learning: usize,
    pub test: usize,
    pub blank_placeholder: String,
}

impl GeneratorLimits {
    pub fn max_for(&self, mode: SessionMode) -> usize {
        match mode {
            SessionMode::Learning => self.learning,
            SessionMode::Test => self.test,
        }
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            learning: 10,
            test: 15,
            blank_placeholder: DEFAULT_BLANK_PLACEHOLDER.to_string(),
        }
    }
}
