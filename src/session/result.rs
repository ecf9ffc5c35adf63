use serde::{Deserialize, Serialize};

use crate::engine::scoring;
use crate::session::SessionMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub answer: String,
    pub correct: bool,
    pub points: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: SessionMode,
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    #[serde(default)]
    pub elapsed_secs: Option<f64>,
    #[serde(default)]
    pub timed_out: bool,
}

impl SessionSummary {
    /// Built from the outcome records as they stand at finalize time.
    /// Unanswered slots count toward the total only.
    pub fn from_outcomes(
        mode: SessionMode,
        outcomes: &[Option<Outcome>],
        score: f64,
        elapsed_secs: Option<f64>,
        timed_out: bool,
    ) -> Self {
        let correct = outcomes
            .iter()
            .filter(|o| matches!(o, Some(o) if o.correct))
            .count();
        Self {
            mode,
            correct,
            total: outcomes.len(),
            score,
            elapsed_secs,
            timed_out,
        }
    }

    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    pub fn accuracy(&self) -> f64 {
        scoring::accuracy(self.correct, self.total)
    }

    pub fn display_score(&self) -> u64 {
        scoring::display_score(self.score)
    }
}
