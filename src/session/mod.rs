pub mod engine;
pub mod report;
pub mod result;
pub mod timer;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use engine::SessionEngine;
pub use report::ProgressReporter;
pub use result::{Outcome, SessionSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Learning,
    Test,
}

impl SessionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::Learning => "learning",
            SessionMode::Test => "test",
        }
    }

    /// Only Test mode runs against the clock.
    pub fn is_timed(self) -> bool {
        matches!(self, SessionMode::Test)
    }

    pub fn tracks_streak(self) -> bool {
        matches!(self, SessionMode::Learning)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Abandoned through `quit`.
    Idle,
    Introducing,
    Presenting,
    ShowingFeedback,
    Summarizing,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Introducing => "introducing",
            SessionPhase::Presenting => "presenting",
            SessionPhase::ShowingFeedback => "showing feedback",
            SessionPhase::Summarizing => "summarizing",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {operation} while {phase}")]
    InvalidStateTransition {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error("no exercises available for this list")]
    NoExercisesAvailable,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Recorded(Outcome),
    /// Repeat submission for the same exercise, or a blank written answer.
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    Next { index: usize },
    Finished(SessionSummary),
}
