use std::time::{Duration, Instant};

use crate::engine::scoring;
use crate::generator::{Exercise, ExerciseGenerator, ExerciseKind, Shuffler};
use crate::session::report::ProgressReporter;
use crate::session::result::{Outcome, SessionSummary};
use crate::session::timer::Countdown;
use crate::session::{Advance, SessionError, SessionMode, SessionPhase, Submission};
use crate::store::schema::VocabularyEntry;

pub const DEFAULT_TEST_DURATION: Duration = Duration::from_secs(300);

/// Drives one list through introduce → present → feedback → … → summary.
///
/// Every transition is a method call from the owning controller; the Test-mode
/// countdown is checked through [`SessionEngine::tick`]. Nothing here blocks or
/// does I/O apart from handing the final summary to the reporter.
pub struct SessionEngine<S, P> {
    list_id: String,
    mode: SessionMode,
    entries: Vec<VocabularyEntry>,
    generator: ExerciseGenerator<S>,
    reporter: P,
    exercises: Vec<Exercise>,
    phase: SessionPhase,
    current: usize,
    outcomes: Vec<Option<Outcome>>,
    score: f64,
    streak: u32,
    countdown: Countdown,
    summary: Option<SessionSummary>,
    report_error: Option<anyhow::Error>,
}

impl<S: Shuffler, P: ProgressReporter> SessionEngine<S, P> {
    pub fn new(
        list_id: impl Into<String>,
        mode: SessionMode,
        entries: Vec<VocabularyEntry>,
        mut generator: ExerciseGenerator<S>,
        reporter: P,
    ) -> Self {
        let exercises = generator.generate(&entries, mode);
        Self {
            list_id: list_id.into(),
            mode,
            entries,
            generator,
            reporter,
            exercises,
            phase: SessionPhase::Introducing,
            current: 0,
            outcomes: Vec::new(),
            score: 0.0,
            streak: 0,
            countdown: Countdown::new(DEFAULT_TEST_DURATION),
            summary: None,
            report_error: None,
        }
    }

    /// Test-mode limit; ignored in Learning mode.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.countdown = Countdown::new(limit);
        self
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> Result<(), SessionError> {
        self.expect_phase("start", &[SessionPhase::Introducing])?;
        if self.exercises.is_empty() {
            return Err(SessionError::NoExercisesAvailable);
        }

        self.current = 0;
        self.score = 0.0;
        self.streak = 0;
        self.outcomes = vec![None; self.exercises.len()];
        self.summary = None;
        self.report_error = None;
        if self.mode.is_timed() {
            self.countdown.start(now);
        }
        self.phase = SessionPhase::Presenting;
        log::debug!(
            "Started {} session on list {} with {} exercises",
            self.mode.as_str(),
            self.list_id,
            self.exercises.len()
        );
        Ok(())
    }

    pub fn submit_answer(&mut self, answer: &str) -> Result<Submission, SessionError> {
        match self.phase {
            SessionPhase::Presenting => {}
            // The current exercise already has its outcome.
            SessionPhase::ShowingFeedback => return Ok(Submission::Ignored),
            phase => {
                return Err(SessionError::InvalidStateTransition {
                    operation: "submit an answer",
                    phase,
                });
            }
        }
        if self.outcomes[self.current].is_some() {
            return Ok(Submission::Ignored);
        }

        let exercise = &self.exercises[self.current];
        if exercise.kind == ExerciseKind::Write && answer.trim().is_empty() {
            return Ok(Submission::Ignored);
        }

        let correct = exercise.is_correct(answer);
        let points = if !correct {
            0.0
        } else {
            match self.mode {
                SessionMode::Learning => scoring::learning_points(self.streak),
                SessionMode::Test => scoring::test_points(exercise.kind),
            }
        };
        if self.mode.tracks_streak() {
            self.streak = if correct { self.streak + 1 } else { 0 };
        }
        self.score += points;

        let outcome = Outcome {
            answer: answer.to_string(),
            correct,
            points,
        };
        self.outcomes[self.current] = Some(outcome.clone());
        self.phase = SessionPhase::ShowingFeedback;
        log::debug!(
            "Exercise {} answered {}",
            self.exercises[self.current].id,
            if correct { "correctly" } else { "incorrectly" }
        );
        Ok(Submission::Recorded(outcome))
    }

    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.advance_at(Instant::now())
    }

    pub fn advance_at(&mut self, now: Instant) -> Result<Advance, SessionError> {
        self.expect_phase("advance", &[SessionPhase::ShowingFeedback])?;
        if self.mode.is_timed() && self.countdown.is_expired(now) {
            log::info!("Time is up on list {}", self.list_id);
            return Ok(Advance::Finished(self.finalize(now, true)));
        }
        if self.current + 1 < self.exercises.len() {
            self.current += 1;
            self.phase = SessionPhase::Presenting;
            return Ok(Advance::Next {
                index: self.current,
            });
        }
        Ok(Advance::Finished(self.finalize(now, false)))
    }

    /// Timer callback for Test mode. Finalizes once when the countdown has run
    /// out mid-session; any other call is a no-op.
    pub fn tick(&mut self, now: Instant) -> Option<SessionSummary> {
        if !self.mode.is_timed() {
            return None;
        }
        if !matches!(
            self.phase,
            SessionPhase::Presenting | SessionPhase::ShowingFeedback
        ) {
            return None;
        }
        if !self.countdown.is_expired(now) {
            return None;
        }
        log::info!("Time is up on list {}", self.list_id);
        Some(self.finalize(now, true))
    }

    /// Abandon the session. Nothing is recorded.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Summarizing {
            return Err(SessionError::InvalidStateTransition {
                operation: "quit",
                phase: self.phase,
            });
        }
        self.countdown.stop(Instant::now());
        self.phase = SessionPhase::Idle;
        log::debug!("Abandoned session on list {}", self.list_id);
        Ok(())
    }

    /// Fresh exercises, cleared outcomes, back to the intro.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect_phase(
            "restart",
            &[
                SessionPhase::Summarizing,
                SessionPhase::Introducing,
                SessionPhase::Idle,
            ],
        )?;
        self.exercises = self.generator.generate(&self.entries, self.mode);
        self.current = 0;
        self.outcomes.clear();
        self.score = 0.0;
        self.streak = 0;
        self.summary = None;
        self.report_error = None;
        self.countdown = Countdown::new(self.countdown.limit());
        self.phase = SessionPhase::Introducing;
        Ok(())
    }

    fn finalize(&mut self, now: Instant, timed_out: bool) -> SessionSummary {
        if let Some(ref summary) = self.summary {
            return summary.clone();
        }

        self.countdown.stop(now);
        let elapsed_secs = self
            .mode
            .is_timed()
            .then(|| self.countdown.elapsed(now).as_secs_f64());
        let summary = SessionSummary::from_outcomes(
            self.mode,
            &self.outcomes,
            self.score,
            elapsed_secs,
            timed_out,
        );
        self.summary = Some(summary.clone());
        self.phase = SessionPhase::Summarizing;
        log::info!(
            "Finished {} session on list {}: {}/{} correct, score {}",
            self.mode.as_str(),
            self.list_id,
            summary.correct,
            summary.total,
            summary.display_score()
        );

        if let Err(e) = self.reporter.record(&self.list_id, &summary) {
            log::warn!("Could not record progress for list {}: {e:#}", self.list_id);
            self.report_error = Some(e);
        }
        summary
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[SessionPhase],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidStateTransition {
                operation,
                phase: self.phase,
            })
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.phase {
            SessionPhase::Presenting | SessionPhase::ShowingFeedback => {
                self.exercises.get(self.current)
            }
            _ => None,
        }
    }

    /// Outcome of the exercise on screen, while its feedback is showing.
    pub fn current_outcome(&self) -> Option<&Outcome> {
        match self.phase {
            SessionPhase::ShowingFeedback => self.outcomes.get(self.current)?.as_ref(),
            _ => None,
        }
    }

    pub fn outcomes(&self) -> &[Option<Outcome>] {
        &self.outcomes
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn progress(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        let answered = self.outcomes.iter().filter(|o| o.is_some()).count();
        answered as f64 / self.exercises.len() as f64
    }

    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.mode
            .is_timed()
            .then(|| self.countdown.remaining(now))
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    pub fn take_report_error(&mut self) -> Option<anyhow::Error> {
        self.report_error.take()
    }
}
