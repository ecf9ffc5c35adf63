use crate::generator::ExerciseKind;

pub const BASE_POINTS: f64 = 10.0;
pub const STREAK_BONUS_CAP: u32 = 5;
pub const STREAK_BONUS_STEP: f64 = 0.1;

/// Points for a correct Learning-mode answer given the streak *before* it.
pub fn learning_points(streak: u32) -> f64 {
    BASE_POINTS * (1.0 + streak.min(STREAK_BONUS_CAP) as f64 * STREAK_BONUS_STEP)
}

/// Flat Test-mode award for a correct answer, weighted by exercise difficulty.
pub fn test_points(kind: ExerciseKind) -> f64 {
    match kind {
        ExerciseKind::MultipleChoice => 10.0,
        ExerciseKind::FillBlank => 12.0,
        ExerciseKind::Write => 15.0,
    }
}

pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn display_score(score: f64) -> u64 {
    score.max(0.0).round() as u64
}
