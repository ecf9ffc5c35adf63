use crate::generator::{Exercise, ExerciseKind, GeneratorLimits, Shuffler, blank};
use crate::session::SessionMode;
use crate::store::schema::VocabularyEntry;

/// Lists shorter than this are repeated until they reach it.
const MIN_POOL: usize = 4;
const DISTRACTOR_COUNT: usize = 3;

pub struct ExerciseGenerator<S> {
    shuffler: S,
    limits: GeneratorLimits,
}

impl<S: Shuffler> ExerciseGenerator<S> {
    pub fn new(shuffler: S) -> Self {
        Self::with_limits(shuffler, GeneratorLimits::default())
    }

    pub fn with_limits(shuffler: S, limits: GeneratorLimits) -> Self {
        Self { shuffler, limits }
    }

    pub fn limits(&self) -> &GeneratorLimits {
        &self.limits
    }

    pub fn generate(&mut self, entries: &[VocabularyEntry], mode: SessionMode) -> Vec<Exercise> {
        let mut pool: Vec<&VocabularyEntry> = entries.iter().filter(|e| e.is_usable()).collect();
        let dropped = entries.len() - pool.len();
        if dropped > 0 {
            log::warn!("Skipping {dropped} entries with an empty headword or meaning");
        }
        if pool.is_empty() {
            return Vec::new();
        }

        // Small lists are padded by repetition.
        while pool.len() < MIN_POOL {
            pool.extend_from_within(..);
        }

        self.shuffler.shuffle(&mut pool);
        let count = pool.len().min(self.limits.max_for(mode));

        let mut exercises = Vec::with_capacity(count);
        for index in 0..count {
            let kind = ExerciseKind::for_position(mode, index);
            exercises.push(self.build(&pool, index, kind));
        }
        log::debug!(
            "Generated {} {} exercises from {} entries",
            exercises.len(),
            mode.as_str(),
            entries.len()
        );
        exercises
    }

    fn build(&mut self, pool: &[&VocabularyEntry], index: usize, kind: ExerciseKind) -> Exercise {
        let entry = pool[index];
        let id = format!("exercise-{index}");
        match kind {
            ExerciseKind::MultipleChoice => Exercise {
                id,
                kind,
                question: entry.headword.clone(),
                options: Some(self.options_for(pool, index)),
                correct_answer: entry.meaning.clone(),
            },
            ExerciseKind::Write => Exercise {
                id,
                kind,
                question: entry.meaning.clone(),
                options: None,
                correct_answer: entry.headword.clone(),
            },
            ExerciseKind::FillBlank => {
                let question = blank::blank_out(
                    entry.context.as_deref(),
                    &entry.headword,
                    &self.limits.blank_placeholder,
                )
                .unwrap_or_else(|| entry.headword.clone());
                Exercise {
                    id,
                    kind,
                    question,
                    options: None,
                    correct_answer: entry.meaning.clone(),
                }
            }
        }
    }

    fn options_for(&mut self, pool: &[&VocabularyEntry], index: usize) -> Vec<String> {
        let current = pool[index];
        // Padded copies and synonyms of the current entry never count as distractors.
        let mut candidates: Vec<&VocabularyEntry> = pool
            .iter()
            .copied()
            .filter(|e| e.id != current.id && e.meaning != current.meaning)
            .collect();
        self.shuffler.shuffle(&mut candidates);

        let mut options: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT + 1);
        for candidate in candidates {
            if options.len() == DISTRACTOR_COUNT {
                break;
            }
            if !options.contains(&candidate.meaning) {
                options.push(candidate.meaning.clone());
            }
        }
        if options.len() < DISTRACTOR_COUNT {
            log::debug!(
                "Only {} distinct distractors for {:?}",
                options.len(),
                current.headword
            );
        }
        options.push(current.meaning.clone());
        self.shuffler.shuffle(&mut options);
        options
    }
}
