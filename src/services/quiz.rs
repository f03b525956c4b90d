//! Multiple-choice quiz generation.
//!
//! A question offers the entry's first translation among [`DISTRACTOR_COUNT`]
//! translations drawn from other entries. Candidate translations are de-duplicated
//! and never equal the correct answer, so exactly one option is correct.

use crate::models::Entry;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

/// Number of incorrect options per question
pub const DISTRACTOR_COUNT: usize = 3;

/// Total number of options per question
pub const OPTION_COUNT: usize = DISTRACTOR_COUNT + 1;

/// Errors that can occur while building or answering a question
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("Entry '{0}' has no definitions to quiz on")]
    InsufficientData(String),

    #[error("Only {available} distinct distractors available, need 3")]
    InsufficientPool { available: usize },

    #[error("Question has already been answered")]
    AlreadyAnswered,
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: Entry,
    pub options: Vec<String>,
    pub correct_option: String,
    pub answered: bool,
    pub selected: Option<String>,
}

/// Outcome of the first answer to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_option: String,
}

impl QuizQuestion {
    /// Check the learner's choice. Only the first call counts.
    ///
    /// Later calls return [`QuizError::AlreadyAnswered`] and leave the question
    /// untouched.
    pub fn check_answer(&mut self, selected: &str) -> Result<AnswerResult, QuizError> {
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }

        self.answered = true;
        self.selected = Some(selected.to_string());

        Ok(AnswerResult {
            is_correct: selected == self.correct_option,
            correct_option: self.correct_option.clone(),
        })
    }

    /// Result of the recorded answer, if any.
    pub fn result(&self) -> Option<AnswerResult> {
        self.selected.as_ref().map(|selected| AnswerResult {
            is_correct: *selected == self.correct_option,
            correct_option: self.correct_option.clone(),
        })
    }
}

/// Builds quiz questions from a pool of entries.
pub struct QuizGenerator;

impl QuizGenerator {
    /// Build a question for `correct` with distractors drawn from `pool`.
    pub fn generate<R: Rng + ?Sized>(
        correct: &Entry,
        pool: &[Entry],
        rng: &mut R,
    ) -> Result<QuizQuestion, QuizError> {
        let correct_translation = correct
            .primary_translation()
            .ok_or_else(|| QuizError::InsufficientData(correct.term.clone()))?
            .to_string();

        let candidates = Self::distractor_candidates(correct, &correct_translation, pool);
        if candidates.len() < DISTRACTOR_COUNT {
            return Err(QuizError::InsufficientPool {
                available: candidates.len(),
            });
        }

        let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
        options.push(correct_translation.clone());
        options.extend(
            candidates
                .choose_multiple(rng, DISTRACTOR_COUNT)
                .map(|t| t.to_string()),
        );
        options.shuffle(rng);

        tracing::debug!("Generated quiz for '{}': {:?}", correct.term, options);

        Ok(QuizQuestion {
            prompt: correct.clone(),
            options,
            correct_option: correct_translation,
            answered: false,
            selected: None,
        })
    }

    /// Whether `pool` can supply distractors for at least one entry.
    pub fn pool_supports_quiz(pool: &[Entry]) -> bool {
        let distinct: HashSet<&str> = pool.iter().filter_map(Entry::primary_translation).collect();
        distinct.len() >= OPTION_COUNT
    }

    // First translations of other terms, minus the correct text and repeats, in pool order
    fn distractor_candidates<'a>(correct: &Entry, correct_translation: &str, pool: &'a [Entry]) -> Vec<&'a str> {
        let mut seen: HashSet<&str> = HashSet::new();
        pool.iter()
            .filter(|e| e.term != correct.term)
            .filter_map(Entry::primary_translation)
            .filter(|t| *t != correct_translation)
            .filter(|t| seen.insert(*t))
            .collect()
    }
}
