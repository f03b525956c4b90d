//! Services module - Pure session logic for the flashcard engine.
//!
//! Everything here is framework-agnostic: no terminal, no timers, no file writes
//! beyond reading the dataset. Randomness is always passed in by the caller.
//!
//! # Components
//!
//! - [`VocabularyStore`]: loads and collation-sorts the dataset into a [`VocabularySet`]
//! - [`FilterEngine`]: search text + category selector → [`ActiveSet`]
//! - [`SessionNavigator`]: cyclic and random movement through the active set
//! - [`QuizGenerator`]: four-option questions with check-once answers
//! - [`voice`]: voice scoring, default selection and resolution
//! - [`SpeechRequest`]: what the synthesizer is asked to say, and with which voice

pub mod filter;
pub mod navigation;
pub mod quiz;
pub mod speech;
pub mod vocabulary;
pub mod voice;

pub use filter::{ALL_CATEGORIES, ActiveSet, CategoryFilter, Filter, FilterEngine};
pub use navigation::SessionNavigator;
pub use quiz::{AnswerResult, QuizError, QuizGenerator, QuizQuestion};
pub use speech::SpeechRequest;
pub use vocabulary::{LoadError, VocabularySet, VocabularyStore};
pub use voice::{AvailableVoice, VoiceInfo};
