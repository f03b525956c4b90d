use crate::models::view::{CardView, Screen};
use crate::models::{Entry, Preferences, Theme};
use crate::services::{
    ActiveSet, AvailableVoice, Filter, LoadError, QuizQuestion, SessionNavigator, VocabularySet,
};

/// Display mode of the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Term, translations and examples are all shown
    #[default]
    Study,

    /// Term with a four-option translation question
    Quiz,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Study => Mode::Quiz,
            Mode::Quiz => Mode::Study,
        }
    }
}

/// Identifies one scheduled continuation (card transition or auto-advance).
///
/// Tickets only grow. A continuation whose ticket is no longer the latest has been
/// superseded and must be ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

impl Ticket {
    pub fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

/// Single source of truth for a flashcard session.
///
/// Owned by [`Session`](crate::state::Session), which is the only thing that mutates
/// it. Nothing here is global: a second session is just a second value.
#[derive(Debug, Clone)]
pub struct SessionState {
    // Dataset
    pub vocabulary: VocabularySet,
    pub load_error: Option<String>,

    // Filtering and position
    pub filter: Filter,
    pub navigator: SessionNavigator,

    // Display
    pub mode: Mode,
    pub quiz: Option<QuizQuestion>,
    pub theme: Theme,

    // Speech
    pub preferred_voice: Option<String>,
    pub voices: Vec<AvailableVoice>,

    // Scheduled continuations
    pub transition: Ticket,
    pub transition_pending: bool,
    pub advance: Ticket,
    pub advance_pending: bool,
}

impl SessionState {
    /// Build the initial state from the dataset load result and stored preferences.
    ///
    /// A failed load leaves an empty deck and records the error for display.
    pub fn new(vocabulary: Result<VocabularySet, LoadError>, preferences: Preferences) -> Self {
        let (vocabulary, load_error) = match vocabulary {
            Ok(vocabulary) => (vocabulary, None),
            Err(e) => {
                tracing::error!("Failed to load vocabulary: {}", e);
                (VocabularySet::default(), Some(e.to_string()))
            }
        };

        let navigator = SessionNavigator::new(ActiveSet::full(&vocabulary));

        Self {
            vocabulary,
            load_error,
            filter: Filter::default(),
            navigator,
            mode: Mode::default(),
            quiz: None,
            theme: preferences.theme,
            preferred_voice: preferences.preferred_voice_name,
            voices: Vec::new(),
            transition: Ticket::default(),
            transition_pending: false,
            advance: Ticket::default(),
            advance_pending: false,
        }
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.navigator
            .current()
            .and_then(|position| self.vocabulary.get(position))
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            preferred_voice_name: self.preferred_voice.clone(),
            theme: self.theme,
        }
    }

    /// Screen for the current position, mode and question.
    pub fn screen(&self) -> Screen {
        if let Some(message) = &self.load_error {
            return Screen::LoadError {
                message: message.clone(),
            };
        }

        match (self.current_entry(), self.navigator.position()) {
            (Some(entry), Some((position, total))) => Screen::Card(CardView {
                entry: entry.clone(),
                position,
                total,
                mode: self.mode,
                quiz: self.quiz.clone(),
            }),
            _ => Screen::NoMatches,
        }
    }
}
