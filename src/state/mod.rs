// Session state machine
//
// Session wraps SessionState and exposes one command method per user or timer event.
// Each command mutates the session synchronously and returns the effects the caller
// must perform (render, speak, persist, schedule). The session itself never touches
// the terminal, the clock or the disk.

use crate::models::{Mode, Preferences, Screen, SessionState, Settings, Theme, Ticket};
use crate::services::quiz::QuizError;
use crate::services::voice::{self, VoiceInfo};
use crate::services::{
    AnswerResult, AvailableVoice, CategoryFilter, Filter, FilterEngine, LoadError, QuizGenerator,
    SpeechRequest, VocabularySet,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Phrase spoken to audition a newly selected voice
pub const VOICE_TEST_PHRASE: &str = "Bonjour";

/// Work the caller must perform after a command.
///
/// Effects are returned in the order they should be performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the card-out animation and call
    /// [`Session::on_transition_elapsed`] with `ticket` after `delay`.
    /// Any earlier pending transition is superseded.
    BeginTransition { ticket: Ticket, delay: Duration },

    /// Display a screen
    Render(Screen),

    /// Call [`Session::on_auto_advance`] with `ticket` after `delay`
    ScheduleAdvance { ticket: Ticket, delay: Duration },

    /// The first answer to the current question was checked
    AnswerChecked(AnswerResult),

    /// Quiz mode cannot be offered; the caller should disable its quiz control
    QuizUnavailable { reason: QuizError },

    /// Cancel any utterance in progress, then speak this one
    Speak(SpeechRequest),

    /// Write the preferences to persistent storage
    PersistPreferences(Preferences),

    ApplyTheme(Theme),

    /// Options for the category selector
    CategoriesListed(Vec<String>),

    /// Options for the voice selector, best first, and the voice in effect
    VoicesListed {
        voices: Vec<VoiceInfo>,
        selected: Option<String>,
    },
}

// Fields compared by detect_changes
struct Snapshot {
    preferences: Preferences,
    voices: Vec<AvailableVoice>,
}

/// A running flashcard session.
///
/// # Example
/// ```ignore
/// let mut session = Session::new(VocabularyStore::load_file(path), preferences, settings);
/// for effect in session.start() {
///     perform(effect);
/// }
/// let effects = session.on_next();
/// ```
pub struct Session {
    state: SessionState,
    settings: Settings,
    rng: StdRng,
}

impl Session {
    pub fn new(
        vocabulary: Result<VocabularySet, LoadError>,
        preferences: Preferences,
        settings: Settings,
    ) -> Self {
        Self::with_rng(vocabulary, preferences, settings, StdRng::from_entropy())
    }

    /// Session with a reproducible random sequence.
    pub fn with_seed(
        vocabulary: Result<VocabularySet, LoadError>,
        preferences: Preferences,
        settings: Settings,
        seed: u64,
    ) -> Self {
        Self::with_rng(vocabulary, preferences, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        vocabulary: Result<VocabularySet, LoadError>,
        preferences: Preferences,
        settings: Settings,
        rng: StdRng,
    ) -> Self {
        Self {
            state: SessionState::new(vocabulary, preferences),
            settings,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Initial effects: theme, category list and the first card.
    pub fn start(&mut self) -> Vec<Effect> {
        tracing::info!(
            "Session started with {} entries (load error: {})",
            self.state.vocabulary.len(),
            self.state.load_error.is_some()
        );

        let mut effects = vec![
            Effect::ApplyTheme(self.state.theme),
            Effect::CategoriesListed(self.state.vocabulary.categories()),
        ];
        effects.extend(self.begin_transition());
        effects
    }

    // Filtering

    /// Recompute the active set and go back to its first card.
    pub fn on_filter_changed(&mut self, filter: Filter) -> Vec<Effect> {
        let active = FilterEngine::apply(&self.state.vocabulary, &filter);
        tracing::info!(
            "Filter changed: search={:?}, category={:?}, {} matches",
            filter.search,
            filter.category,
            active.len()
        );

        self.state.filter = filter;
        self.state.navigator.set_active_set(active);
        self.begin_transition()
    }

    pub fn on_search_changed(&mut self, search: &str) -> Vec<Effect> {
        let filter = Filter::new(search, self.state.filter.category.clone());
        self.on_filter_changed(filter)
    }

    pub fn on_category_changed(&mut self, selector: &str) -> Vec<Effect> {
        let filter = Filter::new(
            self.state.filter.search.clone(),
            CategoryFilter::from_selector(selector),
        );
        self.on_filter_changed(filter)
    }

    // Navigation

    pub fn on_next(&mut self) -> Vec<Effect> {
        if self.state.navigator.next() {
            self.begin_transition()
        } else {
            Vec::new()
        }
    }

    pub fn on_prev(&mut self) -> Vec<Effect> {
        if self.state.navigator.prev() {
            self.begin_transition()
        } else {
            Vec::new()
        }
    }

    pub fn on_random(&mut self) -> Vec<Effect> {
        if self.state.navigator.random(&mut self.rng) {
            self.begin_transition()
        } else {
            Vec::new()
        }
    }

    // Transitions

    fn begin_transition(&mut self) -> Vec<Effect> {
        self.state.quiz = None;
        self.state.advance_pending = false;
        self.state.transition = self.state.transition.next();
        self.state.transition_pending = true;

        vec![Effect::BeginTransition {
            ticket: self.state.transition,
            delay: self.settings.transition_delay(),
        }]
    }

    /// Commit the transition identified by `ticket`, unless a newer one superseded it.
    pub fn on_transition_elapsed(&mut self, ticket: Ticket) -> Vec<Effect> {
        if !self.state.transition_pending || ticket != self.state.transition {
            tracing::debug!("Ignoring superseded transition {:?}", ticket);
            return Vec::new();
        }
        self.state.transition_pending = false;

        let mut effects = Vec::new();
        if self.state.mode == Mode::Quiz {
            if let Some(reason) = self.prepare_question() {
                effects.push(Effect::QuizUnavailable { reason });
            }
        }
        effects.push(Effect::Render(self.state.screen()));
        effects
    }

    // Build a fresh question for the current card; returns why quiz mode failed, if it did
    fn prepare_question(&mut self) -> Option<QuizError> {
        let position = self.state.navigator.current()?;
        let entry = self.state.vocabulary.get(position)?;

        match QuizGenerator::generate(entry, self.state.vocabulary.entries(), &mut self.rng) {
            Ok(question) => {
                self.state.quiz = Some(question);
                None
            }
            Err(reason @ QuizError::InsufficientPool { .. }) => {
                tracing::warn!("Quiz mode disabled: {}", reason);
                self.state.mode = Mode::Study;
                Some(reason)
            }
            Err(reason) => {
                tracing::warn!("No quiz for this card: {}", reason);
                Some(reason)
            }
        }
    }

    // Quiz

    /// Switch between study and quiz display of the current card.
    pub fn on_mode_changed(&mut self, mode: Mode) -> Vec<Effect> {
        if mode == self.state.mode {
            return Vec::new();
        }

        if mode == Mode::Quiz && !QuizGenerator::pool_supports_quiz(self.state.vocabulary.entries()) {
            let reason = QuizError::InsufficientPool {
                available: self.state.vocabulary.len().saturating_sub(1),
            };
            tracing::warn!("Quiz mode unavailable: {}", reason);
            return vec![Effect::QuizUnavailable { reason }];
        }

        tracing::info!("Mode changed to {:?}", mode);
        self.state.mode = mode;

        if self.state.navigator.current().is_some() {
            self.begin_transition()
        } else {
            Vec::new()
        }
    }

    pub fn on_mode_toggled(&mut self) -> Vec<Effect> {
        self.on_mode_changed(self.state.mode.toggled())
    }

    /// Check the learner's choice. Only the first answer to a question has effects.
    pub fn on_answer_selected(&mut self, option: &str) -> Vec<Effect> {
        let Some(question) = self.state.quiz.as_mut() else {
            tracing::debug!("Answer '{}' ignored: no question on screen", option);
            return Vec::new();
        };

        let result = match question.check_answer(option) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("Answer '{}' ignored: {}", option, e);
                return Vec::new();
            }
        };

        tracing::info!(
            "Answered '{}' for '{}': {}",
            option,
            question.prompt.term,
            if result.is_correct { "correct" } else { "incorrect" }
        );

        let is_correct = result.is_correct;
        let mut effects = vec![
            Effect::AnswerChecked(result),
            Effect::Render(self.state.screen()),
        ];

        if is_correct {
            self.state.advance = self.state.advance.next();
            self.state.advance_pending = true;
            effects.push(Effect::ScheduleAdvance {
                ticket: self.state.advance,
                delay: self.settings.auto_advance_delay(),
            });
        }

        effects
    }

    /// Answer by 0-based option index.
    pub fn on_option_selected(&mut self, index: usize) -> Vec<Effect> {
        let option = self
            .state
            .quiz
            .as_ref()
            .and_then(|q| q.options.get(index))
            .cloned();

        match option {
            Some(option) => self.on_answer_selected(&option),
            None => {
                tracing::debug!("No option at index {}", index);
                Vec::new()
            }
        }
    }

    /// Advance after a correct answer, unless the learner already moved on.
    pub fn on_auto_advance(&mut self, ticket: Ticket) -> Vec<Effect> {
        if !self.state.advance_pending || ticket != self.state.advance {
            tracing::debug!("Ignoring stale auto-advance {:?}", ticket);
            return Vec::new();
        }
        self.state.advance_pending = false;
        self.on_next()
    }

    // Voice and speech

    /// New voice catalog from the platform. Safe to call any number of times.
    pub fn on_voices_changed(&mut self, voices: Vec<AvailableVoice>) -> Vec<Effect> {
        tracing::debug!("Voice catalog updated: {} voices", voices.len());
        self.update(|state| state.voices = voices)
    }

    /// Current voice selector contents.
    pub fn on_voices_requested(&self) -> Vec<Effect> {
        vec![self.voices_listed()]
    }

    /// Remember the chosen voice and audition it.
    pub fn on_voice_selected(&mut self, name: &str) -> Vec<Effect> {
        tracing::info!("Voice selected: {}", name);
        let mut effects = self.update(|state| state.preferred_voice = Some(name.to_string()));
        effects.extend(self.on_speak(VOICE_TEST_PHRASE));
        effects
    }

    pub fn on_speak(&mut self, text: &str) -> Vec<Effect> {
        let request = SpeechRequest::resolve(
            text,
            self.state.preferred_voice.as_deref(),
            &self.state.voices,
            &self.settings.target_language,
            &self.settings.fallback_language_tag,
            self.settings.speech_rate,
        );
        vec![Effect::Speak(request)]
    }

    /// Speak the current term.
    pub fn on_speak_term(&mut self) -> Vec<Effect> {
        match self.state.current_entry().map(|e| e.term.clone()) {
            Some(term) => self.on_speak(&term),
            None => Vec::new(),
        }
    }

    /// Speak the French example of the current card's `index`-th definition.
    pub fn on_speak_example(&mut self, index: usize) -> Vec<Effect> {
        let example = self
            .state
            .current_entry()
            .and_then(|e| e.definitions.get(index))
            .map(|d| d.example_source.clone())
            .filter(|s| !s.is_empty());

        match example {
            Some(example) => self.on_speak(&example),
            None => {
                tracing::debug!("No example {} on current card", index);
                Vec::new()
            }
        }
    }

    // Theme

    pub fn on_theme_toggled(&mut self) -> Vec<Effect> {
        self.update(|state| state.theme = state.theme.toggled())
    }

    // Change detection

    /// Apply `update_fn` and emit effects for whatever it changed.
    fn update<F>(&mut self, update_fn: F) -> Vec<Effect>
    where
        F: FnOnce(&mut SessionState),
    {
        let old = Snapshot {
            preferences: self.state.preferences(),
            voices: self.state.voices.clone(),
        };

        update_fn(&mut self.state);

        self.detect_changes(&old)
    }

    fn detect_changes(&self, old: &Snapshot) -> Vec<Effect> {
        let mut changes = Vec::new();
        let preferences = self.state.preferences();

        if old.preferences.theme != preferences.theme {
            changes.push(Effect::ApplyTheme(preferences.theme));
        }

        if old.voices != self.state.voices
            || old.preferences.preferred_voice_name != preferences.preferred_voice_name
        {
            changes.push(self.voices_listed());
        }

        if old.preferences != preferences {
            changes.push(Effect::PersistPreferences(preferences));
        }

        changes
    }

    fn voices_listed(&self) -> Effect {
        let language = &self.settings.target_language;
        let selected = voice::resolve(
            self.state.preferred_voice.as_deref(),
            &self.state.voices,
            language,
        )
        .map(|v| v.name);

        Effect::VoicesListed {
            voices: voice::ranked(&self.state.voices, language),
            selected,
        }
    }
}
