// Session Controller - Drives a Session from commands and performs its effects
//
// The controller is the only owner of the Session. It:
// - Receives commands (learner input, voice catalog updates, timer completions) on one channel
// - Hands each command to the Session, which returns effects
// - Performs effects in order: frontend calls, speech, preference writes, timer scheduling
//
// Everything runs on one task, so session state is never touched concurrently.

use crate::config::PreferenceStore;
use crate::metrics::SessionMetrics;
use crate::models::Screen;
use crate::state::{Effect, Session};
use crate::ui::bridge::TimerBridge;
use crate::ui::{Command, Frontend, SpeechSink};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Capacity of the command channel
pub const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Owns a [`Session`] and its collaborators.
///
/// # Example
/// ```ignore
/// let (controller, commands) = SessionController::new(
///     session,
///     Box::new(TerminalFrontend::stdout()),
///     Box::new(TerminalSpeech::stdout()),
///     Box::new(config_manager),
///     metrics,
///     tokio::runtime::Handle::current(),
/// );
/// tokio::spawn(read_input(commands));
/// controller.run().await;
/// ```
pub struct SessionController {
    session: Session,
    frontend: Box<dyn Frontend>,
    speech: Box<dyn SpeechSink>,
    store: Box<dyn PreferenceStore>,
    bridge: TimerBridge,
    metrics: Arc<SessionMetrics>,
    commands: mpsc::Receiver<Command>,
}

impl SessionController {
    /// Create a controller and the sender used to feed it commands.
    pub fn new(
        session: Session,
        frontend: Box<dyn Frontend>,
        speech: Box<dyn SpeechSink>,
        store: Box<dyn PreferenceStore>,
        metrics: Arc<SessionMetrics>,
        tokio_handle: tokio::runtime::Handle,
    ) -> (Self, mpsc::Sender<Command>) {
        let (command_tx, commands) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let bridge = TimerBridge::new(command_tx.clone(), tokio_handle);

        let controller = Self {
            session,
            frontend,
            speech,
            store,
            bridge,
            metrics,
            commands,
        };

        (controller, command_tx)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start the session and process commands until [`Command::Quit`].
    ///
    /// # Returns
    /// The session in its final state
    pub async fn run(mut self) -> Session {
        let effects = self.session.start();
        self.dispatch(effects);

        while let Some(command) = self.commands.recv().await {
            if command == Command::Quit {
                tracing::info!("Quit requested");
                break;
            }
            let effects = self.handle(command);
            self.dispatch(effects);
        }

        self.bridge.cancel_all();
        tracing::info!("Session controller stopped");
        self.session
    }

    /// Hand one command to the session.
    pub fn handle(&mut self, command: Command) -> Vec<Effect> {
        tracing::debug!("Command: {:?}", command);

        let session = &mut self.session;
        match command {
            Command::Next => session.on_next(),
            Command::Prev => session.on_prev(),
            Command::Random => session.on_random(),
            Command::ToggleMode => session.on_mode_toggled(),
            Command::Search(text) => session.on_search_changed(&text),
            Command::Category(selector) => session.on_category_changed(&selector),
            Command::Answer(index) => session.on_option_selected(index),
            Command::SpeakTerm => session.on_speak_term(),
            Command::SpeakExample(index) => session.on_speak_example(index),
            Command::ListVoices => session.on_voices_requested(),
            Command::SelectVoice(name) => session.on_voice_selected(&name),
            Command::ToggleTheme => session.on_theme_toggled(),
            Command::VoicesChanged(voices) => session.on_voices_changed(voices),
            Command::TransitionElapsed(ticket) => session.on_transition_elapsed(ticket),
            Command::AutoAdvance(ticket) => session.on_auto_advance(ticket),
            Command::Quit => Vec::new(),
        }
    }

    /// Perform effects in order.
    pub fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BeginTransition { ticket, delay } => {
                    self.frontend.begin_transition();
                    if self.bridge.schedule_transition(ticket, delay) {
                        self.metrics.record_transition_superseded();
                    }
                }
                Effect::Render(screen) => {
                    if let Screen::Card(card) = &screen {
                        // Re-renders of an answered question are not new cards
                        if card.quiz.as_ref().is_none_or(|q| !q.answered) {
                            self.metrics.record_card_shown(card.quiz.is_some());
                        }
                    }
                    self.frontend.render(&screen);
                }
                Effect::ScheduleAdvance { ticket, delay } => {
                    self.bridge.schedule_advance(ticket, delay);
                }
                Effect::AnswerChecked(result) => {
                    self.metrics.record_answer(result.is_correct);
                    self.frontend.show_answer(&result);
                }
                Effect::QuizUnavailable { reason } => {
                    self.frontend.quiz_unavailable(&reason);
                }
                Effect::Speak(request) => {
                    // No utterance queue: the newest request replaces whatever is playing
                    self.speech.cancel();
                    self.speech.speak(&request);
                    self.metrics.record_speech_request();
                }
                Effect::PersistPreferences(preferences) => {
                    match self.store.save_preferences(&preferences) {
                        Ok(()) => self.metrics.record_preference_write(true),
                        Err(e) => {
                            tracing::warn!("Failed to save preferences: {:#}", e);
                            self.metrics.record_preference_write(false);
                        }
                    }
                }
                Effect::ApplyTheme(theme) => self.frontend.apply_theme(theme),
                Effect::CategoriesListed(categories) => self.frontend.show_categories(&categories),
                Effect::VoicesListed { voices, selected } => {
                    self.frontend.show_voices(&voices, selected.as_deref());
                }
            }
        }
    }
}
