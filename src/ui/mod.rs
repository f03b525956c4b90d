// UI module - session driver and terminal frontend
//
// This module contains:
// - TimerBridge: turns transition/auto-advance effects into tokio timers that post commands back
// - SessionController: owns the Session, feeds it commands and performs the returned effects
// - TerminalFrontend/TerminalSpeech: the text-mode render and speech collaborators

pub mod bridge;
pub mod controller;
pub mod terminal;

use crate::models::{Screen, Theme, Ticket};
use crate::services::{AnswerResult, AvailableVoice, QuizError, SpeechRequest, VoiceInfo};

pub use bridge::TimerBridge;
pub use controller::SessionController;
pub use terminal::{TerminalFrontend, TerminalSpeech};

/// Input to the session controller, from the learner or from a timer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Random,
    ToggleMode,
    Search(String),
    Category(String),

    /// 0-based quiz option
    Answer(usize),

    SpeakTerm,

    /// 0-based definition whose example to speak
    SpeakExample(usize),

    ListVoices,
    SelectVoice(String),
    ToggleTheme,

    /// The platform voice catalog changed
    VoicesChanged(Vec<AvailableVoice>),

    TransitionElapsed(Ticket),
    AutoAdvance(Ticket),

    Quit,
}

/// Render collaborator: owns all display and animation.
pub trait Frontend: Send {
    /// Start the card-out animation; a render follows once the transition commits
    fn begin_transition(&mut self);

    fn render(&mut self, screen: &Screen);

    fn show_answer(&mut self, result: &AnswerResult);

    /// Quiz mode could not be used; the quiz control should be disabled
    fn quiz_unavailable(&mut self, reason: &QuizError);

    fn apply_theme(&mut self, theme: Theme);

    fn show_categories(&mut self, categories: &[String]);

    fn show_voices(&mut self, voices: &[VoiceInfo], selected: Option<&str>);
}

/// Speech collaborator wrapping the platform synthesizer.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechSink: Send {
    /// Stop any utterance in progress
    fn cancel(&mut self);

    fn speak(&mut self, request: &SpeechRequest);
}
