use crate::models::Entry;
use crate::models::session_state::Mode;
use crate::services::QuizQuestion;

/// What the frontend should display after a transition commits.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Card(CardView),

    /// The dataset loaded but the current filter matches nothing
    NoMatches,

    /// The dataset could not be loaded; the deck is empty
    LoadError { message: String },
}

/// A card to render, with its counter and, in quiz mode, its question.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub entry: Entry,

    /// 1-based position within the active set
    pub position: usize,
    pub total: usize,

    pub mode: Mode,
    pub quiz: Option<QuizQuestion>,
}

impl CardView {
    /// Counter text shown under the card, e.g. `3 / 41`.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.position, self.total)
    }
}
