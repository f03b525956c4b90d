// Session metrics
//
// Lightweight counters describing what happened during a study session

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for one session, logged on shutdown.
///
/// Atomic so the controller and its timer tasks can share one instance behind an `Arc`.
#[derive(Debug)]
pub struct SessionMetrics {
    /// Cards committed to the screen
    pub cards_shown: AtomicU64,

    /// Transitions replaced by a newer one before they committed
    pub transitions_superseded: AtomicU64,

    /// Quiz questions shown
    pub questions_shown: AtomicU64,

    pub answers_correct: AtomicU64,
    pub answers_incorrect: AtomicU64,

    /// Speak requests sent to the synthesizer
    pub speech_requests: AtomicU64,

    /// Preference writes, and how many of them failed
    pub preference_writes: AtomicU64,
    pub preference_write_errors: AtomicU64,

    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            cards_shown: AtomicU64::new(0),
            transitions_superseded: AtomicU64::new(0),
            questions_shown: AtomicU64::new(0),
            answers_correct: AtomicU64::new(0),
            answers_incorrect: AtomicU64::new(0),
            speech_requests: AtomicU64::new(0),
            preference_writes: AtomicU64::new(0),
            preference_write_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_card_shown(&self, with_question: bool) {
        self.cards_shown.fetch_add(1, Ordering::Relaxed);
        if with_question {
            self.questions_shown.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_transition_superseded(&self) {
        self.transitions_superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_answer(&self, is_correct: bool) {
        if is_correct {
            self.answers_correct.fetch_add(1, Ordering::Relaxed);
        } else {
            self.answers_incorrect.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_speech_request(&self) {
        self.speech_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_preference_write(&self, succeeded: bool) {
        self.preference_writes.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.preference_write_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of answered questions that were correct, in percent
    pub fn accuracy_percent(&self) -> f64 {
        let correct = self.answers_correct.load(Ordering::Relaxed);
        let total = correct + self.answers_incorrect.load(Ordering::Relaxed);
        if total > 0 {
            correct as f64 * 100.0 / total as f64
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Session Summary ===");
        tracing::info!("Duration: {:.0}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Cards: {} shown, {} transitions superseded",
            self.cards_shown.load(Ordering::Relaxed),
            self.transitions_superseded.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Quiz: {} questions, {} correct, {} incorrect ({:.1}%)",
            self.questions_shown.load(Ordering::Relaxed),
            self.answers_correct.load(Ordering::Relaxed),
            self.answers_incorrect.load(Ordering::Relaxed),
            self.accuracy_percent()
        );
        tracing::info!(
            "Speech requests: {}, preference writes: {} ({} failed)",
            self.speech_requests.load(Ordering::Relaxed),
            self.preference_writes.load(Ordering::Relaxed),
            self.preference_write_errors.load(Ordering::Relaxed)
        );
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = SessionMetrics::new();
        assert_eq!(metrics.cards_shown.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.accuracy_percent(), 0.0);
    }

    #[test]
    fn test_card_and_question_counters() {
        let metrics = SessionMetrics::new();
        metrics.record_card_shown(false);
        metrics.record_card_shown(true);
        metrics.record_transition_superseded();

        assert_eq!(metrics.cards_shown.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.questions_shown.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.transitions_superseded.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_accuracy() {
        let metrics = SessionMetrics::new();
        metrics.record_answer(true);
        metrics.record_answer(true);
        metrics.record_answer(true);
        metrics.record_answer(false);

        assert_eq!(metrics.accuracy_percent(), 75.0);
    }

    #[test]
    fn test_preference_write_counters() {
        let metrics = SessionMetrics::new();
        metrics.record_preference_write(true);
        metrics.record_preference_write(false);

        assert_eq!(metrics.preference_writes.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.preference_write_errors.load(Ordering::Relaxed), 1);
    }
}
