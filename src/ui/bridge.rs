// TimerBridge - Turns scheduled continuations into tokio timers
//
// The session is synchronous and never waits. When it asks for a card transition or
// an auto-advance, the bridge spawns a timer task that posts the matching command
// back to the controller's channel once the delay elapses.
//
// Each kind of continuation has one slot. Scheduling into an occupied slot aborts
// the older timer, so the newest request always wins.

use crate::models::Ticket;
use crate::ui::Command;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawns cancellable timers that feed commands back to the session controller.
pub struct TimerBridge {
    /// Channel back to the controller
    command_tx: mpsc::Sender<Command>,

    /// Handle to the tokio runtime for spawning timer tasks
    tokio_handle: tokio::runtime::Handle,

    /// Pending card transition commit
    transition: Option<JoinHandle<()>>,

    /// Pending auto-advance after a correct answer
    advance: Option<JoinHandle<()>>,
}

impl TimerBridge {
    pub fn new(command_tx: mpsc::Sender<Command>, tokio_handle: tokio::runtime::Handle) -> Self {
        Self {
            command_tx,
            tokio_handle,
            transition: None,
            advance: None,
        }
    }

    /// Post `TransitionElapsed(ticket)` after `delay`.
    ///
    /// Any pending transition and any pending auto-advance are aborted.
    ///
    /// # Returns
    /// `true` if a pending transition was superseded
    pub fn schedule_transition(&mut self, ticket: Ticket, delay: Duration) -> bool {
        abort_pending(&mut self.advance);
        let timer = self.spawn_after(delay, Command::TransitionElapsed(ticket));
        replace(&mut self.transition, timer)
    }

    /// Post `AutoAdvance(ticket)` after `delay`, replacing any pending auto-advance.
    pub fn schedule_advance(&mut self, ticket: Ticket, delay: Duration) {
        let timer = self.spawn_after(delay, Command::AutoAdvance(ticket));
        replace(&mut self.advance, timer);
    }

    /// Abort every pending timer.
    pub fn cancel_all(&mut self) {
        abort_pending(&mut self.transition);
        abort_pending(&mut self.advance);
    }

    pub fn has_pending_transition(&self) -> bool {
        self.transition.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn spawn_after(&self, delay: Duration, command: Command) -> JoinHandle<()> {
        let command_tx = self.command_tx.clone();
        self.tokio_handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if command_tx.send(command).await.is_err() {
                tracing::debug!("Controller stopped before timer fired");
            }
        })
    }
}

impl Drop for TimerBridge {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// Aborts the timer in `slot`; returns whether it had not fired yet
fn abort_pending(slot: &mut Option<JoinHandle<()>>) -> bool {
    match slot.take() {
        Some(timer) => {
            let pending = !timer.is_finished();
            timer.abort();
            pending
        }
        None => false,
    }
}

fn replace(slot: &mut Option<JoinHandle<()>>, timer: JoinHandle<()>) -> bool {
    let superseded = abort_pending(slot);
    *slot = Some(timer);
    superseded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn bridge() -> (TimerBridge, mpsc::Receiver<Command>) {
        let (tx, rx) = mpsc::channel(16);
        (TimerBridge::new(tx, tokio::runtime::Handle::current()), rx)
    }

    #[tokio::test]
    async fn test_transition_fires_after_delay() {
        let (mut bridge, mut rx) = bridge();

        assert!(!bridge.schedule_transition(Ticket(1), Duration::from_millis(10)));
        assert!(bridge.has_pending_transition());

        let command = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("Timeout waiting for timer")
            .expect("Channel closed");
        assert_eq!(command, Command::TransitionElapsed(Ticket(1)));
    }

    #[tokio::test]
    async fn test_newer_transition_supersedes_pending() {
        let (mut bridge, mut rx) = bridge();

        bridge.schedule_transition(Ticket(1), Duration::from_millis(200));
        assert!(bridge.schedule_transition(Ticket(2), Duration::from_millis(10)));

        let command = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("Timeout")
            .expect("Channel closed");
        assert_eq!(command, Command::TransitionElapsed(Ticket(2)));

        // The aborted timer never posts
        assert!(timeout(Duration::from_millis(300), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_transition_aborts_pending_advance() {
        let (mut bridge, mut rx) = bridge();

        bridge.schedule_advance(Ticket(1), Duration::from_millis(50));
        bridge.schedule_transition(Ticket(5), Duration::from_millis(10));

        let command = timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("Timeout")
            .expect("Channel closed");
        assert_eq!(command, Command::TransitionElapsed(Ticket(5)));
        assert!(timeout(Duration::from_millis(200), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (mut bridge, mut rx) = bridge();

        bridge.schedule_transition(Ticket(1), Duration::from_millis(20));
        bridge.schedule_advance(Ticket(1), Duration::from_millis(20));
        bridge.cancel_all();

        assert!(!bridge.has_pending_transition());
        assert!(timeout(Duration::from_millis(150), rx.recv()).await.is_err());
    }
}
