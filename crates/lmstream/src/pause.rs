use tokio::sync::watch;

/// Cooperative pause/resume control for one streaming session.
///
/// One gate belongs to exactly one session; it is shared between the pausing
/// controller and that session's producer task, never across sessions.
/// Pausing affects when output is forwarded, never what: nothing already
/// produced upstream is dropped or reordered.
pub struct PauseGate {
    tx: watch::Sender<bool>,
}

impl PauseGate {
    /// Creates a gate in the running state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Pauses the session. Pausing an already-paused gate is a no-op.
    pub fn pause(&self) {
        let _ = self.tx.send_replace(true);
    }

    /// Resumes the session and releases a producer blocked in
    /// [`PauseWatcher::wait_until_running`]. Resuming a running gate is a
    /// no-op.
    pub fn resume(&self) {
        let _ = self.tx.send_replace(false);
    }

    /// Returns the current state. Never blocks and is safe to call from any
    /// number of observers.
    pub fn is_paused(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn watcher(&self) -> PauseWatcher {
        PauseWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer-side wait point of a [`PauseGate`].
pub(crate) struct PauseWatcher {
    rx: watch::Receiver<bool>,
}

impl PauseWatcher {
    /// Returns immediately while running; while paused, suspends until the
    /// next `resume` call.
    pub(crate) async fn wait_until_running(&mut self) {
        // A dropped gate cannot pause anymore; let the producer finish.
        let _ = self.rx.wait_for(|paused| !*paused).await;
    }
}
