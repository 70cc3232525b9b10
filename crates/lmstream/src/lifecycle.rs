//! Automatic pause trigger driven by platform lifecycle signals.
//!
//! The signal source (background/foreground detection) is the host
//! application's concern; this module only maps an incoming signal stream
//! onto a session's [`PauseGate`]. The auto-pause policy flag lives here,
//! not in the gate: explicit `pause`/`resume` calls always work.

use std::sync::Arc;

use futures::{Stream, StreamExt as _};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::pause::PauseGate;

/// Platform lifecycle transitions observed by the host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleSignal {
    /// The host moved to the background or otherwise suspended the UI.
    Suspended,
    /// The host returned to the foreground.
    Resumed,
}

/// Policy for the automatic trigger.
#[derive(Clone, Copy, Debug)]
pub struct AutoPausePolicy {
    /// When false, lifecycle signals are ignored entirely.
    pub auto_pause: bool,
}

impl Default for AutoPausePolicy {
    fn default() -> Self {
        Self { auto_pause: true }
    }
}

/// Drives a pause gate from a stream of platform signals.
///
/// The task ends when the signal stream does; it never pauses a gate whose
/// policy disables auto-pause.
pub fn spawn_auto_pause(
    gate: Arc<PauseGate>,
    signals: impl Stream<Item = LifecycleSignal> + Send + 'static,
    policy: AutoPausePolicy,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut signals = std::pin::pin!(signals);
        while let Some(signal) = signals.next().await {
            if !policy.auto_pause {
                debug!(?signal, "auto-pause disabled, ignoring lifecycle signal");
                continue;
            }
            match signal {
                LifecycleSignal::Suspended => gate.pause(),
                LifecycleSignal::Resumed => gate.resume(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn signals_drive_the_gate() {
        let gate = Arc::new(PauseGate::new());
        let handle = spawn_auto_pause(
            gate.clone(),
            stream::iter([LifecycleSignal::Suspended]),
            AutoPausePolicy::default(),
        );
        handle.await.expect("trigger task");
        assert!(gate.is_paused());

        let handle = spawn_auto_pause(
            gate.clone(),
            stream::iter([LifecycleSignal::Resumed]),
            AutoPausePolicy::default(),
        );
        handle.await.expect("trigger task");
        assert!(!gate.is_paused());
    }

    #[tokio::test]
    async fn disabled_policy_ignores_signals() {
        let gate = Arc::new(PauseGate::new());
        let handle = spawn_auto_pause(
            gate.clone(),
            stream::iter([LifecycleSignal::Suspended, LifecycleSignal::Resumed]),
            AutoPausePolicy { auto_pause: false },
        );
        handle.await.expect("trigger task");
        assert!(!gate.is_paused());

        // Explicit control still works with the policy disabled.
        gate.pause();
        assert!(gate.is_paused());
    }

    #[tokio::test]
    async fn disabled_policy_does_not_resume_an_explicit_pause() {
        let gate = Arc::new(PauseGate::new());
        gate.pause();
        let handle = spawn_auto_pause(
            gate.clone(),
            stream::iter([LifecycleSignal::Resumed]),
            AutoPausePolicy { auto_pause: false },
        );
        handle.await.expect("trigger task");
        assert!(gate.is_paused());
    }
}
