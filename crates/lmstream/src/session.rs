use std::sync::Arc;

use futures::StreamExt as _;
use futures::stream::BoxStream;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::backend::{Availability, ModelBackend, SnapshotRequest};
use crate::chat::Input;
use crate::chunk::StreamChunk;
use crate::delta::DeltaTracker;
use crate::errors::{BackendError, StreamError};
use crate::lifecycle::{AutoPausePolicy, LifecycleSignal, spawn_auto_pause};
use crate::model::{GenerationOptions, ModelRef, SessionOptions};
use crate::pause::{PauseGate, PauseWatcher};
use crate::streamer::StreamerInner;
use crate::tools::Tool;
use crate::transcript;

/// Handle used to request cancellation of an active session.
///
/// Cancellation is cooperative: the producer observes it at every suspension
/// point, stops forwarding output, and drops the in-flight backend call. A
/// cancelled session never resumes, even if `resume` is called afterwards.
#[derive(Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Builder for configuring and starting a single streaming session.
///
/// This is the main user-facing API for providing input, tools, and options
/// before subscribing either to raw text deltas or to typed chunks.
pub struct SessionBuilder {
    streamer: Arc<StreamerInner>,
    model: ModelRef,
    input: Input,
    tools: Vec<Tool>,
    generation: GenerationOptions,
    options: SessionOptions,
    lifecycle: Option<BoxStream<'static, LifecycleSignal>>,
}

impl SessionBuilder {
    pub(crate) fn new(streamer: Arc<StreamerInner>, model: ModelRef) -> Self {
        Self {
            streamer,
            model,
            input: Input::Plain(String::new()),
            tools: Vec::new(),
            generation: GenerationOptions::default(),
            options: SessionOptions::default(),
            lifecycle: None,
        }
    }

    /// Sets the session input (plain prompt or chat history).
    pub fn input(mut self, input: Input) -> Self {
        self.input = input;
        self
    }

    /// Replaces the tool list forwarded to the backend.
    pub fn tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the opaque generation options forwarded to the backend.
    pub fn generation_options(mut self, options: GenerationOptions) -> Self {
        self.generation = options;
        self
    }

    /// Sets an optional per-call timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Sets the bounded delta buffer size used between the producer task and
    /// the consumer.
    pub fn stream_buffer_capacity(mut self, capacity: usize) -> Self {
        self.options.stream_buffer_capacity = capacity;
        self
    }

    /// Prevents platform lifecycle signals from pausing this session.
    ///
    /// Explicit `pause`/`resume` calls on the pause gate keep working.
    pub fn disable_auto_pause(mut self) -> Self {
        self.options.auto_pause = false;
        self
    }

    /// Attaches a platform lifecycle signal source that pauses and resumes
    /// the session automatically (subject to [`Self::disable_auto_pause`]).
    pub fn lifecycle_signals(
        mut self,
        signals: impl futures::Stream<Item = LifecycleSignal> + Send + 'static,
    ) -> Self {
        self.lifecycle = Some(Box::pin(signals));
        self
    }

    /// Subscribes to the session as a best-effort text-delta sequence.
    ///
    /// Establishment failures (unknown backend, unavailable model, invalid
    /// options) surface here before any output is produced. Once streaming,
    /// this layer never reports backend failures: see [`TextStream`].
    pub async fn text_deltas(mut self) -> Result<TextStream, StreamError> {
        self.validate()?;
        let backend = self.streamer.backend(&self.model.backend).ok_or_else(|| {
            StreamError::BackendNotFound {
                backend: self.model.backend.clone(),
            }
        })?;

        // Availability preflight: on an unavailable model no streaming call
        // is ever issued.
        if let Availability::Unavailable { reason } = backend.availability(&self.model).await {
            return Err(StreamError::ModelUnavailable { reason });
        }

        let session_id = uuid::Uuid::new_v4();
        let request = SnapshotRequest {
            session_id,
            model: self.model.clone(),
            transcript: transcript::history_entries(&self.input, &self.generation),
            prompt: transcript::current_prompt(&self.input),
            tools: self.tools,
            generation: self.generation,
            options: self.options.clone(),
        };

        let gate = Arc::new(PauseGate::new());
        if let Some(signals) = self.lifecycle.take() {
            spawn_auto_pause(
                gate.clone(),
                signals,
                AutoPausePolicy {
                    auto_pause: self.options.auto_pause,
                },
            );
        }

        let (tx, rx) = mpsc::channel(self.options.stream_buffer_capacity);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let watcher = gate.watcher();
        debug!(session_id = %session_id, backend = %self.model.backend, model = %self.model.model, "starting streaming session");
        tokio::spawn(stream_task(backend, request, tx, cancel_rx, watcher));

        Ok(TextStream {
            session_id,
            rx,
            cancel: CancelHandle { tx: cancel_tx },
            gate,
            done: false,
        })
    }

    /// Subscribes to the session as a typed chunk sequence.
    ///
    /// Wraps the text-delta layer; any failure raised while establishing the
    /// subscription propagates here, and unlike [`TextStream`] the returned
    /// [`ChunkStream`] re-raises backend failures encountered mid-stream.
    pub async fn chunks(self) -> Result<ChunkStream, StreamError> {
        Ok(ChunkStream {
            inner: self.text_deltas().await?,
        })
    }

    fn validate(&self) -> Result<(), StreamError> {
        if self.model.backend.as_str().trim().is_empty() {
            return Err(StreamError::Validation(
                "model backend must not be empty".into(),
            ));
        }
        if self.model.model.trim().is_empty() {
            return Err(StreamError::Validation("model must not be empty".into()));
        }
        if self.options.stream_buffer_capacity == 0 {
            return Err(StreamError::Validation(
                "stream_buffer_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Internal hand-off between the producer task and the stream handles.
pub(crate) enum StreamItem {
    Delta(String),
    Failed(BackendError),
}

/// Best-effort text-delta sequence for one streaming session.
///
/// This layer never reports backend failures: a mid-stream backend error is
/// logged and then surfaces as a clean end of the sequence, which may leave
/// the output truncated. Subscribe through [`SessionBuilder::chunks`] instead
/// when failures must be observable.
pub struct TextStream {
    session_id: uuid::Uuid,
    rx: mpsc::Receiver<StreamItem>,
    cancel: CancelHandle,
    gate: Arc<PauseGate>,
    done: bool,
}

impl TextStream {
    /// Returns the session id for this stream.
    pub fn session_id(&self) -> uuid::Uuid {
        self.session_id
    }

    /// Returns a handle that can cancel the session.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Returns the session's pause gate.
    pub fn pause_gate(&self) -> Arc<PauseGate> {
        self.gate.clone()
    }

    /// Waits for and returns the next text delta.
    ///
    /// Returns `None` when the session completed, was cancelled, or hit a
    /// backend failure (logged, not reported).
    pub async fn next_delta(&mut self) -> Option<String> {
        match self.next_item().await? {
            StreamItem::Delta(text) => Some(text),
            StreamItem::Failed(error) => {
                warn!(session_id = %self.session_id, error = %error, "backend failure dropped at the text-delta layer");
                None
            }
        }
    }

    pub(crate) async fn next_item(&mut self) -> Option<StreamItem> {
        if self.done {
            return None;
        }
        match self.rx.recv().await {
            Some(StreamItem::Failed(error)) => {
                self.done = true;
                Some(StreamItem::Failed(error))
            }
            Some(item) => Some(item),
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Typed chunk sequence for one streaming session.
///
/// Wraps the text-delta layer and, unlike [`TextStream`], re-raises a
/// backend failure encountered while relaying, completing the sequence with
/// an error.
pub struct ChunkStream {
    inner: TextStream,
}

impl ChunkStream {
    /// Returns the session id for this stream.
    pub fn session_id(&self) -> uuid::Uuid {
        self.inner.session_id()
    }

    /// Returns a handle that can cancel the session.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.inner.cancel_handle()
    }

    /// Returns the session's pause gate.
    pub fn pause_gate(&self) -> Arc<PauseGate> {
        self.inner.pause_gate()
    }

    /// Waits for and returns the next chunk.
    ///
    /// Returns `Ok(None)` when the session completed or was cancelled, and
    /// `Err` when the backend failed mid-stream.
    pub async fn next_chunk(&mut self) -> Result<Option<StreamChunk>, StreamError> {
        match self.inner.next_item().await {
            Some(StreamItem::Delta(text)) => Ok(Some(StreamChunk::Text { text })),
            Some(StreamItem::Failed(error)) => Err(StreamError::Backend(error)),
            None => Ok(None),
        }
    }

    /// Drains the stream and returns the concatenated text output.
    pub async fn collect_text(mut self) -> Result<String, StreamError> {
        let mut out = String::new();
        while let Some(chunk) = self.next_chunk().await? {
            if let Some(text) = chunk.as_text() {
                out.push_str(text);
            }
        }
        Ok(out)
    }
}

async fn stream_task(
    backend: Arc<dyn ModelBackend>,
    request: SnapshotRequest,
    tx: mpsc::Sender<StreamItem>,
    mut cancel_rx: watch::Receiver<bool>,
    mut pause: PauseWatcher,
) {
    let session_id = request.session_id;
    let backend_id = request.model.backend.clone();
    let model_name = request.model.model.clone();

    let mut handle = match backend.stream_snapshots(request).await {
        Ok(handle) => handle,
        Err(error) => {
            warn!(session_id = %session_id, backend = %backend_id, model = %model_name, error = %error, "backend stream failed to start");
            let _ = tx.send(StreamItem::Failed(error)).await;
            return;
        }
    };

    let mut tracker = DeltaTracker::new();
    let mut seq = 0_u64;
    loop {
        tokio::select! {
            changed = cancel_rx.changed() => {
                match changed {
                    Ok(()) if *cancel_rx.borrow() => {
                        debug!(session_id = %session_id, "session cancelled");
                        return;
                    }
                    Ok(()) => {}
                    // Sender gone: the consumer handle was dropped.
                    Err(_) => return,
                }
            }
            next = handle.stream.next() => {
                match next {
                    Some(Ok(snapshot)) => {
                        // Gate before forwarding; cancellation stays
                        // observable while paused.
                        if !gate_or_cancel(&mut pause, &mut cancel_rx).await {
                            debug!(session_id = %session_id, "session cancelled");
                            return;
                        }
                        let delta = tracker.advance(&snapshot);
                        if delta.is_empty() {
                            continue;
                        }
                        debug!(session_id = %session_id, backend = %backend_id, model = %model_name, seq, bytes = delta.len(), "text delta");
                        seq = seq.saturating_add(1);
                        if tx.send(StreamItem::Delta(delta)).await.is_err() {
                            // Consumer stopped consuming; returning drops the
                            // in-flight backend call.
                            return;
                        }
                    }
                    Some(Err(error)) => {
                        warn!(session_id = %session_id, backend = %backend_id, model = %model_name, error = %error, "backend stream failed");
                        let _ = tx.send(StreamItem::Failed(error)).await;
                        return;
                    }
                    None => {
                        debug!(session_id = %session_id, "snapshot stream exhausted");
                        return;
                    }
                }
            }
        }
    }
}

/// Waits out a pause. Returns false if cancellation was observed while
/// checking or waiting.
async fn gate_or_cancel(pause: &mut PauseWatcher, cancel_rx: &mut watch::Receiver<bool>) -> bool {
    if *cancel_rx.borrow_and_update() {
        return false;
    }
    loop {
        tokio::select! {
            _ = pause.wait_until_running() => return true,
            changed = cancel_rx.changed() => match changed {
                Ok(()) if *cancel_rx.borrow() => return false,
                Ok(()) => {}
                Err(_) => return false,
            },
        }
    }
}
