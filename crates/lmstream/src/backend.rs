use futures::stream::BoxStream;

use crate::errors::BackendError;
use crate::model::{BackendId, GenerationOptions, ModelRef, SessionOptions};
use crate::tools::Tool;
use crate::transcript::TranscriptEntry;

/// Reported readiness of a backend for a given model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Availability {
    /// The model can serve a streaming call.
    Available,
    /// The model cannot serve calls; `reason` is the backend's explanation.
    Unavailable { reason: String },
}

/// Everything a backend needs to serve one streaming call.
#[derive(Clone, Debug)]
pub struct SnapshotRequest {
    /// Correlation id for the session, used in logs.
    pub session_id: uuid::Uuid,
    /// Model selection.
    pub model: ModelRef,
    /// Typed conversation history, oldest first. Passed through unmodified.
    pub transcript: Vec<TranscriptEntry>,
    /// The current turn's prompt text.
    pub prompt: String,
    /// Ordered tool list. Passed through unmodified.
    pub tools: Vec<Tool>,
    /// Opaque generation configuration. Passed through unmodified.
    pub generation: GenerationOptions,
    /// Generic session options (timeout, buffering).
    pub options: SessionOptions,
}

/// Live output of one backend streaming call.
pub struct SnapshotStreamHandle {
    /// Cumulative text snapshots: each item is the full output so far and a
    /// prefix-extension of the previous item.
    pub stream: BoxStream<'static, Result<String, BackendError>>,
}

/// Contract implemented by model backends.
///
/// A backend owns the actual inference call; the streaming core only
/// consumes its output as a lazy sequence of cumulative-text snapshots.
#[async_trait::async_trait]
pub trait ModelBackend: Send + Sync {
    /// Stable identifier used to register and look up this backend.
    fn id(&self) -> BackendId;

    /// Out-of-band readiness probe, checked before any streaming call is
    /// issued.
    async fn availability(&self, model: &ModelRef) -> Availability;

    /// Starts one streaming call.
    async fn stream_snapshots(
        &self,
        req: SnapshotRequest,
    ) -> Result<SnapshotStreamHandle, BackendError>;
}
