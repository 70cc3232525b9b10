//! Pausable, cancellable incremental text streaming for language-model
//! sessions, with typed transcript construction from generic chat history.
//!
//! Vendor-specific APIs are namespaced under `vendors::*`.
//!
//! # Builder-first usage (OpenAI)
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lmstream::prelude::*;
//! use lmstream::vendors::openai::{OpenAiBackend, OpenAiRequestOptions, OpenAiSessionBuilderExt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), StreamError> {
//! let streamer = Streamer::builder()
//!     .register_backend(Arc::new(OpenAiBackend::from_env()?))
//!     .build()?;
//!
//! let mut chunks = streamer
//!     .session(ModelRef::new("openai", "gpt-5-nano"))
//!     .input(Input::chat(vec![
//!         ChatMessage::new(Role::System, "Answer briefly."),
//!         ChatMessage::new(Role::User, "Say hello"),
//!     ]))
//!     .openai_options(OpenAiRequestOptions::default().store(false))
//!     .chunks()
//!     .await?;
//!
//! // `chunks.pause_gate()` and `chunks.cancel_handle()` control the
//! // session from any task while the loop below consumes it.
//! while let Some(chunk) = chunks.next_chunk().await? {
//!     if let StreamChunk::Text { text } = chunk {
//!         print!("{text}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error visibility
//!
//! The two subscription layers differ deliberately: the text-delta layer
//! ([`TextStream`]) is best-effort and turns mid-stream backend failures
//! into a clean (possibly truncated) end of the sequence, while the chunk
//! layer ([`ChunkStream`]) re-raises them. Use the chunk layer whenever
//! failures must be observable.

/// Model backend contract: availability query and snapshot streaming.
pub mod backend;
/// Caller-facing chat input types (roles, messages, input union).
pub mod chat;
/// Caller-facing output chunk union.
pub mod chunk;
/// Incremental diffing of cumulative text snapshots.
pub mod delta;
/// Public error types used by the streaming API.
pub mod errors;
/// Automatic pause trigger driven by platform lifecycle signals.
pub mod lifecycle;
/// Backend and model identifiers plus generic session options.
pub mod model;
/// Process-wide tracing initialization.
pub mod observability;
/// Pause/resume control shared between a controller and one producer.
pub mod pause;
/// Common imports for typical usage.
pub mod prelude;
/// Session builder, stream handles, and cancellation handle.
pub mod session;
/// Streamer entry point and builder.
pub mod streamer;
/// Opaque tool descriptors forwarded to backends.
pub mod tools;
/// Typed transcript entries and history conversion.
pub mod transcript;
/// Vendor-specific backend integrations and extension traits.
pub mod vendors;

pub use backend::{Availability, ModelBackend, SnapshotRequest, SnapshotStreamHandle};
pub use chat::{ChatMessage, Input, Role};
pub use chunk::StreamChunk;
pub use delta::DeltaTracker;
pub use errors::{BackendError, StreamError};
pub use lifecycle::{AutoPausePolicy, LifecycleSignal, spawn_auto_pause};
pub use model::{BackendId, GenerationOptions, ModelRef, SessionOptions};
pub use observability::init_observability;
pub use pause::PauseGate;
pub use session::{CancelHandle, ChunkStream, SessionBuilder, TextStream};
pub use streamer::{Streamer, StreamerBuilder};
pub use tools::Tool;
pub use transcript::{TranscriptEntry, current_prompt, history_entries};
