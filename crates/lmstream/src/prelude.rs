//! Common imports for typical streaming usage.
//!
//! This module intentionally exports the most frequently used builder and
//! runtime types so examples and application code need fewer import lines.
pub use crate::{
    CancelHandle, ChatMessage, ChunkStream, Input, LifecycleSignal, ModelRef, PauseGate, Role,
    SessionBuilder, StreamChunk, StreamError, Streamer, StreamerBuilder, TextStream, Tool,
};
