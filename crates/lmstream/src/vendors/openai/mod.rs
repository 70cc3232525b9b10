//! OpenAI backend integration and request options.
//!
//! Vendor-specific configuration lives here so the root streaming API can
//! remain backend-agnostic.
mod adapter;
mod config;
mod options;
pub(crate) mod transport;

pub use adapter::OpenAiBackend;
pub use config::OpenAiClientConfig;
pub use options::{OpenAiReasoningEffort, OpenAiRequestOptions};

use crate::model::GenerationOptions;
use crate::session::SessionBuilder;

/// Extension trait for attaching OpenAI-specific options to a
/// `SessionBuilder`.
pub trait OpenAiSessionBuilderExt {
    /// Adds OpenAI request options for the current session.
    ///
    /// The options travel through the session's opaque generation options
    /// and are read back only by `OpenAiBackend`.
    fn openai_options(self, options: OpenAiRequestOptions) -> Self;
}

impl OpenAiSessionBuilderExt for SessionBuilder {
    fn openai_options(self, options: OpenAiRequestOptions) -> Self {
        let value = serde_json::to_value(options)
            .expect("OpenAiRequestOptions serialization should be infallible");
        self.generation_options(GenerationOptions::new(value))
    }
}
