use std::fmt;
use std::time::Duration;

/// Stable identifier for a backend implementation (for example `openai`).
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BackendId(pub String);

impl BackendId {
    /// Creates a backend id from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the backend id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BackendId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BackendId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Model selection for a streaming session.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelRef {
    /// Backend that owns the model.
    pub backend: BackendId,
    /// Backend-specific model name (for example `gpt-5-nano`).
    pub model: String,
}

impl ModelRef {
    /// Creates a model reference.
    pub fn new(backend: impl Into<BackendId>, model: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            model: model.into(),
        }
    }
}

/// Generic session behavior options.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SessionOptions {
    /// Optional per-call timeout.
    pub timeout: Option<Duration>,
    /// Bounded delta buffer size used by the streaming channel.
    pub stream_buffer_capacity: usize,
    /// Whether platform lifecycle signals may pause the session automatically.
    ///
    /// Explicit `pause`/`resume` calls are honored regardless of this flag.
    pub auto_pause: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            stream_buffer_capacity: 128,
            auto_pause: true,
        }
    }
}

/// Opaque generation configuration forwarded to the backend unchanged.
///
/// The streaming core never interprets this value. Vendor extension traits
/// (for example `OpenAiSessionBuilderExt`) construct it from typed option
/// structs, and the owning backend deserializes it back on its side.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerationOptions(serde_json::Value);

impl GenerationOptions {
    /// Wraps a raw configuration value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Returns the raw configuration value.
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Returns true when no configuration was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_options_default_buffer_capacity() {
        let options = SessionOptions::default();
        assert_eq!(options.stream_buffer_capacity, 128);
        assert!(options.auto_pause);
    }

    #[test]
    fn generation_options_default_is_empty() {
        assert!(GenerationOptions::default().is_empty());
        assert!(!GenerationOptions::new(serde_json::json!({"store": true})).is_empty());
    }
}
