/// One unit of the caller-facing output sequence.
///
/// The enum is non-exhaustive so new chunk kinds (for example tool-call
/// chunks) can be added without breaking callers; consumers should treat
/// variants they do not know as no-ops.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum StreamChunk {
    /// Newly generated text appended to the response so far.
    Text { text: String },
}

impl StreamChunk {
    /// Returns the text payload if this is a text chunk.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
        }
    }
}
