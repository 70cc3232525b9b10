/// OpenAI reasoning effort hint (when supported by the selected model/API).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAiReasoningEffort {
    /// Lower latency / cost-oriented reasoning.
    Low,
    /// Balanced reasoning.
    Medium,
    /// Higher effort reasoning.
    High,
}

/// Per-session OpenAI request options.
///
/// Carried through the session's opaque generation options and read back
/// only by the OpenAI backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenAiRequestOptions {
    /// Whether OpenAI should store the response server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    /// Optional reasoning effort hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<OpenAiReasoningEffort>,
    /// Optional cap on generated tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl OpenAiRequestOptions {
    /// Sets the `store` flag for the request.
    pub fn store(mut self, store: bool) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the reasoning effort hint.
    pub fn reasoning_effort(mut self, effort: OpenAiReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Caps the number of generated tokens.
    pub fn max_output_tokens(mut self, limit: u32) -> Self {
        self.max_output_tokens = Some(limit);
        self
    }
}
