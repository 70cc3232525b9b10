use serde_json::Value;

/// An auxiliary capability offered to the model.
///
/// The streaming core treats tools as opaque: the ordered list is forwarded
/// to the backend unmodified, and tool-call execution is the host
/// application's concern.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tool {
    /// The name of the tool.
    pub name: String,
    /// A description of what the tool does.
    pub description: String,
    /// JSON schema of the parameters the tool accepts.
    pub parameters: Value,
}

impl Tool {
    /// Creates a tool descriptor.
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}
