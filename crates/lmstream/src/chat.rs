/// Speaker tag for one element of a chat history.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-level guidance.
    System,
    /// The end user.
    User,
    /// A prior model turn.
    Assistant,
    /// Output of an auxiliary tool invocation.
    Tool,
    /// Application-defined role outside the four standard ones.
    #[serde(untagged)]
    Custom(String),
}

impl Role {
    /// Resolves one of the four standard role tags from a string.
    ///
    /// Returns `None` for anything else; callers converting untyped history
    /// drop such elements rather than failing.
    pub fn parse(tag: &str) -> Option<Role> {
        match tag {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            "tool" => Some(Role::Tool),
            _ => None,
        }
    }
}

/// One element of a typed chat history.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Creates a chat message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Caller input for one streaming session.
///
/// For the two list variants the last element is the current turn; it is
/// excluded from history conversion and supplies the prompt instead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Input {
    /// Single free-form prompt with no prior history.
    Plain(String),
    /// Ordered role→field mappings, for example decoded from JSON chat
    /// payloads. Expected fields per element: `role` and `content`.
    ChatTemplate(Vec<serde_json::Map<String, serde_json::Value>>),
    /// Typed chat history.
    Chat(Vec<ChatMessage>),
}

impl Input {
    /// Creates a plain prompt input.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Creates a typed chat input.
    pub fn chat(messages: Vec<ChatMessage>) -> Self {
        Self::Chat(messages)
    }

    /// Creates a template input from untyped role→field mappings.
    pub fn chat_template(elements: Vec<serde_json::Map<String, serde_json::Value>>) -> Self {
        Self::ChatTemplate(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolves_standard_tags_only() {
        assert_eq!(Role::parse("system"), Some(Role::System));
        assert_eq!(Role::parse("tool"), Some(Role::Tool));
        assert_eq!(Role::parse("moderator"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn custom_role_round_trips_as_bare_string() {
        let role: Role = serde_json::from_str("\"assistant\"").expect("standard role");
        assert_eq!(role, Role::Assistant);
        let role: Role = serde_json::from_str("\"moderator\"").expect("custom role");
        assert_eq!(role, Role::Custom("moderator".into()));
        assert_eq!(
            serde_json::to_string(&Role::Custom("moderator".into())).expect("serialize"),
            "\"moderator\""
        );
    }
}
