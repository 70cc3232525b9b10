//! Conversion of caller chat history into the typed context entries a model
//! backend consumes.
//!
//! Conversion is pure and infallible: elements with missing or mistyped
//! content degrade to empty text, and untyped elements whose role tag is not
//! recognized are dropped rather than failing the whole call.

use crate::chat::{Input, Role};
use crate::model::GenerationOptions;

/// One typed entry of the model context, oldest first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TranscriptEntry {
    /// System-level guidance supplied ahead of the conversation.
    Instructions { text: String },
    /// A caller turn, carrying the generation options in effect.
    Prompt {
        text: String,
        options: GenerationOptions,
    },
    /// A prior model turn.
    Response { text: String },
}

impl TranscriptEntry {
    /// Returns the textual content of the entry.
    pub fn text(&self) -> &str {
        match self {
            Self::Instructions { text } | Self::Prompt { text, .. } | Self::Response { text } => {
                text
            }
        }
    }
}

/// Converts the historical part of `input` into ordered transcript entries.
///
/// The last element of a list input is the current turn and is excluded; use
/// [`current_prompt`] to extract it. `Plain` input has no history.
pub fn history_entries(input: &Input, options: &GenerationOptions) -> Vec<TranscriptEntry> {
    match input {
        Input::Plain(_) => Vec::new(),
        Input::ChatTemplate(elements) => {
            let history = elements
                .split_last()
                .map(|(_, rest)| rest)
                .unwrap_or_default();
            history
                .iter()
                .filter_map(|element| {
                    let role = element
                        .get("role")
                        .and_then(|value| value.as_str())
                        .and_then(Role::parse)?;
                    let text = element
                        .get("content")
                        .and_then(|value| value.as_str())
                        .unwrap_or_default()
                        .to_string();
                    Some(entry_for(role, text, options))
                })
                .collect()
        }
        Input::Chat(messages) => {
            let history = messages
                .split_last()
                .map(|(_, rest)| rest)
                .unwrap_or_default();
            history
                .iter()
                .map(|message| entry_for(message.role.clone(), message.content.clone(), options))
                .collect()
        }
    }
}

/// Returns the content of the current turn: the last list element, or the
/// plain text itself. Defaults to an empty string when absent.
pub fn current_prompt(input: &Input) -> String {
    match input {
        Input::Plain(text) => text.clone(),
        Input::ChatTemplate(elements) => elements
            .last()
            .and_then(|element| element.get("content"))
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string(),
        Input::Chat(messages) => messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default(),
    }
}

fn entry_for(role: Role, text: String, options: &GenerationOptions) -> TranscriptEntry {
    match role {
        Role::System => TranscriptEntry::Instructions { text },
        Role::Assistant => TranscriptEntry::Response { text },
        // Tool output history is folded into the prompt channel alongside
        // user and custom turns.
        Role::User | Role::Tool | Role::Custom(_) => TranscriptEntry::Prompt {
            text,
            options: options.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatMessage;

    fn template_element(role: &str, content: &str) -> serde_json::Map<String, serde_json::Value> {
        let mut element = serde_json::Map::new();
        element.insert("role".into(), serde_json::Value::String(role.into()));
        element.insert("content".into(), serde_json::Value::String(content.into()));
        element
    }

    #[test]
    fn chat_history_excludes_current_turn() {
        let input = Input::chat(vec![
            ChatMessage::new(Role::System, "be terse"),
            ChatMessage::new(Role::User, "hi"),
            ChatMessage::new(Role::Assistant, "hello"),
            ChatMessage::new(Role::User, "what now?"),
        ]);
        let options = GenerationOptions::default();
        let entries = history_entries(&input, &options);
        assert_eq!(
            entries,
            vec![
                TranscriptEntry::Instructions {
                    text: "be terse".into()
                },
                TranscriptEntry::Prompt {
                    text: "hi".into(),
                    options: options.clone()
                },
                TranscriptEntry::Response {
                    text: "hello".into()
                },
            ]
        );
        assert_eq!(current_prompt(&input), "what now?");
    }

    #[test]
    fn plain_input_has_no_history() {
        let input = Input::plain("just this");
        assert!(history_entries(&input, &GenerationOptions::default()).is_empty());
        assert_eq!(current_prompt(&input), "just this");
    }

    #[test]
    fn tool_and_custom_roles_fold_into_prompt() {
        let input = Input::chat(vec![
            ChatMessage::new(Role::Tool, "{\"result\": 3}"),
            ChatMessage::new(Role::Custom("moderator".into()), "approved"),
            ChatMessage::new(Role::User, "go on"),
        ]);
        let entries = history_entries(&input, &GenerationOptions::default());
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], TranscriptEntry::Prompt { text, .. } if text == "{\"result\": 3}"));
        assert!(matches!(&entries[1], TranscriptEntry::Prompt { text, .. } if text == "approved"));
    }

    #[test]
    fn unrecognized_template_role_is_omitted() {
        let input = Input::chat_template(vec![
            template_element("system", "be terse"),
            template_element("narrator", "meanwhile..."),
            template_element("user", "hi"),
            template_element("user", "what now?"),
        ]);
        let entries = history_entries(&input, &GenerationOptions::default());
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], TranscriptEntry::Instructions { text } if text == "be terse"));
        assert!(matches!(&entries[1], TranscriptEntry::Prompt { text, .. } if text == "hi"));
    }

    #[test]
    fn missing_or_mistyped_content_degrades_to_empty() {
        let mut no_content = serde_json::Map::new();
        no_content.insert("role".into(), serde_json::Value::String("user".into()));
        let mut numeric_content = template_element("assistant", "");
        numeric_content.insert("content".into(), serde_json::Value::from(42));
        let input = Input::chat_template(vec![
            no_content,
            numeric_content,
            template_element("user", "current"),
        ]);
        let entries = history_entries(&input, &GenerationOptions::default());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text(), "");
        assert_eq!(entries[1].text(), "");
    }

    #[test]
    fn current_prompt_defaults_to_empty() {
        assert_eq!(current_prompt(&Input::chat(Vec::new())), "");
        assert_eq!(current_prompt(&Input::chat_template(Vec::new())), "");
        let mut no_content = serde_json::Map::new();
        no_content.insert("role".into(), serde_json::Value::String("user".into()));
        assert_eq!(current_prompt(&Input::chat_template(vec![no_content])), "");
    }

    #[test]
    fn single_element_chat_is_all_current_turn() {
        let input = Input::chat(vec![ChatMessage::new(Role::User, "hi")]);
        assert!(history_entries(&input, &GenerationOptions::default()).is_empty());
        assert_eq!(current_prompt(&input), "hi");
    }
}
