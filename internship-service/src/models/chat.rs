use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest conversation accepted in one chat request.
pub const MAX_MESSAGES: usize = 200;

/// Longest single message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Speaker label used in the transcript.
    pub fn label(self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

/// Language the model should answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyLanguage {
    En,
    Ar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A turn in the conversation between an intern and the simulated client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectChatRequest {
    pub project_id: String,
    pub project_title: String,
    pub project_description: String,
    pub client_persona: String,
    pub client_mood: String,
    /// Chronological order.
    pub messages: Vec<ChatMessage>,
    pub language: ReplyLanguage,
}

impl Validate for ProjectChatRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.messages.len() > MAX_MESSAGES {
            errors.add(
                "messages",
                error_with_message(
                    "length",
                    format!("at most {} messages are allowed", MAX_MESSAGES),
                ),
            );
        }

        for (index, message) in self.messages.iter().enumerate() {
            if message.content.chars().count() > MAX_MESSAGE_CHARS {
                errors.add(
                    "messages",
                    error_with_message(
                        "length",
                        format!(
                            "message {} exceeds {} characters",
                            index, MAX_MESSAGE_CHARS
                        ),
                    ),
                );
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn error_with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(messages: Vec<ChatMessage>) -> ProjectChatRequest {
        ProjectChatRequest {
            project_id: "p-1".to_string(),
            project_title: "Landing page".to_string(),
            project_description: "Build a landing page".to_string(),
            client_persona: "Busy founder".to_string(),
            client_mood: "impatient".to_string(),
            messages,
            language: ReplyLanguage::En,
        }
    }

    #[test]
    fn roles_and_languages_use_lowercase_wire_names() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(message.role, ChatRole::Assistant);

        let language: ReplyLanguage = serde_json::from_str(r#""ar""#).unwrap();
        assert_eq!(language, ReplyLanguage::Ar);

        assert!(serde_json::from_str::<ChatMessage>(r#"{"role":"system","content":"x"}"#).is_err());
    }

    #[test]
    fn ordinary_conversation_is_valid() {
        let req = request(vec![ChatMessage {
            role: ChatRole::User,
            content: "Hello".to_string(),
        }]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn oversized_message_is_rejected() {
        let req = request(vec![
            ChatMessage {
                role: ChatRole::User,
                content: "fine".to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: "x".repeat(MAX_MESSAGE_CHARS + 1),
            },
        ]);

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        let field = fields["messages"];
        assert_eq!(field.len(), 1);
        assert_eq!(
            field[0].message.as_deref(),
            Some("message 1 exceeds 20000 characters")
        );
    }

    #[test]
    fn too_many_messages_is_rejected() {
        let messages = (0..=MAX_MESSAGES)
            .map(|i| ChatMessage {
                role: ChatRole::User,
                content: i.to_string(),
            })
            .collect();

        assert!(request(messages).validate().is_err());
    }
}
