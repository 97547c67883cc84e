//! Conversation turns as exchanged with the browser and the model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Speaker of a single turn.
///
/// Anything other than the string `"assistant"` on the wire is treated as the
/// user, including `null`, numbers and a missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

impl Role {
    pub fn from_wire(raw: &str) -> Self {
        if raw == "assistant" {
            Role::Assistant
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Name used for this speaker in a rendered transcript.
    pub fn speaker_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Interviewer",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => Role::from_wire(&s),
            _ => Role::User,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    #[serde(default)]
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Render turns as `Speaker: content` blocks separated by blank lines.
pub fn format_transcript(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.speaker_label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_become_user() {
        let turns: Vec<ConversationTurn> = serde_json::from_str(
            r#"[
                {"role": "assistant", "content": "What's the problem?"},
                {"role": "human", "content": "My commute."},
                {"content": "No role at all."}
            ]"#,
        )
        .unwrap();

        assert_eq!(turns[0].role, Role::Assistant);
        assert_eq!(turns[1].role, Role::User);
        assert_eq!(turns[2].role, Role::User);
    }

    #[test]
    fn non_string_roles_become_user() {
        let turns: Vec<ConversationTurn> = serde_json::from_str(
            r#"[
                {"role": null, "content": "null role"},
                {"role": 1, "content": "numeric role"},
                {"role": {"name": "assistant"}, "content": "object role"}
            ]"#,
        )
        .unwrap();

        assert!(turns.iter().all(|t| t.role == Role::User));
        assert_eq!(turns[1].content, "numeric role");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let value = serde_json::to_value(ConversationTurn::assistant("hi")).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "hi");
    }

    #[test]
    fn transcript_labels_and_separators() {
        let turns = vec![
            ConversationTurn::assistant("What's going on?"),
            ConversationTurn::user("The trains are always late."),
            ConversationTurn::assistant("How long has this been happening?"),
        ];

        assert_eq!(
            format_transcript(&turns),
            "Interviewer: What's going on?\n\nUser: The trains are always late.\n\nInterviewer: How long has this been happening?"
        );
    }

    #[test]
    fn empty_transcript_renders_empty() {
        assert_eq!(format_transcript(&[]), "");
    }
}
