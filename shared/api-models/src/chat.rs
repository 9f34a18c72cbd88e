//! Chat wire models: conversation summaries, message history, and sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserRole;

/// The other party of a conversation, as projected into the sidebar list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub specialization: Option<String>,
}

/// Preview of the most recent message in a conversation. Unlike full
/// messages, the preview carries a bare sender id, not a populated object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    pub sender_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of the conversation list. Keyed by peer id; the backend returns
/// at most one entry per peer and decides the ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub user: PeerProfile,
    #[serde(default)]
    pub last_message: Option<LastMessage>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Sender projection populated into each history message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSender {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// A persisted chat message. `sender` can be absent when the backend failed
/// to populate the reference; such messages are dropped client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub sender: Option<MessageSender>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn sender_id(&self) -> Option<&str> {
        self.sender.as_ref().map(|s| s.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// The send endpoint overloads its `message` field: the persisted message
/// object on success, an error string on failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SendOutcome {
    Sent(ChatMessage),
    Error(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<SendOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub success: bool,
    #[serde(default)]
    pub unread_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_list_parses() {
        let json = r#"{
            "success": true,
            "conversations": [{
                "user": {"_id": "doc1", "name": "Asha Rao", "role": "doctor", "specialization": "cardiology"},
                "lastMessage": {"senderId": "pat1", "message": "See you then", "createdAt": "2024-06-01T09:30:00.000Z"},
                "unreadCount": 2
            }, {
                "user": {"_id": "doc2", "name": "New Doctor", "role": "doctor"}
            }]
        }"#;
        let parsed: ConversationsResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.conversations.len(), 2);
        assert_eq!(parsed.conversations[0].unread_count, 2);
        assert!(parsed.conversations[1].last_message.is_none());
        assert_eq!(parsed.conversations[1].unread_count, 0);
    }

    #[test]
    fn send_outcome_is_message_on_success_and_string_on_failure() {
        let ok = r#"{"success": true, "message": {
            "_id": "m9", "sender": {"_id": "pat1", "name": "Pat"},
            "message": "hello", "createdAt": "2024-06-01T09:31:00.000Z"
        }}"#;
        let parsed: SendMessageResponse = serde_json::from_str(ok).unwrap();
        match parsed.message {
            Some(SendOutcome::Sent(msg)) => assert_eq!(msg.id, "m9"),
            other => panic!("expected sent message, got {other:?}"),
        }

        let err = r#"{"success": false, "message": "You can only chat with confirmed appointments"}"#;
        let parsed: SendMessageResponse = serde_json::from_str(err).unwrap();
        assert!(!parsed.success);
        assert!(matches!(parsed.message, Some(SendOutcome::Error(_))));
    }

    #[test]
    fn history_tolerates_unpopulated_sender() {
        let json = r#"{"success": true, "messages": [
            {"_id": "m1", "sender": {"_id": "a", "name": "A"}, "message": "hi", "createdAt": "2024-06-01T09:00:00Z"},
            {"_id": "m2", "message": "orphan", "createdAt": "2024-06-01T09:01:00Z"}
        ]}"#;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.messages.len(), 2);
        assert!(parsed.messages[1].sender.is_none());
    }
}
