//! Conversation view state: the sidebar list, the active thread, and the
//! scroll policy that keeps polling from fighting the reader.

pub mod sync;

use std::collections::HashSet;
use std::time::Instant;

use iced::widget::scrollable;

use telemed_api_models::chat::{ChatMessage, ConversationSummary, LastMessage, PeerProfile};

use self::sync::{ConversationSync, ScrollAction};

pub struct ChatState {
    pub conversations: Vec<ConversationSummary>,
    pub active_peer: Option<PeerProfile>,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub sending: bool,
    pub send_error: Option<String>,
    /// Total unread across all conversations, from the backend.
    pub aggregate_unread: u32,
    pub sync: ConversationSync,
    pub scroll_id: scrollable::Id,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active_peer: None,
            messages: Vec::new(),
            input: String::new(),
            sending: false,
            send_error: None,
            aggregate_unread: 0,
            sync: ConversationSync::new(),
            scroll_id: scrollable::Id::unique(),
        }
    }

    /// Switch the active conversation. The prior thread's messages, send
    /// error, and scroll memory are all discarded before the new history
    /// arrives.
    pub fn select_peer(&mut self, peer: PeerProfile) {
        self.active_peer = Some(peer);
        self.messages.clear();
        self.send_error = None;
        self.sync.reset();
    }

    /// A send is accepted only with non-blank text, an active conversation,
    /// and no send already in flight.
    pub fn accepts_send(&self, text: &str) -> bool {
        !text.trim().is_empty() && self.active_peer.is_some() && !self.sending
    }

    /// Replace the conversation list. Last response wins; no merging.
    pub fn apply_conversations(&mut self, list: Vec<ConversationSummary>) {
        self.conversations = list;
    }

    /// Replace the active thread with a freshly fetched history and decide
    /// the scroll action. Responses for a conversation that is no longer
    /// selected are dropped, keeping the rendered list tied to the active
    /// peer. Duplicate ids are filtered, first occurrence wins.
    pub fn apply_history(
        &mut self,
        peer_id: &str,
        history: Vec<ChatMessage>,
        now: Instant,
    ) -> ScrollAction {
        if self.active_peer.as_ref().map(|p| p.id.as_str()) != Some(peer_id) {
            return ScrollAction::None;
        }

        let mut seen = HashSet::new();
        let unique: Vec<ChatMessage> = history
            .into_iter()
            .filter(|m| seen.insert(m.id.clone()))
            .collect();

        let action = self
            .sync
            .reconcile(unique.iter().map(|m| m.id.as_str()), now);
        self.messages = unique;

        // Having the history locally clears this conversation's badge and
        // refreshes its preview; the backend recounts on the next list fetch.
        if let Some(last) = self.messages.last() {
            let preview = LastMessage {
                sender_id: last.sender_id().unwrap_or_default().to_string(),
                message: last.message.clone(),
                created_at: last.created_at,
            };
            for conversation in &mut self.conversations {
                if conversation.user.id == peer_id {
                    conversation.last_message = Some(preview);
                    conversation.unread_count = 0;
                    break;
                }
            }
        }

        action
    }

    /// Append the message the backend just persisted for us and force the
    /// next scroll. The reconcile here consumes the force flag, so the next
    /// poll returning the same history stays still.
    pub fn apply_sent(&mut self, message: ChatMessage, now: Instant) -> ScrollAction {
        self.sync.force_next_scroll();
        if !self.messages.iter().any(|m| m.id == message.id) {
            self.messages.push(message);
        }
        self.input.clear();
        self.send_error = None;
        self.sync
            .reconcile(self.messages.iter().map(|m| m.id.as_str()), now)
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use telemed_api_models::chat::MessageSender;
    use telemed_api_models::UserRole;

    fn peer(id: &str) -> PeerProfile {
        PeerProfile {
            id: id.to_string(),
            name: format!("Peer {id}"),
            role: UserRole::Doctor,
            specialization: None,
        }
    }

    fn message(id: &str, sender: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender: Some(MessageSender {
                id: sender.to_string(),
                name: sender.to_string(),
            }),
            message: format!("body of {id}"),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    fn summary(peer_id: &str, unread: u32) -> ConversationSummary {
        ConversationSummary {
            user: peer(peer_id),
            last_message: None,
            unread_count: unread,
        }
    }

    #[test]
    fn rendered_list_never_holds_duplicate_ids() {
        let mut chat = ChatState::new();
        chat.select_peer(peer("doc1"));
        let history = vec![message("m1", "doc1"), message("m2", "pat1"), message("m1", "doc1")];
        chat.apply_history("doc1", history, Instant::now());
        assert_eq!(chat.messages.len(), 2);

        // An optimistic append of an id the poll already delivered is a no-op.
        chat.apply_sent(message("m2", "pat1"), Instant::now());
        assert_eq!(chat.messages.len(), 2);
    }

    #[test]
    fn stale_response_for_previous_peer_is_dropped() {
        let mut chat = ChatState::new();
        chat.select_peer(peer("doc1"));
        chat.select_peer(peer("doc2"));
        let action = chat.apply_history("doc1", vec![message("m1", "doc1")], Instant::now());
        assert_eq!(action, ScrollAction::None);
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn switching_conversations_clears_thread_and_scroll_memory() {
        let mut chat = ChatState::new();
        chat.select_peer(peer("doc1"));
        chat.apply_history("doc1", vec![message("m1", "doc1")], Instant::now());
        chat.select_peer(peer("doc2"));
        assert!(chat.messages.is_empty());
        // doc2's first history must register as new messages again.
        let action = chat.apply_history("doc2", vec![message("m9", "doc2")], Instant::now());
        assert_eq!(action, ScrollAction::SnapToBottom);
    }

    #[test]
    fn fetching_history_zeroes_the_conversation_badge() {
        let mut chat = ChatState::new();
        chat.apply_conversations(vec![summary("doc1", 4), summary("doc2", 1)]);
        chat.select_peer(peer("doc1"));
        chat.apply_history("doc1", vec![message("m1", "doc1")], Instant::now());
        assert_eq!(chat.conversations[0].unread_count, 0);
        assert_eq!(chat.conversations[1].unread_count, 1);
        assert!(chat.conversations[0].last_message.is_some());
    }

    #[test]
    fn blank_input_or_missing_peer_rejects_send() {
        let mut chat = ChatState::new();
        assert!(!chat.accepts_send("hello"));
        chat.select_peer(peer("doc1"));
        assert!(!chat.accepts_send("   "));
        assert!(chat.accepts_send("hello"));
        chat.sending = true;
        assert!(!chat.accepts_send("hello"));
    }

    #[test]
    fn successful_send_forces_scroll_and_clears_input() {
        let mut chat = ChatState::new();
        chat.select_peer(peer("doc1"));
        chat.apply_history("doc1", vec![message("m1", "doc1")], Instant::now());
        chat.input = "thanks doctor".to_string();
        let action = chat.apply_sent(message("m2", "me"), Instant::now());
        assert_eq!(action, ScrollAction::SnapToBottom);
        assert!(chat.input.is_empty());
        // The poll that echoes the same history back must not scroll again.
        let action = chat.apply_history(
            "doc1",
            vec![message("m1", "doc1"), message("m2", "me")],
            Instant::now(),
        );
        assert_eq!(action, ScrollAction::None);
    }
}
