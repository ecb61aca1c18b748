//! Chat HTTP endpoints: room lookup, message backfill, fallback send.
//!
//! Live traffic goes over the realtime channel; these endpoints cover the
//! initial page load and non-realtime consumers.

use anyhow::Result;

use moyeo_types::chat::{ChatMessage, ChatRoom, SendMessageRequest};

use super::Api;

impl Api {
    /// Looks up the chat room associated with a meeting (1:1).
    pub async fn chat_room(&self, meeting_id: i64) -> Result<ChatRoom> {
        self.expect_data(self.get(&format!("/chat/meeting/{meeting_id}")))
            .await
    }

    /// Fetches past messages for a room, oldest first.
    pub async fn chat_messages(
        &self,
        room_id: i64,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Vec<ChatMessage>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.expect_data(
            self.get(&format!("/chat/room/{room_id}/messages"))
                .query(&params),
        )
        .await
    }

    /// Sends a message over HTTP; returns the stored message.
    pub async fn send_chat_message(&self, room_id: i64, message: &str) -> Result<ChatMessage> {
        self.post_json(
            &format!("/chat/room/{room_id}/messages"),
            &SendMessageRequest {
                message: message.to_string(),
            },
        )
        .await
    }
}
