//! Chat rooms and messages. Each meeting has exactly one room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: i64,
    pub meeting_id: i64,
}

/// A chat message. Id is server-assigned; messages are immutable and
/// ordered by arrival within a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub nickname: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// `POST /chat/room/:id/messages` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}
