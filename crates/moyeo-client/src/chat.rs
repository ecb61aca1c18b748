//! Chat session: the consuming side of the realtime channel.
//!
//! One session per open chat screen. `open` acquires the shared channel
//! and joins the meeting's room; `close` leaves the room and releases the
//! channel — which tears the shared connection down entirely, so at most
//! one session should be open at a time.

use tokio::sync::broadcast;

use moyeo_types::chat::ChatMessage;

use crate::realtime::{ChannelEvent, ChannelHandle, ChannelManager};

/// Events surfaced to the chat front end.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A message arrived and was appended to the local sequence.
    Message(ChatMessage),
    /// The transport dropped; automatic reconnection is in progress.
    Reconnecting,
    /// The transport is back up.
    Connected,
}

pub struct ChatSession<'a> {
    manager: &'a ChannelManager,
    handle: ChannelHandle,
    events: broadcast::Receiver<ChannelEvent>,
    room_id: i64,
    messages: Vec<ChatMessage>,
    reconnecting: bool,
}

impl<'a> ChatSession<'a> {
    /// Acquires the channel (connecting if needed), subscribes to inbound
    /// events, and joins `room_id`.
    pub fn open(manager: &'a ChannelManager, token: &str, room_id: i64) -> anyhow::Result<Self> {
        let handle = manager.connect(token)?;
        let events = handle.subscribe();
        handle.join_room(room_id);
        Ok(Self {
            manager,
            handle,
            events,
            room_id,
            messages: Vec::new(),
            reconnecting: false,
        })
    }

    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Messages seen so far, in arrival order (seeded history first).
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_reconnecting(&self) -> bool {
        self.reconnecting
    }

    /// Seeds the local sequence with history loaded over HTTP. Intended to
    /// run once, before the first realtime event is consumed.
    pub fn seed_history(&mut self, history: Vec<ChatMessage>) {
        self.messages.splice(0..0, history);
    }

    /// Waits for the next chat event. Returns `None` once the channel is
    /// gone for good (disconnected and dropped).
    pub async fn next_event(&mut self) -> Option<ChatEvent> {
        loop {
            match self.events.recv().await {
                Ok(ChannelEvent::NewMessage(message)) => {
                    self.messages.push(message.clone());
                    return Some(ChatEvent::Message(message));
                }
                Ok(ChannelEvent::ConnectError { reason }) => {
                    tracing::debug!(%reason, "chat session lost transport");
                    self.reconnecting = true;
                    return Some(ChatEvent::Reconnecting);
                }
                Ok(ChannelEvent::Connected) => {
                    // Only report recoveries; the initial Connected is
                    // implicit in a successfully opened session.
                    if self.reconnecting {
                        self.reconnecting = false;
                        return Some(ChatEvent::Connected);
                    }
                }
                // Dropped events only mean we fell behind the fanout
                // buffer; resume with whatever is next.
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Sends a message. The body is trimmed; empty input is dropped. Does
    /// not wait for acknowledgment — the echo arrives as an inbound
    /// message, or not at all on failure.
    pub fn send(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.handle.send_message(self.room_id, trimmed);
    }

    /// Leaves the room and releases the channel, tearing down the shared
    /// connection.
    pub fn close(self) {
        self.handle.leave_room(self.room_id);
        self.manager.disconnect();
    }
}
