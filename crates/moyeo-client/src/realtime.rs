//! Realtime channel manager.
//!
//! Owns at most one live WebSocket connection to the messaging server and
//! hands out cloneable handles to it. `connect` is idempotent while the
//! connection is live; `disconnect` tears the connection down for every
//! holder of a handle — the intended consumer is a single chat session at
//! a time (see `ChatSession`).
//!
//! Frames are JSON text in the shape `{"event": <name>, "data": <payload>}`.
//! Client-to-server events: `join_room`, `leave_room`, `send_message`.
//! Server-to-client: `new_message`. Transport-level connect/disconnect/
//! error conditions surface as [`ChannelEvent`]s, not errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use url::Url;

use moyeo_types::chat::ChatMessage;

/// Handshake deadline for one connection attempt.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Automatic reconnection budget after a drop.
const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);
const RECONNECT_DELAY_MAX: Duration = Duration::from_secs(5);
/// Inbound event fanout buffer; slow consumers see `Lagged`, not backpressure.
const EVENT_BUFFER: usize = 256;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Inbound events observed on a channel handle.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// Transport handshake succeeded (initial connect or reconnect).
    Connected,
    /// A chat message arrived.
    NewMessage(ChatMessage),
    /// The transport dropped or a connection attempt failed; automatic
    /// reconnection continues until the budget is exhausted.
    ConnectError { reason: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomRef {
    room_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundMessage {
    room_id: i64,
    message: String,
}

/// Client-to-server frame.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum ClientFrame {
    JoinRoom(RoomRef),
    LeaveRoom(RoomRef),
    SendMessage(OutboundMessage),
}

/// Wire form of an inbound `new_message` payload (camelCase on the socket,
/// unlike the snake_case HTTP representation).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    id: i64,
    room_id: i64,
    sender_id: i64,
    nickname: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<WireMessage> for ChatMessage {
    fn from(wire: WireMessage) -> Self {
        ChatMessage {
            id: wire.id,
            room_id: wire.room_id,
            sender_id: wire.sender_id,
            nickname: wire.nickname,
            message: wire.message,
            created_at: wire.created_at,
        }
    }
}

/// Raw server-to-client frame; the event name selects the payload shape.
#[derive(Debug, Deserialize)]
struct RawServerFrame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug)]
enum ServerFrame {
    NewMessage(WireMessage),
    /// Events this client does not consume are skipped, not errors.
    Unknown,
}

fn parse_server_frame(text: &str) -> Result<ServerFrame> {
    let raw: RawServerFrame = serde_json::from_str(text).context("malformed frame")?;
    match raw.event.as_str() {
        "new_message" => {
            let wire: WireMessage =
                serde_json::from_value(raw.data).context("malformed new_message payload")?;
            Ok(ServerFrame::NewMessage(wire))
        }
        _ => Ok(ServerFrame::Unknown),
    }
}

/// Cloneable handle to the live channel.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    events: broadcast::Sender<ChannelEvent>,
    outbound: mpsc::UnboundedSender<ClientFrame>,
    connected: Arc<AtomicBool>,
    room: Arc<Mutex<Option<i64>>>,
    cancel: CancellationToken,
}

impl ChannelHandle {
    /// Subscribes to inbound channel events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelEvent> {
        self.events.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Current room membership (0 or 1 room).
    pub fn room(&self) -> Option<i64> {
        *self.room.lock().expect("room lock poisoned")
    }

    /// Emits `join_room` and records the membership so it is re-emitted
    /// after an automatic reconnect. Joining a new room without leaving
    /// the previous one is not guarded here.
    pub fn join_room(&self, room_id: i64) {
        *self.room.lock().expect("room lock poisoned") = Some(room_id);
        self.emit(ClientFrame::JoinRoom(RoomRef { room_id }));
    }

    /// Emits `leave_room` and clears the recorded membership.
    pub fn leave_room(&self, room_id: i64) {
        let mut room = self.room.lock().expect("room lock poisoned");
        if *room == Some(room_id) {
            *room = None;
        }
        drop(room);
        self.emit(ClientFrame::LeaveRoom(RoomRef { room_id }));
    }

    /// Emits `send_message`. Fire-and-forget: delivery confirmation is the
    /// inbound echo, or nothing at all on failure.
    pub fn send_message(&self, room_id: i64, message: impl Into<String>) {
        self.emit(ClientFrame::SendMessage(OutboundMessage {
            room_id,
            message: message.into(),
        }));
    }

    fn emit(&self, frame: ClientFrame) {
        // Queued frames are flushed once the transport is up; after the
        // reconnect budget is exhausted the channel is inert and frames
        // are silently dropped, matching the absent failed-terminal state.
        let _ = self.outbound.send(frame);
    }

    fn shutdown(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.cancel.cancel();
    }
}

/// Owns the single shared connection. Construct once per app context and
/// inject into consumers; the last `connect`/`disconnect` wins, so two
/// overlapping consumers would tear down each other's connection.
#[derive(Debug)]
pub struct ChannelManager {
    ws_url: String,
    current: Mutex<Option<ChannelHandle>>,
}

impl ChannelManager {
    /// Builds a manager for the service at `base_url` (http/https; the
    /// realtime endpoint is `<base>/ws` over ws/wss).
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            ws_url: websocket_url(base_url)?,
            current: Mutex::new(None),
        })
    }

    /// Returns the live handle if one exists; otherwise establishes a new
    /// connection authenticated with `token`. A handle that is no longer
    /// connected (mid-retry or inert) is torn down and replaced, so the
    /// caller always gets a connection that is at least being attempted.
    pub fn connect(&self, token: &str) -> Result<ChannelHandle> {
        let mut current = self.current.lock().expect("channel lock poisoned");
        if let Some(handle) = current.as_ref() {
            if handle.is_connected() {
                return Ok(handle.clone());
            }
            handle.shutdown();
            *current = None;
        }

        let handle = self.spawn_channel(token)?;
        *current = Some(handle.clone());
        Ok(handle)
    }

    /// Returns the current handle without ever creating one.
    pub fn get(&self) -> Option<ChannelHandle> {
        self.current
            .lock()
            .expect("channel lock poisoned")
            .clone()
    }

    /// Tears down the connection, if any, and clears the stored handle.
    /// Safe to call when none exists.
    pub fn disconnect(&self) {
        let mut current = self.current.lock().expect("channel lock poisoned");
        if let Some(handle) = current.take() {
            handle.shutdown();
            tracing::debug!("realtime channel disconnected");
        }
    }

    fn spawn_channel(&self, token: &str) -> Result<ChannelHandle> {
        // Fail fast on an unusable URL instead of inside the task.
        let _ = Url::parse(&self.ws_url).context("invalid realtime URL")?;

        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let handle = ChannelHandle {
            events: events.clone(),
            outbound,
            connected: Arc::new(AtomicBool::new(false)),
            room: Arc::new(Mutex::new(None)),
            cancel: CancellationToken::new(),
        };

        tokio::spawn(run_channel(
            self.ws_url.clone(),
            token.to_string(),
            events,
            outbound_rx,
            Arc::clone(&handle.connected),
            Arc::clone(&handle.room),
            handle.cancel.clone(),
        ));

        Ok(handle)
    }
}

/// Derives the realtime endpoint from the service base URL.
fn websocket_url(base_url: &str) -> Result<String> {
    let mut url = Url::parse(base_url.trim_end_matches('/')).context("invalid base URL")?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => anyhow::bail!("unsupported scheme '{other}' for realtime URL"),
    };
    url.set_scheme(scheme)
        .ok()
        .context("failed to derive websocket scheme")?;
    url.set_path("/ws");
    Ok(url.to_string())
}

fn build_request(
    url: &str,
    token: &str,
) -> Result<tokio_tungstenite::tungstenite::handshake::client::Request> {
    let mut request = url.into_client_request().context("invalid realtime URL")?;
    request.headers_mut().insert(
        AUTHORIZATION,
        format!("Bearer {token}")
            .parse()
            .context("credential is not a valid header value")?,
    );
    Ok(request)
}

/// Connection task: handshake, drive the transport, reconnect with capped
/// backoff until the budget runs out or the handle is shut down.
async fn run_channel(
    url: String,
    token: String,
    events: broadcast::Sender<ChannelEvent>,
    mut outbound_rx: mpsc::UnboundedReceiver<ClientFrame>,
    connected: Arc<AtomicBool>,
    room: Arc<Mutex<Option<i64>>>,
    cancel: CancellationToken,
) {
    let mut attempts: u32 = 0;
    let mut delay = RECONNECT_DELAY;
    let mut resumed = false;

    loop {
        let request = match build_request(&url, &token) {
            Ok(request) => request,
            Err(err) => {
                let _ = events.send(ChannelEvent::ConnectError {
                    reason: err.to_string(),
                });
                return;
            }
        };

        let attempt = tokio::select! {
            () = cancel.cancelled() => return,
            result = timeout(HANDSHAKE_TIMEOUT, connect_async(request)) => result,
        };

        match attempt {
            Ok(Ok((ws, _response))) => {
                connected.store(true, Ordering::SeqCst);
                attempts = 0;
                delay = RECONNECT_DELAY;
                tracing::debug!(%url, "realtime channel connected");
                let _ = events.send(ChannelEvent::Connected);

                let rejoin = resumed;
                resumed = true;
                let reason = drive(ws, &events, &mut outbound_rx, &room, &cancel, rejoin).await;
                connected.store(false, Ordering::SeqCst);
                if cancel.is_cancelled() {
                    return;
                }
                tracing::debug!(%reason, "realtime channel dropped");
                let _ = events.send(ChannelEvent::ConnectError { reason });
            }
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "realtime handshake failed");
                let _ = events.send(ChannelEvent::ConnectError {
                    reason: err.to_string(),
                });
            }
            Err(_) => {
                let _ = events.send(ChannelEvent::ConnectError {
                    reason: "handshake timed out".to_string(),
                });
            }
        }

        attempts += 1;
        if attempts > MAX_RECONNECT_ATTEMPTS {
            // Budget exhausted: leave the channel inert until the consumer
            // issues a fresh connect.
            tracing::warn!(%url, "realtime reconnect budget exhausted");
            return;
        }

        tokio::select! {
            () = cancel.cancelled() => return,
            () = sleep(delay) => {}
        }
        delay = (delay * 2).min(RECONNECT_DELAY_MAX);
    }
}

/// Pumps one live connection. `rejoin` is set for reconnects, where room
/// membership must be re-established; on the first connection the join
/// frame is already waiting in the outbound queue. Returns the drop reason.
async fn drive(
    ws: WsStream,
    events: &broadcast::Sender<ChannelEvent>,
    outbound_rx: &mut mpsc::UnboundedReceiver<ClientFrame>,
    room: &Arc<Mutex<Option<i64>>>,
    cancel: &CancellationToken,
    rejoin: bool,
) -> String {
    let (mut sink, mut stream) = ws.split();

    if rejoin {
        let membership = *room.lock().expect("room lock poisoned");
        if let Some(room_id) = membership {
            let frame = ClientFrame::JoinRoom(RoomRef { room_id });
            if let Err(err) = send_frame(&mut sink, &frame).await {
                return err.to_string();
            }
        }
    }

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                // Flush frames queued just before teardown (leave_room is
                // emitted right before disconnect), then close cleanly.
                while let Ok(frame) = outbound_rx.try_recv() {
                    if send_frame(&mut sink, &frame).await.is_err() {
                        break;
                    }
                }
                let _ = sink.send(Message::Close(None)).await;
                return "closed by client".to_string();
            }
            frame = outbound_rx.recv() => {
                let Some(frame) = frame else {
                    return "outbound queue closed".to_string();
                };
                if let Err(err) = send_frame(&mut sink, &frame).await {
                    return err.to_string();
                }
            }
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    match parse_server_frame(text.as_str()) {
                        Ok(ServerFrame::NewMessage(wire)) => {
                            let _ = events.send(ChannelEvent::NewMessage(wire.into()));
                        }
                        Ok(ServerFrame::Unknown) => {}
                        Err(err) => {
                            tracing::debug!(error = %err, "unparseable realtime frame");
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    return "connection closed".to_string();
                }
                Some(Ok(_)) => {} // ping/pong/binary
                Some(Err(err)) => return err.to_string(),
            }
        }
    }
}

async fn send_frame(
    sink: &mut futures_util::stream::SplitSink<WsStream, Message>,
    frame: &ClientFrame,
) -> Result<()> {
    let json = serde_json::to_string(frame).context("serialize frame")?;
    sink.send(Message::text(json)).await.context("send frame")
}
