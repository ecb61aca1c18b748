//! Realtime channel tests against an in-process WebSocket server.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use moyeo_client::chat::{ChatEvent, ChatSession};
use moyeo_client::realtime::{ChannelEvent, ChannelManager};

const WAIT: Duration = Duration::from_secs(5);

struct TestServer {
    base_url: String,
    listener: TcpListener,
}

impl TestServer {
    async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        Self {
            base_url: format!("http://{addr}"),
            listener,
        }
    }

    async fn accept(&self) -> WebSocketStream<TcpStream> {
        let (stream, _) = timeout(WAIT, self.listener.accept()).await.unwrap().unwrap();
        tokio_tungstenite::accept_async(stream).await.unwrap()
    }
}

/// Reads frames until a text frame arrives, returning it as JSON.
async fn next_json(ws: &mut WebSocketStream<TcpStream>) -> serde_json::Value {
    loop {
        let message = timeout(WAIT, ws.next()).await.unwrap().unwrap().unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

fn new_message_frame(id: i64, room_id: i64, body: &str) -> Message {
    Message::text(
        json!({
            "event": "new_message",
            "data": {
                "id": id,
                "roomId": room_id,
                "senderId": 5,
                "nickname": "younghee",
                "message": body,
                "createdAt": "2025-03-01T12:00:00Z"
            }
        })
        .to_string(),
    )
}

/// Full chat-screen lifecycle: join on open, append on new_message,
/// leave then tear down on close.
#[tokio::test]
async fn test_chat_session_join_receive_leave() {
    let server = TestServer::bind().await;
    let manager = ChannelManager::new(&server.base_url).unwrap();

    let (frames_tx, mut frames_rx) = mpsc::unbounded_channel();
    let server_task = tokio::spawn(async move {
        let mut ws = server.accept().await;

        let join = next_json(&mut ws).await;
        frames_tx.send(join).unwrap();

        ws.send(new_message_frame(7, 42, "곧 도착해요")).await.unwrap();

        let leave = next_json(&mut ws).await;
        frames_tx.send(leave).unwrap();
    });

    let mut session = ChatSession::open(&manager, "jwt-abc", 42).unwrap();

    let join = timeout(WAIT, frames_rx.recv()).await.unwrap().unwrap();
    assert_eq!(join["event"], "join_room");
    assert_eq!(join["data"]["roomId"], 42);

    let event = timeout(WAIT, session.next_event()).await.unwrap().unwrap();
    let ChatEvent::Message(message) = event else {
        panic!("expected a message event, got {event:?}");
    };
    assert_eq!(message.message, "곧 도착해요");
    assert_eq!(session.messages().len(), 1);

    session.close();

    let leave = timeout(WAIT, frames_rx.recv()).await.unwrap().unwrap();
    assert_eq!(leave["event"], "leave_room");
    assert_eq!(leave["data"]["roomId"], 42);

    // close released the shared connection entirely
    assert!(manager.get().is_none());

    server_task.await.unwrap();
}

/// Opening a session emits join_room exactly once; the frame that
/// follows is the session's own traffic, not a repeated join.
#[tokio::test]
async fn test_open_emits_single_join() {
    let server = TestServer::bind().await;
    let manager = ChannelManager::new(&server.base_url).unwrap();

    let (frames_tx, mut frames_rx) = mpsc::unbounded_channel();
    let server_task = tokio::spawn(async move {
        let mut ws = server.accept().await;
        for _ in 0..2 {
            let frame = next_json(&mut ws).await;
            frames_tx.send(frame).unwrap();
        }
    });

    let session = ChatSession::open(&manager, "jwt-abc", 42).unwrap();
    session.send("반갑습니다");

    let first = timeout(WAIT, frames_rx.recv()).await.unwrap().unwrap();
    assert_eq!(first["event"], "join_room");
    assert_eq!(first["data"]["roomId"], 42);

    let second = timeout(WAIT, frames_rx.recv()).await.unwrap().unwrap();
    assert_eq!(second["event"], "send_message");
    assert_eq!(second["data"]["message"], "반갑습니다");

    server_task.await.unwrap();
    session.close();
}

/// History seeded over HTTP precedes realtime arrivals.
#[tokio::test]
async fn test_seeded_history_precedes_live_messages() {
    let server = TestServer::bind().await;
    let manager = ChannelManager::new(&server.base_url).unwrap();

    let server_task = tokio::spawn(async move {
        let mut ws = server.accept().await;
        let _join = next_json(&mut ws).await;
        ws.send(new_message_frame(3, 42, "live")).await.unwrap();
        let _leave = next_json(&mut ws).await;
    });

    let mut session = ChatSession::open(&manager, "jwt-abc", 42).unwrap();
    session.seed_history(vec![
        moyeo_types::chat::ChatMessage {
            id: 1,
            room_id: 42,
            sender_id: 3,
            nickname: "cheolsu".to_string(),
            message: "history".to_string(),
            created_at: "2025-03-01T11:00:00Z".parse().unwrap(),
        },
    ]);

    let _ = timeout(WAIT, session.next_event()).await.unwrap().unwrap();
    let bodies: Vec<&str> = session.messages().iter().map(|m| m.message.as_str()).collect();
    assert_eq!(bodies, vec!["history", "live"]);

    session.close();
    server_task.await.unwrap();
}

/// connect is idempotent while live: no second socket is opened.
#[tokio::test]
async fn test_connect_twice_reuses_connection() {
    let server = TestServer::bind().await;
    let manager = ChannelManager::new(&server.base_url).unwrap();

    let first = manager.connect("jwt-abc").unwrap();
    let mut events = first.subscribe();
    let _ws = server.accept().await;

    // wait until the handshake completed
    loop {
        match timeout(WAIT, events.recv()).await.unwrap().unwrap() {
            ChannelEvent::Connected => break,
            _ => {}
        }
    }
    assert!(first.is_connected());

    let second = manager.connect("jwt-abc").unwrap();
    assert!(second.is_connected());

    // no second connection arrives at the listener
    let extra = timeout(Duration::from_millis(300), server.listener.accept()).await;
    assert!(extra.is_err(), "a duplicate socket was opened");

    manager.disconnect();
    assert!(manager.get().is_none());
}

/// disconnect with no live connection is a no-op; get never creates.
#[tokio::test]
async fn test_disconnect_when_absent_is_noop() {
    let manager = ChannelManager::new("http://127.0.0.1:9").unwrap();
    assert!(manager.get().is_none());
    manager.disconnect();
    assert!(manager.get().is_none());
}

/// A dropped transport surfaces Reconnecting, then the channel re-joins
/// the room on its own once the server is reachable again.
#[tokio::test]
async fn test_reconnect_rejoins_room() {
    let server = TestServer::bind().await;
    let manager = ChannelManager::new(&server.base_url).unwrap();

    let mut session = ChatSession::open(&manager, "jwt-abc", 42).unwrap();

    // first connection: consume the join, then drop the transport
    {
        let mut ws = server.accept().await;
        let join = next_json(&mut ws).await;
        assert_eq!(join["event"], "join_room");
        ws.close(None).await.unwrap();
    }

    let event = timeout(WAIT, session.next_event()).await.unwrap().unwrap();
    assert!(matches!(event, ChatEvent::Reconnecting));
    assert!(session.is_reconnecting());

    // the channel reconnects (1s backoff) and re-emits join_room unprompted
    let mut ws = server.accept().await;
    let rejoin = next_json(&mut ws).await;
    assert_eq!(rejoin["event"], "join_room");
    assert_eq!(rejoin["data"]["roomId"], 42);

    let event = timeout(WAIT, session.next_event()).await.unwrap().unwrap();
    assert!(matches!(event, ChatEvent::Connected));
    assert!(!session.is_reconnecting());

    session.close();
}
