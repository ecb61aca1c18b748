//! Interactive chat over the realtime channel.
//!
//! History is backfilled over HTTP first, then live traffic flows through
//! the shared WebSocket channel. Stdin lines become messages; `:q` quits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use moyeo_client::chat::{ChatEvent, ChatSession};
use moyeo_client::realtime::ChannelManager;
use moyeo_types::chat::ChatMessage;

use crate::cli::App;

const HISTORY_LIMIT: u32 = 100;

/// One completed step of the chat loop. select! arms only produce a
/// value here; acting on it happens after every pending borrow of the
/// session is released.
enum Turn {
    Event(Option<ChatEvent>),
    Line(Option<String>),
}

pub async fn run(app: &App, meeting_id: i64) -> Result<()> {
    let token = app.token()?;

    let room = app.api.chat_room(meeting_id).await?;
    let history = app.api.chat_messages(room.id, None, Some(HISTORY_LIMIT)).await?;

    let manager = ChannelManager::new(app.api.base_url())?;
    let mut session = ChatSession::open(&manager, token, room.id)?;
    for message in &history {
        print_message(message);
    }
    session.seed_history(history);

    println!("-- joined chat for meeting #{meeting_id} (:q to quit) --");

    let (lines_tx, mut lines_rx) = mpsc::unbounded_channel::<String>();
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if lines_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let turn = tokio::select! {
            event = session.next_event() => Turn::Event(event),
            line = lines_rx.recv() => Turn::Line(line),
        };
        match turn {
            Turn::Event(Some(ChatEvent::Message(message))) => print_message(&message),
            Turn::Event(Some(ChatEvent::Reconnecting)) => {
                eprintln!("-- connection lost, reconnecting --");
            }
            Turn::Event(Some(ChatEvent::Connected)) => eprintln!("-- reconnected --"),
            // channel gone for good
            Turn::Event(None) => break,
            Turn::Line(Some(line)) => {
                if line.trim() == ":q" {
                    break;
                }
                session.send(&line);
            }
            // stdin closed
            Turn::Line(None) => break,
        }
    }

    session.close();
    reader.abort();
    println!("-- left chat --");
    Ok(())
}

fn print_message(message: &ChatMessage) {
    println!(
        "[{}] {}: {}",
        message.created_at.format("%H:%M"),
        message.nickname,
        message.message,
    );
}
