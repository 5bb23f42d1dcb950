use std::fmt;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::session::SessionHandle;
use rally_types::{ClientMessage, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub async fn handle_connection(websocket: WebSocket, handle: SessionHandle) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection: {}", connection_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let mut updates = handle.subscribe();
    let (direct_sender, mut direct_receiver) = mpsc::unbounded_channel::<ServerMessage>();

    // Late joiners get the live session rendered right away
    handle.send(ClientMessage::Refresh).await;

    // Handle incoming messages
    let incoming_handler = {
        let handle = handle.clone();
        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if let Err(e) =
                            handle_message(msg, &handle, &direct_sender, connection_id).await
                        {
                            error!("Error handling message for {}: {}", connection_id, e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    };

    // Handle outgoing messages, both session fan-out and direct replies
    let outgoing_handler = {
        async move {
            loop {
                let message = tokio::select! {
                    update = updates.recv() => match update {
                        Ok(message) => message,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Connection {} lagged, skipped {} updates", connection_id, skipped);
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    },
                    direct = direct_receiver.recv() => match direct {
                        Some(message) => message,
                        None => break,
                    },
                };

                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize message: {:?}", e);
                        continue;
                    }
                };

                if let Err(e) = ws_sender.send(Message::text(json)).await {
                    warn!("Failed to send message to {}: {:?}", connection_id, e);
                    break;
                }
            }
        }
    };

    // Run both handlers concurrently
    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!("Connection {} disconnected", connection_id);
}

async fn handle_message(
    msg: Message,
    handle: &SessionHandle,
    direct: &mpsc::UnboundedSender<ServerMessage>,
    connection_id: ConnectionId,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Only handle text frames; warp answers pings on its own
    if !msg.is_text() {
        return Ok(());
    }

    let text = msg.to_str().map_err(|_| "Invalid text message")?;

    match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_message) => {
            debug!("Connection {} sent {:?}", connection_id, client_message);
            handle.send(client_message).await;
        }
        Err(e) => {
            // Malformed input only concerns the console that sent it
            debug!("Invalid JSON from {}: {}", connection_id, e);
            let _ = direct.send(ServerMessage::Error {
                message: "Invalid message format".to_string(),
            });
        }
    }

    Ok(())
}
