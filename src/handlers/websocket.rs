use futures_util::sink::SinkExt;
use futures_util::stream::StreamExt;
use log::{debug, error, info};
use std::convert::Infallible;
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket, Ws};
use warp::{Filter, Rejection, Reply};

use crate::constants::{HEALTH_PATH, WS_PATH};
use crate::core::server::SharedGameServer;

// Handle a WebSocket connection
pub async fn handle_ws_client(ws: WebSocket, server: SharedGameServer) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let (tx, rx) = mpsc::unbounded_channel::<Message>();

    // Spawn a task to forward messages from our channel to the WebSocket
    tokio::task::spawn(async move {
        let mut rx = rx;
        while let Some(message) = rx.recv().await {
            if let Err(e) = ws_tx.send(message).await {
                debug!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    let mut session = server.open_session(tx);
    let connection_id = session.connection().id.clone();
    info!("Client connected: {}", connection_id);

    // Handle incoming messages in receipt order
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(frame) => {
                session.handle_frame(&frame);
                if session.is_closed() {
                    break;
                }
            }
            // The stream ends on its own after a fatal error; removal waits for that
            Err(e) => session.transport_error(&e),
        }
    }

    session.close();
    info!("Client disconnected: {}", connection_id);

    match server.player_count() {
        Ok(count) => debug!("Players online after disconnect: {}", count),
        Err(e) => error!("Failed to read player count: {}", e),
    }
}

// Helper function to include the server state in requests
fn with_server(
    server: SharedGameServer,
) -> impl Filter<Extract = (SharedGameServer,), Error = Infallible> + Clone {
    warp::any().map(move || server.clone())
}

/// WebSocket endpoint on `/` and `/ws`, plus a `/health` probe
pub fn routes(
    server: SharedGameServer,
    max_message_size: usize,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ws_route = warp::path::end()
        .or(warp::path(WS_PATH).and(warp::path::end()))
        .unify()
        .and(warp::ws())
        .and(with_server(server))
        .map(move |ws: Ws, server: SharedGameServer| {
            debug!("New websocket upgrade request");
            ws.max_message_size(max_message_size)
                .on_upgrade(move |socket| handle_ws_client(socket, server))
        });

    let health_route = warp::path(HEALTH_PATH)
        .and(warp::path::end())
        .map(|| "OK");

    ws_route.or(health_route)
}
