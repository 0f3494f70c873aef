//! Per-connection lifecycle: join sequence, receive loop and outbound pusher.

use std::{net::SocketAddr, sync::Arc};

use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use crate::{domain::ParticipantId, ui::state::AppState};

use super::{codec::InboundLineCodec, command::handle_line};

/// Longest inbound line; longer lines are skipped
const MAX_LINE_LENGTH: usize = 8 * 1024;

/// Run the join sequence for a freshly accepted connection, then hand it to
/// its own task.
///
/// The join sequence completes before the client's first line is read.
pub async fn open_session(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    // Create a channel for this participant to receive lines
    let (tx, rx) = mpsc::unbounded_channel();

    let id = match state.connect_participant_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Failed to open session for {}: {}", peer_addr, e);
            return;
        }
    };
    tracing::info!("Client {} connected as participant {}", peer_addr, id);

    tokio::spawn(handle_connection(stream, id, rx, state));
}

async fn handle_connection(
    stream: TcpStream,
    id: ParticipantId,
    rx: mpsc::UnboundedReceiver<String>,
    state: Arc<AppState>,
) {
    let (reader, writer) = stream.into_split();
    let lines = FramedRead::new(reader, InboundLineCodec::new(MAX_LINE_LENGTH));
    let sink = FramedWrite::new(writer, LinesCodec::new());

    let mut send_task = pusher_loop(rx, sink, id);
    let mut recv_task = tokio::spawn(receive_loop(lines, id, state.clone()));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // no-op if `/exit` already removed the participant
    if state
        .disconnect_participant_usecase
        .execute(id)
        .await
        .is_some()
    {
        tracing::info!("Participant {} disconnected without /exit", id);
    }
    tracing::debug!("Connection of participant {} closed", id);
}

/// Reads lines one at a time and dispatches them in arrival order.
async fn receive_loop(
    mut lines: FramedRead<OwnedReadHalf, InboundLineCodec>,
    id: ParticipantId,
    state: Arc<AppState>,
) {
    while let Some(line) = lines.next().await {
        match line {
            Ok(line) => {
                tracing::debug!("Received from {}: {}", id, line);
                handle_line(&state, &line).await;
            }
            Err(e) => {
                tracing::warn!("Failed to read from participant {}: {}", id, e);
                break;
            }
        }
    }
}

/// Spawns a task that drains the participant's channel into its socket.
///
/// The task ends when the registry drops the sender (participant removed) or
/// when a write fails. Dropping the sink closes the write side of the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sink: FramedWrite<OwnedWriteHalf, LinesCodec>,
    id: ParticipantId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = sink.send(line).await {
                tracing::warn!("Failed to write to participant {}: {}", id, e);
                break;
            }
        }
    })
}
