//! Command Protocol Handler.
//!
//! Classifies each inbound line by its sigil and runs the matching use case.
//! Every fault is absorbed here: a malformed line or an unknown id is logged
//! and dropped, and the connection keeps serving subsequent lines.

use irori_shared::protocol::{ClientLine, Command};

use crate::ui::state::AppState;

/// Handle one line received from a client
pub async fn handle_line(state: &AppState, line: &str) {
    let request = match ClientLine::parse(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Ignoring line: {}", e);
            return;
        }
    };

    match request {
        ClientLine::Registration { id, name } => {
            let _order = state.room_sequencer.lock().await;
            if let Err(e) = state.register_participant_usecase.execute(id, name).await {
                tracing::warn!("Registration of participant {} abandoned: {}", id, e);
            }
        }
        ClientLine::Command(command) => handle_command(state, command).await,
        ClientLine::Chat(chat) => {
            let _order = state.room_sequencer.lock().await;
            match state.send_message_usecase.execute(line, &chat).await {
                Ok(delivered) => tracing::debug!(
                    "Relayed chat line from {} to {} participants",
                    chat.sender,
                    delivered
                ),
                Err(e) => tracing::error!("{}", e),
            }
        }
    }
}

async fn handle_command(state: &AppState, command: Command) {
    let result = match &command {
        Command::Exit(id) => {
            if state
                .disconnect_participant_usecase
                .execute(*id)
                .await
                .is_none()
            {
                tracing::debug!("Exit for unknown participant {} ignored", id);
            }
            return;
        }
        Command::Help(id) => state.show_help_usecase.execute(*id).await,
        Command::Search { pattern, id } => state
            .search_transcript_usecase
            .execute(*id, pattern)
            .await
            .map(|found| tracing::debug!("Search '{}' by {} found {} lines", pattern, id, found)),
        Command::PrintReceiver(id) => state
            .print_receiver_usecase
            .execute(*id)
            .await
            .map(|_| ()),
        Command::Unknown(keyword) => {
            tracing::debug!("Unknown command '/{}' ignored", keyword);
            return;
        }
    };

    if let Err(e) = result {
        tracing::debug!("Command '{}' ignored: {}", command, e);
    }
}
