//! TCP client session.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use crate::{
    error::ClientError,
    input::{InputTranslator, Outcome},
    ui::{PROMPT, print_line},
};

/// Connect to the server and run until it closes the connection or input ends
pub async fn run_client(host: &str, port: u16) -> Result<(), ClientError> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connect {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Connected to chat server at {}", addr);

    let (reader, writer) = stream.into_split();
    let mut lines = FramedRead::new(reader, LinesCodec::new());
    let mut sink = FramedWrite::new(writer, LinesCodec::new());

    let mut input_rx = spawn_readline();
    let mut translator = InputTranslator::default();

    loop {
        tokio::select! {
            received = lines.next() => match received {
                Some(Ok(line)) => {
                    translator.observe_server_line(&line);
                    print_line(&line);
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    tracing::info!("Server closed the connection");
                    break;
                }
            },
            input = input_rx.recv() => match input {
                Some(input) => match translator.translate(&input) {
                    Outcome::Send(line) => sink.send(line).await?,
                    Outcome::Local(message) => print_line(message),
                },
                // stdin closed; leave the room politely
                None => {
                    if let Some(id) = translator.id() {
                        sink.send(format!("/exit{}", id)).await?;
                    }
                    break;
                }
            },
        }
    }

    Ok(())
}

/// Reads stdin on a blocking thread, since rustyline is synchronous
fn spawn_readline() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if input_tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
