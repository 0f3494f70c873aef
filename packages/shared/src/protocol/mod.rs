//! Line-oriented wire protocol.
//!
//! Every message is one line of UTF-8 text. Client lines are classified by
//! their leading sigil:
//!
//! ```text
//! @<id>@<name>                                      registration
//! /exit<id> | /help<id> | /printReceiver<id>        command
//! /search(<pattern>)<id>                            transcript search
//! YYYY-MM-DD HH:MM:SS [<id>]<name> : <body>         chat line
//! ```
//!
//! Server lines are rendered by the helpers in [`server_line`].

mod chat_line;
mod client_line;
mod error;
mod participant_id;
pub mod server_line;

pub use chat_line::ChatLine;
pub use client_line::{ClientLine, Command};
pub use error::ProtocolError;
pub use participant_id::ParticipantId;
