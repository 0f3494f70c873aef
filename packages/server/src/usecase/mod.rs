//! UseCase 層
//!
//! プロトコルの各操作（接続・登録・発言・退出・問い合わせ）を 1 つずつ
//! ユースケースとして実装します。Domain 層の trait にのみ依存します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_participants;
mod print_receiver;
mod register_participant;
mod search_transcript;
mod send_message;
mod show_help;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, QueryError, RegisterError, SendMessageError};
pub use get_participants::GetParticipantsUseCase;
pub use print_receiver::PrintReceiverUseCase;
pub use register_participant::RegisterParticipantUseCase;
pub use search_transcript::SearchTranscriptUseCase;
pub use send_message::SendMessageUseCase;
pub use show_help::ShowHelpUseCase;
