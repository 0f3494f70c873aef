//! ドメイン層
//!
//! 参加者（Participant）とその値オブジェクト、および UseCase 層が依存する
//! データアクセスのインターフェース（trait）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

mod error;
mod participant;
mod registry;
mod transcript;

pub use error::{RegistryError, TranscriptError, ValidationError};
pub use irori_shared::protocol::ParticipantId;
pub use participant::{Departed, DisplayName, Participant, PusherChannel};
pub use registry::ParticipantRegistry;
#[cfg(test)]
pub use transcript::MockTranscriptStore;
pub use transcript::TranscriptStore;
