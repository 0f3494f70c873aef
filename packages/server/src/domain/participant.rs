use tokio::sync::mpsc;

use irori_shared::protocol::server_line::NO_MESSAGE_SENT;

use super::{ParticipantId, ValidationError};

/// Outbound path to one participant's socket
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 参加者の表示名（空文字・改行を含む名前は不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: String) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.contains(['\n', '\r']) {
            return Err(ValidationError::MultiLineName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One connected chat session
///
/// Created on accept without a name; the name is set by the registration line,
/// and `last_receivers` is recomputed every time the participant sends a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: Option<DisplayName>,
    pub last_receivers: String,
}

impl Participant {
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            name: None,
            last_receivers: NO_MESSAGE_SENT.to_string(),
        }
    }

    /// Whether the participant has completed registration
    pub fn is_registered(&self) -> bool {
        self.name.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name.as_ref().map(DisplayName::as_str)
    }
}

/// A participant taken out of the registry, together with its outbound channel.
///
/// Dropping it closes the channel.
#[derive(Debug)]
pub struct Departed {
    pub participant: Participant,
    pub channel: PusherChannel,
}
