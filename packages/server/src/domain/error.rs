use std::path::PathBuf;

use thiserror::Error;

use super::ParticipantId;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("display name must not be empty")]
    EmptyName,

    #[error("display name must fit on a single line")]
    MultiLineName,
}

/// Session registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error("participant id {0} is already in use")]
    DuplicateId(ParticipantId),

    #[error("no free participant id at or above {0}")]
    IdsExhausted(ParticipantId),

    #[error("outbound channel of participant {0} is closed")]
    ChannelClosed(ParticipantId),
}

/// Transcript persistence errors
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript I/O failed on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
