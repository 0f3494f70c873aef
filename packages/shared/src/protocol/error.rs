use thiserror::Error;

/// Reasons an inbound line could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty line")]
    EmptyLine,

    #[error("invalid participant id '{0}'")]
    InvalidId(String),

    #[error("malformed registration line '{0}'")]
    MalformedRegistration(String),

    #[error("malformed search command '{0}'")]
    MalformedSearch(String),

    #[error("malformed chat line '{0}'")]
    MalformedChatLine(String),
}
