use std::fmt;

use super::{ChatLine, ParticipantId, ProtocolError};

const REGISTRATION_SIGIL: char = '@';
const COMMAND_SIGIL: char = '/';

/// An in-band command, addressed by the id of the participant issuing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit(ParticipantId),
    Help(ParticipantId),
    Search { pattern: String, id: ParticipantId },
    PrintReceiver(ParticipantId),
    /// Any keyword the server does not implement
    Unknown(String),
}

impl Command {
    /// Parse the text following the `/` sigil.
    ///
    /// Keywords are matched by prefix in a fixed order, and the id follows the
    /// keyword with no separator.
    fn parse(text: &str) -> Result<Self, ProtocolError> {
        if let Some(id) = text.strip_prefix("exit") {
            return Ok(Self::Exit(id.parse()?));
        }
        if let Some(rest) = text.strip_prefix("search") {
            return Self::parse_search(rest, text);
        }
        if let Some(id) = text.strip_prefix("help") {
            return Ok(Self::Help(id.parse()?));
        }
        if let Some(id) = text.strip_prefix("printReceiver") {
            return Ok(Self::PrintReceiver(id.parse()?));
        }

        let keyword = text
            .split(|c: char| c.is_ascii_digit() || c == '(')
            .next()
            .unwrap_or_default();
        Ok(Self::Unknown(keyword.to_string()))
    }

    /// `(<pattern>)<id>`; the pattern runs to the last `)` so it may contain parentheses.
    fn parse_search(rest: &str, text: &str) -> Result<Self, ProtocolError> {
        let malformed = || ProtocolError::MalformedSearch(format!("{COMMAND_SIGIL}{text}"));

        let inner = rest.strip_prefix('(').ok_or_else(malformed)?;
        let close = inner.rfind(')').ok_or_else(malformed)?;
        let pattern = &inner[..close];
        let id = inner[close + 1..].parse()?;

        Ok(Self::Search {
            pattern: pattern.to_string(),
            id,
        })
    }

    /// The participant issuing the command, if the keyword is known
    pub fn issuer(&self) -> Option<ParticipantId> {
        match self {
            Self::Exit(id) | Self::Help(id) | Self::PrintReceiver(id) => Some(*id),
            Self::Search { id, .. } => Some(*id),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit(id) => write!(f, "{COMMAND_SIGIL}exit{id}"),
            Self::Help(id) => write!(f, "{COMMAND_SIGIL}help{id}"),
            Self::Search { pattern, id } => write!(f, "{COMMAND_SIGIL}search({pattern}){id}"),
            Self::PrintReceiver(id) => write!(f, "{COMMAND_SIGIL}printReceiver{id}"),
            Self::Unknown(keyword) => write!(f, "{COMMAND_SIGIL}{keyword}"),
        }
    }
}

/// One line sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientLine {
    Registration { id: ParticipantId, name: String },
    Command(Command),
    Chat(ChatLine),
}

impl ClientLine {
    /// Classify a line by its sigil (`@`, then `/`, otherwise chat) and parse its payload.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }

        if let Some(payload) = line.strip_prefix(REGISTRATION_SIGIL) {
            let (id, name) = payload
                .split_once(REGISTRATION_SIGIL)
                .filter(|(_, name)| !name.is_empty())
                .ok_or_else(|| ProtocolError::MalformedRegistration(line.to_string()))?;
            return Ok(Self::Registration {
                id: id.parse()?,
                name: name.to_string(),
            });
        }

        if let Some(payload) = line.strip_prefix(COMMAND_SIGIL) {
            return Command::parse(payload).map(Self::Command);
        }

        ChatLine::parse(line).map(Self::Chat)
    }
}

impl fmt::Display for ClientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration { id, name } => {
                write!(f, "{REGISTRATION_SIGIL}{id}{REGISTRATION_SIGIL}{name}")
            }
            Self::Command(command) => fmt::Display::fmt(command, f),
            Self::Chat(chat) => fmt::Display::fmt(chat, f),
        }
    }
}
