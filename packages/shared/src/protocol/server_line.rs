//! Lines sent from the server to clients.
//!
//! Lines starting with `#` are connection bookkeeping (greeting, id, prompt);
//! everything else is shown to the user as-is.

use super::ParticipantId;

pub const WELCOME: &str = "#Welcome to the Chat Room!";
pub const NAME_PROMPT: &str = "#Please enter your name:";
pub const ASSIGNED_ID_PREFIX: &str = "#Your ID is : ";
const CURRENT_USERS_PREFIX: &str = "Current Users: ";

/// First line of a freshly created transcript
pub const TRANSCRIPT_HEADER: &str = "[CHAT RECORD]";
pub const NO_RECORDS_FOUND: &str = "No records found!";

/// Receivers summary of a participant that has not sent a chat line yet
pub const NO_MESSAGE_SENT: &str = "No message found";
const RECEIVERS_PREFIX: &str = "Last Message Receivers:";

pub const HELP_TEXT: [&str; 5] = [
    "Some useful commands:",
    "'/exit': exit the chatroom.",
    "'/printReceiver': print the names of the receivers of the last message you sent.",
    "'/search(replace_this_with_the_keyword_you_want_to_search)': search for chat logs that contain specific keywords or username.",
    "'/help': display the list of available commands.",
];

/// `Current Users: [id]name [id]name ` (a session without a name renders as `[id]`)
pub fn current_users<'a, I>(users: I) -> String
where
    I: IntoIterator<Item = (ParticipantId, Option<&'a str>)>,
{
    users
        .into_iter()
        .fold(CURRENT_USERS_PREFIX.to_string(), |mut line, (id, name)| {
            line.push_str(&format!("[{}]{} ", id, name.unwrap_or_default()));
            line
        })
}

pub fn assigned_id(id: ParticipantId) -> String {
    format!("{ASSIGNED_ID_PREFIX}{id}")
}

/// Read the id back out of an [`assigned_id`] line
pub fn parse_assigned_id(line: &str) -> Option<ParticipantId> {
    line.strip_prefix(ASSIGNED_ID_PREFIX)?.trim().parse().ok()
}

pub fn joined(id: ParticipantId, name: &str) -> String {
    format!("[{id}]{name} has entered the chatroom!")
}

pub fn left(id: ParticipantId, name: &str) -> String {
    format!("[{id}]{name} has left the chatroom!")
}

/// `Last Message Receivers: [id]name, [id]name`
pub fn receivers_summary<'a, I>(receivers: I) -> String
where
    I: IntoIterator<Item = (ParticipantId, &'a str)>,
{
    let receivers = receivers
        .into_iter()
        .map(|(id, name)| format!("[{id}]{name}"))
        .collect::<Vec<_>>();
    if receivers.is_empty() {
        return RECEIVERS_PREFIX.to_string();
    }
    format!("{} {}", RECEIVERS_PREFIX, receivers.join(", "))
}
