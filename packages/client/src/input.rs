//! Translation of typed input into protocol lines.

use std::sync::Arc;

use irori_shared::{
    protocol::{ChatLine, ClientLine, Command, ParticipantId, server_line::parse_assigned_id},
    time::{Clock, SystemClock},
};

pub const INVALID_COMMAND: &str = "!!! Invalid command. Please try again.";
pub const NOT_CONNECTED: &str = "!!! No ID assigned yet. Please wait for the server.";

/// What to do with one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Send this line to the server
    Send(String),
    /// Show this line locally; nothing is sent
    Local(&'static str),
}

/// Keeps the session's id and name and turns input lines into wire lines.
pub struct InputTranslator {
    id: Option<ParticipantId>,
    name: Option<String>,
    clock: Arc<dyn Clock>,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl InputTranslator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            id: None,
            name: None,
            clock,
        }
    }

    pub fn id(&self) -> Option<ParticipantId> {
        self.id
    }

    /// Remember the id if `line` is the server's id assignment.
    pub fn observe_server_line(&mut self, line: &str) {
        if let Some(id) = parse_assigned_id(line) {
            tracing::debug!("Assigned participant id {}", id);
            self.id = Some(id);
        }
    }

    pub fn translate(&mut self, input: &str) -> Outcome {
        let Some(id) = self.id else {
            return Outcome::Local(NOT_CONNECTED);
        };

        let Some(name) = &self.name else {
            let registration = ClientLine::Registration {
                id,
                name: input.to_string(),
            };
            self.name = Some(input.to_string());
            return Outcome::Send(registration.to_string());
        };

        if input.starts_with('/') {
            return match command_for(input, id) {
                Some(command) => Outcome::Send(command.to_string()),
                None => Outcome::Local(INVALID_COMMAND),
            };
        }

        let chat = ChatLine::new(self.clock.now(), id, name.as_str(), input);
        Outcome::Send(chat.to_string())
    }
}

fn command_for(input: &str, id: ParticipantId) -> Option<Command> {
    match input {
        "/exit" => Some(Command::Exit(id)),
        "/help" => Some(Command::Help(id)),
        "/printReceiver" => Some(Command::PrintReceiver(id)),
        _ => {
            let pattern = input.strip_prefix("/search(")?.strip_suffix(')')?;
            Some(Command::Search {
                pattern: pattern.to_string(),
                id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use irori_shared::time::FixedClock;

    fn translator() -> InputTranslator {
        let time = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let mut translator = InputTranslator::new(Arc::new(FixedClock::new(time)));
        translator.observe_server_line("#Your ID is : 10000");
        translator
    }

    fn registered() -> InputTranslator {
        let mut translator = translator();
        translator.translate("Alice");
        translator
    }

    #[test]
    fn test_input_before_id_is_kept_local() {
        // テスト項目: ID 割り当て前の入力は送信されない
        // given (前提条件):
        let mut translator = InputTranslator::default();

        // when (操作):
        let outcome = translator.translate("Alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Local(NOT_CONNECTED));
        assert_eq!(translator.id(), None);
    }

    #[test]
    fn test_learns_id_from_assignment_only() {
        // テスト項目: ID 通知行からのみ ID を覚える
        // given (前提条件):
        let mut translator = InputTranslator::default();

        // when (操作):
        translator.observe_server_line("#Welcome to the Chat Room!");
        translator.observe_server_line("#Your ID is : 10003");

        // then (期待する結果):
        assert_eq!(translator.id(), Some(ParticipantId::new(10003)));
    }

    #[test]
    fn test_first_line_registers_name() {
        // テスト項目: 最初の入力は名前登録行になる
        // given (前提条件):
        let mut translator = translator();

        // when (操作):
        let outcome = translator.translate("Alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Send("@10000@Alice".to_string()));
    }

    #[test]
    fn test_commands_get_id_appended() {
        // テスト項目: 既知のコマンドには ID が付加される
        // given (前提条件):
        let mut translator = registered();

        // when (操作) / then (期待する結果):
        assert_eq!(
            translator.translate("/exit"),
            Outcome::Send("/exit10000".to_string())
        );
        assert_eq!(
            translator.translate("/help"),
            Outcome::Send("/help10000".to_string())
        );
        assert_eq!(
            translator.translate("/printReceiver"),
            Outcome::Send("/printReceiver10000".to_string())
        );
        assert_eq!(
            translator.translate("/search(f(x))"),
            Outcome::Send("/search(f(x))10000".to_string())
        );
    }

    #[test]
    fn test_unknown_command_is_reported_locally() {
        // テスト項目: 未知のコマンドや閉じ括弧のない検索は送信されない
        // given (前提条件):
        let mut translator = registered();

        // when (操作) / then (期待する結果):
        assert_eq!(translator.translate("/dance"), Outcome::Local(INVALID_COMMAND));
        assert_eq!(
            translator.translate("/search(hi"),
            Outcome::Local(INVALID_COMMAND)
        );
        assert_eq!(
            translator.translate("/exit now"),
            Outcome::Local(INVALID_COMMAND)
        );
    }

    #[test]
    fn test_text_becomes_chat_line() {
        // テスト項目: 通常の入力は時刻付きのチャット行になる
        // given (前提条件):
        let mut translator = registered();

        // when (操作):
        let outcome = translator.translate("hello : world");

        // then (期待する結果):
        assert_eq!(
            outcome,
            Outcome::Send("2023-01-02 03:04:05 [10000]Alice : hello : world".to_string())
        );
    }
}
