use std::fmt;

use chrono::NaiveDateTime;

use crate::time::{CHAT_TIMESTAMP_WIDTH, format_chat_timestamp, parse_chat_timestamp};

use super::{ParticipantId, ProtocolError};

/// A chat line as rendered by the sending client:
/// `YYYY-MM-DD HH:MM:SS [<id>]<name> : <body>`.
///
/// The server relays and stores the received text verbatim; this type is how
/// it reads the sender out of that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub timestamp: NaiveDateTime,
    pub sender: ParticipantId,
    pub sender_name: String,
    pub body: String,
}

impl ChatLine {
    pub fn new(
        timestamp: NaiveDateTime,
        sender: ParticipantId,
        sender_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender,
            sender_name: sender_name.into(),
            body: body.into(),
        }
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let malformed = || ProtocolError::MalformedChatLine(line.to_string());

        let timestamp = line
            .get(..CHAT_TIMESTAMP_WIDTH)
            .and_then(parse_chat_timestamp)
            .ok_or_else(malformed)?;
        let rest = line[CHAT_TIMESTAMP_WIDTH..]
            .strip_prefix(" [")
            .ok_or_else(malformed)?;
        let (id_text, rest) = rest.split_once(']').ok_or_else(malformed)?;
        let sender = id_text.parse()?;
        // the name ends at the first separator; the body may contain more
        let (sender_name, body) = rest.split_once(" : ").ok_or_else(malformed)?;

        Ok(Self::new(timestamp, sender, sender_name, body))
    }
}

impl fmt::Display for ChatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]{} : {}",
            format_chat_timestamp(&self.timestamp),
            self.sender,
            self.sender_name,
            self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_render_chat_line() {
        // テスト項目: チャット行がワイヤ形式で描画される
        // given (前提条件):
        let line = ChatLine::new(noon(), ParticipantId::new(10000), "Alice", "hi");

        // when (操作):
        let rendered = line.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "2024-05-06 12:00:00 [10000]Alice : hi");
    }

    #[test]
    fn test_parse_chat_line_fields() {
        // テスト項目: チャット行から送信者 ID・名前・本文を取り出せる
        // given (前提条件):
        let text = "2024-05-06 12:00:00 [10001]Bob : see you : later";

        // when (操作):
        let result = ChatLine::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(result.timestamp, noon());
        assert_eq!(result.sender, ParticipantId::new(10001));
        assert_eq!(result.sender_name, "Bob");
        assert_eq!(result.body, "see you : later");
    }

    #[test]
    fn test_parse_chat_line_with_long_id() {
        // テスト項目: 5 桁以外の ID でも位置に依存せず送信者を取り出せる
        // given (前提条件):
        let text = "2024-05-06 12:00:00 [1234567]Carol : hello";

        // when (操作):
        let result = ChatLine::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(result.sender, ParticipantId::new(1234567));
        assert_eq!(result.sender_name, "Carol");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        // テスト項目: 形式の崩れたチャット行はエラーになる
        // given (前提条件):
        let inputs = [
            "hello there",
            "2024-05-06 12:00:00 10000 Alice : hi",
            "2024-05-06 12:00:00 [10000 Alice : hi",
            "2024-05-06 12:00:00 [10000]Alice hi",
            "2024-13-06 12:00:00 [10000]Alice : hi",
            "日本語のメッセージです、よろしくお願いします",
        ];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert!(ChatLine::parse(input).is_err(), "input: {input}");
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_sender() {
        // テスト項目: 送信者 ID が数値でない場合は ID エラーになる
        // given (前提条件):
        let text = "2024-05-06 12:00:00 [alice]Alice : hi";

        // when (操作):
        let result = ChatLine::parse(text);

        // then (期待する結果):
        assert_eq!(result, Err(ProtocolError::InvalidId("alice".to_string())));
    }
}
