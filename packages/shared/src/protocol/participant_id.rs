use std::{fmt, str::FromStr};

use super::ProtocolError;

/// Numeric identity of a participant, unique among live sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(u32);

impl ParticipantId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The following id, or `None` once the id space is exhausted
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl FromStr for ParticipantId {
    type Err = ProtocolError;

    /// Accepts plain decimal digits only (no sign, no whitespace).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProtocolError::InvalidId(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| ProtocolError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_id() {
        // テスト項目: 10 進数の ID を解析できる
        // given (前提条件):
        let text = "10000";

        // when (操作):
        let result = text.parse::<ParticipantId>();

        // then (期待する結果):
        assert_eq!(result, Ok(ParticipantId::new(10000)));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        // テスト項目: 数字以外を含む ID はエラーになる
        // given (前提条件):
        let inputs = ["", "+1", " 1", "1a", "-5", "99999999999"];

        // when (操作) / then (期待する結果):
        for input in inputs {
            assert_eq!(
                input.parse::<ParticipantId>(),
                Err(ProtocolError::InvalidId(input.to_string())),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_next_stops_at_max() {
        // テスト項目: ID の上限では次の ID が存在しない
        // given (前提条件):
        let last = ParticipantId::new(u32::MAX);

        // when (操作):
        let result = last.next();

        // then (期待する結果):
        assert_eq!(result, None);
        assert_eq!(
            ParticipantId::new(7).next(),
            Some(ParticipantId::new(8))
        );
    }
}
