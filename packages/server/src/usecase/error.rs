//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RegistryError, ValidationError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection closed before the join sequence completed")]
    ChannelClosed,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// 登録（名前設定）処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("invalid display name: {0}")]
    InvalidName(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// 発言処理のエラー
#[derive(Debug, Error)]
pub enum SendMessageError {
    #[error("chat line was relayed but not recorded: {0}")]
    NotRecorded(#[from] crate::domain::TranscriptError),
}

/// 問い合わせ系コマンド（help / search / printReceiver）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
