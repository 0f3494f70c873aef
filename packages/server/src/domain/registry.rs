//! Session Registry trait 定義
//!
//! 参加者の状態と送信チャンネルの唯一の所有者。全ての接続の受信ループから
//! 並行に呼ばれるため、実装は各操作を排他的に適用する必要がある。

use async_trait::async_trait;

use super::{Departed, DisplayName, Participant, ParticipantId, PusherChannel, RegistryError};

#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    /// `start_from` 以上で、登録中の参加者が使っていない最小の ID を返す
    async fn allocate_id(&self, start_from: ParticipantId) -> Result<ParticipantId, RegistryError>;

    /// 名前未設定の参加者を指定 ID で登録
    async fn register(&self, id: ParticipantId, channel: PusherChannel)
    -> Result<(), RegistryError>;

    /// 基準値から ID を割り当て、同じ排他区間で登録する
    async fn register_new(&self, channel: PusherChannel) -> Result<ParticipantId, RegistryError>;

    async fn set_name(&self, id: ParticipantId, name: DisplayName) -> Result<(), RegistryError>;

    /// 参加者を削除し、送信チャンネルごと返す（未登録の ID なら `None`）
    async fn remove(&self, id: ParticipantId) -> Option<Departed>;

    /// 接続順に並んだ参加者のスナップショット
    async fn snapshot(&self) -> Vec<Participant>;

    async fn find(&self, id: ParticipantId) -> Option<Participant>;

    /// 1 人の参加者に行を送る（ユニキャスト）
    async fn push_to(&self, id: ParticipantId, line: &str) -> Result<(), RegistryError>;

    /// 1 人の参加者に複数行を順番通りに送る
    async fn push_lines(&self, id: ParticipantId, lines: Vec<String>) -> Result<(), RegistryError>;

    /// 登録済み（名前設定済み）の全参加者に行を送り、送信できた人数を返す
    async fn broadcast(&self, line: &str) -> usize;

    /// 送信者の「直近の受信者一覧」を現在の登録済み参加者から再計算して返す
    async fn record_receivers(&self, sender: ParticipantId) -> Result<String, RegistryError>;
}
