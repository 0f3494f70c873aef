//! InMemory Session Registry 実装
//!
//! 参加者と送信チャンネルを 1 つの `Mutex` の内側に保持します。
//! ID の割り当て・登録・削除・ブロードキャスト対象の選定は全て同じ排他区間で
//! 行われるため、途中状態が他の接続から観測されることはありません。
//!
//! 送信は `UnboundedSender` への投入のみで、ソケットへの書き込みは各接続の
//! 送信タスクが行います。読み出しの遅い参加者が他の参加者への配信を止めることはありません。

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use irori_shared::protocol::server_line;

use crate::domain::{
    Departed, DisplayName, Participant, ParticipantId, ParticipantRegistry, PusherChannel,
    RegistryError,
};

/// A participant together with the only sender feeding its socket
struct Session {
    participant: Participant,
    channel: PusherChannel,
}

/// インメモリ Session Registry 実装
pub struct InMemoryParticipantRegistry {
    /// 新規接続に割り当てる ID の基準値
    base_id: ParticipantId,
    /// 接続順に並んだセッション
    sessions: Mutex<Vec<Session>>,
}

impl InMemoryParticipantRegistry {
    /// 新しい InMemoryParticipantRegistry を作成
    pub fn new(base_id: ParticipantId) -> Self {
        Self {
            base_id,
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn base_id(&self) -> ParticipantId {
        self.base_id
    }
}

/// Smallest id at or above `start_from` that no session holds
fn smallest_free_id(
    sessions: &[Session],
    start_from: ParticipantId,
) -> Result<ParticipantId, RegistryError> {
    let in_use: BTreeSet<ParticipantId> = sessions.iter().map(|s| s.participant.id).collect();

    let mut candidate = start_from;
    while in_use.contains(&candidate) {
        candidate = candidate
            .next()
            .ok_or(RegistryError::IdsExhausted(start_from))?;
    }
    Ok(candidate)
}

fn find_session(sessions: &[Session], id: ParticipantId) -> Result<&Session, RegistryError> {
    sessions
        .iter()
        .find(|s| s.participant.id == id)
        .ok_or(RegistryError::ParticipantNotFound(id))
}

fn send_line(session: &Session, line: String) -> Result<(), RegistryError> {
    session
        .channel
        .send(line)
        .map_err(|_| RegistryError::ChannelClosed(session.participant.id))
}

#[async_trait]
impl ParticipantRegistry for InMemoryParticipantRegistry {
    async fn allocate_id(&self, start_from: ParticipantId) -> Result<ParticipantId, RegistryError> {
        let sessions = self.sessions.lock().await;
        smallest_free_id(&sessions, start_from)
    }

    async fn register(
        &self,
        id: ParticipantId,
        channel: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.iter().any(|s| s.participant.id == id) {
            return Err(RegistryError::DuplicateId(id));
        }
        sessions.push(Session {
            participant: Participant::new(id),
            channel,
        });
        tracing::debug!("Participant {} registered", id);
        Ok(())
    }

    async fn register_new(&self, channel: PusherChannel) -> Result<ParticipantId, RegistryError> {
        let mut sessions = self.sessions.lock().await;
        let id = smallest_free_id(&sessions, self.base_id)?;
        sessions.push(Session {
            participant: Participant::new(id),
            channel,
        });
        tracing::debug!("Participant {} registered", id);
        Ok(id)
    }

    async fn set_name(&self, id: ParticipantId, name: DisplayName) -> Result<(), RegistryError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .iter_mut()
            .find(|s| s.participant.id == id)
            .ok_or(RegistryError::ParticipantNotFound(id))?;
        tracing::debug!("Participant {} is now '{}'", id, name.as_str());
        session.participant.name = Some(name);
        Ok(())
    }

    async fn remove(&self, id: ParticipantId) -> Option<Departed> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions.iter().position(|s| s.participant.id == id)?;
        let Session {
            participant,
            channel,
        } = sessions.remove(index);
        tracing::debug!("Participant {} removed", id);
        Some(Departed {
            participant,
            channel,
        })
    }

    async fn snapshot(&self) -> Vec<Participant> {
        let sessions = self.sessions.lock().await;
        sessions.iter().map(|s| s.participant.clone()).collect()
    }

    async fn find(&self, id: ParticipantId) -> Option<Participant> {
        let sessions = self.sessions.lock().await;
        find_session(&sessions, id)
            .ok()
            .map(|s| s.participant.clone())
    }

    async fn push_to(&self, id: ParticipantId, line: &str) -> Result<(), RegistryError> {
        let sessions = self.sessions.lock().await;
        send_line(find_session(&sessions, id)?, line.to_string())
    }

    async fn push_lines(&self, id: ParticipantId, lines: Vec<String>) -> Result<(), RegistryError> {
        let sessions = self.sessions.lock().await;
        let session = find_session(&sessions, id)?;
        lines
            .into_iter()
            .try_for_each(|line| send_line(session, line))
    }

    async fn broadcast(&self, line: &str) -> usize {
        let sessions = self.sessions.lock().await;
        let mut delivered = 0;
        for session in sessions.iter().filter(|s| s.participant.is_registered()) {
            // ブロードキャストでは一部の送信失敗を許容
            match send_line(session, line.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to broadcast: {}", e),
            }
        }
        delivered
    }

    async fn record_receivers(&self, sender: ParticipantId) -> Result<String, RegistryError> {
        let mut sessions = self.sessions.lock().await;
        let summary = server_line::receivers_summary(
            sessions
                .iter()
                .filter_map(|s| s.participant.display_name().map(|name| (s.participant.id, name))),
        );
        let session = sessions
            .iter_mut()
            .find(|s| s.participant.id == sender)
            .ok_or(RegistryError::ParticipantNotFound(sender))?;
        session.participant.last_receivers = summary.clone();
        Ok(summary)
    }
}
