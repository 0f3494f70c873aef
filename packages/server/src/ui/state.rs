//! Server state shared by every connection.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ParticipantRegistry, TranscriptStore},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetParticipantsUseCase,
        PrintReceiverUseCase, RegisterParticipantUseCase, SearchTranscriptUseCase,
        SendMessageUseCase, ShowHelpUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（join シーケンス）
    pub connect_participant_usecase: ConnectParticipantUseCase,
    /// RegisterParticipantUseCase（名前登録・履歴再生）
    pub register_participant_usecase: RegisterParticipantUseCase,
    /// SendMessageUseCase（発言の配信・保存）
    pub send_message_usecase: SendMessageUseCase,
    /// DisconnectParticipantUseCase（退出・切断）
    pub disconnect_participant_usecase: DisconnectParticipantUseCase,
    /// ShowHelpUseCase（/help）
    pub show_help_usecase: ShowHelpUseCase,
    /// SearchTranscriptUseCase（/search）
    pub search_transcript_usecase: SearchTranscriptUseCase,
    /// PrintReceiverUseCase（/printReceiver）
    pub print_receiver_usecase: PrintReceiverUseCase,
    /// GetParticipantsUseCase（状態確認 API）
    pub get_participants_usecase: GetParticipantsUseCase,
    /// Held while a registration or a chat line is processed, so a joiner's
    /// replay never interleaves with a live chat line
    pub room_sequencer: Mutex<()>,
}

impl AppState {
    /// Wire every use case to the given registry and transcript
    pub fn new(registry: Arc<dyn ParticipantRegistry>, transcript: Arc<dyn TranscriptStore>) -> Self {
        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(registry.clone()),
            register_participant_usecase: RegisterParticipantUseCase::new(
                registry.clone(),
                transcript.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(registry.clone(), transcript.clone()),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(registry.clone()),
            show_help_usecase: ShowHelpUseCase::new(registry.clone()),
            search_transcript_usecase: SearchTranscriptUseCase::new(registry.clone(), transcript),
            print_receiver_usecase: PrintReceiverUseCase::new(registry.clone()),
            get_participants_usecase: GetParticipantsUseCase::new(registry),
            room_sequencer: Mutex::new(()),
        }
    }
}
