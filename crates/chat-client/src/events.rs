use crate::session::BotReply;

/// Results produced by background tasks, folded into the app state by the UI loop.
#[derive(Debug)]
pub(crate) enum UiEvent {
    Reply(BotReply),
    VoiceTranscribed(String),
}
