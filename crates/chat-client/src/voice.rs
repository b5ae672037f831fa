use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::events::UiEvent;

/// Scripted stand-in for speech recognition: waits, then yields canned text.
///
/// Returns `None` when cancelled before the delay elapses.
pub(crate) async fn simulate_voice_input(
    delay: Duration,
    text: String,
    cancel: CancellationToken,
) -> Option<String> {
    tokio::select! {
        _ = cancel.cancelled() => None,
        _ = tokio::time::sleep(delay) => Some(text),
    }
}

pub(crate) fn spawn_voice_input(
    simulation: &SimulationConfig,
    ui_tx: mpsc::Sender<UiEvent>,
) -> CancellationToken {
    let cancel = CancellationToken::new();
    let delay = simulation.voice_delay();
    let text = simulation.voice_demo_text.clone();
    let token = cancel.clone();
    tokio::spawn(async move {
        match simulate_voice_input(delay, text, token).await {
            Some(text) => {
                let _ = ui_tx.send(UiEvent::VoiceTranscribed(text)).await;
            }
            None => debug!("voice simulation stopped"),
        }
    });
    cancel
}
