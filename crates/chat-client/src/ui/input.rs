use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::client::PredictionBackend;
use crate::config::SimulationConfig;
use crate::events::UiEvent;
use crate::session::{resolve_reply, PendingSubmission};
use crate::voice::spawn_voice_input;

use super::app::AppState;

/// Handles the UI loop needs to start background work.
pub(crate) struct UiContext {
    pub(crate) backend: Arc<dyn PredictionBackend>,
    pub(crate) ui_tx: mpsc::Sender<UiEvent>,
    pub(crate) simulation: SimulationConfig,
}

/// Returns `true` when the app should exit.
pub(crate) fn handle_key_event(key: KeyEvent, app: &mut AppState, ctx: &UiContext) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.confirm_quit {
        if key.code == KeyCode::Esc {
            return true;
        }
        app.confirm_quit = false;
    }

    match key.code {
        KeyCode::Esc => {
            if app.voice_active() {
                app.stop_voice();
            } else {
                app.confirm_quit = true;
            }
        }
        KeyCode::Enter => submit_input(app, ctx),
        KeyCode::Tab => app.select_next_suggestion(),
        KeyCode::BackTab => app.select_prev_suggestion(),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char('s') if ctrl => app.apply_selected_suggestion(),
        KeyCode::Char('v') if ctrl => {
            if ctx.simulation.enabled && !app.voice_active() {
                let cancel = spawn_voice_input(&ctx.simulation, ctx.ui_tx.clone());
                app.start_voice(cancel);
            }
        }
        KeyCode::Char('u') if ctrl => app.input.clear(),
        KeyCode::Char(ch) if !ctrl => app.input.push(ch),
        _ => {}
    }
    false
}

fn submit_input(app: &mut AppState, ctx: &UiContext) {
    let Some(pending) = app.session.begin_submit(&mut app.input) else {
        return;
    };
    app.scroll_back = 0;
    spawn_prediction(
        Arc::clone(&ctx.backend),
        pending,
        app.session.analyzing_delay(),
        ctx.ui_tx.clone(),
    );
}

fn spawn_prediction(
    backend: Arc<dyn PredictionBackend>,
    pending: PendingSubmission,
    min_delay: Duration,
    ui_tx: mpsc::Sender<UiEvent>,
) {
    tokio::spawn(async move {
        let reply = resolve_reply(backend.as_ref(), &pending, min_delay).await;
        let _ = ui_tx.send(UiEvent::Reply(reply)).await;
    });
}
