mod cli;
mod client;
mod config;
mod events;
mod format;
mod logging;
mod session;
mod suggestions;
mod transcript;
mod ui;
mod voice;

use crate::cli::Args;
use crate::client::{HttpPredictionClient, PredictionBackend};
use crate::config::{load_client_config, ClientConfig};
use crate::events::UiEvent;
use crate::logging::{init_tracing, LogMirror};
use crate::session::ChatSession;
use crate::suggestions::SuggestionInput;
use crate::ui::{draw_ui, handle_key_event, restore_terminal, setup_terminal, AppState, UiContext};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let headless = args.url.is_some();
    let _file_guard = init_tracing(
        &args.log_dir,
        LogMirror::for_run(args.log_to_stderr, headless),
    )?;

    let config = resolve_config(&args)?;
    let client = HttpPredictionClient::new(&config.base_url, config.request_timeout())
        .context("failed to build prediction client")?;
    info!(
        endpoint = %client.endpoint(),
        simulation = config.simulation.enabled,
        headless,
        "phishguard chat starting"
    );

    if let Some(url) = args.url.as_deref() {
        return run_headless(url, &client).await;
    }

    let endpoint = client.endpoint().to_string();
    let backend: Arc<dyn PredictionBackend> = Arc::new(client);
    run_tui(config, endpoint, backend).await
}

fn resolve_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = load_client_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(enabled) = args.simulation_override() {
        config.simulation.enabled = enabled;
    }
    config.validate()?;
    Ok(config)
}

async fn run_headless(url: &str, backend: &dyn PredictionBackend) -> anyhow::Result<()> {
    let mut session = ChatSession::new(None);
    let mut input = url.to_string();
    if !session.submit(&mut input, backend).await {
        anyhow::bail!("url must not be empty");
    }
    if let Some(reply) = session.transcript().last() {
        println!("{}", reply.content);
    }
    Ok(())
}

async fn run_tui(
    config: ClientConfig,
    endpoint: String,
    backend: Arc<dyn PredictionBackend>,
) -> anyhow::Result<()> {
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(32);
    let session = ChatSession::new(config.simulation.analyzing_delay());
    let mut app = AppState::new(session, endpoint, SuggestionInput::new()?);
    let ctx = UiContext {
        backend,
        ui_tx,
        simulation: config.simulation,
    };

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let result: anyhow::Result<()> = loop {
        while let Ok(event) = ui_rx.try_recv() {
            app.handle_event(event);
        }

        if let Err(err) = terminal.draw(|frame| draw_ui(frame, &mut app)) {
            break Err(err.into());
        }

        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, &mut app, &ctx) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(err) => break Err(err.into()),
            },
            Ok(false) => {}
            Err(err) => break Err(err.into()),
        }
    };

    app.stop_voice();
    restore_terminal(&mut terminal)?;
    info!(messages = app.session.transcript().len(), "phishguard chat exiting");
    result
}
