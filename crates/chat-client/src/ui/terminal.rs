use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tracing::warn;

pub(crate) type Tui = Terminal<CrosstermBackend<io::Stdout>>;

const WINDOW_TITLE: &str = "PhishGuard AI";

pub(crate) fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    match enter_chat_screen() {
        Ok(terminal) => Ok(terminal),
        Err(err) => {
            // Leave the shell usable if the alternate screen never came up.
            if let Err(restore_err) = disable_raw_mode() {
                warn!(error = %restore_err, "failed to leave raw mode");
            }
            let _ = io::stdout().execute(LeaveAlternateScreen);
            Err(err)
        }
    }
}

fn enter_chat_screen() -> anyhow::Result<Tui> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?.execute(SetTitle(WINDOW_TITLE))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

pub(crate) fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
