use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "phishguard-chat",
    version,
    about = "Chat client for the PhishGuard phishing prediction service"
)]
pub(crate) struct Args {
    #[arg(long, default_value = "config/chat-client.toml")]
    pub(crate) config: PathBuf,
    /// Overrides `base_url` from the config file.
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    /// Analyze a single url, print the reply and exit.
    #[arg(long)]
    pub(crate) url: Option<String>,
    #[arg(long, conflicts_with = "no_simulate")]
    pub(crate) simulate: bool,
    #[arg(long)]
    pub(crate) no_simulate: bool,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    /// Only honoured together with --url; the chat UI owns the terminal.
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
}

impl Args {
    pub(crate) fn simulation_override(&self) -> Option<bool> {
        if self.simulate {
            Some(true)
        } else if self.no_simulate {
            Some(false)
        } else {
            None
        }
    }
}
