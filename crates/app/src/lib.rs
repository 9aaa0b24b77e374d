//! Courier API Client - command-line front end
//!
//! Wires the file-backed stores and the reqwest transport into a
//! [`Session`] and maps each subcommand onto session operations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod overlay;

use std::io::Write;
use std::sync::Arc;

use courier_application::Session;
use courier_application::preferences::PROXY_TEMPLATE_KEY;
use courier_infrastructure::{FilePreferenceStore, FileWorkspaceStore};

pub use cli::Cli;
pub use config::{Config, LOG_ENV};
pub use overlay::OverlayPreferences;

/// Session type used by every command.
pub type CliSession = Session<FileWorkspaceStore, OverlayPreferences<FilePreferenceStore>>;

/// Opens the workspace in `config.data_dir` and restores the remembered
/// project and environment.
///
/// # Errors
///
/// Returns an error when the stored documents cannot be read.
pub async fn open_session(config: &Config) -> anyhow::Result<CliSession> {
    let store = FileWorkspaceStore::new(&config.data_dir);
    let mut preferences = OverlayPreferences::new(FilePreferenceStore::new(&config.data_dir));
    if let Some(proxy) = &config.proxy {
        preferences = preferences.with_override(PROXY_TEMPLATE_KEY, proxy.as_str());
    }

    let mut session = Session::new(Arc::new(store), Arc::new(preferences));
    session.load().await?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        projects = session.projects().len(),
        "session opened"
    );
    Ok(session)
}

/// Runs one parsed command line, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub async fn execute(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = Config::from_cli(&cli);
    let mut session = open_session(&config).await?;
    commands::dispatch(cli.command, &mut session, out).await
}
