//! Runtime configuration resolved from flags and the environment.

use std::path::PathBuf;

use courier_infrastructure::default_data_dir;

use crate::cli::Cli;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "COURIER_LOG";

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the workspace and preference documents
    pub data_dir: PathBuf,
    /// Proxy template overriding the stored one
    pub proxy: Option<String>,
}

impl Config {
    /// Resolves the configuration for `cli`.
    ///
    /// An empty proxy override counts as none.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            proxy: cli.proxy.clone().filter(|template| !template.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::parse_from([
            "courier",
            "--data-dir",
            "/tmp/courier-test",
            "--proxy",
            "https://p/?u={url}",
            "project",
            "list",
        ]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/courier-test"));
        assert_eq!(config.proxy.as_deref(), Some("https://p/?u={url}"));
    }

    #[test]
    fn test_blank_proxy_is_ignored() {
        let cli = Cli::parse_from(["courier", "--proxy", " ", "proxy", "show"]);
        assert_eq!(Config::from_cli(&cli).proxy, None);
    }
}
