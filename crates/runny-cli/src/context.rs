// crates/runny-cli/src/context.rs - Application context passed to command handlers

use anyhow::{Context as _, Result};
use runny_core::{LauncherKind, LogLevel, RunnyConfig, UriRequest};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::Cli;

/// What to do with a finished URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Hand it to the platform launcher
    Launch,
    /// Print it on stdout
    Print,
    /// Print action, URI and parameters as JSON on stdout
    Json,
}

/// Settings resolved from the command line, environment and config file
///
/// Handlers never read the config or the environment themselves; they get
/// everything from here.
pub struct Context {
    config: RunnyConfig,
    vault: Option<String>,
    log_level: LogLevel,
    launcher: LauncherKind,
    output: Output,
}

impl Context {
    /// Load configuration and apply command-line overrides
    pub fn new(cli: &Cli) -> Result<Self> {
        let config =
            RunnyConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
        Ok(Self::from_parts(cli, config))
    }

    /// Merge `cli` over an already loaded `config`
    pub fn from_parts(cli: &Cli, config: RunnyConfig) -> Self {
        let output = match (cli.print, cli.json) {
            (true, true) => Output::Json,
            (true, false) => Output::Print,
            _ => Output::Launch,
        };

        Self {
            vault: cli.vault.clone().or_else(|| config.default_vault.clone()),
            log_level: cli.log_level.unwrap_or(config.log_level),
            launcher: cli.launcher.unwrap_or(config.launcher),
            output,
            config,
        }
    }

    /// Vault for this invocation, if any
    pub fn vault(&self) -> Option<String> {
        self.vault.clone()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn output(&self) -> Output {
        self.output
    }

    /// Report what was resolved; called once logging is up
    pub fn log_resolved(&self, cli: &Cli) {
        let source = cli
            .config
            .clone()
            .or_else(RunnyConfig::default_path)
            .filter(|path| path.is_file());
        debug!(
            config = ?source,
            vault = ?self.vault,
            launcher = %self.launcher,
            output = ?self.output,
            "resolved settings"
        );
    }

    /// Format the request and print or launch it
    pub fn dispatch(&self, request: &dyn UriRequest) -> Result<()> {
        match self.output {
            Output::Launch => {
                let launcher = self.launcher.resolve(self.config.xdg)?;
                runny_core::run_request(request, launcher.as_ref())?;
            }
            Output::Print => {
                let uri = request.to_uri()?;
                info!(uri = %uri, "printing uri");
                println!("{}", uri);
            }
            Output::Json => {
                let uri = request.to_uri()?;
                let value = json!({
                    "action": request.action().as_str(),
                    "uri": uri,
                    "params": serde_json::to_value(request.params())?,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["obsidian-runny"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    /// Parse with the settings that could leak in from the environment cleared
    fn parse_isolated(args: &[&str]) -> Cli {
        let mut cli = parse(args);
        cli.vault = None;
        cli.log_level = None;
        cli.config = None;
        cli
    }

    #[test]
    fn test_cli_vault_overrides_config() {
        let config = RunnyConfig {
            default_vault: Some("Personal".to_string()),
            ..Default::default()
        };
        let cli = parse(&["--vault", "Work", "daily"]);
        let ctx = Context::from_parts(&cli, config.clone());
        assert_eq!(ctx.vault().as_deref(), Some("Work"));

        let ctx = Context::from_parts(&parse_isolated(&["daily"]), config);
        assert_eq!(ctx.vault().as_deref(), Some("Personal"));
    }

    #[test]
    fn test_log_level_precedence() {
        let config = RunnyConfig {
            log_level: LogLevel::Info,
            ..Default::default()
        };
        let cli = parse(&["--log-level", "error", "daily"]);
        let ctx = Context::from_parts(&cli, config.clone());
        assert_eq!(ctx.log_level(), LogLevel::Error);

        let ctx = Context::from_parts(&parse_isolated(&["daily"]), config);
        assert_eq!(ctx.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_output_mode() {
        let config = RunnyConfig::default();
        assert_eq!(
            Context::from_parts(&parse(&["daily"]), config.clone()).output(),
            Output::Launch
        );
        assert_eq!(
            Context::from_parts(&parse(&["--print", "daily"]), config.clone()).output(),
            Output::Print
        );
        assert_eq!(
            Context::from_parts(&parse(&["--print", "--json", "daily"]), config).output(),
            Output::Json
        );
    }

    #[test]
    fn test_no_vault_anywhere() {
        let ctx = Context::from_parts(&parse_isolated(&["daily"]), RunnyConfig::default());
        assert_eq!(ctx.vault(), None);
        assert_eq!(ctx.log_level(), LogLevel::Warning);
    }
}
