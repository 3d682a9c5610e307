// crates/runny-cli/src/cli.rs - Command-line definitions (pure data structures)

use clap::{Args, Parser, Subcommand};
use runny_core::{LauncherKind, LogLevel};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "obsidian-runny")]
#[command(about = "Drive Obsidian from the shell through obsidian:// URIs")]
#[command(version)]
pub struct Cli {
    /// Vault name or ID (falls back to default_vault in the config file)
    #[arg(long, global = true, env = "OBSIDIAN_VAULT")]
    pub vault: Option<String>,

    /// The logging level to use
    #[arg(long, global = true, env = "OBSIDIAN_RUNNY_LOG")]
    pub log_level: Option<LogLevel>,

    /// Config file (defaults to <config dir>/obsidian-runny/config.yaml)
    #[arg(long, global = true, env = "OBSIDIAN_RUNNY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Launcher to open URIs with: auto, xdg, mac, windows
    #[arg(long, global = true)]
    pub launcher: Option<LauncherKind>,

    /// Print the URI instead of opening it
    #[arg(long, global = true)]
    pub print: bool,

    /// With --print, output a JSON object for machine processing
    #[arg(long, global = true, requires = "print")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Obsidian URI actions
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Attempt to open the note with a given name
    Open {
        #[command(flatten)]
        target: TargetArgs,

        /// Value to prepend
        #[arg(long)]
        prepend: Option<String>,

        /// Value to append
        #[arg(long)]
        append: Option<String>,
    },

    /// Attempt to create a new note with the given name
    ///
    /// Obsidian may add a number at the end if the name already exists.
    New {
        #[command(flatten)]
        target: TargetArgs,

        /// Initial note content ("-" reads it from stdin)
        #[arg(long)]
        content: Option<String>,

        /// Use the clipboard as content
        #[arg(long)]
        clipboard: bool,

        /// Create the note without opening it
        #[arg(long)]
        silent: bool,

        /// Append to the note if it already exists
        #[arg(long)]
        append: bool,

        /// Overwrite the note if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Open the search pane, optionally running a query
    Search {
        /// A search query to run
        #[arg(long)]
        query: Option<String>,
    },

    /// Open today's daily note (requires the Daily notes plugin)
    Daily,

    /// Run any action, including plugin-defined ones
    Uri {
        /// Action name, e.g. "open" or "advanced-uri"
        action: String,

        /// Extra parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

/// Ways of pointing at a note
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// The name of the note
    #[arg(long)]
    pub name: Option<String>,

    /// The vault-relative path of the note (overrides --name)
    #[arg(long)]
    pub path: Option<String>,

    /// The absolute OS path of the note (overrides --path)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_flags() {
        let cli = Cli::try_parse_from([
            "obsidian-runny",
            "new",
            "--name",
            "Inbox",
            "--silent",
            "--vault",
            "Work",
        ])
        .unwrap();
        assert_eq!(cli.vault.as_deref(), Some("Work"));
        match cli.command {
            Commands::New { target, silent, overwrite, .. } => {
                assert_eq!(target.name.as_deref(), Some("Inbox"));
                assert!(silent);
                assert!(!overwrite);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        let cli = Cli::try_parse_from(["obsidian-runny", "--log-level", "debug", "daily"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(Cli::try_parse_from(["obsidian-runny", "--log-level", "loud", "daily"]).is_err());
    }

    #[test]
    fn test_json_requires_print() {
        assert!(Cli::try_parse_from(["obsidian-runny", "--json", "daily"]).is_err());
        assert!(Cli::try_parse_from(["obsidian-runny", "--print", "--json", "daily"]).is_ok());
    }

    #[test]
    fn test_parse_uri_params() {
        let cli = Cli::try_parse_from([
            "obsidian-runny",
            "uri",
            "advanced-uri",
            "-p",
            "daily=true",
            "--param",
            "mode=append",
        ])
        .unwrap();
        match cli.command {
            Commands::Uri { action, params } => {
                assert_eq!(action, "advanced-uri");
                assert_eq!(params, ["daily=true", "mode=append"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
