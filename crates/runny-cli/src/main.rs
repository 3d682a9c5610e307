// crates/runny-cli/src/main.rs - CLI Application Entry Point
//
// Each subcommand maps to one Obsidian URI action. The flow is always:
//
//   parse args -> load config -> init logging -> build request -> print or launch
//
// EXAMPLE USAGE:
// ```bash
// obsidian-runny open --name "Inbox"                      # Open a note
// obsidian-runny new --name "Meeting" --silent            # Create without focusing
// obsidian-runny search --query "tag:#todo"               # Search the vault
// obsidian-runny --print new --name x --vault "My Vault"  # obsidian://new?vault=My%20Vault&name=x
// ```

use anyhow::Result;
use clap::Parser;
use console::style;
use std::process::ExitCode;

mod cli; // Command-line interface definitions (pure data structures)
mod commands; // One handler per URI action
mod context; // Resolved settings and URI dispatch
mod logging; // tracing-subscriber setup
mod stdin; // "-" means read the value from stdin

use cli::{Cli, Commands};
use commands::new::NewFlags;
use context::Context;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let ctx = Context::new(&cli)?;
    logging::init_logging(ctx.log_level());
    ctx.log_resolved(&cli);

    match cli.command {
        Commands::Open {
            target,
            prepend,
            append,
        } => commands::open::handle(&ctx, target, prepend, append),
        Commands::New {
            target,
            content,
            clipboard,
            silent,
            append,
            overwrite,
        } => commands::new::handle(
            &ctx,
            target,
            content,
            NewFlags {
                clipboard,
                silent,
                append,
                overwrite,
            },
        ),
        Commands::Search { query } => commands::search::handle(&ctx, query),
        Commands::Daily => commands::daily::handle(&ctx),
        Commands::Uri { action, params } => commands::uri::handle(&ctx, action, params),
    }
}
