// crates/runny-cli/src/commands/uri.rs - Arbitrary actions with raw parameters
//
// Covers plugin-defined actions the typed subcommands don't know about:
// ```bash
// obsidian-runny uri advanced-uri -p daily=true -p mode=append -p data="- [ ] milk"
// ```

use anyhow::{Context as _, Result};
use runny_core::{RawRequest, UriAction};
use tracing::debug;

use crate::context::Context;

/// The global --vault is applied first, so an explicit `-p vault=...` wins
pub fn handle(ctx: &Context, action: String, params: Vec<String>) -> Result<()> {
    let action: UriAction = action.parse()?;

    let mut raw = Vec::with_capacity(params.len() + 1);
    if let Some(vault) = ctx.vault() {
        raw.push(format!("vault={}", vault));
    }
    raw.extend(params);

    let request = RawRequest::parse(action, &raw).context("Invalid --param value")?;
    debug!(count = request.params.len(), "parsed raw parameters");
    ctx.dispatch(&request)
}
