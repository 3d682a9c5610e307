// crates/runny-cli/src/commands/search.rs - Open the search pane

use anyhow::Result;
use runny_core::SearchRequest;

use crate::context::Context;

/// Without a query Obsidian just opens an empty search pane
pub fn handle(ctx: &Context, query: Option<String>) -> Result<()> {
    let request = SearchRequest {
        vault: ctx.vault(),
        query,
    };
    ctx.dispatch(&request)
}
