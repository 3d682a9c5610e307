// crates/runny-cli/src/commands/daily.rs - Open today's daily note

use anyhow::Result;
use runny_core::DailyRequest;

use crate::context::Context;

pub fn handle(ctx: &Context) -> Result<()> {
    ctx.dispatch(&DailyRequest { vault: ctx.vault() })
}
