// crates/runny-cli/src/commands/new.rs - Create a note

use anyhow::{Result, bail};
use runny_core::NewRequest;
use tracing::warn;

use super::open::note_target;
use crate::cli::TargetArgs;
use crate::context::Context;

/// Flags accepted by `new`
#[derive(Debug, Clone, Copy, Default)]
pub struct NewFlags {
    pub clipboard: bool,
    pub silent: bool,
    pub append: bool,
    pub overwrite: bool,
}

pub fn handle(
    ctx: &Context,
    target: TargetArgs,
    content: Option<String>,
    flags: NewFlags,
) -> Result<()> {
    if target.name.is_none() && target.path.is_none() && target.file.is_none() {
        bail!("new needs a note to create: pass --name, --path or --file");
    }
    if flags.append && flags.overwrite {
        bail!("--append and --overwrite are mutually exclusive");
    }
    if flags.clipboard && content.is_some() {
        warn!("--clipboard is set, Obsidian will ignore --content");
    }

    let content = crate::stdin::read_value_or_stdin(content)?;

    let request = NewRequest {
        vault: ctx.vault(),
        target: note_target(target),
        content,
        clipboard: flags.clipboard,
        silent: flags.silent,
        append: flags.append,
        overwrite: flags.overwrite,
    };
    ctx.dispatch(&request)
}
