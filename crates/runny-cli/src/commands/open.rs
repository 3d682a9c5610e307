// crates/runny-cli/src/commands/open.rs - Open an existing note

use anyhow::Result;
use runny_core::{NoteTarget, OpenRequest};

use crate::cli::TargetArgs;
use crate::context::Context;

pub fn handle(
    ctx: &Context,
    target: TargetArgs,
    prepend: Option<String>,
    append: Option<String>,
) -> Result<()> {
    let request = OpenRequest {
        vault: ctx.vault(),
        target: note_target(target),
        prepend,
        append,
    };
    ctx.dispatch(&request)
}

/// Shared by `open` and `new`
pub fn note_target(args: TargetArgs) -> NoteTarget {
    NoteTarget {
        name: args.name,
        path: args.path,
        file: args.file,
    }
}
