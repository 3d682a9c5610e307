// crates/runny-cli/src/commands/mod.rs - Command handler modules
//
// One module per Obsidian action. Each handler turns its arguments into a
// typed request and hands it to Context::dispatch; none of them touch the
// launcher or stdout directly.

pub mod daily;
pub mod new;
pub mod open;
pub mod search;
pub mod uri;
