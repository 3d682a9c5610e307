// crates/runny-cli/src/stdin.rs - Read option values from piped stdin
//
// Follows the Unix convention of "-" meaning standard input:
// ```bash
// obsidian-runny new --name Log --content "inline text"
// git log -1 | obsidian-runny new --name "Last commit" --content -
// ```

use anyhow::{Context, Result, anyhow};
use std::io::{self, IsTerminal, Read};

/// Marker value that means "read from stdin"
pub const STDIN_MARKER: &str = "-";

/// Return `arg` unchanged, or stdin's contents when `arg` is `-`
pub fn read_value_or_stdin(arg: Option<String>) -> Result<Option<String>> {
    match arg.as_deref() {
        Some(STDIN_MARKER) => read_from(io::stdin()).map(Some),
        _ => Ok(arg),
    }
}

fn read_from(stdin: io::Stdin) -> Result<String> {
    if stdin.is_terminal() {
        return Err(anyhow!(
            "No piped input detected for \"-\".\n\nExample:\n  echo \"hello\" | obsidian-runny new --name Hello --content -"
        ));
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;

    // Only the trailing newline most producers add; inner whitespace is content
    let trimmed = buffer.strip_suffix('\n').unwrap_or(&buffer);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_pass_through() {
        assert_eq!(
            read_value_or_stdin(Some("text".to_string())).unwrap(),
            Some("text".to_string())
        );
        assert_eq!(read_value_or_stdin(None).unwrap(), None);
    }
}
