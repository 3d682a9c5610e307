//! # runny-core
//!
//! Building blocks for driving Obsidian through its `obsidian://` URI scheme.
//!
//! - [`params`]: [`ParamSet`], an ordered map that never holds absent values
//! - [`uri`]: percent-encoding and `protocol://resource?k=v` assembly
//! - [`action`]: the built-in actions and one request type per action
//! - [`launcher`]: per-platform programs that open a URI
//! - [`config`]: YAML configuration and log levels
//!
//! ```
//! use runny_core::{NewRequest, NoteTarget, UriRequest};
//!
//! let request = NewRequest {
//!     vault: Some("My Vault".into()),
//!     target: NoteTarget { name: Some("Inbox".into()), ..Default::default() },
//!     ..Default::default()
//! };
//! assert_eq!(request.to_uri().unwrap(), "obsidian://new?vault=My%20Vault&name=Inbox");
//! ```

pub mod action;
pub mod config;
pub mod launcher;
pub mod params;
pub mod uri;

use thiserror::Error;

pub use action::{
    DailyRequest, NewRequest, NoteTarget, OBSIDIAN_PROTOCOL, OpenRequest, RawRequest,
    SearchRequest, UriAction, UriRequest,
};
pub use config::{ConfigError, LogLevel, RunnyConfig};
pub use launcher::{LaunchError, LauncherKind, MacOpen, UriLauncher, WindowsStart, XdgOpen};
pub use params::{ParamError, ParamSet, ParamSetBuilder, ParamSource, ParamValue};
pub use uri::{UriError, format_parameters, format_uri, format_uri_with, quote};

/// Any error produced by this crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Uri(#[from] UriError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for operations spanning several modules
pub type Result<T> = std::result::Result<T, Error>;

/// Format `request` and hand it to `launcher`, returning the URI
pub fn run_request(request: &dyn UriRequest, launcher: &dyn UriLauncher) -> Result<String> {
    let uri = request.to_uri()?;
    tracing::info!(action = %request.action(), uri = %uri, "opening obsidian uri");
    launcher.launch(&uri)?;
    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    /// Re-runs this test binary with `--list`, which exits straight away
    struct Noop;

    impl UriLauncher for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn command(&self, _uri: &str) -> Command {
            let mut cmd = Command::new(std::env::current_exe().unwrap());
            cmd.arg("--list")
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null());
            cmd
        }
    }

    #[test]
    fn test_run_request_returns_uri() {
        let request = SearchRequest {
            vault: None,
            query: Some("todo".to_string()),
        };
        let uri = run_request(&request, &Noop).unwrap();
        assert_eq!(uri, "obsidian://search?query=todo");
    }

    #[test]
    fn test_run_request_stops_on_format_error() {
        let request = RawRequest {
            action: UriAction::New,
            params: ParamSet::from_pairs([("silent", Some("maybe"))]),
        };
        assert!(matches!(
            run_request(&request, &Noop),
            Err(Error::Uri(UriError::ExpectedBool { .. }))
        ));
    }
}
