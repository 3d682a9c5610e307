// crates/runny-core/src/launcher.rs - Hand URIs to the platform's default handler
//
// One small type per platform, chosen once at startup:
// - Linux, BSD and other POSIX-likes: xdg-open
// - macOS: open
// - Windows: rundll32's URL protocol handler
//
// Arguments are passed straight to the program, never through a shell, so
// `&` and `?` in the URI need no extra quoting.

use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while launching a URI
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{platform} (assumed POSIX-like) has no xdg-open on PATH.\nPlease file an issue at https://github.com/pushfoo/obsidian-runny/issues/new")]
    Unsupported { platform: String },

    #[error("Unknown launcher {0:?}. Expected one of: auto, xdg, mac, windows")]
    UnknownKind(String),

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for launcher operations
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Opens a URI with some external program
///
/// Implementors only describe the command; spawning is shared. The launch is
/// fire-and-forget: the child is not waited on and its exit status is not
/// checked.
pub trait UriLauncher {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// The command that would open `uri`
    fn command(&self, uri: &str) -> Command;

    fn launch(&self, uri: &str) -> LaunchResult<()> {
        let mut cmd = self.command(uri);
        let program = cmd.get_program().to_string_lossy().into_owned();
        debug!(launcher = self.name(), command = ?cmd, "spawning launcher");

        let child = cmd
            .spawn()
            .map_err(|source| LaunchError::Spawn { program, source })?;

        info!(launcher = self.name(), pid = child.id(), "handed URI to launcher");
        Ok(())
    }
}

/// `xdg-open`, the freedesktop URI / mimetype router
///
/// See <https://portland.freedesktop.org/doc/xdg-open.html>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XdgOpen {
    /// Keep xdg-open's stdout and stderr instead of discarding them
    pub log: bool,

    /// Let the handler die with the user's session (skips `nohup`)
    pub hup: bool,
}

impl UriLauncher for XdgOpen {
    fn name(&self) -> &'static str {
        "xdg-open"
    }

    fn command(&self, uri: &str) -> Command {
        let mut cmd = if self.hup {
            Command::new("xdg-open")
        } else {
            let mut nohup = Command::new("nohup");
            nohup.arg("xdg-open");
            nohup
        };
        cmd.arg(uri).stdin(Stdio::null());

        if !self.log {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        cmd
    }
}

/// macOS `open`, in the background so Obsidian doesn't steal focus twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MacOpen;

impl UriLauncher for MacOpen {
    fn name(&self) -> &'static str {
        "open"
    }

    fn command(&self, uri: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg("-g").arg(uri);
        cmd
    }
}

/// Windows protocol handler via `rundll32`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowsStart;

impl UriLauncher for WindowsStart {
    fn name(&self) -> &'static str {
        "rundll32"
    }

    fn command(&self, uri: &str) -> Command {
        let mut cmd = Command::new("rundll32");
        cmd.arg("url.dll,FileProtocolHandler").arg(uri);
        cmd
    }
}

/// Launcher choice as written in config files and on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LauncherKind {
    /// Pick by the platform this binary was built for
    #[default]
    Auto,
    Xdg,
    Mac,
    Windows,
}

impl LauncherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Xdg => "xdg",
            Self::Mac => "mac",
            Self::Windows => "windows",
        }
    }

    /// Build the launcher, detecting the platform for `Auto`
    pub fn resolve(self, xdg: XdgOpen) -> LaunchResult<Box<dyn UriLauncher>> {
        match self {
            Self::Xdg => Ok(Box::new(xdg)),
            Self::Mac => Ok(Box::new(MacOpen)),
            Self::Windows => Ok(Box::new(WindowsStart)),
            Self::Auto => detect(xdg),
        }
    }
}

impl fmt::Display for LauncherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LauncherKind {
    type Err = LaunchError;

    fn from_str(s: &str) -> LaunchResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "xdg" | "xdg-open" => Ok(Self::Xdg),
            "mac" | "macos" | "open" => Ok(Self::Mac),
            "windows" | "start" => Ok(Self::Windows),
            _ => Err(LaunchError::UnknownKind(s.to_string())),
        }
    }
}

fn detect(xdg: XdgOpen) -> LaunchResult<Box<dyn UriLauncher>> {
    if cfg!(target_os = "windows") {
        return Ok(Box::new(WindowsStart));
    }
    if cfg!(target_os = "macos") {
        return Ok(Box::new(MacOpen));
    }

    // Linux and BSD-likes: hope for xdg-utils, fail loudly if absent
    if command_on_path("xdg-open") {
        Ok(Box::new(xdg))
    } else {
        Err(LaunchError::Unsupported {
            platform: env::consts::OS.to_string(),
        })
    }
}

fn command_on_path(program: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| command_on_path_in(&paths, program))
}

/// Whether `program` is a file in any directory of a PATH-style list
fn command_on_path_in(paths: &OsStr, program: &str) -> bool {
    env::split_paths(paths).any(|dir| is_file(&dir.join(program)))
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
