// crates/runny-core/src/action.rs - Obsidian URI actions and typed requests
//
// Each request struct owns the parameters one action accepts, in the order
// they should appear in the URI. Optional fields that are `None` simply
// vanish when converted to a ParamSet.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::params::{ParamResult, ParamSet, ParamValue};
use crate::uri::{UriError, UriResult, format_uri, is_bool_key};

/// Protocol name registered by the Obsidian desktop app
pub const OBSIDIAN_PROTOCOL: &str = "obsidian";

/// Built-in Obsidian URI actions
///
/// Plugins may register further actions, which are carried by `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum UriAction {
    /// Open an existing note
    Open,
    /// Create a new note
    New,
    /// Open the search pane, optionally with a query
    Search,
    /// Open today's note (requires the Daily notes plugin)
    Daily,
    /// Any plugin-defined action
    Other(String),
}

impl UriAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::New => "new",
            Self::Search => "search",
            Self::Daily => "daily",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for UriAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UriAction> for String {
    fn from(action: UriAction) -> Self {
        action.as_str().to_string()
    }
}

impl FromStr for UriAction {
    type Err = UriError;

    fn from_str(s: &str) -> UriResult<Self> {
        Ok(match s {
            "" => return Err(UriError::EmptyResource),
            "open" => Self::Open,
            "new" => Self::New,
            "search" => Self::Search,
            "daily" => Self::Daily,
            other => Self::Other(other.to_string()),
        })
    }
}

/// A request that can be turned into an `obsidian://` URI
pub trait UriRequest {
    fn action(&self) -> UriAction;

    fn params(&self) -> ParamSet;

    fn to_uri(&self) -> UriResult<String> {
        format_uri(OBSIDIAN_PROTOCOL, self.action().as_str(), &self.params())
    }
}

/// Locates a note: by name, vault-relative path, or absolute file path
///
/// Later fields take precedence inside Obsidian: `file` overrides `path`
/// which overrides `name`. All are forwarded and Obsidian decides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteTarget {
    pub name: Option<String>,
    pub path: Option<String>,
    pub file: Option<PathBuf>,
}

impl NoteTarget {
    fn pairs(&self) -> [(&'static str, Option<ParamValue>); 3] {
        [
            ("name", self.name.as_ref().map(ParamValue::from)),
            ("path", self.path.as_ref().map(ParamValue::from)),
            ("file", self.file.as_ref().map(ParamValue::from)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenRequest {
    pub vault: Option<String>,
    pub target: NoteTarget,
    pub prepend: Option<String>,
    pub append: Option<String>,
}

impl UriRequest for OpenRequest {
    fn action(&self) -> UriAction {
        UriAction::Open
    }

    fn params(&self) -> ParamSet {
        let mut params = ParamSet::from_pairs([("vault", self.vault.as_ref())]);
        params.update(self.target.pairs());
        params.update([
            ("prepend", self.prepend.as_ref()),
            ("append", self.append.as_ref()),
        ]);
        params
    }
}

/// Create a note
///
/// The boolean flags are only sent when set, so an unset flag never shows up
/// as `=false` in the URI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRequest {
    pub vault: Option<String>,
    pub target: NoteTarget,
    pub content: Option<String>,
    pub clipboard: bool,
    pub silent: bool,
    pub append: bool,
    pub overwrite: bool,
}

impl UriRequest for NewRequest {
    fn action(&self) -> UriAction {
        UriAction::New
    }

    fn params(&self) -> ParamSet {
        let mut params = ParamSet::from_pairs([("vault", self.vault.as_ref())]);
        params.update(self.target.pairs());
        params.set("content", self.content.as_ref());
        params.update([
            ("clipboard", flag(self.clipboard)),
            ("silent", flag(self.silent)),
            ("append", flag(self.append)),
            ("overwrite", flag(self.overwrite)),
        ]);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub vault: Option<String>,
    pub query: Option<String>,
}

impl UriRequest for SearchRequest {
    fn action(&self) -> UriAction {
        UriAction::Search
    }

    fn params(&self) -> ParamSet {
        ParamSet::from_pairs([
            ("vault", self.vault.as_ref()),
            ("query", self.query.as_ref()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyRequest {
    pub vault: Option<String>,
}

impl UriRequest for DailyRequest {
    fn action(&self) -> UriAction {
        UriAction::Daily
    }

    fn params(&self) -> ParamSet {
        ParamSet::from_pairs([("vault", self.vault.as_ref())])
    }
}

/// Any action with caller-supplied parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub action: UriAction,
    pub params: ParamSet,
}

impl RawRequest {
    /// Build from raw `key=value` strings
    ///
    /// Flag keys spelled `true` or `false` become booleans; anything else is
    /// kept as text and rejected later by the formatter.
    pub fn parse<I, S>(action: UriAction, raw: I) -> ParamResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = ParamSet::from_pair_strings(raw)?;

        // Overwriting keeps each flag in its original position
        let flags: Vec<(String, bool)> = params
            .iter()
            .filter(|(key, _)| is_bool_key(key))
            .filter_map(|(key, value)| match value {
                ParamValue::Str(text) => text.parse().ok().map(|b| (key.to_string(), b)),
                _ => None,
            })
            .collect();
        params.update(flags.into_iter().map(|(key, b)| (key, Some(b))));

        Ok(Self { action, params })
    }
}

impl UriRequest for RawRequest {
    fn action(&self) -> UriAction {
        self.action.clone()
    }

    fn params(&self) -> ParamSet {
        self.params.clone()
    }
}

fn flag(enabled: bool) -> Option<ParamValue> {
    enabled.then_some(ParamValue::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(UriAction::Open.as_str(), "open");
        assert_eq!(UriAction::Daily.to_string(), "daily");
        assert_eq!("search".parse::<UriAction>().unwrap(), UriAction::Search);
        assert_eq!(
            "advanced-uri".parse::<UriAction>().unwrap(),
            UriAction::Other("advanced-uri".to_string())
        );
        assert!("".parse::<UriAction>().is_err());
    }

    #[test]
    fn test_open_request_param_order() {
        let request = OpenRequest {
            vault: Some("Notes".to_string()),
            target: NoteTarget {
                name: Some("Inbox".to_string()),
                ..Default::default()
            },
            append: Some("- [ ] call back".to_string()),
            ..Default::default()
        };
        let keys: Vec<_> = request.params().keys().map(str::to_string).collect();
        assert_eq!(keys, ["vault", "name", "append"]);
        assert_eq!(
            request.to_uri().unwrap(),
            "obsidian://open?vault=Notes&name=Inbox&append=-%20%5B%20%5D%20call%20back"
        );
    }

    #[test]
    fn test_open_request_without_params() {
        assert_eq!(OpenRequest::default().to_uri().unwrap(), "obsidian://open");
    }

    #[test]
    fn test_new_request_flags() {
        let request = NewRequest {
            vault: Some("My Vault".to_string()),
            target: NoteTarget {
                name: Some("Meeting".to_string()),
                ..Default::default()
            },
            silent: true,
            ..Default::default()
        };
        assert_eq!(
            request.to_uri().unwrap(),
            "obsidian://new?vault=My%20Vault&name=Meeting&silent=true"
        );
    }

    #[test]
    fn test_new_request_file_path() {
        let request = NewRequest {
            target: NoteTarget {
                file: Some(PathBuf::from("/tmp/notes/a b.md")),
                ..Default::default()
            },
            content: Some("hello".to_string()),
            overwrite: true,
            ..Default::default()
        };
        assert_eq!(
            request.to_uri().unwrap(),
            "obsidian://new?file=/tmp/notes/a%20b.md&content=hello&overwrite=true"
        );
    }

    #[test]
    fn test_search_and_daily() {
        let search = SearchRequest {
            vault: None,
            query: Some("tag:#idea".to_string()),
        };
        assert_eq!(search.to_uri().unwrap(), "obsidian://search?query=tag%3A%23idea");

        let daily = DailyRequest {
            vault: Some("Work".to_string()),
        };
        assert_eq!(daily.to_uri().unwrap(), "obsidian://daily?vault=Work");
    }

    #[test]
    fn test_raw_request_coerces_flag_keys() {
        let request = RawRequest::parse(UriAction::New, ["name=x", "silent=true"]).unwrap();
        assert_eq!(request.params.get("silent"), Some(&ParamValue::Bool(true)));
        assert_eq!(request.to_uri().unwrap(), "obsidian://new?name=x&silent=true");

        let request = RawRequest::parse(UriAction::Other("daily".into()), ["silent=true"]);
        assert!(request.is_ok());

        let request =
            RawRequest::parse(UriAction::New, ["overwrite=false", "name=x", "mode=true"]).unwrap();
        let keys: Vec<_> = request.params.keys().collect();
        assert_eq!(keys, ["overwrite", "name", "mode"]);
        assert_eq!(request.params.get("overwrite"), Some(&ParamValue::Bool(false)));
        assert_eq!(request.params.get("mode"), Some(&ParamValue::from("true")));
    }

    #[test]
    fn test_raw_request_enforces_bool_keys() {
        let request = RawRequest::parse(UriAction::New, ["name=x", "silent=yes"]).unwrap();
        assert!(matches!(
            request.to_uri(),
            Err(UriError::ExpectedBool { .. })
        ));
    }

    #[test]
    fn test_raw_request_rejects_bad_pairs() {
        assert!(RawRequest::parse(UriAction::Open, ["vault"]).is_err());
    }
}
