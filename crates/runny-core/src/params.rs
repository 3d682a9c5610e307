// crates/runny-core/src/params.rs - Null-filtering parameter container
//
// Obsidian's URI scheme has no notion of a null value: a parameter is either
// present with a value or it is not sent at all. ParamSet encodes that rule
// in the container itself so callers can pass optional CLI values straight
// through without filtering them first.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// Errors raised while building a parameter set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Can't set from a positional source and keyword values at the same time")]
    ConflictingSources,

    #[error("Expected at most one positional source, got {0}")]
    MultipleSources(usize),

    #[error("Invalid parameter key: {0:?}")]
    InvalidKey(String),

    #[error("Expected a key=value pair, got {0:?}")]
    MalformedPair(String),
}

/// Result type for parameter operations
pub type ParamResult<T> = Result<T, ParamError>;

/// A single parameter value
///
/// Booleans are kept distinct from strings so the URI formatter can enforce
/// that flag-style keys only ever carry `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Path(PathBuf),
}

impl ParamValue {
    /// Returns the boolean if this is a `Bool` value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

}

// Paths serialize as the same lossy text they render to in a URI, so a
// non-UTF-8 path never fails serialization.
impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Path(p) => serializer.serialize_str(&p.to_string_lossy()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<PathBuf> for ParamValue {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<&PathBuf> for ParamValue {
    fn from(value: &PathBuf) -> Self {
        Self::Path(value.clone())
    }
}

/// Ordered key/value parameters with no absent values
///
/// RULES:
/// 1. Constructing from pairs or a map skips every `(k, None)` entry
/// 2. `set(k, None)` deletes `k` if present and is a no-op otherwise
/// 3. Overwriting an existing key keeps its original position
///
/// Iteration order is insertion order, which is also the order parameters
/// appear in the formatted URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamSet {
    entries: IndexMap<String, ParamValue>,
}

impl ParamSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder that mirrors "one positional source or keywords" construction
    pub fn builder() -> ParamSetBuilder {
        ParamSetBuilder::default()
    }

    /// Build from `(key, Option<value>)` pairs, dropping `None` values
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut set = Self::new();
        set.update(pairs);
        set
    }

    /// Build from a mapping, dropping `None` values
    pub fn from_map(map: IndexMap<String, Option<ParamValue>>) -> Self {
        Self::from_pairs(map)
    }

    /// Parse raw `key=value` strings, as given on a command line
    ///
    /// Only the first `=` splits; the value may itself contain `=`.
    pub fn from_pair_strings<I, S>(raw: I) -> ParamResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for item in raw {
            let (key, value) = Self::parse_pair(item.as_ref())?;
            set.set(key, Some(value));
        }
        Ok(set)
    }

    /// Split a single `key=value` string
    pub fn parse_pair(raw: &str) -> ParamResult<(String, String)> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| ParamError::MalformedPair(raw.to_string()))?;
        validate_key(key)?;
        Ok((key.to_string(), value.to_string()))
    }

    /// Store `value` under `key`, or remove `key` when `value` is `None`
    pub fn set<K, V>(&mut self, key: K, value: Option<V>)
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let key = key.into();
        match value {
            Some(v) => {
                self.entries.insert(key, v.into());
            }
            None => {
                if self.entries.shift_remove(&key).is_some() {
                    trace!(key = %key, "removed parameter set to none");
                }
            }
        }
    }

    /// Apply `set` to each pair in order
    pub fn update<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        for (k, v) in pairs {
            self.set(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for ParamSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A positional construction source: a sequence of pairs or a mapping
#[derive(Debug, Clone)]
pub enum ParamSource {
    Pairs(Vec<(String, Option<ParamValue>)>),
    Map(IndexMap<String, Option<ParamValue>>),
}

impl ParamSource {
    fn into_pairs(self) -> Vec<(String, Option<ParamValue>)> {
        match self {
            Self::Pairs(pairs) => pairs,
            Self::Map(map) => map.into_iter().collect(),
        }
    }
}

impl From<Vec<(String, Option<ParamValue>)>> for ParamSource {
    fn from(pairs: Vec<(String, Option<ParamValue>)>) -> Self {
        Self::Pairs(pairs)
    }
}

impl From<IndexMap<String, Option<ParamValue>>> for ParamSource {
    fn from(map: IndexMap<String, Option<ParamValue>>) -> Self {
        Self::Map(map)
    }
}

/// Builder accepting either one positional source or keyword values
///
/// Supplying both is a usage error even when the positional source is empty,
/// so mistakes in calling code are surfaced instead of silently merged.
#[derive(Debug, Default)]
pub struct ParamSetBuilder {
    sources: Vec<ParamSource>,
    keywords: Vec<(String, Option<ParamValue>)>,
}

impl ParamSetBuilder {
    pub fn source(mut self, source: impl Into<ParamSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn keyword<K, V>(mut self, key: K, value: Option<V>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.keywords.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn build(mut self) -> ParamResult<ParamSet> {
        let pairs = match (self.sources.len(), self.keywords.is_empty()) {
            (0, _) => self.keywords,
            (1, true) => match self.sources.pop() {
                Some(source) => source.into_pairs(),
                None => Vec::new(),
            },
            (1, false) => return Err(ParamError::ConflictingSources),
            (n, _) => return Err(ParamError::MultipleSources(n)),
        };

        for (key, _) in &pairs {
            validate_key(key)?;
        }

        Ok(ParamSet::from_pairs(pairs))
    }
}

fn validate_key(key: &str) -> ParamResult<()> {
    if key.is_empty() {
        return Err(ParamError::InvalidKey(key.to_string()));
    }
    Ok(())
}
