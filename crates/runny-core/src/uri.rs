// crates/runny-core/src/uri.rs - URI assembly and percent-encoding
//
// Builds `protocol://resource?key=value&...` strings. The rules are the
// conventional "quote" rules: unreserved characters and `/` pass through,
// everything else is percent-encoded byte by byte. Spaces become `%20`,
// never `+`, since Obsidian does not decode `+` as a space.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::params::{ParamSet, ParamValue};

/// Errors that can occur while formatting a URI
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UriError {
    #[error("Invalid protocol: {0:?}")]
    InvalidProtocol(String),

    #[error("Resource must not be empty")]
    EmptyResource,

    #[error("Expected bool value for {key}, not {value:?}")]
    ExpectedBool { key: String, value: String },
}

/// Result type for URI operations
pub type UriResult<T> = Result<T, UriError>;

/// Bytes left untouched by `quote`
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Parameter keys whose values must be booleans
///
/// Obsidian reads these as flags and only understands the literal strings
/// `true` and `false`.
pub const BOOL_KEYS: &[&str] = &["clipboard", "silent", "overwrite"];

/// Whether `key` is formatted as a boolean flag
pub fn is_bool_key(key: &str) -> bool {
    BOOL_KEYS.contains(&key)
}

/// Percent-encode a string for use in a URI
pub fn quote(s: &str) -> String {
    utf8_percent_encode(s, QUOTE_SAFE).to_string()
}

/// Format one `key=value` pair
pub fn format_param_pair(key: &str, value: &ParamValue) -> UriResult<String> {
    let rendered = if is_bool_key(key) {
        match value.as_bool() {
            Some(true) => "true".to_string(),
            Some(false) => "false".to_string(),
            None => {
                return Err(UriError::ExpectedBool {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
    } else {
        quote(&value.to_string())
    };

    Ok(format!("{}={}", quote(key), rendered))
}

/// Format the whole parameter block, joined with `&`
pub fn format_parameters(params: &ParamSet) -> UriResult<String> {
    let pairs = params
        .iter()
        .map(|(k, v)| format_param_pair(k, v))
        .collect::<UriResult<Vec<_>>>()?;
    Ok(pairs.join("&"))
}

/// Assemble a URI using the default parameter formatter
///
/// EXAMPLES:
/// ```text
/// format_uri("obsidian", "new", {})                   -> obsidian://new
/// format_uri("obsidian", "new", {vault: "My Vault"})  -> obsidian://new?vault=My%20Vault
/// ```
pub fn format_uri(protocol: &str, resource: &str, params: &ParamSet) -> UriResult<String> {
    format_uri_with(protocol, resource, params, format_parameters)
}

/// Assemble a URI with a caller-supplied parameter formatter
///
/// The formatter is only invoked when `params` is non-empty, so an empty set
/// never produces a trailing `?`.
pub fn format_uri_with<F>(
    protocol: &str,
    resource: &str,
    params: &ParamSet,
    formatter: F,
) -> UriResult<String>
where
    F: FnOnce(&ParamSet) -> UriResult<String>,
{
    validate_protocol(protocol)?;
    if resource.is_empty() {
        return Err(UriError::EmptyResource);
    }

    let mut uri = format!("{}://{}", protocol, quote(resource));
    if !params.is_empty() {
        uri.push('?');
        uri.push_str(&formatter(params)?);
    }

    Ok(uri)
}

/// Scheme tokens: a letter followed by letters, digits, `+`, `-` or `.`
fn validate_protocol(protocol: &str) -> UriResult<()> {
    let mut chars = protocol.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(UriError::InvalidProtocol(protocol.to_string()))
    }
}
