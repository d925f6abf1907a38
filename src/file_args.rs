//! `@FileArg(...)` expansion for command-line arguments
//!
//! Build files often pass lists that are only known at generation time by
//! pointing into a JSON file instead of spelling them out:
//!
//! ```text
//! --source-file=@FileArg(gen/params.json:sources:system)
//! ```
//!
//! Each `@FileArg(path:key1:key2...)` is replaced by the value found by
//! following the keys into the JSON document at `path`. Arrays expand to a
//! GN-style list literal, strings expand without quotes. Text around the
//! reference is kept either way.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for argument expansion
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FileArgError {
    /// Referenced JSON file could not be read
    #[error("@FileArg: failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Referenced file is not valid JSON
    #[error("@FileArg: invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A lookup key is missing
    #[error("@FileArg: key '{key}' not found in {}", .path.display())]
    MissingKey { path: PathBuf, key: String },
}

fn file_arg_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@FileArg\((.*?)\)").expect("static regex is valid"))
}

/// Expand every `@FileArg(...)` reference in `args`.
///
/// Only the first reference in each argument is expanded; the text before and
/// after it is kept for list and scalar values alike. Arguments that are not
/// valid UTF-8 pass through untouched. Each JSON file is read once.
pub fn expand_file_args<I>(args: I) -> Result<Vec<OsString>, FileArgError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut documents: HashMap<String, Value> = HashMap::new();
    let mut expanded = Vec::new();

    for arg in args {
        let Some(text) = arg.to_str() else {
            expanded.push(arg);
            continue;
        };
        let Some(caps) = file_arg_pattern().captures(text) else {
            expanded.push(arg);
            continue;
        };
        let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) else {
            expanded.push(arg);
            continue;
        };

        let mut lookup = spec.as_str().split(':');
        let file = lookup.next().unwrap_or_default().to_string();
        if !documents.contains_key(&file) {
            let document = load_json(&file)?;
            documents.insert(file.clone(), document);
        }

        let mut value = &documents[&file];
        for key in lookup {
            value = lookup_key(value, key).ok_or_else(|| FileArgError::MissingKey {
                path: PathBuf::from(&file),
                key: key.to_string(),
            })?;
        }

        let expansion = match value {
            Value::Array(items) => to_gn_list(items),
            other => scalar_text(other),
        };
        let replaced = format!("{}{}{}", &text[..whole.start()], expansion, &text[whole.end()..]);
        tracing::debug!("expanded {} -> {}", text, replaced);
        expanded.push(OsString::from(replaced));
    }

    Ok(expanded)
}

fn load_json(file: &str) -> Result<Value, FileArgError> {
    let path = PathBuf::from(file);
    let contents = fs::read_to_string(&path)
        .map_err(|source| FileArgError::Io { path: path.clone(), source })?;
    serde_json::from_str(&contents).map_err(|source| FileArgError::Json { path, source })
}

fn lookup_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a JSON array the way GN writes list literals.
fn to_gn_list(items: &[Value]) -> String {
    let parts: Vec<String> = items.iter().map(to_gn_value).collect();
    format!("[{}]", parts.join(", "))
}

fn to_gn_value(value: &Value) -> String {
    match value {
        Value::String(s) => {
            let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$");
            format!("\"{}\"", escaped)
        }
        Value::Array(items) => to_gn_list(items),
        other => other.to_string(),
    }
}

/// Split a GN list literal produced by [`expand_file_args`] back into items.
///
/// A value that is not a list literal is returned as a single item.
pub fn parse_gn_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return vec![value.to_string()];
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in trimmed[1..trimmed.len() - 1].chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' if !in_string => in_string = true,
            '"' if in_string => {
                in_string = false;
                items.push(std::mem::take(&mut current));
            }
            _ if in_string => current.push(ch),
            _ => {}
        }
    }

    items
}
