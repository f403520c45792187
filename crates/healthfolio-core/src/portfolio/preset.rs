//! Preset data-file reader.
//!
//! Preset files are small script-like documents of the form
//! `var fund_data_list = { all_money: 100, yuji: {...}, list: [...] }`,
//! written with unquoted keys, `//` line comments and trailing commas.
//! The reader rewrites that object literal into strict JSON and parses it;
//! a bare array is accepted as a list-only preset.

use std::path::Path;

use thiserror::Error;

use crate::models::{PresetData, RawAsset};

/// Preset reader errors.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("failed to read preset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("preset is not an object or array")]
    UnexpectedShape,

    #[error("preset parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PresetResult<T> = Result<T, PresetError>;

/// Read and parse a preset file.
pub fn load_preset_file<P: AsRef<Path>>(path: P) -> PresetResult<PresetData> {
    let text = std::fs::read_to_string(path)?;
    parse_preset(&text)
}

/// Parse preset script text.
pub fn parse_preset(text: &str) -> PresetResult<PresetData> {
    let literal = strip_assignment(text);
    let json = jsonify(&strip_comments(literal));

    let value: serde_json::Value = serde_json::from_str(&json)?;
    match value {
        serde_json::Value::Array(_) => {
            let list: Vec<RawAsset> = serde_json::from_value(value)?;
            Ok(PresetData { list, ..Default::default() })
        }
        serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(PresetError::UnexpectedShape),
    }
}

/// Drop a leading `var <name> =` and a trailing semicolon.
fn strip_assignment(text: &str) -> &str {
    let trimmed = text.trim();
    let body = match trimmed.find('=') {
        Some(idx) if looks_like_assignment(&trimmed[..idx]) => &trimmed[idx + 1..],
        _ => trimmed,
    };
    body.trim().trim_end_matches(';').trim_end()
}

fn looks_like_assignment(head: &str) -> bool {
    let mut words = head.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(kw), Some(name), None) => {
            matches!(kw, "var" | "let" | "const")
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Remove `//` line comments, leaving string contents alone.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Rewrite a comment-free object literal into strict JSON: quote bare keys
/// and drop trailing commas. `true`/`false`/`null` stay bare words.
fn jsonify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    let mut in_string = false;
    let mut escaped = false;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();

                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                let is_key = chars.get(j) == Some(&':');
                if is_key && !matches!(word.as_str(), "true" | "false" | "null") {
                    out.push('"');
                    out.push_str(&word);
                    out.push('"');
                } else {
                    out.push_str(&word);
                }
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                let dangling = matches!(chars.get(j).copied(), Some('}') | Some(']') | None);
                if !dangling {
                    out.push(',');
                }
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
