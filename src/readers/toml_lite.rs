//! Reduced TOML reader for dependency tables.
//!
//! Supports what common manifests need: `[section]` headers with dotted
//! nesting, `[[array-of-tables]]` headers, bare/quoted/dotted keys, strings,
//! booleans, integers, inline arrays (including multi-line), and inline
//! tables. Anything else (floats, dates, exotic escapes) falls back to the
//! raw string so one unusual value never sinks a whole manifest.
//!
//! Output is a `serde_json::Value` object tree; dotted section names build
//! nested maps. Writing a nested key through an existing non-table value is
//! a collision error rather than silent replacement.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TomlLiteError {
    #[error("line {line}: key `{key}` collides with an existing non-table value")]
    KeyCollision { line: usize, key: String },

    #[error("line {line}: malformed entry")]
    Malformed { line: usize },

    #[error("unterminated value starting at line {line}")]
    Unterminated { line: usize },
}

/// Parse a TOML-subset document into a JSON object tree.
pub fn parse(input: &str) -> Result<Value, TomlLiteError> {
    let mut root = Map::new();
    // Path of the table new keys land in, set by the last section header.
    let mut section: Vec<String> = Vec::new();

    let lines: Vec<&str> = input.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line_no = i + 1;
        let line = strip_comment(lines[i]);
        let trimmed = line.trim();
        i += 1;

        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix("[[") {
            let Some(name) = header.strip_suffix("]]") else {
                return Err(TomlLiteError::Malformed { line: line_no });
            };
            section = split_key_path(name.trim());
            push_array_table(&mut root, &section, line_no)?;
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(TomlLiteError::Malformed { line: line_no });
            };
            section = split_key_path(name.trim());
            ensure_table(&mut root, &section, line_no)?;
            continue;
        }

        let Some(eq) = find_unquoted(trimmed, '=') else {
            return Err(TomlLiteError::Malformed { line: line_no });
        };
        let key_part = trimmed[..eq].trim();
        let mut value_part = trimmed[eq + 1..].trim().to_string();

        // Multi-line inline arrays: keep consuming until brackets balance.
        while bracket_balance(&value_part) > 0 {
            if i >= lines.len() {
                return Err(TomlLiteError::Unterminated { line: line_no });
            }
            value_part.push(' ');
            value_part.push_str(strip_comment(lines[i]).trim());
            i += 1;
        }

        let mut path = section.clone();
        path.extend(split_key_path(key_part));
        let value = parse_value(&value_part);
        insert(&mut root, &path, value, line_no)?;
    }

    Ok(Value::Object(root))
}

/// Dotted-path lookup into a parsed document, e.g. `tool.poetry.dependencies`.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn split_key_path(raw: &str) -> Vec<String> {
    // Dotted keys split on '.' outside quotes; quoted segments keep dots.
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in raw.chars() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '.') => {
                segments.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    segments.push(current.trim().to_string());
    segments
}

fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, c) in line.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '#') => return &line[..idx],
            _ => {}
        }
    }
    line
}

fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, _) if c == target => return Some(idx),
            _ => {}
        }
    }
    None
}

fn bracket_balance(s: &str) -> i32 {
    let mut quote: Option<char> = None;
    let mut balance = 0;
    for c in s.chars() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') | (None, '{') => balance += 1,
            (None, ']') | (None, '}') => balance -= 1,
            _ => {}
        }
    }
    balance
}

fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();

    if let Some(inner) = quoted(raw) {
        return Value::String(inner);
    }
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = raw.replace('_', "").parse::<i64>() {
        return Value::Number(n.into());
    }
    if raw.starts_with('[') && raw.ends_with(']') {
        let items = split_top_level(&raw[1..raw.len() - 1]);
        return Value::Array(items.iter().map(|s| parse_value(s)).collect());
    }
    if raw.starts_with('{') && raw.ends_with('}') {
        let mut table = Map::new();
        for item in split_top_level(&raw[1..raw.len() - 1]) {
            if let Some(eq) = find_unquoted(&item, '=') {
                let key = unquote_key(item[..eq].trim());
                table.insert(key, parse_value(item[eq + 1..].trim()));
            }
        }
        return Value::Object(table);
    }

    // Floats, dates, anything else: keep the literal text.
    Value::String(raw.to_string())
}

fn quoted(raw: &str) -> Option<String> {
    let first = raw.chars().next()?;
    if (first == '"' || first == '\'') && raw.len() >= 2 && raw.ends_with(first) {
        let inner = &raw[1..raw.len() - 1];
        if first == '"' {
            return Some(
                inner
                    .replace("\\\"", "\"")
                    .replace("\\\\", "\\")
                    .replace("\\n", "\n")
                    .replace("\\t", "\t"),
            );
        }
        return Some(inner.to_string());
    }
    None
}

fn unquote_key(raw: &str) -> String {
    quoted(raw).unwrap_or_else(|| raw.to_string())
}

fn split_top_level(s: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0;
    for c in s.chars() {
        match (quote, c) {
            (Some(q), _) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), _) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '[') | (None, '{') => {
                depth += 1;
                current.push(c);
            }
            (None, ']') | (None, '}') => {
                depth -= 1;
                current.push(c);
            }
            (None, ',') if depth == 0 => {
                items.push(current.trim().to_string());
                current = String::new();
            }
            (None, _) => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }
    items
}

fn ensure_table<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
    line: usize,
) -> Result<&'a mut Map<String, Value>, TomlLiteError> {
    let mut current = root;
    for segment in path {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            Value::Array(items) => {
                // Walking through an array-of-tables lands in its last table.
                match items.last_mut() {
                    Some(Value::Object(map)) => map,
                    _ => {
                        return Err(TomlLiteError::KeyCollision {
                            line,
                            key: segment.clone(),
                        })
                    }
                }
            }
            _ => {
                return Err(TomlLiteError::KeyCollision {
                    line,
                    key: segment.clone(),
                })
            }
        };
    }
    Ok(current)
}

fn push_array_table(
    root: &mut Map<String, Value>,
    path: &[String],
    line: usize,
) -> Result<(), TomlLiteError> {
    let (last, parents) = path.split_last().ok_or(TomlLiteError::Malformed { line })?;
    let parent = ensure_table(root, parents, line)?;
    let slot = parent
        .entry(last.clone())
        .or_insert_with(|| Value::Array(Vec::new()));
    match slot {
        Value::Array(items) => {
            items.push(Value::Object(Map::new()));
            Ok(())
        }
        _ => Err(TomlLiteError::KeyCollision {
            line,
            key: last.clone(),
        }),
    }
}

fn insert(
    root: &mut Map<String, Value>,
    path: &[String],
    value: Value,
    line: usize,
) -> Result<(), TomlLiteError> {
    let (last, parents) = path.split_last().ok_or(TomlLiteError::Malformed { line })?;
    let parent = ensure_table(root, parents, line)?;
    parent.insert(last.clone(), value);
    Ok(())
}
