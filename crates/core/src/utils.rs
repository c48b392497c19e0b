//! Common utilities for source generation.
//!
//! This module provides shared helper functions used by the formatters and the
//! generation driver.

use serde::Serialize;

/// Render `text` as a comment block.
///
/// The text is trimmed; each line is prefixed with `indent` and `comment_str`
/// and has trailing whitespace removed. Empty or missing text renders as an
/// empty string.
pub fn comment_block(text: Option<&str>, indent: &str, comment_str: &str) -> String {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };
    text.lines()
        .map(|line| format!("{indent}{comment_str}{line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if an identifier needs quoting when used as a property key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in double-quoted string literals.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a string if needed for use as a property key.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert `snake_case`, `kebab-case`, dotted or camelCase names to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    name.split(['_', '-', '.', ' '])
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}

/// Replace every `{placeholder}` in a path template with `render(placeholder)`.
///
/// Text outside braces is copied unchanged. An unterminated `{` is copied
/// through literally.
pub fn substitute_path_params(path: &str, render: impl Fn(&str) -> String) -> String {
    let mut result = String::with_capacity(path.len());
    let mut placeholder = String::new();
    let mut in_param = false;

    for c in path.chars() {
        match c {
            '{' if !in_param => {
                in_param = true;
                placeholder.clear();
            }
            '}' if in_param => {
                result.push_str(&render(&placeholder));
                in_param = false;
            }
            _ if in_param => placeholder.push(c),
            _ => result.push(c),
        }
    }
    if in_param {
        result.push('{');
        result.push_str(&placeholder);
    }

    result
}

/// Pretty-print any serializable value as JSON.
pub fn dump(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

/// Tagged JSON dump, e.g. `method:{...}`, for debug output.
pub fn debug(tag: &str, value: &impl Serialize, indent: &str) -> String {
    format!("{indent}{tag}:{}", dump(value))
}
