use log::warn;
use regex::Regex;

// Re-export the case conversion helpers the filters build on
pub use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    snake::to_snake_case, train::to_train_case,
};

/// Splits a free-form name into its `/`-separated namespace segments and
/// the final artifact segment.
fn split_segments(value: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> =
        value.split('/').map(str::trim).filter(|s| !s.is_empty()).collect();
    let last = segments.pop().unwrap_or("");
    (segments, last)
}

/// Hyphenated lowercase file name from the final segment, with optional
/// prefix and suffix.
///
/// `'Admin/Settings Page' | file_case('class-', '.php')` renders
/// `class-settings-page.php`.
pub fn file_case(value: String, prefix: Option<String>, suffix: Option<String>) -> String {
    let (_, name) = split_segments(&value);
    format!(
        "{}{}{}",
        prefix.unwrap_or_default(),
        to_kebab_case(name),
        suffix.unwrap_or_default()
    )
}

/// Underscore-joined capitalized identifier from the final segment:
/// `'Admin/Settings Page' | id_case` renders `Settings_Page`.
pub fn id_case(value: String) -> String {
    let (_, name) = split_segments(&value);
    to_train_case(name).replace('-', "_")
}

/// Concatenated-capitalized (PSR-style) identifier from the final segment:
/// `'Admin/Settings Page' | class_case` renders `SettingsPage`.
pub fn class_case(value: String) -> String {
    let (_, name) = split_segments(&value);
    to_pascal_case(name)
}

/// Namespace string built from the non-final segments, each capitalized
/// PSR-style, joined with `separator` and optionally prefixed with a base
/// namespace.
///
/// `'Admin/Settings Page' | namespace('\\', 'Acme')` renders `Acme\Admin`.
pub fn namespace(value: String, separator: String, base: Option<String>) -> String {
    let (segments, _) = split_segments(&value);
    let mut parts: Vec<String> = Vec::with_capacity(segments.len() + 1);
    if let Some(base) = base {
        if !base.is_empty() {
            parts.push(base);
        }
    }
    parts.extend(segments.iter().map(|s| to_pascal_case(s)));
    parts.join(&separator)
}

/// Tests if a string matches a regular expression pattern. Invalid patterns
/// log a warning and never match.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}
