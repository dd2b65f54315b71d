//! Placeholder substitution for the build templates.
//!
//! A placeholder is `{{name}}` where `name` is ASCII letters, digits and
//! underscores. A double quote directly before or after the braces is
//! consumed with the token, so the substituted value decides whether the
//! output is quoted. Absent or falsy values render as `false`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Number, Value};
use std::collections::BTreeSet;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""?\{\{([A-Za-z0-9_]+)\}\}"?"#).expect("placeholder pattern is valid")
});

const FALSY: &str = "false";

/// Replace every placeholder in `template` with its value from `values`.
///
/// Single pass: placeholders inside substituted values are left as they are.
pub fn render(template: &str, values: &Map<String, Value>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| substitution(values.get(&caps[1])))
        .into_owned()
}

/// Placeholder names used by `template` that have no entry in `values`
pub fn missing_keys(template: &str, values: &Map<String, Value>) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|name| !values.contains_key(name))
        .collect()
}

fn substitution(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => FALSY.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::String(s)) if s.is_empty() => FALSY.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format_number(n),
        Some(other) => other.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return if i == 0 { FALSY.to_string() } else { i.to_string() };
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => FALSY.to_string(),
        // 2.0 renders as "2", the way it was typed in the admin form
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
