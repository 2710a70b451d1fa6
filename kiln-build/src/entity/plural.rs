//! English pluralisation for entity and member names.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;

static IRREGULARS: Lazy<RwLock<HashMap<String, String>>> = Lazy::new(|| {
    let pairs = [
        ("person", "people"),
        ("man", "men"),
        ("woman", "women"),
        ("child", "children"),
        ("tooth", "teeth"),
        ("foot", "feet"),
        ("mouse", "mice"),
        ("datum", "data"),
        ("leaf", "leaves"),
        ("life", "lives"),
        ("knife", "knives"),
        ("wife", "wives"),
        ("half", "halves"),
        ("status", "statuses"),
    ];
    RwLock::new(pairs.iter().map(|(s, p)| (s.to_string(), p.to_string())).collect())
});

static UNCOUNTABLE: &[&str] = &["equipment", "information", "money", "series", "species", "news", "sheep", "fish"];

static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+$").expect("static pattern"));

/// Register an irregular singular/plural pair, overriding any existing entry.
pub fn register(singular: &str, plural: &str) {
    if let Ok(mut map) = IRREGULARS.write() {
        map.insert(singular.to_lowercase(), plural.to_lowercase());
    }
}

fn irregular_plural(word: &str) -> Option<String> {
    IRREGULARS.read().ok()?.get(word).cloned()
}

fn irregular_singular(word: &str) -> Option<String> {
    let map = IRREGULARS.read().ok()?;
    map.iter().find(|(_, p)| p.as_str() == word).map(|(s, _)| s.clone())
}

/// Pluralise a single lower-case word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if TRAILING_DIGITS.is_match(word) {
        return format!("{word}s");
    }
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some(plural) = irregular_plural(word) {
        return plural;
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with('z') || word.ends_with("ch") || word.ends_with("sh") {
        format!("{word}es")
    } else if word.ends_with('y')
        && !word.ends_with("ay")
        && !word.ends_with("ey")
        && !word.ends_with("oy")
        && !word.ends_with("uy")
    {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{word}s")
    }
}

/// Best-effort inverse of [`pluralize`], used when deriving entity names from table names.
pub fn singularize(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some(singular) = irregular_singular(word) {
        return singular;
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
