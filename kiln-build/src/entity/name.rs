//! Identifier normalisation shared by every generator.

use std::fmt;

use heck::{ToSnakeCase, ToUpperCamelCase};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::plural;

/// Words rendered fully upper-cased in camel forms, with an optional digit and plural `s`.
static SPECIAL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(id|url|os)([0-9]?)(s?)$").expect("static pattern"));

/// An entity or member name.
///
/// The source string is kept as written; every rendering goes through the snake-case form so
/// `UserID`, `user_id` and `userId` all describe the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `user_id`
    pub fn snake(&self) -> String {
        self.0.to_snake_case()
    }

    /// `user_ids`
    pub fn plural_snake(&self) -> String {
        let mut words = self.words();
        if let Some(last) = words.last_mut() {
            *last = plural::pluralize(last);
        }
        words.join("_")
    }

    /// `UserID`
    pub fn camel(&self) -> String {
        camel_words(&self.words(), true)
    }

    /// `UserIDs`
    pub fn plural_camel(&self) -> String {
        camel_words(&Name::new(self.plural_snake()).words(), true)
    }

    /// `userID`
    pub fn lower_camel(&self) -> String {
        camel_words(&self.words(), false)
    }

    /// `userIDs`
    pub fn plural_lower_camel(&self) -> String {
        camel_words(&Name::new(self.plural_snake()).words(), false)
    }

    /// Singular form of a plural name, used for names derived from table names.
    pub fn singular(&self) -> Name {
        let mut words = self.words();
        if let Some(last) = words.last_mut() {
            *last = plural::singularize(last);
        }
        Name::new(words.join("_"))
    }

    fn words(&self) -> Vec<String> {
        self.snake().split('_').filter(|w| !w.is_empty()).map(str::to_string).collect()
    }
}

fn camel_words(words: &[String], upper_first: bool) -> String {
    let mut out = String::new();
    for (idx, word) in words.iter().enumerate() {
        if idx == 0 && !upper_first {
            out.push_str(word);
            continue;
        }
        match SPECIAL_WORD.captures(word) {
            Some(caps) => {
                out.push_str(&caps[1].to_uppercase());
                out.push_str(&caps[2]);
                out.push_str(&caps[3]);
            }
            None => out.push_str(&word.to_upper_camel_case()),
        }
    }
    out
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
