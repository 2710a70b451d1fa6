//! Request side of the generated API adapters.
//!
//! Generated request builders read their parameters from a [`RawRequest`], a transport neutral view of
//! an incoming HTTP request. Path parameters are handed to the builder explicitly; [`PathTemplate`]
//! extracts them from a concrete path when no router does it already.

use std::collections::HashMap;
use std::str::FromStr;

use regex::Regex;

use crate::errors::{Error, Result};

/// Headers, query and decoded JSON body of one request.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add every pair of an url-encoded query string such as `a=1&b=two%20words`.
    pub fn with_query_string(mut self, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            self.query.insert(name.into_owned(), value.into_owned());
        }
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Decode a JSON body. An empty body is treated as absent.
    pub fn with_body_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            self.body = None;
            return Ok(self);
        }
        let body = serde_json::from_slice(bytes).map_err(|e| Error::invalid_request(format!("failed to decode: {e}")))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Field `name` of a JSON object body.
    pub fn body_field(&self, name: &str) -> Option<&serde_json::Value> {
        self.body.as_ref()?.as_object()?.get(name)
    }

    /// Read header `name` and convert it, `None` when the header is absent.
    pub fn header_param<T: FromParam>(&self, name: &str) -> Result<Option<T>> {
        self.header(name).map(|text| T::from_text(text).map_err(|e| e.wrap(format!("header '{name}'")))).transpose()
    }

    pub fn query_param<T: FromParam>(&self, name: &str) -> Result<Option<T>> {
        self.query(name).map(|text| T::from_text(text).map_err(|e| e.wrap(format!("query '{name}'")))).transpose()
    }

    pub fn body_param<T: FromParam>(&self, name: &str) -> Result<Option<T>> {
        match self.body_field(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => T::from_json(value).map(Some).map_err(|e| e.wrap(format!("body '{name}'"))),
        }
    }
}

/// Conversion from the textual or JSON form of a request parameter.
pub trait FromParam: Sized {
    fn from_text(text: &str) -> Result<Self>;

    /// Strings go through [`FromParam::from_text`]; numbers and booleans are converted from their
    /// JSON spelling.
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(text) => Self::from_text(text),
            serde_json::Value::Number(n) => Self::from_text(&n.to_string()),
            serde_json::Value::Bool(b) => Self::from_text(&b.to_string()),
            other => Err(Error::invalid_request(format!("unexpected value {other}"))),
        }
    }
}

fn parse<T>(text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e| Error::invalid_request(format!("cannot parse '{text}': {e}")))
}

macro_rules! impl_from_param {
    ($($ty:ty),*) => {
        $(
            impl FromParam for $ty {
                fn from_text(text: &str) -> Result<Self> {
                    parse(text)
                }
            }
        )*
    };
}

impl_from_param!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool);

impl FromParam for String {
    fn from_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }

    fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

impl FromParam for Vec<u8> {
    fn from_text(text: &str) -> Result<Self> {
        Ok(text.as_bytes().to_vec())
    }

    fn from_json(value: &serde_json::Value) -> Result<Self> {
        String::from_json(value).map(String::into_bytes)
    }
}

impl<T: FromParam> FromParam for Option<T> {
    fn from_text(text: &str) -> Result<Self> {
        T::from_text(text).map(Some)
    }

    fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

/// Header carrying a header-bound parameter, `X-<CamelName>`.
pub fn header_name(camel: &str) -> String {
    format!("X-{camel}")
}

/// An URI template such as `/users/{user_id}/skills/{id}`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    names: Vec<String>,
    pattern: Regex,
}

impl PathTemplate {
    pub fn new(template: &str) -> Result<Self> {
        let placeholder = Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| Error::invalid_request(e.to_string()))?;
        let mut names = Vec::new();
        let mut pattern = String::from("^");
        let mut last = 0;
        for caps in placeholder.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            pattern.push_str(&regex::escape(&template[last..whole.start()]));
            pattern.push_str("([^/]+)");
            names.push(name.as_str().to_string());
            last = whole.end();
        }
        pattern.push_str(&regex::escape(&template[last..]));
        pattern.push('$');
        let pattern = Regex::new(&pattern).map_err(|e| Error::invalid_request(e.to_string()))?;
        Ok(Self { names, pattern })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Path parameters of `path`, or `None` when the path does not match.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.pattern.captures(path)?;
        let params = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| caps.get(idx + 1).map(|m| (name.clone(), m.as_str().to_string())))
            .collect();
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_is_decoded() {
        let req = RawRequest::new().with_query_string("?name=two%20words&page=3");
        assert_eq!(req.query("name"), Some("two words"));
        assert_eq!(req.query_param::<u32>("page").unwrap(), Some(3));
        assert_eq!(req.query_param::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = RawRequest::new().with_header("X-UserID", "42");
        assert_eq!(req.header_param::<u64>("x-userid").unwrap(), Some(42));
    }

    #[test]
    fn test_body_params_accept_strings_and_numbers() {
        let req = RawRequest::new()
            .with_body_bytes(br#"{"count": 5, "limit": "7", "name": "kiln", "flag": true, "none": null}"#)
            .unwrap();
        assert_eq!(req.body_param::<i64>("count").unwrap(), Some(5));
        assert_eq!(req.body_param::<i64>("limit").unwrap(), Some(7));
        assert_eq!(req.body_param::<String>("name").unwrap(), Some("kiln".to_string()));
        assert_eq!(req.body_param::<bool>("flag").unwrap(), Some(true));
        assert_eq!(req.body_param::<bool>("none").unwrap(), None);
    }

    #[test]
    fn test_invalid_param_is_invalid_request() {
        let req = RawRequest::new().with_query("page", "three");
        let err = req.query_param::<u32>("page").unwrap_err();
        assert!(matches!(err.root(), Error::InvalidRequest { .. }), "{err}");
    }

    #[test]
    fn test_path_template_captures() {
        let template = PathTemplate::new("/users/{user_id}/skills/{id}").unwrap();
        assert_eq!(template.names(), ["user_id", "id"]);
        let params = template.captures("/users/10/skills/3").unwrap();
        assert_eq!(params["user_id"], "10");
        assert_eq!(params["id"], "3");
        assert!(template.captures("/users/10").is_none());
    }
}
