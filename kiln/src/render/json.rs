//! Incremental JSON object writer used by generated `to_json` bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{Error, Result};

/// Writes one JSON object, placing commas only between fields that were actually written.
#[derive(Debug)]
pub struct ObjectWriter {
    buf: Vec<u8>,
    written: bool,
}

impl Default for ObjectWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self {
            buf: vec![b'{'],
            written: false,
        }
    }

    fn key(&mut self, key: &str) {
        if self.written {
            self.buf.push(b',');
        }
        self.written = true;
        self.push_string(key);
        self.buf.push(b':');
    }

    fn push_string(&mut self, text: &str) {
        // serializing a str into a Vec cannot fail
        let _ = serde_json::to_writer(&mut self.buf, text);
    }

    pub fn int(&mut self, key: &str, value: i64) {
        self.key(key);
        self.buf.extend(value.to_string().into_bytes());
    }

    pub fn uint(&mut self, key: &str, value: u64) {
        self.key(key);
        self.buf.extend(value.to_string().into_bytes());
    }

    /// Non-finite values have no JSON form and are written as `null`.
    pub fn float(&mut self, key: &str, value: f64) {
        self.key(key);
        match serde_json::Number::from_f64(value) {
            Some(number) => self.buf.extend(number.to_string().into_bytes()),
            None => self.buf.extend_from_slice(b"null"),
        }
    }

    pub fn string(&mut self, key: &str, value: &str) {
        self.key(key);
        self.push_string(value);
    }

    fn raw(&mut self, key: &str, encoded: &[u8]) {
        self.key(key);
        self.buf.extend_from_slice(encoded);
    }

    /// A byte column. Empty bytes are `null`, a JSON document is copied verbatim and anything else is
    /// written as a string.
    pub fn bytes(&mut self, key: &str, value: &[u8]) {
        if value.is_empty() {
            return self.null(key);
        }
        if serde_json::from_slice::<serde::de::IgnoredAny>(value).is_ok() {
            return self.raw(key, value);
        }
        self.string(key, &String::from_utf8_lossy(value));
    }

    pub fn bool(&mut self, key: &str, value: bool) {
        self.key(key);
        self.buf.extend_from_slice(if value { b"true" } else { b"false" });
    }

    /// Unix seconds.
    pub fn time(&mut self, key: &str, value: &DateTime<Utc>) {
        self.int(key, value.timestamp());
    }

    pub fn null(&mut self, key: &str) {
        self.key(key);
        self.buf.extend_from_slice(b"null");
    }

    /// Custom value encoded through serde.
    pub fn serialized<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_vec(value).map_err(Error::render)?;
        self.raw(key, &encoded);
        Ok(())
    }

    /// Nested object or array under `key`.
    pub fn nested(&mut self, key: &str, encoded: &[u8]) {
        self.raw(key, encoded);
    }

    /// Splice the fields of an encoded object into this one. `null` and `{}` write nothing.
    pub fn inline(&mut self, encoded: &[u8]) -> Result<()> {
        if encoded == b"null" {
            return Ok(());
        }
        let inner = encoded
            .strip_prefix(b"{")
            .and_then(|rest| rest.strip_suffix(b"}"))
            .ok_or_else(|| Error::render("inline value is not a JSON object"))?;
        if inner.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        if self.written {
            self.buf.push(b',');
        }
        self.written = true;
        self.buf.extend_from_slice(inner);
        Ok(())
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf.push(b'}');
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(text(ObjectWriter::new().finish()), "{}");
    }

    #[test]
    fn test_field_kinds() {
        let mut w = ObjectWriter::new();
        w.uint("id", 1);
        w.int("delta", -2);
        w.string("name", "a\"b");
        w.bool("ok", true);
        w.float("ratio", 0.5);
        w.float("nan", f64::NAN);
        w.null("gone");
        w.time("at", &DateTime::from_timestamp(10, 0).unwrap());
        assert_eq!(
            text(w.finish()),
            r#"{"id":1,"delta":-2,"name":"a\"b","ok":true,"ratio":0.5,"nan":null,"gone":null,"at":10}"#
        );
    }

    #[test]
    fn test_inline_and_nested() {
        let mut w = ObjectWriter::new();
        w.inline(br#"{"a":1,"b":2}"#).unwrap();
        w.inline(b"{}").unwrap();
        w.inline(b"null").unwrap();
        w.nested("skill", br#"{"id":3}"#);
        assert_eq!(text(w.finish()), r#"{"a":1,"b":2,"skill":{"id":3}}"#);
    }

    #[test]
    fn test_inline_into_empty_writer_then_field() {
        let mut w = ObjectWriter::new();
        w.inline(b"{}").unwrap();
        w.uint("id", 1);
        assert_eq!(text(w.finish()), r#"{"id":1}"#);
        assert!(ObjectWriter::new().inline(b"[1]").is_err());
    }

    #[test]
    fn test_bytes_always_yield_valid_json() {
        let mut w = ObjectWriter::new();
        w.bytes("avatar", b"");
        w.bytes("meta", br#"{"k":[1,2]}"#);
        w.bytes("note", b"plain text");
        let out = text(w.finish());
        assert_eq!(out, r#"{"avatar":null,"meta":{"k":[1,2]},"note":"plain text"}"#);
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn test_serialized() {
        let mut w = ObjectWriter::new();
        w.serialized("tags", &vec!["x", "y"]).unwrap();
        assert_eq!(text(w.finish()), r#"{"tags":["x","y"]}"#);
    }
}
