//! Map counterpart of [`super::ObjectWriter`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{Error, Result};

#[derive(Debug, Default)]
pub struct MapWriter {
    map: Map<String, Value>,
}

impl MapWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(Error::render)?;
        self.map.insert(key.to_string(), value);
        Ok(())
    }

    pub fn nested(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }

    /// Merge the entries of an object into this map; `null` adds nothing.
    pub fn inline(&mut self, value: Value) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Object(entries) => {
                self.map.extend(entries);
                Ok(())
            }
            _ => Err(Error::render("inline value is not an object")),
        }
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_inline_and_nested() {
        let mut w = MapWriter::new();
        w.value("id", &1u64).unwrap();
        w.inline(json!({"name": "bob"})).unwrap();
        w.inline(Value::Null).unwrap();
        w.nested("skill", json!({"id": 2}));
        assert_eq!(w.finish(), json!({"id": 1, "name": "bob", "skill": {"id": 2}}));
        assert!(MapWriter::new().inline(json!([1])).is_err());
    }
}
