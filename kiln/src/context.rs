//! Request-scoped context passed to every generated operation.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::{Error, Result};
use crate::value::Value;

/// Receives audit records from the `audit` hooks.
pub trait AuditSink: Send + Sync {
    fn record(&self, entity: &str, action: &str, value: &Value) -> Result<()>;
}

/// Immutable bag of request-scoped values. Cloning is cheap.
#[derive(Clone, Default)]
pub struct Context {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
    request_time: Option<DateTime<Utc>>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.values.insert(key.into(), Arc::new(value));
        self
    }

    pub fn value<T: Any + Send + Sync>(&self, key: &str) -> Result<&T> {
        self.values
            .get(key)
            .and_then(|v| v.downcast_ref::<T>())
            .ok_or_else(|| Error::MissingContextValue { key: key.to_string() })
    }

    pub fn with_request_time(mut self, time: DateTime<Utc>) -> Self {
        self.request_time = Some(time);
        self
    }

    /// Time the current request started; set by the caller, never defaulted.
    pub fn request_time(&self) -> Result<DateTime<Utc>> {
        self.request_time.ok_or_else(|| Error::MissingContextValue {
            key: "request_time".into(),
        })
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Forward an audit record to the configured sink, if any.
    pub fn audit(&self, entity: &str, action: &str, value: &Value) -> Result<()> {
        match &self.audit {
            Some(sink) => sink.record(entity, action, value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Context")
            .field("values", &keys)
            .field("request_time", &self.request_time)
            .field("audit", &self.audit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::value::ToValue;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl AuditSink for Recorder {
        fn record(&self, entity: &str, action: &str, _value: &Value) -> Result<()> {
            self.0.lock().unwrap().push(format!("{entity}:{action}"));
            Ok(())
        }
    }

    #[test]
    fn test_typed_values() {
        let ctx = Context::new().with_value("tenant", 42u64);
        assert_eq!(*ctx.value::<u64>("tenant").unwrap(), 42);
        assert!(ctx.value::<String>("tenant").is_err());
        assert!(matches!(ctx.value::<u64>("missing"), Err(Error::MissingContextValue { .. })));
    }

    #[test]
    fn test_request_time_required() {
        assert!(Context::new().request_time().is_err());
        let now = Utc::now();
        assert_eq!(Context::new().with_request_time(now).request_time().unwrap(), now);
    }

    #[test]
    fn test_audit_sink() {
        let recorder = Arc::new(Recorder::default());
        let ctx = Context::new().with_audit_sink(recorder.clone());
        ctx.audit("user", "create", &1u64.to_value()).unwrap();
        Context::new().audit("user", "create", &Value::Null).unwrap();
        assert_eq!(*recorder.0.lock().unwrap(), vec!["user:create".to_string()]);
    }
}
