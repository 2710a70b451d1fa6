//! SQL execution seam used by the generated data-access code.
//!
//! Generated DAOs never talk to a driver directly. They build statement text and [`Value`]
//! arguments and hand both to an [`Executor`] supplied by the application.

use chrono::{DateTime, Utc};

use crate::context::Context;
use crate::errors::{Error, Result};
use crate::value::{ToValue, Value};

/// One result row as column name and value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self
            .columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::conversion(format!("column '{column}' is missing from the row")))?;
        T::from_value(value).map_err(|e| e.wrap(format!("column '{column}'")))
    }

    pub fn first(&self) -> Option<&Value> {
        self.columns.first().map(|(_, value)| value)
    }
}

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub last_insert_id: u64,
    pub rows_affected: u64,
}

/// Driver adapter. Placeholders in statement text are `?`.
pub trait Executor: Send + Sync {
    fn query(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<Vec<Row>>;

    fn exec(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<ExecResult>;
}

/// Conversion out of a column value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

/// Construction of an entity from a result row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

fn mismatch(expected: &str, value: &Value) -> Error {
    Error::conversion(format!("expected {expected}, found {value}"))
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            Value::Int(v) => Ok(*v != 0),
            Value::Uint(v) => Ok(*v != 0),
            other => Err(mismatch("bool", other)),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(*v).map_err(Error::conversion),
                        Value::Uint(v) => <$ty>::try_from(*v).map_err(Error::conversion),
                        other => Err(mismatch(stringify!($ty), other)),
                    }
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::Uint(v) => Ok(*v as f64),
            other => Err(mismatch("f64", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v.clone()),
            Value::Bytes(v) => String::from_utf8(v.clone()).map_err(Error::conversion),
            other => Err(mismatch("string", other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v.clone()),
            Value::String(v) => Ok(v.clone().into_bytes()),
            other => Err(mismatch("bytes", other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Time(v) => Ok(*v),
            Value::Int(secs) => DateTime::from_timestamp(*secs, 0).ok_or_else(|| mismatch("timestamp", value)),
            Value::String(text) => DateTime::parse_from_rfc3339(text)
                .map(|t| t.with_timezone(&Utc))
                .map_err(Error::conversion),
            other => Err(mismatch("time", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Column assignments for `update_by_*` operations, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Updates {
    entries: Vec<(String, Value)>,
}

impl Updates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column`; a later call for the same column replaces the earlier value.
    pub fn set(mut self, column: impl Into<String>, value: impl ToValue) -> Self {
        let column = column.into();
        let value = value.to_value();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl ToValue for Updates {
    fn to_value(&self) -> Value {
        Value::Struct {
            name: "Updates".into(),
            fields: self.entries.clone(),
        }
    }
}

/// `?, ?, ?` for `n` arguments.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Replace each `%s` in `template` with the next entry of `parts`.
pub fn substitute(template: &str, parts: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split("%s");
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for (idx, piece) in pieces.enumerate() {
        out.push_str(parts.get(idx).map(String::as_str).unwrap_or("%s"));
        out.push_str(piece);
    }
    out
}

/// `` `a` = ?, `b` = ? `` for the columns of `updates`.
pub fn set_clause(updates: &Updates) -> String {
    updates
        .columns()
        .map(|column| format!("`{column}` = ?"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn fetch_optional<T: FromRow>(executor: &dyn Executor, ctx: &Context, sql: &str, args: &[Value]) -> Result<Option<T>> {
    let rows = executor.query(ctx, sql, args)?;
    rows.first().map(T::from_row).transpose()
}

pub fn fetch_all<T: FromRow>(executor: &dyn Executor, ctx: &Context, sql: &str, args: &[Value]) -> Result<Vec<T>> {
    executor.query(ctx, sql, args)?.iter().map(T::from_row).collect()
}

pub fn fetch_count(executor: &dyn Executor, ctx: &Context, sql: &str, args: &[Value]) -> Result<i64> {
    let rows = executor.query(ctx, sql, args)?;
    match rows.first().and_then(Row::first) {
        Some(value) => i64::from_value(value),
        None => Err(Error::query(format!("count query returned no rows: {sql}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Scripted {
        rows: Vec<Row>,
        seen: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl Executor for Scripted {
        fn query(&self, _ctx: &Context, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
            self.seen.lock().unwrap().push((sql.to_string(), args.to_vec()));
            Ok(self.rows.clone())
        }

        fn exec(&self, _ctx: &Context, sql: &str, args: &[Value]) -> Result<ExecResult> {
            self.seen.lock().unwrap().push((sql.to_string(), args.to_vec()));
            Ok(ExecResult {
                last_insert_id: 7,
                rows_affected: 1,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: u64,
        name: Option<String>,
    }

    impl FromRow for Pair {
        fn from_row(row: &Row) -> Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                name: row.get("name")?,
            })
        }
    }

    fn row(id: u64, name: Value) -> Row {
        Row::new(vec![("id".into(), Value::Uint(id)), ("name".into(), name)])
    }

    #[test]
    fn test_placeholders_and_substitute() {
        assert_eq!(placeholders(3), "?, ?, ?");
        assert_eq!(placeholders(0), "");
        let sql = substitute("UPDATE `t` SET %s WHERE `id` IN (%s)", &["`a` = ?".into(), placeholders(2)]);
        assert_eq!(sql, "UPDATE `t` SET `a` = ? WHERE `id` IN (?, ?)");
    }

    #[test]
    fn test_set_clause_keeps_order_and_replaces() {
        let updates = Updates::new().set("name", "bob").set("age", 3u8).set("name", "alice");
        assert_eq!(set_clause(&updates), "`name` = ?, `age` = ?");
        assert_eq!(updates.values(), vec![Value::String("alice".into()), Value::Uint(3)]);
    }

    #[test]
    fn test_fetch_helpers() {
        let executor = Scripted {
            rows: vec![row(1, Value::Null), row(2, Value::String("b".into()))],
            ..Scripted::default()
        };
        let ctx = Context::new();
        let all: Vec<Pair> = fetch_all(&executor, &ctx, "SELECT", &[]).unwrap();
        assert_eq!(all[1], Pair { id: 2, name: Some("b".into()) });
        let first: Option<Pair> = fetch_optional(&executor, &ctx, "SELECT", &[Value::Uint(1)]).unwrap();
        assert_eq!(first, Some(Pair { id: 1, name: None }));
        assert_eq!(fetch_count(&executor, &ctx, "SELECT COUNT(*)", &[]).unwrap(), 1);
        assert_eq!(executor.seen.lock().unwrap()[1].1, vec![Value::Uint(1)]);
    }

    #[test]
    fn test_conversion_errors_name_the_column() {
        let bad = Row::new(vec![("id".into(), Value::String("x".into()))]);
        let err = bad.get::<u64>("id").unwrap_err();
        assert!(err.to_string().contains("column 'id'"));
        assert!(bad.get::<u64>("missing").is_err());
        assert!(Row::new(vec![("n".into(), Value::Int(-1))]).get::<u8>("n").is_err());
    }
}
