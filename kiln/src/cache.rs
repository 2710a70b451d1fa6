//! Read-through row cache used by the `cache` storage backend.
//!
//! Reads are keyed by statement text and arguments within a table. Any write to a table drops every
//! cached read of it, so a handle never serves rows older than its own last write.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::context::Context;
use crate::errors::Result;
use crate::sql::{ExecResult, Executor, Row};
use crate::value::Value;

/// Storage of cached result rows, grouped by table.
pub trait Cache: Send + Sync {
    fn get(&self, table: &str, key: &str) -> Option<Vec<Row>>;

    fn put(&self, table: &str, key: String, rows: Vec<Row>);

    /// Forget every entry of `table`.
    fn invalidate(&self, table: &str);
}

/// In-process [`Cache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    tables: Mutex<HashMap<String, HashMap<String, Vec<Row>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, Vec<Row>>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached reads of `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables().get(table).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables().values().all(HashMap::is_empty)
    }
}

impl Cache for MemoryCache {
    fn get(&self, table: &str, key: &str) -> Option<Vec<Row>> {
        self.tables().get(table).and_then(|entries| entries.get(key)).cloned()
    }

    fn put(&self, table: &str, key: String, rows: Vec<Row>) {
        self.tables().entry(table.to_string()).or_default().insert(key, rows);
    }

    fn invalidate(&self, table: &str) {
        self.tables().remove(table);
    }
}

/// An [`Executor`] answering reads of one table from a [`Cache`] before the database.
pub struct ReadThrough<'a> {
    executor: &'a dyn Executor,
    cache: &'a dyn Cache,
    table: &'a str,
}

impl<'a> ReadThrough<'a> {
    pub fn new(executor: &'a dyn Executor, cache: &'a dyn Cache, table: &'a str) -> Self {
        Self { executor, cache, table }
    }

    fn key(sql: &str, args: &[Value]) -> String {
        let args = args.iter().map(|a| format!("{a:?}")).collect::<Vec<_>>().join(", ");
        format!("{sql} [{args}]")
    }

    pub fn query(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
        let key = Self::key(sql, args);
        if let Some(rows) = self.cache.get(self.table, &key) {
            debug!("cache hit on '{}': {sql}", self.table);
            return Ok(rows);
        }
        let rows = self.executor.query(ctx, sql, args)?;
        self.cache.put(self.table, key, rows.clone());
        Ok(rows)
    }

    pub fn exec(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<ExecResult> {
        let result = self.executor.exec(ctx, sql, args);
        self.cache.invalidate(self.table);
        result
    }
}

impl Executor for ReadThrough<'_> {
    fn query(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
        ReadThrough::query(self, ctx, sql, args)
    }

    fn exec(&self, ctx: &Context, sql: &str, args: &[Value]) -> Result<ExecResult> {
        ReadThrough::exec(self, ctx, sql, args)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct Counting {
        queries: AtomicUsize,
        execs: AtomicUsize,
    }

    impl Executor for Counting {
        fn query(&self, _ctx: &Context, _sql: &str, args: &[Value]) -> Result<Vec<Row>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Row::new(vec![("id".into(), args.first().cloned().unwrap_or(Value::Null))])])
        }

        fn exec(&self, _ctx: &Context, _sql: &str, _args: &[Value]) -> Result<ExecResult> {
            self.execs.fetch_add(1, Ordering::SeqCst);
            Ok(ExecResult::default())
        }
    }

    #[test]
    fn test_reads_are_served_once_per_statement_and_arguments() {
        let db = Counting::default();
        let cache = MemoryCache::new();
        let ctx = Context::new();
        let users = ReadThrough::new(&db, &cache, "users");
        let first = users.query(&ctx, "SELECT `id` FROM `users` WHERE `id` = ?", &[Value::Uint(1)]).unwrap();
        let again = users.query(&ctx, "SELECT `id` FROM `users` WHERE `id` = ?", &[Value::Uint(1)]).unwrap();
        assert_eq!(first, again);
        assert_eq!(db.queries.load(Ordering::SeqCst), 1);

        users.query(&ctx, "SELECT `id` FROM `users` WHERE `id` = ?", &[Value::Uint(2)]).unwrap();
        assert_eq!(db.queries.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len("users"), 2);
    }

    #[test]
    fn test_write_drops_cached_reads_of_the_table_only() {
        let db = Counting::default();
        let cache = MemoryCache::new();
        let ctx = Context::new();
        let users = ReadThrough::new(&db, &cache, "users");
        let skills = ReadThrough::new(&db, &cache, "skills");
        users.query(&ctx, "SELECT COUNT(*) FROM `users`", &[]).unwrap();
        skills.query(&ctx, "SELECT COUNT(*) FROM `skills`", &[]).unwrap();

        users.exec(&ctx, "DELETE FROM `users` WHERE `id` = ?", &[Value::Uint(1)]).unwrap();
        assert_eq!(db.execs.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len("users"), 0);
        assert_eq!(cache.len("skills"), 1);

        users.query(&ctx, "SELECT COUNT(*) FROM `users`", &[]).unwrap();
        assert_eq!(db.queries.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_fetch_helpers_accept_read_through() {
        let db = Counting::default();
        let cache = MemoryCache::new();
        let ctx = Context::new();
        let users = ReadThrough::new(&db, &cache, "users");
        let count = crate::sql::fetch_count(&users, &ctx, "SELECT COUNT(*) FROM `users`", &[Value::Int(4)]).unwrap();
        assert_eq!(count, 4);
        crate::sql::fetch_count(&users, &ctx, "SELECT COUNT(*) FROM `users`", &[Value::Int(4)]).unwrap();
        assert_eq!(db.queries.load(Ordering::SeqCst), 1);
        assert!(!cache.is_empty());
    }
}
