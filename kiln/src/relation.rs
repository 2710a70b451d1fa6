//! Lazy relation loading shared across a collection.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::context::Context;
use crate::errors::Result;

/// A relation accessor assigned to a model by its repository.
pub type Loader<T> = Arc<dyn Fn(&Context) -> Result<T> + Send + Sync>;

/// Memoises the first successful load; failures are not cached.
#[derive(Debug)]
pub struct RelationCell<T> {
    cell: OnceCell<T>,
}

impl<T> Default for RelationCell<T> {
    fn default() -> Self {
        Self { cell: OnceCell::new() }
    }
}

impl<T> RelationCell<T> {
    pub fn get_or_load(&self, load: impl FnOnce() -> Result<T>) -> Result<&T> {
        self.cell.get_or_try_init(load)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Distinct keys in first-seen order, the argument of a relation's batch load.
pub fn unique_keys<K: PartialEq>(keys: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut unique = Vec::new();
    for key in keys {
        if !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_loads_once() {
        let cell = RelationCell::default();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let value = cell
                .get_or_load(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2])
                })
                .unwrap();
            assert_eq!(value.len(), 2);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unique_keys_keep_first_seen_order() {
        assert_eq!(unique_keys([3u64, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_keys(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_failure_is_retried() {
        let cell = RelationCell::<u8>::default();
        assert!(cell.get_or_load(|| Err(Error::query("down"))).is_err());
        assert!(!cell.is_loaded());
        assert_eq!(*cell.get_or_load(|| Ok(4)).unwrap(), 4);
    }
}
