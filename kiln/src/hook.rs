//! Support for after-hooks threaded through generated operations.

use log::debug;

use crate::errors::{Error, Result};

/// Collects errors raised by after-hooks.
///
/// After-hooks run once the main body has produced its result, including on early return. They
/// cannot replace a failing result; they can only turn a success into the first recorded error.
#[derive(Debug, Default)]
pub struct Delayed {
    errors: Vec<Error>,
}

impl Delayed {
    pub fn record(&mut self, err: Error) {
        debug!("after hook failed: {err}");
        self.errors.push(err);
    }

    /// Record the error of `result`, if any.
    pub fn check(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.record(err);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish<T>(self, result: Result<T>) -> Result<T> {
        match (result, self.errors.into_iter().next()) {
            (Err(err), _) => Err(err),
            (Ok(_), Some(delayed)) => Err(delayed.wrap("after hook failed")),
            (Ok(value), None) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_error_wins() {
        let mut delayed = Delayed::default();
        delayed.record(Error::query("after"));
        let result: Result<()> = delayed.finish(Err(Error::query("main")));
        assert_eq!(result.unwrap_err().to_string(), "query failed: main");
    }

    #[test]
    fn test_first_delayed_error_surfaces() {
        let mut delayed = Delayed::default();
        delayed.check(Ok(()));
        delayed.check(Err(Error::query("first")));
        delayed.record(Error::query("second"));
        let err = delayed.finish(Ok(3)).unwrap_err();
        assert!(matches!(err.root(), Error::Query { message } if message == "first"));
    }

    #[test]
    fn test_clean_run_returns_value() {
        assert_eq!(Delayed::default().finish(Ok(3)).unwrap(), 3);
    }
}
