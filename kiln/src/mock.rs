//! Expectation registry behind the generated repository mocks.
//!
//! Each mocked method owns one [`MockMethod`]. Tests register expectations with argument values;
//! calls are matched against them in registration order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::errors::{Error, Result};
use crate::value::{Order, Value};

type Action = Arc<dyn Fn(&[Value]) + Send + Sync>;

struct State<T> {
    args: Vec<Value>,
    order: Order,
    actions: Vec<Action>,
    any_times: bool,
    times: usize,
    called: usize,
    ret: Option<Result<T>>,
}

impl<T> State<T> {
    fn accepts(&self, args: &[Value]) -> bool {
        self.args.len() == args.len() && self.args.iter().zip(args).all(|(e, a)| e.matches(a, self.order))
    }

    fn is_exhausted(&self) -> bool {
        !self.any_times && self.called >= self.times
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to one registered expectation; every setter returns the handle for chaining.
pub struct Expectation<T> {
    state: Arc<Mutex<State<T>>>,
}

impl<T> Expectation<T> {
    fn update(self, f: impl FnOnce(&mut State<T>)) -> Self {
        f(&mut lock(&self.state));
        self
    }

    /// Pin the value returned when this expectation matches.
    pub fn returns(self, value: T) -> Self {
        self.update(|s| s.ret = Some(Ok(value)))
    }

    pub fn returns_err(self, err: Error) -> Self {
        self.update(|s| s.ret = Some(Err(err)))
    }

    /// Run `action` with the actual arguments each time this expectation matches.
    pub fn action(self, action: impl Fn(&[Value]) + Send + Sync + 'static) -> Self {
        self.update(|s| s.actions.push(Arc::new(action)))
    }

    /// Required number of calls; defaults to one.
    pub fn times(self, times: usize) -> Self {
        self.update(|s| s.times = times)
    }

    pub fn any_times(self) -> Self {
        self.update(|s| s.any_times = true)
    }

    /// Compare sequence arguments element by element instead of as multisets.
    pub fn ordered(self) -> Self {
        self.update(|s| s.order = Order::Strict)
    }

    pub fn called_times(&self) -> usize {
        lock(&self.state).called
    }
}

/// Expectations of one mocked method.
pub struct MockMethod<T> {
    expectations: Mutex<Vec<Arc<Mutex<State<T>>>>>,
}

impl<T> Default for MockMethod<T> {
    fn default() -> Self {
        Self {
            expectations: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> MockMethod<T> {
    pub fn expect(&self, args: Vec<Value>) -> Expectation<T> {
        let state = Arc::new(Mutex::new(State {
            args,
            order: Order::Unordered,
            actions: Vec::new(),
            any_times: false,
            times: 1,
            called: 0,
            ret: None,
        }));
        lock(&self.expectations).push(Arc::clone(&state));
        Expectation { state }
    }

    /// Resolve a call against the registered expectations.
    ///
    /// The first matching expectation with calls left wins. When every matching expectation is
    /// used up the call fails with [`Error::InvalidCallTimes`].
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<T> {
        let expectations: Vec<_> = lock(&self.expectations).iter().cloned().collect();
        let mut exhausted = None;
        for expectation in &expectations {
            let mut state = lock(expectation);
            if !state.accepts(&args) {
                continue;
            }
            if state.is_exhausted() {
                exhausted.get_or_insert((state.times, state.called + 1));
                continue;
            }
            state.called += 1;
            debug!("{method} matched, call {} of {}", state.called, state.times);
            let actions = state.actions.clone();
            let ret = state.ret.clone();
            drop(state);
            for action in &actions {
                action(&args);
            }
            return match ret {
                Some(ret) => ret,
                None => Err(Error::MissingReturnValue {
                    method: method.to_string(),
                }),
            };
        }
        match exhausted {
            Some((expected, actual)) => Err(Error::InvalidCallTimes {
                method: method.to_string(),
                expected,
                actual,
            }),
            None => Err(Error::NoMatchingExpectation {
                method: method.to_string(),
                args: args.iter().map(Value::to_string).collect::<Vec<_>>().join(", "),
            }),
        }
    }

    /// Fail if any expectation was called fewer times than required.
    pub fn verify(&self, method: &str) -> Result<()> {
        for expectation in lock(&self.expectations).iter() {
            let state = lock(expectation);
            if !state.any_times && state.called < state.times {
                return Err(Error::UnsatisfiedExpectation {
                    method: method.to_string(),
                    expected: state.times,
                    actual: state.called,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::value::ToValue;

    const METHOD: &str = "UserRepository::find_by_id";

    #[test]
    fn test_second_expectation_matches() {
        let method = MockMethod::<Option<String>>::default();
        let first = method.expect(vec![1u64.to_value()]).returns(Some("one".into()));
        let second = method.expect(vec![2u64.to_value()]).returns(Some("two".into()));
        assert_eq!(method.call(METHOD, vec![2u64.to_value()]).unwrap(), Some("two".into()));
        assert_eq!(first.called_times(), 0);
        assert_eq!(second.called_times(), 1);
    }

    #[test]
    fn test_no_match_is_typed_error() {
        let method = MockMethod::<u8>::default();
        method.expect(vec![1u64.to_value()]).returns(1);
        let err = method.call(METHOD, vec![9u64.to_value()]).unwrap_err();
        assert!(matches!(err, Error::NoMatchingExpectation { ref args, .. } if args == "9"));
    }

    #[test]
    fn test_call_times() {
        let method = MockMethod::<u8>::default();
        method.expect(vec![]).returns(1).times(2);
        assert!(method.verify(METHOD).is_err());
        method.call(METHOD, vec![]).unwrap();
        method.call(METHOD, vec![]).unwrap();
        assert!(method.verify(METHOD).is_ok());
        let err = method.call(METHOD, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidCallTimes { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_any_times_and_actions() {
        let method = MockMethod::<()>::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        method.expect(vec![]).returns(()).any_times().action(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        for _ in 0..3 {
            method.call(METHOD, vec![]).unwrap();
        }
        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert!(method.verify(METHOD).is_ok());
    }

    #[test]
    fn test_slice_arguments_unordered_unless_ordered() {
        let method = MockMethod::<u8>::default();
        method.expect(vec![vec![1u64, 2].to_value()]).returns(1);
        assert_eq!(method.call(METHOD, vec![vec![2u64, 1].to_value()]).unwrap(), 1);

        let strict = MockMethod::<u8>::default();
        strict.expect(vec![vec![1u64, 2].to_value()]).returns(1).ordered();
        assert!(strict.call(METHOD, vec![vec![2u64, 1].to_value()]).is_err());
    }

    #[test]
    fn test_missing_return_and_pinned_error() {
        let method = MockMethod::<u8>::default();
        method.expect(vec![1u64.to_value()]);
        method.expect(vec![2u64.to_value()]).returns_err(Error::query("down"));
        assert!(matches!(method.call(METHOD, vec![1u64.to_value()]), Err(Error::MissingReturnValue { .. })));
        assert!(matches!(method.call(METHOD, vec![2u64.to_value()]), Err(Error::Query { .. })));
    }
}
