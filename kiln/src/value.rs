//! Closed set of argument values used for mock matching and SQL parameters.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};

/// A value of one of a fixed number of kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Time(DateTime<Utc>),
    /// Ordered sequence; compared as a multiset unless strict ordering is requested.
    Seq(Vec<Value>),
    /// Unordered collection.
    Set(Vec<Value>),
    /// Named record with fields in declaration order.
    Struct { name: String, fields: Vec<(String, Value)> },
}

/// How sequences are compared by [`Value::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Unordered,
    Strict,
}

impl Value {
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::Bytes(bytes.as_ref().to_vec())
    }

    /// Whether `actual` satisfies `self` as an expected argument.
    pub fn matches(&self, actual: &Value, order: Order) -> bool {
        match (self, actual) {
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => u64::try_from(*a).is_ok_and(|a| a == *b),
            (Self::Seq(expected), Self::Seq(actual)) => match order {
                Order::Strict => {
                    expected.len() == actual.len() && expected.iter().zip(actual).all(|(e, a)| e.matches(a, order))
                }
                Order::Unordered => multiset_matches(expected, actual, order),
            },
            (Self::Set(expected), Self::Set(actual)) => multiset_matches(expected, actual, order),
            (
                Self::Struct { name, fields },
                Self::Struct {
                    name: actual_name,
                    fields: actual_fields,
                },
            ) => {
                name == actual_name
                    && fields.len() == actual_fields.len()
                    && fields.iter().all(|(field, expected)| {
                        actual_fields
                            .iter()
                            .find(|(name, _)| name == field)
                            .is_some_and(|(_, actual)| expected.matches(actual, order))
                    })
            }
            (expected, actual) => expected == actual,
        }
    }
}

fn multiset_matches(expected: &[Value], actual: &[Value], order: Order) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    let mut used = vec![false; actual.len()];
    expected.iter().all(|e| {
        let found = actual
            .iter()
            .enumerate()
            .position(|(idx, a)| !used[idx] && e.matches(a, order));
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            }
            None => false,
        }
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, open: &str, close: &str, items: &[Value]) -> fmt::Result {
            f.write_str(open)?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(close)
        }
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "bytes({})", v.len()),
            Self::Time(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Seq(items) => list(f, "[", "]", items),
            Self::Set(items) => list(f, "{", "}", items),
            Self::Struct { name, fields } => {
                write!(f, "{name} {{ ")?;
                for (idx, (field, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}: {value}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

/// Conversion into a [`Value`]. Derive it for structs with `#[derive(MockValue)]`.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64, isize);
impl_to_value!(Uint as u64: u8, u16, u32, u64, usize);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for HashSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_unordered_by_default() {
        let expected = vec![1u64, 2, 3].to_value();
        let actual = vec![3u64, 1, 2].to_value();
        assert!(expected.matches(&actual, Order::Unordered));
        assert!(!expected.matches(&actual, Order::Strict));
    }

    #[test]
    fn test_seq_is_multiset() {
        let expected = vec![1u64, 1, 2].to_value();
        assert!(!expected.matches(&vec![1u64, 2, 2].to_value(), Order::Unordered));
        assert!(expected.matches(&vec![2u64, 1, 1].to_value(), Order::Unordered));
    }

    #[test]
    fn test_set_ignores_strict_order() {
        let expected: BTreeSet<&str> = ["a", "b"].into_iter().collect();
        let actual = Value::Set(vec!["b".to_value(), "a".to_value()]);
        assert!(expected.to_value().matches(&actual, Order::Strict));
    }

    #[test]
    fn test_struct_fieldwise() {
        let make = |ids: Vec<u64>| Value::Struct {
            name: "Query".into(),
            fields: vec![("name".into(), "bob".to_value()), ("ids".into(), ids.to_value())],
        };
        assert!(make(vec![1, 2]).matches(&make(vec![2, 1]), Order::Unordered));
        assert!(!make(vec![1, 2]).matches(&make(vec![2, 1]), Order::Strict));
        assert!(!make(vec![1]).matches(&make(vec![2]), Order::Unordered));
    }

    #[test]
    fn test_signed_and_unsigned_compare() {
        assert!(5i32.to_value().matches(&5u64.to_value(), Order::Unordered));
        assert!(!(-1i64).to_value().matches(&u64::MAX.to_value(), Order::Unordered));
    }

    #[test]
    fn test_option_and_null() {
        assert_eq!(None::<u64>.to_value(), Value::Null);
        assert_eq!(Some("x").to_value(), Value::String("x".into()));
    }
}
