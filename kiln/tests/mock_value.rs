use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kiln::mock::MockMethod;
use kiln::{Error, MockValue, ToValue, Value};

#[derive(Debug, Clone, PartialEq, MockValue)]
struct User {
    id: u64,
    name: String,
    tags: Vec<String>,
    #[mock_value(skip)]
    cached: Option<String>,
}

#[derive(Debug, Clone, MockValue)]
struct Pair(u64, #[mock_value(rename = "label")] String);

fn user(tags: &[&str]) -> User {
    User {
        id: 7,
        name: "ann".into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        cached: Some("ignored".into()),
    }
}

#[test]
fn test_derived_struct_value() {
    let Value::Struct { name, fields } = user(&["a"]).to_value() else {
        panic!("expected a struct value");
    };
    assert_eq!(name, "User");
    let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "tags"]);
    assert_eq!(fields[0].1, Value::Uint(7));

    let Value::Struct { fields, .. } = Pair(1, "x".into()).to_value() else {
        panic!("expected a struct value");
    };
    assert_eq!(fields[0].0, "0");
    assert_eq!(fields[1], ("label".to_string(), Value::String("x".into())));
}

#[test]
fn test_struct_arguments_match_field_wise() {
    let find: MockMethod<Option<User>> = MockMethod::default();
    find.expect(vec![user(&["a", "b"]).to_value()]).returns(Some(user(&[])));

    let mut other = user(&["b", "a"]);
    other.cached = None;
    let found = find.call("UserRepository::Find", vec![other.to_value()]).unwrap();
    assert_eq!(found.map(|u| u.id), Some(7));
    assert!(find.verify("UserRepository::Find").is_ok());
}

#[test]
fn test_ordered_expectation_rejects_permutation() {
    let find: MockMethod<u64> = MockMethod::default();
    find.expect(vec![user(&["a", "b"]).to_value()]).returns(1).ordered();
    let err = find.call("UserRepository::Find", vec![user(&["b", "a"]).to_value()]).unwrap_err();
    assert!(err.is_no_matching_expectation(), "{err}");
}

#[test]
fn test_call_counts_and_actions() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let delete: MockMethod<()> = MockMethod::default();
    let expectation = delete
        .expect(vec![7u64.to_value()])
        .returns(())
        .times(2)
        .action(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

    delete.call("UserRepository::Delete", vec![7u64.to_value()]).unwrap();
    assert!(matches!(
        delete.verify("UserRepository::Delete"),
        Err(Error::UnsatisfiedExpectation { expected: 2, actual: 1, .. })
    ));
    delete.call("UserRepository::Delete", vec![7u64.to_value()]).unwrap();
    assert!(delete.verify("UserRepository::Delete").is_ok());
    assert!(matches!(
        delete.call("UserRepository::Delete", vec![7u64.to_value()]),
        Err(Error::InvalidCallTimes { expected: 2, actual: 3, .. })
    ));
    assert_eq!(expectation.called_times(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_pinned_error_and_missing_return() {
    let count: MockMethod<i64> = MockMethod::default();
    count.expect(vec![]).returns_err(Error::query("down"));
    assert!(matches!(count.call("UserRepository::Count", vec![]), Err(Error::Query { .. })));

    let create: MockMethod<()> = MockMethod::default();
    create.expect(vec![1u64.to_value()]);
    assert!(matches!(
        create.call("UserRepository::Create", vec![1u64.to_value()]),
        Err(Error::MissingReturnValue { .. })
    ));
}
