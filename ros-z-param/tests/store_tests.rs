//! Integration tests for ParameterStore

use ros_z_param::{
    DynParameterStore, ElementRegistry, Error, Parameter, ParameterLike, ParameterStore,
    ParameterValue,
};

fn data() -> Vec<(&'static str, ParameterValue)> {
    vec![
        ("text", ParameterValue::from("lorum ipsum")),
        ("number", ParameterValue::Integer(132)),
        ("percentage", ParameterValue::Double(66.67)),
        ("deleted", ParameterValue::Bool(true)),
        ("empty", ParameterValue::NotSet),
    ]
}

fn test_store() -> ParameterStore {
    data()
        .into_iter()
        .map(|(name, value)| Parameter::new(name, value))
        .collect()
}

// ============================================================================
// Access tests
// ============================================================================

#[test]
fn test_get_by_name_and_position() {
    let store = test_store();

    for (i, (name, value)) in data().into_iter().enumerate() {
        assert!(store.exists(i));
        assert!(store.exists(name));
        assert_eq!(store.get(name), store.get(i));

        let parameter = store.get(name).unwrap();
        assert_eq!(parameter.name(), name);
        assert_eq!(parameter.value(), &value);
    }
    assert_eq!(store.count(), data().len());
}

#[test]
fn test_name_and_position_agree() {
    let store = test_store();
    for i in 0..store.count() {
        let name = store.get(i).unwrap().name();
        assert_eq!(store.get(name), store.get(i));
        assert_eq!(store.position(name), Some(i));
    }
}

#[test]
fn test_get_unknown_parameter() {
    let store: ParameterStore = ParameterStore::new();

    assert!(store.get(0usize).is_none());
    assert!(store.get("foo").is_none());
}

// ============================================================================
// Insertion tests
// ============================================================================

#[test]
fn test_set_each_parameter() {
    for parameter in test_store() {
        let mut store = ParameterStore::new();
        assert!(store.set(parameter.clone()));

        assert_eq!(store.count(), 1);
        assert_eq!(store.get(0usize), Some(&parameter));
    }
}

#[test]
fn test_prevent_double_entries() {
    let first = Parameter::new("foo", "bar");
    let second = Parameter::new("foo", "baz");

    let store = ParameterStore::from_parameters([first.clone(), second.clone()]);

    assert_eq!(store.count(), 1);
    assert_eq!(store.get(0usize), Some(&first));
    assert!(store.iter().any(|p| p == &first));
    assert!(!store.iter().any(|p| p == &second));
}

#[test]
fn test_count_equals_distinct_names() {
    let names = ["a", "b", "a", "c", "b", "b", "d", "a"];
    let store: ParameterStore = names
        .iter()
        .enumerate()
        .map(|(i, name)| Parameter::new(*name, i as i64))
        .collect();

    assert_eq!(store.count(), 4);
    assert_eq!(store.names().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
    // First occurrence wins
    assert_eq!(store.get("b").and_then(|p| p.value().as_i64()), Some(1));
    assert_eq!(store.get("d").and_then(|p| p.value().as_i64()), Some(6));
}

#[test]
fn test_set_never_overwrites() {
    let mut store = test_store();
    assert!(!store.set(Parameter::new("number", 7)));
    assert_eq!(store.get(1usize).and_then(|p| p.value().as_i64()), Some(132));
    assert_eq!(store.count(), 5);
}

#[test]
fn test_set_illegal_parameter() {
    let registry = ElementRegistry::new();
    let mut store = DynParameterStore::new();

    let err = store
        .set_any(
            Box::new(vec![("key", "foo"), ("value", "bar")]),
            &registry,
        )
        .unwrap_err();

    assert!(matches!(err, Error::InvalidElementType(_)));
    assert!(
        err.to_string()
            .starts_with("parameter(s) must implement ParameterLike")
    );
    assert!(store.is_empty());
}

// ============================================================================
// Removal tests
// ============================================================================

#[test]
fn test_exists() {
    let store = test_store();
    for (i, (name, _)) in data().into_iter().enumerate() {
        assert!(store.exists(i));
        assert!(store.exists(name));
    }
    assert!(!store.exists(data().len()));
}

#[test]
fn test_remove_by_position() {
    let mut store = test_store();

    // Positions shift after every removal, so the front is always index 0
    while !store.is_empty() {
        let front = store.get(0usize).unwrap().name().to_string();
        assert!(store.remove(0usize).is_some());
        assert!(!store.exists(front.as_str()));
    }
    assert!(!store.exists(0usize));
}

#[test]
fn test_remove_by_name() {
    let mut store = test_store();

    for (name, _) in data() {
        store.remove(name);
        assert!(!store.exists(name));
    }
    assert!(store.is_empty());
}

#[test]
fn test_remove_missing_leaves_count() {
    let mut store = test_store();
    assert!(store.remove("missing").is_none());
    assert!(store.remove(99usize).is_none());
    assert_eq!(store.count(), 5);
}
