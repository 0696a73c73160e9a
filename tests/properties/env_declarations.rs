//! Property tests for `env:` declaration parsing.

use proptest::prelude::*;
use serde_yaml_ng::{Mapping, Value};

use solidactions::domain::services::env_declarations::parse_env_declarations;
use solidactions::domain::services::EnvDeclaration;

fn env_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Z0-9_]{0,15}").unwrap()
}

#[derive(Debug, Clone)]
enum Entry {
    Scalar(String),
    Mapped(String, String),
    Unmapped(String),
    Junk(Value),
}

fn entry() -> impl Strategy<Value = Entry> {
    prop_oneof![
        env_name().prop_map(Entry::Scalar),
        (env_name(), env_name()).prop_map(|(k, t)| Entry::Mapped(k, t)),
        env_name().prop_map(Entry::Unmapped),
        prop_oneof![
            Just(Value::Null),
            any::<i32>().prop_map(|n| Value::Number(n.into())),
            Just(Value::Sequence(vec![])),
        ]
        .prop_map(Entry::Junk),
    ]
}

fn to_value(entry: &Entry) -> Value {
    let single = |k: &str, v: Value| {
        let mut map = Mapping::new();
        map.insert(Value::String(k.to_string()), v);
        Value::Mapping(map)
    };
    match entry {
        Entry::Scalar(name) => Value::String(name.clone()),
        Entry::Mapped(name, target) => single(name, Value::String(target.clone())),
        Entry::Unmapped(name) => single(name, Value::Null),
        Entry::Junk(value) => value.clone(),
    }
}

fn expected(entry: &Entry) -> Option<EnvDeclaration> {
    match entry {
        Entry::Scalar(name) | Entry::Unmapped(name) => Some(EnvDeclaration::new(name, None)),
        Entry::Mapped(name, target) => Some(EnvDeclaration::new(name, Some(target))),
        Entry::Junk(_) => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: well-formed entries survive in order, malformed ones are dropped.
    #[test]
    fn property_declarations_preserve_order(entries in proptest::collection::vec(entry(), 0..12)) {
        let values: Vec<Value> = entries.iter().map(to_value).collect();
        let parsed = parse_env_declarations(&values);
        let wanted: Vec<EnvDeclaration> = entries.iter().filter_map(expected).collect();
        prop_assert_eq!(parsed, wanted);
    }
}
