//! Property tests for `.env` rendering and OAuth merging.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use solidactions::domain::services::dotenv::{
    format_value, merge_oauth, parse, render_full_pull, render_oauth_lines,
};
use solidactions::domain::services::{OAuthMeta, PulledVariable};
use solidactions::Tier;

fn simple_value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_./:@=# -]{0,24}")
        .unwrap()
        .prop_filter("no surrounding whitespace", |v| v.trim() == v)
}

/// Values with spaces, `=`, `#` and single quotes. Double quotes read back
/// escaped, so they are left out here.
fn pulled_value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_./:@=#' -]{0,24}")
        .unwrap()
        .prop_filter("no surrounding whitespace", |v| v.trim() == v)
}

#[derive(Debug, Clone, Copy)]
enum PulledKind {
    Plain,
    Secret,
    OAuth,
    Placeholder,
}

fn pulled_variables() -> impl Strategy<Value = Vec<PulledVariable>> {
    proptest::collection::btree_map(
        "[A-Z][A-Z0-9_]{0,8}",
        (
            pulled_value(),
            prop_oneof![
                Just(PulledKind::Plain),
                Just(PulledKind::Secret),
                Just(PulledKind::OAuth),
                Just(PulledKind::Placeholder),
            ],
        ),
        0..8,
    )
    .prop_map(|vars: BTreeMap<String, (String, PulledKind)>| {
        vars.into_iter()
            .map(|(key, (value, kind))| PulledVariable {
                key,
                value: (!matches!(kind, PulledKind::Placeholder)).then_some(value),
                is_secret: matches!(kind, PulledKind::Secret | PulledKind::OAuth),
                oauth: matches!(kind, PulledKind::OAuth).then(|| OAuthMeta {
                    connection: Some("GitHub".into()),
                    expires_at: None,
                }),
            })
            .collect()
    })
}

fn user_line()-> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{1,6}=[a-z0-9]{0,8}".prop_map(|l| format!("USER_{}", l)),
        "# [a-z ]{0,12}",
        Just(String::new()),
    ]
}

fn oauth_variables() -> impl Strategy<Value = Vec<PulledVariable>> {
    proptest::collection::vec(
        ("[A-Z]{1,6}", "[a-z0-9]{1,16}", proptest::option::of("2026-0[1-9]-1[0-9]")),
        0..4,
    )
    .prop_map(|vars| {
        vars.into_iter()
            .map(|(key, value, expires)| PulledVariable {
                key: format!("OAUTH_{}", key),
                value: Some(value),
                is_secret: true,
                oauth: Some(OAuthMeta {
                    connection: Some("Google".into()),
                    expires_at: expires,
                }),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a value written with `format_value` reads back unchanged.
    #[test]
    fn property_formatted_values_parse_back(value in simple_value()) {
        let parsed = parse(&format!("KEY={}\n", format_value(&value)));
        prop_assert_eq!(parsed.get("KEY"), Some(&value));
    }

    /// PROPERTY: re-reading a full pull yields exactly the pulled pairs;
    /// placeholders and OAuth comments never become assignments.
    #[test]
    fn property_full_pull_reads_back(vars in pulled_variables()) {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let pull = render_full_pull("shop", Tier::Staging, now, &vars);

        let expected: HashMap<String, String> = vars
            .iter()
            .filter_map(|v| v.value.clone().map(|value| (v.key.clone(), value)))
            .collect();
        prop_assert_eq!(pull.written, expected.len());
        prop_assert_eq!(parse(&pull.content), expected);
    }

    /// PROPERTY: merging the same OAuth tokens twice equals merging once.
    #[test]
    fn property_merge_oauth_is_idempotent(
        lines in proptest::collection::vec(user_line(), 0..8),
        vars in oauth_variables(),
    ) {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let keys: HashSet<String> = vars.iter().map(|v| v.key.clone()).collect();
        let oauth_lines = render_oauth_lines(&vars);
        let existing = lines.join("\n");

        let once = merge_oauth(Some(&existing), &keys, &oauth_lines, now);
        let twice = merge_oauth(Some(&once), &keys, &oauth_lines, now);
        prop_assert_eq!(&twice, &once);

        for line in lines.iter().filter(|l| l.starts_with("USER_")) {
            prop_assert!(once.lines().any(|l| l == line.as_str()));
        }
    }
}
