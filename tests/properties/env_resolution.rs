//! Property tests for tiered variable resolution.

use proptest::prelude::*;

use solidactions::domain::entities::{DevSource, GlobalVariable, StagingSource};
use solidactions::domain::services::resolve;
use solidactions::Tier;

fn staging_source() -> impl Strategy<Value = StagingSource> {
    prop_oneof![
        Just(StagingSource::Value),
        Just(StagingSource::InheritProduction)
    ]
}

fn dev_source() -> impl Strategy<Value = DevSource> {
    prop_oneof![
        Just(DevSource::Value),
        Just(DevSource::InheritProduction),
        Just(DevSource::InheritStaging),
    ]
}

fn tier_value() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z0-9]{1,12}")
}

fn global_variable() -> impl Strategy<Value = GlobalVariable> {
    (
        tier_value(),
        tier_value(),
        staging_source(),
        tier_value(),
        dev_source(),
        any::<bool>(),
    )
        .prop_map(
            |(production, staging, staging_source, dev, dev_source, is_secret)| GlobalVariable {
                key: "API_URL".into(),
                is_secret,
                production_value: production,
                staging_value: staging,
                staging_source,
                dev_value: dev,
                dev_source,
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: production is always its own literal value.
    #[test]
    fn property_production_never_inherits(var in global_variable()) {
        let resolved = resolve(&var, Tier::Production);
        prop_assert!(!resolved.inherited);
        prop_assert_eq!(resolved.value, var.production_value.as_deref());
    }

    /// PROPERTY: a lower tier's value never leaks into a higher tier.
    #[test]
    fn property_dev_value_never_flows_upward(
        var in global_variable(),
        other_dev in tier_value(),
        other_dev_source in dev_source(),
    ) {
        let mut changed = var.clone();
        changed.dev_value = other_dev;
        changed.dev_source = other_dev_source;

        prop_assert_eq!(resolve(&var, Tier::Production), resolve(&changed, Tier::Production));
        prop_assert_eq!(resolve(&var, Tier::Staging), resolve(&changed, Tier::Staging));
    }

    /// PROPERTY: every resolved value is one of the variable's stored values.
    #[test]
    fn property_resolution_only_returns_stored_values(var in global_variable()) {
        let stored = [
            var.production_value.as_deref(),
            var.staging_value.as_deref(),
            var.dev_value.as_deref(),
        ];
        for tier in [Tier::Production, Tier::Staging, Tier::Dev] {
            let value = resolve(&var, tier).value;
            prop_assert!(value.is_none() || stored.contains(&value));
        }
    }

    /// PROPERTY: dev inheriting staging sees exactly what staging resolves to.
    #[test]
    fn property_dev_follows_resolved_staging(var in global_variable()) {
        let mut var = var;
        var.dev_source = DevSource::InheritStaging;
        prop_assert_eq!(
            resolve(&var, Tier::Dev).value,
            resolve(&var, Tier::Staging).value
        );
        prop_assert!(resolve(&var, Tier::Dev).inherited);
    }
}
