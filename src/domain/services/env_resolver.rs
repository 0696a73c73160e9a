//! Tiered value resolution for global variables
//!
//! Inheritance only flows downward: dev may point at staging or production,
//! staging may point at production, production never inherits. The chain is
//! therefore at most two levels deep and cannot cycle.

use crate::domain::entities::{DevSource, GlobalVariable, StagingSource};
use crate::domain::value_objects::Tier;

/// Effective value of a variable in one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedValue<'a> {
    pub value: Option<&'a str>,
    /// The tier takes its value from a higher tier
    pub inherited: bool,
}

/// Resolve `var` for `tier`. Pure: depends only on the variable's fields.
pub fn resolve(var: &GlobalVariable, tier: Tier) -> ResolvedValue<'_> {
    match tier {
        Tier::Production => ResolvedValue {
            value: var.production_value.as_deref(),
            inherited: false,
        },
        Tier::Staging => ResolvedValue {
            value: staging_value(var),
            inherited: var.staging_source.is_inherited(),
        },
        Tier::Dev => {
            let value = match var.dev_source {
                DevSource::InheritProduction => var.production_value.as_deref(),
                DevSource::InheritStaging => staging_value(var),
                DevSource::Value => var.dev_value.as_deref(),
            };
            ResolvedValue {
                value,
                inherited: var.dev_source.is_inherited(),
            }
        }
    }
}

fn staging_value(var: &GlobalVariable) -> Option<&str> {
    match var.staging_source {
        StagingSource::InheritProduction => var.production_value.as_deref(),
        StagingSource::Value => var.staging_value.as_deref(),
    }
}
