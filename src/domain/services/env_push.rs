//! Planning a push of local `.env` values
//!
//! Only names declared in the manifest are considered. Declared names with no
//! value locally are reported, never fatal.

use std::collections::HashMap;

use crate::domain::entities::EnvValue;

const SECRET_MARKERS: [&str; 5] = ["secret", "key", "token", "password", "credential"];

/// Case-insensitive match against the secret markers
pub fn is_secret_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SECRET_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvPushPlan {
    pub variables: Vec<EnvValue>,
    /// Declared names absent from the local file
    pub missing: Vec<String>,
}

/// Match declared keys against parsed local values, preserving declaration order.
pub fn plan_env_push(declared: &[String], local: &HashMap<String, String>) -> EnvPushPlan {
    let mut plan = EnvPushPlan::default();
    for key in declared {
        match local.get(key) {
            Some(value) => plan.variables.push(EnvValue {
                key: key.clone(),
                value: value.clone(),
                is_secret: is_secret_name(key),
            }),
            None => plan.missing.push(key.clone()),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_classification() {
        assert!(is_secret_name("DB_TOKEN"));
        assert!(is_secret_name("stripe_api_KEY"));
        assert!(is_secret_name("ClientSecret"));
        assert!(is_secret_name("SMTP_PASSWORD"));
        assert!(is_secret_name("GCP_CREDENTIALS"));
        assert!(!is_secret_name("DB_HOST"));
        assert!(!is_secret_name("PORT"));
    }

    #[test]
    fn plan_splits_present_and_missing() {
        let declared = vec!["A".to_string(), "B".to_string(), "DB_TOKEN".to_string()];
        let local = HashMap::from([
            ("B".to_string(), "2".to_string()),
            ("DB_TOKEN".to_string(), "hunter2".to_string()),
            ("UNDECLARED".to_string(), "x".to_string()),
        ]);

        let plan = plan_env_push(&declared, &local);
        assert_eq!(plan.missing, vec!["A"]);
        assert_eq!(
            plan.variables,
            vec![
                EnvValue {
                    key: "B".into(),
                    value: "2".into(),
                    is_secret: false
                },
                EnvValue {
                    key: "DB_TOKEN".into(),
                    value: "hunter2".into(),
                    is_secret: true
                },
            ]
        );
    }
}
