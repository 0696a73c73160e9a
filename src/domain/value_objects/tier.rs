//! Tier value object - the deployment tier a project lives in
//!
//! Every project exists once per tier. Production uses the bare project name
//! as its slug; the other tiers append `-<tier>`.

use serde::{Deserialize, Serialize};

/// Deployment tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Production,
    Staging,
    #[default]
    Dev,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Production, Tier::Staging, Tier::Dev];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Production => "production",
            Tier::Staging => "staging",
            Tier::Dev => "dev",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Tier::Production)
    }

    /// Slug used to look up an existing project in this tier.
    pub fn project_slug(&self, name: &str) -> String {
        if self.is_production() {
            name.to_string()
        } else {
            format!("{}-{}", name, self.as_str())
        }
    }

    /// Slug sent when creating a project: lowercased, every character outside
    /// `[a-z0-9-]` replaced by `-`, then tier-qualified.
    pub fn create_slug(&self, name: &str) -> String {
        let base: String = name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.project_slug(&base)
    }

    /// Local env file holding this tier's values (`.env` or `.env.<tier>`).
    pub fn env_file_name(&self) -> String {
        if self.is_production() {
            ".env".to_string()
        } else {
            format!(".env.{}", self.as_str())
        }
    }

    /// Suffix used in progress messages: empty for production, ` (staging)` otherwise.
    pub fn label(&self) -> String {
        if self.is_production() {
            String::new()
        } else {
            format!(" ({})", self.as_str())
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Tier::Production),
            "staging" => Ok(Tier::Staging),
            "dev" | "development" => Ok(Tier::Dev),
            other => Err(format!(
                "unknown environment '{}' (expected production, staging or dev)",
                other
            )),
        }
    }
}
