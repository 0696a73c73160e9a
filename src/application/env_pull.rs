//! `env:pull` - write a project's resolved variables to a local env file
//!
//! Two modes: a full pull that rewrites the file, and an OAuth-only merge
//! that replaces token lines in place and keeps everything else.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::ProjectVariableMapping;
use crate::domain::ports::{Confirmer, MappingQuery, PlatformApi};
use crate::domain::services::dotenv::{self, PulledVariable};
use crate::domain::value_objects::Tier;
use crate::error::SolidResult;
use crate::infrastructure::fs::write_atomic;

pub const SECRET_NOTICE: &str = "This project contains secret values.";
pub const SECRET_QUESTION: &str = "This will expose secret values in plain text. Continue?";

#[derive(Debug, Clone)]
pub struct EnvPullOptions {
    pub project: String,
    pub tier: Tier,
    /// Output file; defaults to the tier's env file name
    pub output: Option<PathBuf>,
    /// Skip the secret confirmation
    pub yes: bool,
    pub update_oauth: bool,
    /// Directory relative outputs are resolved against
    pub base_dir: PathBuf,
}

impl EnvPullOptions {
    pub fn new(project: impl Into<String>, tier: Tier, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            tier,
            output: None,
            yes: false,
            update_oauth: false,
            base_dir: base_dir.into(),
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_yes(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    pub fn with_update_oauth(mut self, update_oauth: bool) -> Self {
        self.update_oauth = update_oauth;
        self
    }

    /// Output as the user named it
    pub fn output_name(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.tier.env_file_name()))
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(self.output_name())
    }
}

/// Server-side warning attached to an OAuth variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthWarning {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvPullOutcome {
    /// The project has no mappings
    NoVariables,
    /// The user declined to reveal secrets
    Cancelled,
    /// `--update-oauth` found nothing to update
    NoOAuthVariables,
    Written {
        file: PathBuf,
        written: usize,
        secrets: usize,
        warnings: Vec<OAuthWarning>,
    },
    OAuthMerged {
        file: PathBuf,
        /// OAuth variables seen, including ones without a value
        count: usize,
        /// The file did not exist and holds only OAuth lines
        created: bool,
        warnings: Vec<OAuthWarning>,
    },
}

pub struct EnvPullUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    api: &'a A,
    confirmer: &'a C,
}

impl<'a, A, C> EnvPullUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    pub fn new(api: &'a A, confirmer: &'a C) -> Self {
        Self { api, confirmer }
    }

    pub fn execute(&self, options: &EnvPullOptions) -> SolidResult<EnvPullOutcome> {
        self.execute_at(options, Utc::now())
    }

    pub fn execute_at(
        &self,
        options: &EnvPullOptions,
        now: DateTime<Utc>,
    ) -> SolidResult<EnvPullOutcome> {
        let slug = options.tier.project_slug(&options.project);
        let not_found = |e: crate::error::SolidError| {
            let hint = (!options.tier.is_production()).then(|| {
                format!(
                    "Try deploying with: solidactions deploy {} --env {} --create",
                    options.project, options.tier
                )
            });
            e.or_not_found(format!("Project \"{}\"", slug), hint)
        };

        let preview = self
            .api
            .list_mappings(
                &slug,
                MappingQuery {
                    reveal: false,
                    resolve_oauth: true,
                },
            )
            .map_err(not_found)?;
        if preview.is_empty() {
            return Ok(EnvPullOutcome::NoVariables);
        }

        let has_secrets = preview.iter().any(|m| m.is_secret);
        if has_secrets && !options.yes && !options.update_oauth {
            let question = format!("{}\n{}", SECRET_NOTICE, SECRET_QUESTION);
            if !self.confirmer.confirm(&question)? {
                return Ok(EnvPullOutcome::Cancelled);
            }
        }

        let mappings = self
            .api
            .list_mappings(
                &slug,
                MappingQuery {
                    reveal: true,
                    resolve_oauth: true,
                },
            )
            .map_err(not_found)?;

        if options.update_oauth {
            merge_oauth_into(&options.output_path(), options.output_name(), &mappings, now)
        } else {
            write_full(options, &mappings, now)
        }
    }
}

fn warnings_of<'m>(mappings: impl Iterator<Item = &'m ProjectVariableMapping>) -> Vec<OAuthWarning> {
    mappings
        .filter_map(|m| {
            m.oauth_warning
                .as_ref()
                .filter(|w| !w.is_empty())
                .map(|w| OAuthWarning {
                    key: m.env_name.clone(),
                    message: w.clone(),
                })
        })
        .collect()
}

fn write_full(
    options: &EnvPullOptions,
    mappings: &[ProjectVariableMapping],
    now: DateTime<Utc>,
) -> SolidResult<EnvPullOutcome> {
    let variables: Vec<PulledVariable> = mappings.iter().map(PulledVariable::from).collect();
    let pull = dotenv::render_full_pull(&options.project, options.tier, now, &variables);
    let path = options.output_path();
    write_atomic(&path, pull.content.as_bytes())?;
    info!(path = %path.display(), written = pull.written, "env file written");

    Ok(EnvPullOutcome::Written {
        file: options.output_name(),
        written: pull.written,
        secrets: pull.secrets,
        warnings: warnings_of(mappings.iter()),
    })
}

fn merge_oauth_into(
    path: &Path,
    file: PathBuf,
    mappings: &[ProjectVariableMapping],
    now: DateTime<Utc>,
) -> SolidResult<EnvPullOutcome> {
    let oauth: Vec<&ProjectVariableMapping> = mappings.iter().filter(|m| m.is_oauth()).collect();
    if oauth.is_empty() {
        return Ok(EnvPullOutcome::NoOAuthVariables);
    }

    let keys: HashSet<String> = oauth.iter().map(|m| m.env_name.clone()).collect();
    let variables: Vec<PulledVariable> = oauth.iter().map(|m| PulledVariable::from(*m)).collect();
    let lines = dotenv::render_oauth_lines(&variables);

    let existing = match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };
    let created = existing.is_none();
    let content = dotenv::merge_oauth(existing.as_deref(), &keys, &lines, now);
    write_atomic(path, content.as_bytes())?;

    Ok(EnvPullOutcome::OAuthMerged {
        file,
        count: oauth.len(),
        created,
        warnings: warnings_of(oauth.into_iter()),
    })
}
