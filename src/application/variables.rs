//! Global variables and project variable mappings
//!
//! Backs `env:create`, `env:list`, `env:delete` and `env:map`.

use crate::domain::entities::{
    DevSource, GlobalVariable, NewGlobalVariable, ProjectVariableMapping, StagingSource,
};
use crate::domain::ports::{Confirmer, MappingQuery, PlatformApi};
use crate::domain::value_objects::Tier;
use crate::error::{SolidError, SolidResult};

/// How staging and dev get their values on creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierSources {
    pub staging_value: Option<String>,
    pub staging_inherit: bool,
    pub dev_value: Option<String>,
    pub dev_inherit: bool,
    pub dev_inherit_staging: bool,
}

/// Build the create body. Inherit flags take precedence over literal values,
/// and `dev_inherit_staging` over `dev_inherit`.
pub fn new_global_variable(
    key: &str,
    production_value: &str,
    is_secret: bool,
    sources: &TierSources,
) -> SolidResult<NewGlobalVariable> {
    if key.trim().is_empty() {
        return Err(SolidError::InvalidInput(
            "Variable key must not be empty.".to_string(),
        ));
    }

    let mut body = NewGlobalVariable {
        key: key.to_string(),
        production_value: production_value.to_string(),
        is_secret,
        ..Default::default()
    };

    if sources.staging_inherit {
        body.staging_source = Some(StagingSource::InheritProduction);
    } else if let Some(value) = &sources.staging_value {
        body.staging_value = Some(value.clone());
        body.staging_source = Some(StagingSource::Value);
    }

    if sources.dev_inherit_staging {
        body.dev_source = Some(DevSource::InheritStaging);
    } else if sources.dev_inherit {
        body.dev_source = Some(DevSource::InheritProduction);
    } else if let Some(value) = &sources.dev_value {
        body.dev_value = Some(value.clone());
        body.dev_source = Some(DevSource::Value);
    }

    Ok(body)
}

/// What `env:delete` removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Global { key: String },
    Mapping { project: String, key: String },
}

impl DeleteTarget {
    /// `env:delete <key>` or `env:delete <project> <key>`
    pub fn from_args(first: &str, second: Option<&str>) -> Self {
        match second {
            Some(key) => DeleteTarget::Mapping {
                project: first.to_string(),
                key: key.to_string(),
            },
            None => DeleteTarget::Global {
                key: first.to_string(),
            },
        }
    }

    pub fn key(&self) -> &str {
        match self {
            DeleteTarget::Global { key } | DeleteTarget::Mapping { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// YAML-declared mapping: the server keeps the mapping and clears its value
    Cleared,
    Cancelled,
}

pub struct VariablesUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    api: &'a A,
    confirmer: &'a C,
}

impl<'a, A, C> VariablesUseCase<'a, A, C>
where
    A: PlatformApi + ?Sized,
    C: Confirmer + ?Sized,
{
    pub fn new(api: &'a A, confirmer: &'a C) -> Self {
        Self { api, confirmer }
    }

    pub fn create(&self, variable: &NewGlobalVariable) -> SolidResult<()> {
        self.api.create_variable(variable)
    }

    pub fn list_global(&self) -> SolidResult<Vec<GlobalVariable>> {
        self.api.list_variables()
    }

    /// Mappings of the tier's project, secrets masked by the server.
    pub fn list_project(&self, project: &str, tier: Tier) -> SolidResult<Vec<ProjectVariableMapping>> {
        let slug = tier.project_slug(project);
        self.api
            .list_mappings(&slug, MappingQuery::PLAIN)
            .map_err(|e| e.or_not_found(format!("Project \"{}\" ({})", project, tier), None))
    }

    pub fn delete(&self, target: &DeleteTarget) -> SolidResult<DeleteOutcome> {
        match target {
            DeleteTarget::Global { key } => self.delete_global(key),
            DeleteTarget::Mapping { project, key } => self.delete_mapping(project, key),
        }
    }

    fn delete_global(&self, key: &str) -> SolidResult<DeleteOutcome> {
        let variable = self
            .api
            .list_variables()?
            .into_iter()
            .find(|v| v.key == key)
            .ok_or_else(|| SolidError::not_found(format!("Global variable \"{}\"", key)))?;

        let question = format!(
            "Delete global variable \"{}\"? This may affect projects using this variable.",
            key
        );
        if !self.confirmer.confirm(&question)? {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api
            .delete_variable(&variable.id)
            .map_err(|e| e.or_not_found(format!("Variable \"{}\"", key), None))?;
        Ok(DeleteOutcome::Deleted)
    }

    fn delete_mapping(&self, project: &str, key: &str) -> SolidResult<DeleteOutcome> {
        let project_missing =
            |e: SolidError| e.or_not_found(format!("Project \"{}\"", project), None);

        let mapping = self
            .api
            .list_mappings(project, MappingQuery::PLAIN)
            .map_err(project_missing)?
            .into_iter()
            .find(|m| m.env_name == key)
            .ok_or_else(|| {
                SolidError::not_found(format!(
                    "Variable mapping \"{}\" in project \"{}\"",
                    key, project
                ))
            })?;

        let question = if mapping.is_yaml_declared {
            format!(
                "Clear YAML-declared variable \"{}\"? (The mapping will be preserved but value cleared)",
                key
            )
        } else {
            format!(
                "Delete variable mapping \"{}\" from project \"{}\"?",
                key, project
            )
        };
        if !self.confirmer.confirm(&question)? {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api
            .delete_mapping(project, &mapping.id)
            .map_err(project_missing)?;
        Ok(if mapping.is_yaml_declared {
            DeleteOutcome::Cleared
        } else {
            DeleteOutcome::Deleted
        })
    }

    /// Bind `global_key` to `project_key` inside `project`.
    pub fn map(&self, project: &str, project_key: &str, global_key: &str) -> SolidResult<()> {
        let variable = self
            .api
            .list_variables()?
            .into_iter()
            .find(|v| v.key == global_key)
            .ok_or_else(|| SolidError::NotFound {
                resource: format!("Global variable \"{}\"", global_key),
                hint: Some(format!(
                    "Create it with: solidactions env:create {} <value>",
                    global_key
                )),
            })?;

        self.api
            .create_mapping(project, project_key, &variable.id)
            .map_err(|e| e.or_not_found(format!("Project \"{}\"", project), None))
    }
}
