//! Project validation
//!
//! Runs before any network call. Every problem is collected so the user sees
//! the whole list at once; only a missing manifest stops the checks early.

use std::path::{Component, Path};

use crate::domain::entities::{WorkflowManifest, MANIFEST_FILE};
use crate::error::{SolidError, SolidResult};

pub const PACKAGE_FILE: &str = "package.json";
pub const SDK_PACKAGE: &str = "@solidactions/sdk";

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Parsed manifest, when it could be read
    pub manifest: Option<WorkflowManifest>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The manifest on success, every collected error otherwise.
    pub fn into_manifest(self) -> SolidResult<WorkflowManifest> {
        if !self.errors.is_empty() {
            return Err(SolidError::Validation {
                errors: self.errors,
            });
        }
        self.manifest.ok_or_else(|| SolidError::Validation {
            errors: vec![format!("{} could not be read.", MANIFEST_FILE)],
        })
    }
}

pub fn validate_project(source_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    let manifest_path = source_dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        report.errors.push(format!(
            "{} not found. This file defines your workflows.",
            MANIFEST_FILE
        ));
        return report;
    }

    check_package(source_dir, &mut report);
    check_typescript(source_dir, &mut report);

    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => {
            report
                .errors
                .push(format!("Failed to parse {}: {}", MANIFEST_FILE, e));
            return report;
        }
    };
    match WorkflowManifest::parse(&content) {
        Ok(manifest) => {
            check_workflows(source_dir, &manifest, &mut report);
            report.manifest = Some(manifest);
        }
        Err(e) => report
            .errors
            .push(format!("Failed to parse {}: {}", MANIFEST_FILE, e)),
    }

    report
}

fn check_package(source_dir: &Path, report: &mut ValidationReport) {
    let package_path = source_dir.join(PACKAGE_FILE);
    let Ok(content) = std::fs::read_to_string(&package_path) else {
        report
            .errors
            .push(format!("{} not found. Initialize with: npm init", PACKAGE_FILE));
        return;
    };

    let package: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            report
                .errors
                .push(format!("Failed to parse {}: {}", PACKAGE_FILE, e));
            return;
        }
    };

    let declares_sdk = ["dependencies", "devDependencies"].iter().any(|section| {
        package
            .get(section)
            .and_then(|deps| deps.get(SDK_PACKAGE))
            .is_some()
    });
    let bundles_sdk = source_dir.join("sdk").exists();

    if !declares_sdk && !bundles_sdk {
        report.errors.push(format!(
            "Missing SDK in {} dependencies. Run: npm install {}",
            PACKAGE_FILE, SDK_PACKAGE
        ));
    }
}

fn check_typescript(source_dir: &Path, report: &mut ValidationReport) {
    let Ok(entries) = std::fs::read_dir(source_dir.join("src")) else {
        return;
    };
    let has_typescript = entries.flatten().any(|entry| {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        name.ends_with(".ts") || name.ends_with(".tsx")
    });
    if has_typescript && !source_dir.join("tsconfig.json").exists() {
        report.warnings.push(
            "TypeScript files detected but tsconfig.json not found. Build may fail.".to_string(),
        );
    }
}

fn check_workflows(source_dir: &Path, manifest: &WorkflowManifest, report: &mut ValidationReport) {
    let Some(workflows) = &manifest.workflows else {
        report.errors.push(format!(
            "Invalid {}: workflows section is required.",
            MANIFEST_FILE
        ));
        return;
    };

    for workflow in workflows {
        let Some(name) = &workflow.name else {
            report
                .errors
                .push("Workflow missing required 'name' field.".to_string());
            continue;
        };

        match (&workflow.command, &workflow.file) {
            (None, None) => {
                report.errors.push(format!(
                    "Workflow \"{}\": must specify either 'command:' or 'file:'.",
                    name
                ));
            }
            (Some(_), Some(_)) => {
                report.errors.push(format!(
                    "Workflow \"{}\": specify only one of 'command:' or 'file:'.",
                    name
                ));
            }
            (None, Some(file)) => {
                if !stays_inside_root(Path::new(file)) {
                    report.errors.push(format!(
                        "Workflow \"{}\": file \"{}\" must be inside the project directory.",
                        name, file
                    ));
                } else if !source_dir.join(file).exists() {
                    report.errors.push(format!(
                        "Workflow \"{}\": file \"{}\" not found.",
                        name, file
                    ));
                }
            }
            (Some(_), None) => {}
        }
    }
}

/// Relative, and never climbing above the root through `..`
fn stays_inside_root(file: &Path) -> bool {
    file.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PACKAGE: &str = r#"{"dependencies":{"@solidactions/sdk":"^1.0.0"}}"#;

    fn project(manifest: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), manifest).unwrap();
        fs::write(dir.path().join(PACKAGE_FILE), PACKAGE).unwrap();
        dir
    }

    #[test]
    fn missing_manifest_short_circuits() {
        let dir = tempdir().unwrap();
        let report = validate_project(dir.path());
        assert_eq!(
            report.errors,
            vec!["solidactions.yaml not found. This file defines your workflows."]
        );
        assert!(report.manifest.is_none());
    }

    #[test]
    fn valid_project_passes() {
        let dir = project("workflows:\n  - name: hello\n    file: src/hello.ts\n");
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/hello.ts"), "").unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();

        let report = validate_project(dir.path());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert_eq!(report.into_manifest().unwrap().workflows.unwrap().len(), 1);
    }

    #[test]
    fn collects_every_workflow_problem() {
        let dir = project(
            "workflows:\n  - command: echo\n  - name: a\n  - name: b\n    file: missing.ts\n  - name: c\n    command: x\n    file: y\n",
        );
        let report = validate_project(dir.path());
        assert_eq!(
            report.errors,
            vec![
                "Workflow missing required 'name' field.",
                "Workflow \"a\": must specify either 'command:' or 'file:'.",
                "Workflow \"b\": file \"missing.ts\" not found.",
                "Workflow \"c\": specify only one of 'command:' or 'file:'.",
            ]
        );
    }

    #[test]
    fn workflow_file_must_stay_inside_project() {
        let outside = tempdir().unwrap();
        let absolute = outside.path().join("escape.js");
        fs::write(&absolute, "").unwrap();

        let dir = project(&format!(
            "workflows:\n  - name: abs\n    file: {}\n  - name: up\n    file: ../escape.js\n  - name: dotted\n    file: ./src/../main.js\n",
            absolute.display()
        ));
        fs::write(dir.path().join("main.js"), "").unwrap();
        let report = validate_project(dir.path());

        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![
                format!(
                    "Workflow \"abs\": file \"{}\" must be inside the project directory.",
                    absolute.display()
                ),
                "Workflow \"up\": file \"../escape.js\" must be inside the project directory."
                    .to_string(),
                "Workflow \"dotted\": file \"./src/../main.js\" must be inside the project directory."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn workflows_section_required() {
        let dir = project("deployEnv: true\n");
        let report = validate_project(dir.path());
        assert_eq!(
            report.errors,
            vec!["Invalid solidactions.yaml: workflows section is required."]
        );
    }

    #[test]
    fn package_problems_are_reported_with_manifest_problems() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "workflows: []\n").unwrap();
        let report = validate_project(dir.path());
        assert_eq!(
            report.errors,
            vec!["package.json not found. Initialize with: npm init"]
        );

        fs::write(dir.path().join(PACKAGE_FILE), r#"{"dependencies":{}}"#).unwrap();
        let report = validate_project(dir.path());
        assert_eq!(
            report.errors,
            vec!["Missing SDK in package.json dependencies. Run: npm install @solidactions/sdk"]
        );

        fs::create_dir(dir.path().join("sdk")).unwrap();
        assert!(validate_project(dir.path()).is_valid());
    }

    #[test]
    fn typescript_without_tsconfig_warns() {
        let dir = project("workflows:\n  - name: a\n    command: node a.js\n");
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.ts"), "").unwrap();

        let report = validate_project(dir.path());
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec!["TypeScript files detected but tsconfig.json not found. Build may fail."]
        );
    }

    #[test]
    fn yaml_syntax_error_is_reported() {
        let dir = project("workflows: [\n");
        let report = validate_project(dir.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Failed to parse solidactions.yaml"));
    }
}
