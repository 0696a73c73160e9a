//! Lint test: prevent direct use of `dirs::home_dir()` in functional code.
//!
//! On Windows, `dirs::home_dir()` uses the system API instead of environment
//! variables, so integration tests could not redirect `~/.solidactions`.
//! Functional code goes through `solidactions_home_dir()` from
//! `src/infrastructure/fs/home.rs`, which honours `SOLIDACTIONS_TEST_HOME`.

use std::fs;
use std::path::Path;

/// Files that are allowed to use `dirs::home_dir()` directly.
const ALLOWED_FILES: &[&str] = &[
    "src/infrastructure/fs/home.rs", // Defines solidactions_home_dir()
];

fn visit_dirs(dir: &Path, violations: &mut Vec<String>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                visit_dirs(&path, violations);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                check_file(&path, violations);
            }
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<String>) {
    let relative = path
        .strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(path);
    let relative_str = relative.to_string_lossy().replace('\\', "/");

    if ALLOWED_FILES.iter().any(|f| relative_str.ends_with(f)) {
        return;
    }

    let Ok(content) = fs::read_to_string(path) else {
        return;
    };

    for (line_num, line) in content.lines().enumerate() {
        if line.contains("dirs::home_dir") {
            violations.push(format!(
                "{}:{}: Direct use of dirs::home_dir() - use solidactions_home_dir() instead",
                relative_str,
                line_num + 1
            ));
        }
    }
}

#[test]
fn no_raw_dirs_home_dir_in_functional_code() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut violations = Vec::new();
    visit_dirs(&src_dir, &mut violations);

    assert!(
        violations.is_empty(),
        "\n\nFound {} violation(s) of raw dirs::home_dir() usage:\n\n{}\n",
        violations.len(),
        violations.join("\n")
    );
}
