//! TOML catalog parser.
//!
//! Loads stimulus catalogs from TOML files and directories, and
//! validates them beyond the structural checks `Catalog::check` does.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{Catalog, Trial};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    focus: Vec<TomlTrial>,
    #[serde(default)]
    letter: Vec<TomlTrial>,
    memory: TomlMemory,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlTrial {
    target: String,
    options: Vec<String>,
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlMemory {
    values: Vec<String>,
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let trial = |t: TomlTrial| Trial {
        target: t.target,
        options: t.options,
        prompt: t.prompt,
    };

    let catalog = Catalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        focus: parsed.focus.into_iter().map(trial).collect(),
        letter: parsed.letter.into_iter().map(trial).collect(),
        memory_values: parsed.memory.values,
    };

    catalog
        .check()
        .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    Ok(catalog)
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The trial target (if applicable).
    pub target: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for quality issues a structurally sound file can
/// still have.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate options within a trial make the choice ambiguous to
    // render even though only the target counts.
    for trial in catalog.focus.iter().chain(&catalog.letter) {
        let mut seen = std::collections::HashSet::new();
        for option in &trial.options {
            if !seen.insert(option) {
                warnings.push(ValidationWarning {
                    target: Some(trial.target.clone()),
                    message: format!("duplicate option {option:?} in trial"),
                });
            }
        }
    }

    // Single-option trials cannot discriminate anything.
    for trial in catalog.focus.iter().chain(&catalog.letter) {
        if trial.options.len() < 2 {
            warnings.push(ValidationWarning {
                target: Some(trial.target.clone()),
                message: "trial has fewer than 2 options".into(),
            });
        }
    }

    // Focus trials without a prompt fall back to silent presentation.
    for trial in &catalog.focus {
        if trial.prompt.is_none() {
            warnings.push(ValidationWarning {
                target: Some(trial.target.clone()),
                message: "focus trial has no narration prompt".into(),
            });
        }
    }

    if catalog.memory_values.len() > 6 {
        warnings.push(ValidationWarning {
            target: None,
            message: format!(
                "{} memory values make a {}-card board, which is large for the target age group",
                catalog.memory_values.len(),
                catalog.memory_values.len() * 2
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[catalog]
id = "animals"
name = "Animal Friends"
description = "Animal-themed stimuli"

[[focus]]
target = "🐶"
options = ["🐶", "🐱", "🐸"]
prompt = "Find the puppy!"

[[focus]]
target = "🐱"
options = ["🐶", "🐱", "🐸"]
prompt = "Find the kitten!"

[[letter]]
target = "A"
options = ["A", "B", "C"]

[[letter]]
target = "B"
options = ["A", "B", "C"]

[memory]
values = ["🐶", "🐱", "🐸", "🦋"]
"#;

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.id, "animals");
        assert_eq!(catalog.name, "Animal Friends");
        assert_eq!(catalog.focus.len(), 2);
        assert_eq!(catalog.focus[0].prompt.as_deref(), Some("Find the puppy!"));
        assert_eq!(catalog.letter.len(), 2);
        assert_eq!(catalog.pair_count(), 4);
    }

    #[test]
    fn parse_rejects_broken_catalog() {
        // Target missing from its own options.
        let toml = r#"
[catalog]
id = "broken"
name = "Broken"

[[focus]]
target = "🐶"
options = ["🐱", "🐸"]

[[letter]]
target = "A"
options = ["A", "B"]

[memory]
values = ["🐶", "🐱"]
"#;
        let result = parse_catalog_str(toml, &PathBuf::from("broken.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_catalog_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_duplicate_options() {
        let toml = r#"
[catalog]
id = "dupes"
name = "Dupes"

[[focus]]
target = "🐶"
options = ["🐶", "🐱", "🐱"]
prompt = "Find the puppy!"

[[letter]]
target = "A"
options = ["A", "B"]

[memory]
values = ["🐶", "🐱"]
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_missing_prompt() {
        let toml = r#"
[catalog]
id = "quiet"
name = "Quiet"

[[focus]]
target = "🐶"
options = ["🐶", "🐱"]

[[letter]]
target = "A"
options = ["A", "B"]

[memory]
values = ["🐶", "🐱"]
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("narration prompt")));
    }

    #[test]
    fn builtin_catalog_is_clean() {
        let warnings = validate_catalog(&Catalog::builtin());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("animals.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let catalogs = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].id, "animals");
    }
}
