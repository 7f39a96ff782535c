//! Build configuration handling.
//! Loads `tfustomization.hcl`, which names the base resources and the
//! patches to overlay on them.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};

/// Contents of `tfustomization.hcl`.
///
/// ```hcl
/// tfustomize {
///   syntax_version = "v1"
/// }
/// resources {
///   paths = ["../base"]
/// }
/// patches {
///   paths = ["patch.tf"]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub tfustomize: Metadata,
    #[serde(default)]
    pub resources: PathList,
    #[serde(default)]
    pub patches: PathList,
}

/// The `tfustomize` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    #[serde(default)]
    pub syntax_version: Option<String>,
}

/// A `resources` or `patches` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathList {
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Returns the configuration file path inside `target_dir`.
pub fn config_path<P: AsRef<Path>>(target_dir: P) -> PathBuf {
    target_dir.as_ref().join(CONFIG_FILE)
}

/// Parses and validates configuration content.
///
/// # Errors
/// * `Error::ConfigError` if the content does not match the schema
/// * `Error::MissingConfiguration` if no resource paths are declared
pub fn parse_config(content: &str) -> Result<BuildConfig> {
    let config: BuildConfig = hcl::from_str(content)
        .map_err(|e| Error::ConfigError(format!("Invalid {}: {}", CONFIG_FILE, e)))?;

    if config.resources.paths.is_empty() {
        return Err(Error::MissingConfiguration(format!(
            "{} must have a resources block with at least one path",
            CONFIG_FILE
        )));
    }

    Ok(config)
}

/// Loads the configuration of a build target directory.
///
/// # Arguments
/// * `target_dir` - Directory containing `tfustomization.hcl`
///
/// # Errors
/// * `Error::NotFound` if the configuration file does not exist
/// * Any error of [`parse_config`]
pub fn load_config<P: AsRef<Path>>(target_dir: P) -> Result<BuildConfig> {
    let path = config_path(target_dir);
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.display().to_string(),
        });
    }

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
    let config = parse_config(&content)?;
    debug!("{} is loaded: {:?}", CONFIG_FILE, config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
tfustomize {
  syntax_version = "v1"
}

resources {
  paths = ["../base", "extra.tf"]
}

patches {
  paths = ["patch.tf"]
}
"#,
        )
        .unwrap();

        assert_eq!(config.tfustomize.syntax_version.as_deref(), Some("v1"));
        assert_eq!(config.resources.paths, vec!["../base", "extra.tf"]);
        assert_eq!(config.patches.paths, vec!["patch.tf"]);
    }

    #[test]
    fn test_patches_are_optional() {
        let config = parse_config("resources {\n  paths = [\"base.tf\"]\n}\n").unwrap();

        assert!(config.patches.paths.is_empty());
        assert!(config.tfustomize.syntax_version.is_none());
    }

    #[test]
    fn test_missing_resources() {
        let err = parse_config("patches {\n  paths = [\"patch.tf\"]\n}\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));

        let err = parse_config("resources {\n  paths = []\n}\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));
    }

    #[test]
    fn test_broken_schema() {
        let err = parse_config("resource {\n  paths = [\"base.tf\"]\n}\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = parse_config("resources {\n  paths = \"base.tf\"\n}\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
