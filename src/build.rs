//! A single build invocation.
//! Loads the configuration of a target directory, concatenates its resources
//! and patches, merges them and renders the result.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::load_config;
use crate::error::{Error, Result};
use crate::loader::load;
use crate::merge::merge;
use crate::printer::render;

/// Builds the merged configuration of `target_dir`.
///
/// # Arguments
/// * `target_dir` - Directory containing `tfustomization.hcl`; configured
///   paths are relative to it
///
/// # Returns
/// * `Result<String>` - The rendered merge result
///
/// # Flow
/// 1. Loads and validates the configuration
/// 2. Concatenates the resource files into the base document
/// 3. Concatenates the patch files into the overlay document
/// 4. Merges the overlay into the base and renders the result
pub fn build_target<P: AsRef<Path>>(target_dir: P) -> Result<String> {
    let target_dir = target_dir.as_ref();
    let config = load_config(target_dir)?;
    if let Some(version) = &config.tfustomize.syntax_version {
        debug!("syntax_version: {}", version);
    }

    let base = load(target_dir, &config.resources.paths)?;
    let overlay = load(target_dir, &config.patches.paths)?;
    let merged = merge(base, overlay)?;

    Ok(render(&merged))
}

/// Writes the rendered result, creating the output directory if needed.
///
/// # Arguments
/// * `output_dir` - Directory to write into
/// * `output_file` - File name inside `output_dir`
/// * `content` - Rendered configuration
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written file
pub fn write_output<P: AsRef<Path>>(output_dir: P, output_file: &str, content: &str) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir).map_err(Error::IoError)?;
    }

    let output_path = output_dir.join(output_file);
    std::fs::write(&output_path, content).map_err(Error::IoError)?;
    debug!("Wrote {}", output_path.display());
    Ok(output_path)
}
