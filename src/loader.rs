//! Loading of configuration files into a single document.
//! Resolves configured paths to files and concatenates their top-level
//! blocks into one [`Document`] per side of the merge.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::constants::HCL_EXTENSION;
use crate::document::Document;
use crate::error::{Error, Result};

fn has_hcl_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(HCL_EXTENSION)
}

/// Resolves configured paths to the list of files to load.
///
/// # Arguments
/// * `base_dir` - Directory the configured paths are relative to
/// * `paths` - Configured file or directory paths
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Files in configured order; the files of a
///   directory are sorted by name
///
/// # Errors
/// * `Error::NotFound` if a path does not exist
/// * `Error::UnsupportedFileType` if a path names a file with another extension
///
/// # Notes
/// Directories are not scanned recursively. Files of other types found in a
/// directory are skipped with a warning.
pub fn collect_paths<P, S>(base_dir: P, paths: &[S]) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let base_dir = base_dir.as_ref();
    let mut files = Vec::new();

    for path in paths {
        let full_path = base_dir.join(path);
        if !full_path.exists() {
            return Err(Error::NotFound {
                path: full_path.display().to_string(),
            });
        }

        if full_path.is_dir() {
            for entry in WalkDir::new(&full_path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry.map_err(|e| Error::IoError(e.into()))?;
                let entry_path = entry.path();
                if !entry_path.is_file() {
                    debug!("Skipping '{}': not a file", entry_path.display());
                } else if has_hcl_extension(entry_path) {
                    files.push(entry_path.to_path_buf());
                } else {
                    warn!(
                        "Skipping '{}': only .{} files are supported",
                        entry_path.display(),
                        HCL_EXTENSION
                    );
                }
            }
        } else if has_hcl_extension(&full_path) {
            files.push(full_path);
        } else {
            return Err(Error::UnsupportedFileType {
                path: full_path.display().to_string(),
                extension: HCL_EXTENSION.to_string(),
            });
        }
    }

    debug!("Collected files: {:?}", files);
    Ok(files)
}

/// Parses every file and appends its top-level blocks into one document.
///
/// Blocks keep file order, then declaration order within a file. Top-level
/// attributes cannot be merged and are dropped.
///
/// # Errors
/// * `Error::IoError` if a file cannot be read
/// * `Error::SyntaxError` if a file cannot be parsed
pub fn concat_files<P: AsRef<Path>>(files: &[P]) -> Result<Document> {
    let mut output = Document::new();

    for file in files {
        let mut document = Document::read(file)?;
        for block in document.take_blocks() {
            output.push_block(block);
        }
        let dropped = document.attributes().count();
        if dropped > 0 {
            debug!(
                "Dropped {} top-level attribute(s) from '{}'",
                dropped,
                file.as_ref().display()
            );
        }
    }

    Ok(output)
}

/// Collects and concatenates the configured paths in one step.
pub fn load<P, S>(base_dir: P, paths: &[S]) -> Result<Document>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let files = collect_paths(base_dir, paths)?;
    concat_files(&files)
}
