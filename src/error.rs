//! Error handling for tfustomize.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can abort a build.
///
/// Every variant is fatal: a build never emits partial output. Unrecognized
/// declaration types are not errors, they are only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A configured path, or the configuration file itself, does not exist
    #[error("No such file or directory: '{path}'.")]
    NotFound { path: String },

    /// A path explicitly names a file that is not a configuration file
    #[error("Unsupported file type: '{path}', only .{extension} files are supported.")]
    UnsupportedFileType { path: String, extension: String },

    /// The HCL parser rejected a file
    #[error("Syntax error in '{file}' at line {line}, column {column}: {message}.")]
    SyntaxError {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The build configuration does not match the expected schema
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The build configuration declares no resources
    #[error("Missing configuration: {0}.")]
    MissingConfiguration(String),

    /// A nested declaration strategy could not combine two declarations
    #[error("Merge error: {0}.")]
    MergeError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
