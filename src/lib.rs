//! tfustomize overlays patch files onto base Terraform configuration.
//! Base and patch files are concatenated, matching declarations are merged
//! and the result is rendered as a single deterministic HCL file.

/// Single build invocation: configuration, loading, merging and output
pub mod build;

/// Classification of top-level declaration types
pub mod classify;

/// Command-line interface module
pub mod cli;

/// Loading of tfustomization.hcl
pub mod config;

/// Shared file names and defaults
pub mod constants;

/// In-memory HCL document model and parser adapter
pub mod document;

/// Error types and handling
pub mod error;

/// Path collection and file concatenation
pub mod loader;

/// Logger initialization
pub mod logger;

/// Merge engine for base and overlay documents
pub mod merge;

/// Rendering of documents back to HCL text
pub mod printer;
