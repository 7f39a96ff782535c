//! Common constants used throughout tfustomize.

/// Name of the build configuration file looked up in the target directory
pub const CONFIG_FILE: &str = "tfustomization.hcl";

/// Extension of the configuration files that can be loaded and merged
pub const HCL_EXTENSION: &str = "tf";

/// Default directory, relative to the target directory, for the merged output
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Default file name of the merged output
pub const DEFAULT_OUTPUT_FILE: &str = "main.tf";
