//! Command-line interface implementation for tfustomize.
//! Provides argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE};

/// Command-line arguments structure for tfustomize.
#[derive(Parser, Debug)]
#[command(author, version, about = "Customization of Terraform HCL", long_about = None)]
pub struct Args {
    /// Enable debug logging output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a tfustomization target from a directory.
    ///
    /// Reads tfustomization.hcl in the directory, concatenates the files listed
    /// in its resources and patches blocks and merges the patches into the
    /// resources.
    Build {
        /// Directory containing tfustomization.hcl
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Print the result to the console instead of writing to a file
        #[arg(short, long)]
        print: bool,

        /// Output directory, relative to DIR
        #[arg(short = 'o', long = "out", default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,

        /// Output filename
        #[arg(short = 'f', long = "outfile", default_value = DEFAULT_OUTPUT_FILE)]
        outfile: String,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
