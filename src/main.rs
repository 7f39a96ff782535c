//! tfustomize entry point.
//! Parses the command line, sets up logging and runs the requested build.

use tfustomize::{
    build::{build_target, write_output},
    cli::{get_args, Args, Command},
    error::{default_error_handler, Result},
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.debug);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// The merged text is either printed or written, never both.
fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Build {
            dir,
            print,
            out,
            outfile,
        } => {
            let result = build_target(&dir)?;
            if print {
                print!("{}", result);
            } else {
                write_output(dir.join(out), &outfile, &result)?;
            }
        }
    }
    Ok(())
}
