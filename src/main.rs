//! Kratestack's main application entry point.
//! Parses the command line, installs the logger and maps failures to exit status 1.

use kratestack::{
    cli::{get_args, run},
    error::default_error_handler,
    logger::init_logger,
    prompt::DialoguerPrompter,
};

fn main() {
    let cli = get_args();
    init_logger(cli.command.verbose());

    let prompt = DialoguerPrompter::new();
    if let Err(err) = run(cli.command, &prompt) {
        default_error_handler(err);
    }
}
