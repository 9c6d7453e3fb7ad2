use clap::Parser;
use std::process;

use taskflow::cli::{self, Cli};
use taskflow::logging;

fn main() {
    logging::init_tracing();
    let cli_args = Cli::parse();
    let exit_code = cli::run(cli_args);
    process::exit(exit_code);
}
