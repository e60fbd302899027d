//! `tdc` binary entry point.

use clap::Parser;

use test_double_classifier::cli_app::{Cli, run};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("tdc: {err}");
        std::process::exit(err.exit_code());
    }
}
