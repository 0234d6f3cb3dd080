//! CLI entry point for labelled point-pattern correlation analysis

use clap::Parser;
use pointcorr::io::cli::{BatchRunner, Cli};

fn main() -> pointcorr::Result<()> {
    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli);
    runner.process()
}
