//! CLI entry point for overlapping wave function collapse generation

use clap::Parser;
use overtile::io::cli::{Cli, FileProcessor};

fn main() -> overtile::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
