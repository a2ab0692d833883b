//! CLI entry point for tile model building and streaming walk simulation

use clap::Parser;
use motifstream::io::cli::{Cli, FileProcessor};
use motifstream::io::logging::init_logging;

fn main() -> motifstream::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_filter());
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
