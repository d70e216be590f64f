//! # labxml Converter
//!
//! A command-line tool for turning chromatography vendor files into plain XML
//! and human-readable text reports.
//!
//! ## Usage
//!
//! ```bash
//! # Copy Data_to_parse/ into Output/ and convert everything in the copy
//! labxml-convert -v run
//!
//! # Single files
//! labxml-convert scml Sampler_1.scml
//! labxml-convert report sample_acaml.xml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
