//! arena-config: generate the YAML configs consumed by the hard arena benchmark
//!
//! This tool loads the three base config templates (api, answer generation,
//! judge), merges CLI-supplied run parameters and preset evaluator entries
//! into them, and writes the merged results back as `*_test.yaml` files.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod merge;
mod presets;
mod secrets;

fn main() -> Result<()> {
    cli::run()
}
