//! dirpipe CLI: send directory paths through a bounded queue and report each one.

use anyhow::Result;
use clap::Parser;
use dirpipe::engine::{Cli, handle_run};
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
