//! CLI command handler: layer defaults, `.dirpipe.toml` and flags, then run the pipeline.

use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

use crate::engine::arg_parser::Cli;
use crate::pipeline::StaticPaths;
use crate::utils::{WorkerThreadLimits, apply_file_to_opts, load_dirpipe_toml, setup_logging};
use crate::{ConsumeMode, Opts};

/// Opts and source resolved for one run, plus the config file error if one was skipped.
pub struct Resolved {
    pub opts: Opts,
    pub source: StaticPaths,
    pub config_error: Option<anyhow::Error>,
}

/// Build opts and source: defaults, then the config file in `dir`, then CLI.
/// An unusable config file is skipped and returned in `config_error`.
pub fn resolve_opts(cli: &Cli, dir: &Path) -> Resolved {
    let mut opts = Opts::default();
    let mut source = StaticPaths::default();
    let mut config_error = None;
    match load_dirpipe_toml(dir) {
        Some(Ok(file)) => {
            apply_file_to_opts(&file, &mut opts);
            if let Some(paths) = file.paths() {
                source = StaticPaths::new(paths.iter().cloned());
            }
        }
        Some(Err(e)) => config_error = Some(e),
        None => {}
    }
    if !cli.paths.is_empty() {
        source = StaticPaths::new(cli.paths.iter().cloned());
    }
    if let Some(c) = cli.capacity {
        opts.capacity = c;
    }
    if let Some(w) = cli.wiring {
        opts.wiring = w;
    }
    if let Some(k) = cli.workers {
        opts.consume_mode = ConsumeMode::Pool(WorkerThreadLimits::current().resolve(k));
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(s) = cli.summary {
        opts.summary = s;
    }
    Resolved {
        opts,
        source,
        config_error,
    }
}

/// Run the pipeline once, printing events on stdout.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("read working directory")?;
    let Resolved {
        opts,
        source,
        config_error,
    } = resolve_opts(cli, &cwd);
    setup_logging(opts.verbose);
    if let Some(e) = config_error {
        warn!("ignoring config {:#}", e);
    }

    let report = crate::run(&source, &opts, None)?;
    if opts.summary {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize run report")?
        );
    }
    Ok(())
}
