//! Load `.dirpipe.toml` from a directory (CLI only). Lib callers build [`Opts`] directly.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::utils::config::{PackagePaths, WorkerThreadLimits};
use crate::{ConsumeMode, Item, Opts, Wiring};

#[derive(Debug, Default, Deserialize)]
pub struct DirpipeToml {
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, Default, Deserialize)]
struct Settings {
    capacity: Option<usize>,
    wiring: Option<Wiring>,
    /// Pool size; 0 = all available threads. Absent = one task per item.
    workers: Option<usize>,
    paths: Option<Vec<Item>>,
    verbose: Option<bool>,
    summary: Option<bool>,
}

impl DirpipeToml {
    /// Paths listed in the file, if any. Replaces the built-in list.
    pub fn paths(&self) -> Option<&[Item]> {
        self.settings.paths.as_deref()
    }
}

/// Parse config text. Errors carry the toml position.
pub fn parse_dirpipe_toml(s: &str) -> anyhow::Result<DirpipeToml> {
    Ok(toml::from_str(s)?)
}

/// Load `.dirpipe.toml` from `dir`. None if the file is missing; `Some(Err)` names the file when
/// it cannot be read or parsed. Logging is left to the caller, which may not have a logger yet.
pub fn load_dirpipe_toml(dir: &Path) -> Option<anyhow::Result<DirpipeToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return None;
    }
    Some(
        std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|s| parse_dirpipe_toml(&s))
            .with_context(|| path.display().to_string()),
    )
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($settings:expr, $opts:expr, $field:ident => $opts_field:ident) => {
        if let Some(v) = $settings.$field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &DirpipeToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, capacity => capacity);
    apply_file_opt!(s, opts, wiring => wiring);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, summary => summary);
    if let Some(k) = s.workers {
        opts.consume_mode = ConsumeMode::Pool(WorkerThreadLimits::current().resolve(k));
    }
}
