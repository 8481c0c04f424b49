//! Application configuration constants.
//! Defaults and package-derived names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Config file looked up in the working directory (e.g. `.dirpipe.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Queue ----

/// Capacity of the path queue when neither config nor CLI sets one.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2;

// ---- Source ----

/// Paths produced when none are given. Stand-in for a real directory walk.
pub const DEFAULT_PATHS: [&str; 3] = ["/tmp", "/home/x/Downloads", "/home/x/go"];

// ---- Worker threads ----

/// Pool size limits for [`ConsumeMode::Pool`](crate::ConsumeMode::Pool).
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never run fewer workers than this.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Resolve a requested worker count: 0 means "all available threads".
    pub fn resolve(&self, requested: usize) -> usize {
        let n = if requested == 0 {
            self.all_threads
        } else {
            requested
        };
        n.max(self.floor)
    }
}
