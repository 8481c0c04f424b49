pub mod config;
pub mod dirpipe_toml;
pub mod logger;

pub use config::*;
pub use dirpipe_toml::{apply_file_to_opts, load_dirpipe_toml, parse_dirpipe_toml};
pub use logger::setup_logging;
