//! Engine module: CLI parsing and the run handler.

pub mod arg_parser;
pub mod handlers;

pub use arg_parser::Cli;
pub use handlers::{Resolved, handle_run, resolve_opts};
