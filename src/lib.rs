//! dirpipe: bounded producer/consumer pipeline over directory paths.
//!
//! A producer fans out one task per path, each pushing into a bounded queue; a consumer drains
//! the queue until it is closed, fanning out one task per received path. The orchestrator
//! blocks until both stages are quiescent. Every produced path is received exactly once; output
//! order is not guaranteed.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use pipeline::{
    CompletionTracker, Event, EventSink, PathSource, RecordingSink, StaticPaths, StdoutSink,
};

use log::debug;
use std::sync::Arc;

/// Result alias used by public dirpipe API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: run the pipeline over `source` with `opts`, sending events to `sink`.
///
/// - **`sink: None`** → events are printed on stdout (what the CLI does).
/// - **`sink: Some(s)`** → events go to `s`, e.g. a [`RecordingSink`] to inspect them afterwards.
///
/// ```ignore
/// let sink = std::sync::Arc::new(dirpipe::RecordingSink::new());
/// let report = dirpipe::run(&dirpipe::StaticPaths::default(), &Default::default(), Some(sink.clone() as _))?;
/// assert_eq!(report.received, 3);
/// ```
pub fn run<S>(source: &S, opts: &Opts, sink: Option<Arc<dyn EventSink>>) -> Result<PipelineReport>
where
    S: PathSource + ?Sized,
{
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    let sink = sink.unwrap_or_else(|| Arc::new(StdoutSink) as Arc<dyn EventSink>);
    pipeline::run_pipeline(source, opts, sink)
}
