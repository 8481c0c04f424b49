//! Pipeline components: queue, completion tracker, source, stages, orchestrator.

pub mod consumer;
pub mod orchestrator;
pub mod producer;
pub mod queue;
pub mod sink;
pub mod source;
pub mod tracker;

pub use consumer::{consume, consume_and_signal};
pub use orchestrator::{PhaseLog, run_pipeline};
pub use producer::{ProducerOutcome, produce, produce_and_close};
pub use queue::{QueueReader, QueueWriter, create_path_queue};
pub use sink::{Event, EventSink, RecordingSink, StdoutSink};
pub use source::{PathSource, StaticPaths};
pub use tracker::{CompletionTracker, TrackerGuard};
