//! Public and internal types for the dirpipe API and pipeline.

use serde::{Deserialize, Serialize};

use crate::utils::config::DEFAULT_QUEUE_CAPACITY;

/// A directory path flowing through the pipeline. Never validated, never mutated.
pub type Item = String;

/// Who closes the queue and who owns the outer completion tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Wiring {
    /// Orchestrator wraps the producer and closes the queue on the wrapper's way out.
    #[default]
    CallerOwned,
    /// Stages get the orchestrator's tracker; the producer closes the queue itself.
    CalleeSignals,
}

/// How the consumer schedules per-item work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsumeMode {
    /// One task per received item.
    #[default]
    PerItem,
    /// Fixed pool of `k` workers sharing the queue.
    Pool(usize),
}

/// Lifecycle of a single run. Only moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePhase {
    Idle,
    /// Producer and consumer both live.
    Running,
    /// Queue closed; consumer finishing residual items.
    Draining,
    Done,
}

/// Summary of a finished run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineReport {
    /// Items the producer pushed.
    pub sent: usize,
    /// Items the consumer processed.
    pub received: usize,
    /// Completed pushes observed by the closer at close time.
    pub pushes_at_close: usize,
    /// Phases visited, in order.
    pub phases: Vec<PipelinePhase>,
}

/// Full options (CLI, config file, lib).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Queue capacity. 0 is a rendezvous queue.
    pub capacity: usize,
    pub wiring: Wiring,
    pub consume_mode: ConsumeMode,
    /// Debug-level logging for this crate.
    pub verbose: bool,
    /// Print the run report as JSON on stderr after completion.
    pub summary: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            wiring: Wiring::default(),
            consume_mode: ConsumeMode::default(),
            verbose: false,
            summary: false,
        }
    }
}
