use anyhow::{Context, Result};
use log::debug;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::pipeline::{
    CompletionTracker, Event, EventSink, PathSource, ProducerOutcome, consume,
    consume_and_signal, create_path_queue, produce, produce_and_close,
};
use crate::{Item, Opts, PipelinePhase, PipelineReport, Wiring};

/// Forward-only record of the pipeline's phases, shared with the stage threads.
#[derive(Clone)]
pub struct PhaseLog {
    inner: Arc<Mutex<Vec<PipelinePhase>>>,
}

impl Default for PhaseLog {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(vec![PipelinePhase::Idle])),
        }
    }
}

impl PhaseLog {
    /// Move to `next`. Moving backwards or staying put is ignored.
    pub fn advance(&self, next: PipelinePhase) {
        let mut phases = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let cur = *phases.last().unwrap_or(&PipelinePhase::Idle);
        if next > cur {
            debug!("pipeline: {:?} -> {:?}", cur, next);
            phases.push(next);
        }
    }

    pub fn history(&self) -> Vec<PipelinePhase> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Handles for the two top-level stages plus the tracker that covers both.
struct StageHandles {
    tracker: CompletionTracker,
    producer: JoinHandle<Result<ProducerOutcome>>,
    consumer: JoinHandle<Result<usize>>,
}

/// Caller owns the lifecycle: the orchestrator's producer wrapper closes the queue on its way out.
fn launch_caller_owned(
    items: Vec<Item>,
    opts: &Opts,
    sink: Arc<dyn EventSink>,
    phases: &PhaseLog,
) -> StageHandles {
    let tracker = CompletionTracker::new();
    let (writer, reader) = create_path_queue(opts.capacity);
    let mode = opts.consume_mode;

    // Producer first: the consumer never reads from a queue nobody has started filling.
    let producer = {
        let done = tracker.enter();
        let phases = phases.clone();
        let sink = Arc::clone(&sink);
        thread::spawn(move || -> Result<ProducerOutcome> {
            let _done = done;
            let sent = produce(items, &writer, sink.as_ref());
            let pushes_at_close = writer.close();
            phases.advance(PipelinePhase::Draining);
            Ok(ProducerOutcome {
                sent: sent?,
                pushes_at_close,
            })
        })
    };

    let consumer = {
        let done = tracker.enter();
        thread::spawn(move || {
            let _done = done;
            consume(&reader, sink.as_ref(), mode)
        })
    };

    StageHandles {
        tracker,
        producer,
        consumer,
    }
}

/// Callee signals caller: each stage decrements the orchestrator's tracker itself and the
/// producer closes the queue.
fn launch_callee_signals(
    items: Vec<Item>,
    opts: &Opts,
    sink: Arc<dyn EventSink>,
    phases: &PhaseLog,
) -> StageHandles {
    let tracker = CompletionTracker::new();
    let (writer, reader) = create_path_queue(opts.capacity);
    let mode = opts.consume_mode;

    // Added before either stage starts; each stage marks itself done on return.
    tracker.add(2);

    let producer = {
        let tracker = tracker.clone();
        let phases = phases.clone();
        let sink = Arc::clone(&sink);
        thread::spawn(move || {
            let out = produce_and_close(items, writer, sink.as_ref(), &tracker);
            phases.advance(PipelinePhase::Draining);
            out
        })
    };

    let consumer = {
        let tracker = tracker.clone();
        thread::spawn(move || consume_and_signal(reader, sink.as_ref(), mode, &tracker))
    };

    StageHandles {
        tracker,
        producer,
        consumer,
    }
}

/// Join a stage thread after the tracker reached zero.
fn join_stage<T>(handle: JoinHandle<Result<T>>, name: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("{} thread panicked", name))?
        .with_context(|| format!("{} stage failed", name))
}

/// Main orchestrator: run producer and consumer concurrently over one bounded queue, block
/// until both are quiescent, then emit `All done!`.
/// Idle → Running → Draining → Done.
pub fn run_pipeline<S>(source: &S, opts: &Opts, sink: Arc<dyn EventSink>) -> Result<PipelineReport>
where
    S: PathSource + ?Sized,
{
    let items = source.paths();
    let expected = items.len();
    let phases = PhaseLog::default();
    debug!(
        "pipeline: {} items, capacity {}, {:?}, {:?}",
        expected, opts.capacity, opts.wiring, opts.consume_mode
    );

    // Entered before launch: a short run can close the queue before this thread resumes.
    phases.advance(PipelinePhase::Running);
    let stages = match opts.wiring {
        Wiring::CallerOwned => launch_caller_owned(items, opts, Arc::clone(&sink), &phases),
        Wiring::CalleeSignals => launch_callee_signals(items, opts, Arc::clone(&sink), &phases),
    };

    stages.tracker.wait();
    debug!("pipeline: both stages returned");

    let produced = join_stage(stages.producer, "producer");
    let received = join_stage(stages.consumer, "consumer");
    let ProducerOutcome {
        sent,
        pushes_at_close,
    } = produced?;
    let received = received?;

    if pushes_at_close != expected || sent != expected {
        anyhow::bail!(
            "queue closed after {} of {} pushes ({} sent)",
            pushes_at_close,
            expected,
            sent
        );
    }
    if received != sent {
        anyhow::bail!("consumer received {} of {} items", received, sent);
    }

    phases.advance(PipelinePhase::Done);
    sink.emit(&Event::AllDone);

    Ok(PipelineReport {
        sent,
        received,
        pushes_at_close,
        phases: phases.history(),
    })
}
