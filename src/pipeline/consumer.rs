//! Consumer stage: drain the queue until it is closed, processing every item exactly once.

use anyhow::Result;
use log::debug;
use std::thread;

use crate::{ConsumeMode, Item};

use super::queue::QueueReader;
use super::sink::{Event, EventSink};
use super::tracker::CompletionTracker;

fn receive_one(path: Item, sink: &dyn EventSink) {
    sink.emit(&Event::Received(path));
}

/// One task per received item. Returns after every task has finished.
fn consume_per_item(reader: &QueueReader, sink: &dyn EventSink) -> Result<usize> {
    thread::scope(|s| -> Result<usize> {
        let mut handles = Vec::new();
        for path in reader.iter() {
            handles.push(s.spawn(move || receive_one(path, sink)));
        }
        debug!("consumer: queue drained, waiting on {} tasks", handles.len());
        let received = handles.len();
        for h in handles {
            h.join()
                .map_err(|_| anyhow::anyhow!("receive task panicked"))?;
        }
        Ok(received)
    })
}

/// `workers` threads share the reader; each exits when it sees end-of-stream.
fn consume_pool(reader: &QueueReader, sink: &dyn EventSink, workers: usize) -> Result<usize> {
    let workers = workers.max(1);
    debug!(
        "consumer: {} pool workers, {} items already queued",
        workers,
        reader.len()
    );
    thread::scope(|s| -> Result<usize> {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let reader = reader.clone();
                s.spawn(move || {
                    let mut n = 0_usize;
                    while let Some(path) = reader.recv() {
                        receive_one(path, sink);
                        n += 1;
                    }
                    n
                })
            })
            .collect();
        let mut received = 0;
        for h in handles {
            received += h
                .join()
                .map_err(|_| anyhow::anyhow!("consumer worker panicked"))?;
        }
        Ok(received)
    })
}

/// Drain `reader` until the queue is closed and empty. Returns the number of items processed.
/// Nothing is in flight when this returns.
pub fn consume(reader: &QueueReader, sink: &dyn EventSink, mode: ConsumeMode) -> Result<usize> {
    let received = match mode {
        ConsumeMode::PerItem => consume_per_item(reader, sink)?,
        ConsumeMode::Pool(k) => consume_pool(reader, sink, k)?,
    };
    debug!("consumer: {} items received", received);
    Ok(received)
}

/// Consumer that marks one task done on `tracker` (the caller adds it) when it returns.
pub fn consume_and_signal(
    reader: QueueReader,
    sink: &dyn EventSink,
    mode: ConsumeMode,
    tracker: &CompletionTracker,
) -> Result<usize> {
    let _done = tracker.done_on_drop();
    consume(&reader, sink, mode)
}
