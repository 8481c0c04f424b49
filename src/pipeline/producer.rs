//! Producer stage: one task per path, each announcing and pushing its own item.

use anyhow::Result;
use log::debug;
use std::thread;

use crate::Item;

use super::queue::QueueWriter;
use super::sink::{Event, EventSink};
use super::tracker::CompletionTracker;

/// What the producer stage observed when it closed the queue itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProducerOutcome {
    pub sent: usize,
    pub pushes_at_close: usize,
}

/// Single push task. Owns its item; nothing is shared with sibling tasks but the queue.
fn push_one(path: Item, writer: &QueueWriter, sink: &dyn EventSink) -> Result<()> {
    sink.emit(&Event::Sending(path.clone()));
    writer.push(path.clone())?;
    debug!("Loading: {}", path);
    Ok(())
}

/// Fan out one push per item and return once every push has completed.
/// Returns the number of items pushed. Does not close the queue.
pub fn produce(items: Vec<Item>, writer: &QueueWriter, sink: &dyn EventSink) -> Result<usize> {
    let total = items.len();
    debug!("producer: fanning out {} pushes", total);
    let results: Vec<Result<()>> = thread::scope(|s| {
        let handles: Vec<_> = items
            .into_iter()
            .map(|path| s.spawn(move || push_one(path, writer, sink)))
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(anyhow::anyhow!("push task panicked")))
            })
            .collect()
    });
    results.into_iter().collect::<Result<Vec<()>>>()?;
    debug!("producer: all {} pushes done", total);
    Ok(total)
}

/// Producer that signals its caller: pushes everything, closes the queue itself, then marks
/// one task done on `tracker` (the caller adds it). Done is signalled on error or panic too.
pub fn produce_and_close(
    items: Vec<Item>,
    writer: QueueWriter,
    sink: &dyn EventSink,
    tracker: &CompletionTracker,
) -> Result<ProducerOutcome> {
    let _done = tracker.done_on_drop();
    let pushed = produce(items, &writer, sink);
    // Close even on error so the consumer is never left waiting.
    let pushes_at_close = writer.close();
    Ok(ProducerOutcome {
        sent: pushed?,
        pushes_at_close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::queue::create_path_queue;
    use crate::pipeline::sink::RecordingSink;
    use std::collections::HashSet;

    fn paths(v: &[&str]) -> Vec<Item> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_produce_pushes_every_item() {
        let sink = RecordingSink::new();
        let (writer, reader) = create_path_queue(8);
        let sent = produce(paths(&["/x", "/y", "/z"]), &writer, &sink).unwrap();
        assert_eq!(sent, 3);
        assert_eq!(writer.close(), 3);

        let got: HashSet<Item> = reader.into_iter().collect();
        assert_eq!(got, paths(&["/x", "/y", "/z"]).into_iter().collect());
        let announced: HashSet<Item> = sink.sent().into_iter().collect();
        assert_eq!(announced, got);
    }

    #[test]
    fn test_produce_with_full_queue_waits_for_reader() {
        let sink = RecordingSink::new();
        let (writer, reader) = create_path_queue(1);
        let drain = thread::spawn(move || reader.into_iter().count());
        let sent = produce(paths(&["/1", "/2", "/3", "/4", "/5"]), &writer, &sink).unwrap();
        assert_eq!(writer.close(), sent);
        assert_eq!(drain.join().unwrap(), 5);
    }

    #[test]
    fn test_produce_and_close_releases_tracker() {
        let sink = RecordingSink::new();
        let tracker = CompletionTracker::new();
        tracker.add(1);
        let (writer, reader) = create_path_queue(4);
        let out = produce_and_close(paths(&["/a", "/b"]), writer, &sink, &tracker).unwrap();
        assert_eq!(
            out,
            ProducerOutcome {
                sent: 2,
                pushes_at_close: 2
            }
        );
        assert_eq!(tracker.count(), 0);
        assert_eq!(reader.into_iter().count(), 2);
    }

    #[test]
    fn test_produce_and_close_without_reader_still_closes() {
        let sink = RecordingSink::new();
        let tracker = CompletionTracker::new();
        tracker.add(1);
        let (writer, reader) = create_path_queue(1);
        drop(reader);
        assert!(produce_and_close(paths(&["/a"]), writer, &sink, &tracker).is_err());
        assert_eq!(tracker.count(), 0);
    }
}
