//! Bounded path queue: one closeable writer, any number of readers.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Item;

/// Write side. Not `Clone`: there is exactly one closer, and [`close`](Self::close) consumes it,
/// so a push after close or a second close does not compile.
pub struct QueueWriter {
    tx: Sender<Item>,
    pushed: Arc<AtomicUsize>,
}

/// Read side. Every clone sees end-of-stream once the writer is closed and the queue is drained.
#[derive(Clone)]
pub struct QueueReader {
    rx: Receiver<Item>,
}

/// Create a queue holding at most `capacity` items. Capacity 0 is a rendezvous queue.
pub fn create_path_queue(capacity: usize) -> (QueueWriter, QueueReader) {
    let (tx, rx) = bounded::<Item>(capacity);
    debug!("path queue created, capacity {}", capacity);
    (
        QueueWriter {
            tx,
            pushed: Arc::new(AtomicUsize::new(0)),
        },
        QueueReader { rx },
    )
}

impl QueueWriter {
    /// Push one item, blocking while the queue is full.
    /// Fails only when every reader has been dropped.
    pub fn push(&self, item: Item) -> Result<()> {
        self.tx
            .send(item)
            .map_err(|e| anyhow::anyhow!("path queue has no readers; dropped {}", e.0))?;
        self.pushed.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Completed pushes so far.
    pub fn pushed(&self) -> usize {
        self.pushed.load(Ordering::Acquire)
    }

    /// Signal end-of-stream. Returns the number of completed pushes at close time.
    ///
    /// ```
    /// let (writer, reader) = dirpipe::pipeline::create_path_queue(1);
    /// writer.push("/tmp".to_string()).unwrap();
    /// assert_eq!(writer.close(), 1);
    /// assert_eq!(reader.recv().as_deref(), Some("/tmp"));
    /// assert_eq!(reader.recv(), None);
    /// ```
    ///
    /// The writer is gone after closing, so a later push does not compile:
    ///
    /// ```compile_fail
    /// let (writer, _reader) = dirpipe::pipeline::create_path_queue(1);
    /// writer.close();
    /// writer.push("/late".to_string()).unwrap();
    /// ```
    ///
    /// Neither does a second close:
    ///
    /// ```compile_fail
    /// let (writer, _reader) = dirpipe::pipeline::create_path_queue(1);
    /// writer.close();
    /// writer.close();
    /// ```
    ///
    /// And there is no second writer to close with:
    ///
    /// ```compile_fail
    /// let (writer, _reader) = dirpipe::pipeline::create_path_queue(1);
    /// let other = writer.clone();
    /// writer.close();
    /// other.push("/late".to_string()).unwrap();
    /// ```
    pub fn close(self) -> usize {
        let pushed = self.pushed();
        drop(self.tx);
        debug!("path queue closed after {} pushes", pushed);
        pushed
    }
}

impl QueueReader {
    /// Block until an item arrives. `None` once the queue is closed and drained.
    pub fn recv(&self) -> Option<Item> {
        self.rx.recv().ok()
    }

    /// Iterate until the queue is closed and drained.
    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.rx.iter()
    }

    /// Items buffered right now.
    pub(crate) fn len(&self) -> usize {
        self.rx.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl IntoIterator for QueueReader {
    type Item = crate::Item;
    type IntoIter = crossbeam_channel::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.rx.into_iter()
    }
}
