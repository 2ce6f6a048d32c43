//! Trailing-debounce write-behind for key-value state
//!
//! Rapid state updates collapse into one write carrying the last value:
//! every `write` supersedes whatever is still pending, and the store is
//! only touched once the quiet period elapses. Dropping the writer
//! aborts the pending task, so no write lands after teardown.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::StoreResult;
use crate::kv::KvStore;

/// Quiet period before a pending value is written.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Default)]
struct Pending {
    task: Option<JoinHandle<()>>,
    value: Option<String>,
}

/// Debounced writer for a single key.
pub struct DebouncedWriter {
    kv: Arc<dyn KvStore>,
    key: String,
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl DebouncedWriter {
    pub fn new(kv: Arc<dyn KvStore>, key: impl Into<String>, delay: Duration) -> Self {
        Self {
            kv,
            key: key.into(),
            delay,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    /// Schedule `value` to be written after the quiet period, superseding
    /// any value still pending. Must be called from within a tokio
    /// runtime.
    pub fn write(&self, value: impl Into<String>) {
        let value = value.into();
        let mut pending = self.pending.lock().unwrap();
        if let Some(task) = pending.task.take() {
            task.abort();
        }
        pending.value = Some(value.clone());

        let kv = Arc::clone(&self.kv);
        let key = self.key.clone();
        let slot = Arc::clone(&self.pending);
        let delay = self.delay;
        pending.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = kv.set(&key, &value) {
                tracing::warn!(key = %key, error = %e, "debounced write failed");
            }
            let mut pending = slot.lock().unwrap();
            pending.task = None;
            pending.value = None;
        }));
    }

    /// Write any pending value immediately, cancelling the timer.
    pub fn flush(&self) -> StoreResult<()> {
        let (task, value) = {
            let mut pending = self.pending.lock().unwrap();
            (pending.task.take(), pending.value.take())
        };
        if let Some(task) = task {
            task.abort();
        }
        if let Some(value) = value {
            self.kv.set(&self.key, &value)?;
        }
        Ok(())
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(task) = pending.task.take() {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;

    #[tokio::test]
    async fn test_rapid_writes_collapse_to_last_value() {
        let kv = Arc::new(MemoryKv::new());
        let writer = DebouncedWriter::new(kv.clone(), "layout.cheque", Duration::from_millis(50));

        writer.write("a");
        writer.write("b");
        writer.write("c");
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(kv.writes(), 1);
        assert_eq!(kv.get("layout.cheque").unwrap().as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_no_write_after_teardown() {
        let kv = Arc::new(MemoryKv::new());
        let writer = DebouncedWriter::new(kv.clone(), "layout.cheque", Duration::from_millis(50));

        writer.write("doomed");
        drop(writer);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(kv.writes(), 0);
        assert_eq!(kv.get("layout.cheque").unwrap(), None);
    }

    #[tokio::test]
    async fn test_flush_writes_immediately() {
        let kv = Arc::new(MemoryKv::new());
        let writer = DebouncedWriter::new(kv.clone(), "layout.cheque", Duration::from_secs(60));

        writer.write("now");
        writer.flush().unwrap();

        assert_eq!(kv.writes(), 1);
        assert_eq!(kv.get("layout.cheque").unwrap().as_deref(), Some("now"));
    }

    #[tokio::test]
    async fn test_spaced_writes_both_land() {
        let kv = Arc::new(MemoryKv::new());
        let writer = DebouncedWriter::new(kv.clone(), "layout.cheque", Duration::from_millis(30));

        writer.write("first");
        tokio::time::sleep(Duration::from_millis(120)).await;
        writer.write("second");
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(kv.writes(), 2);
        assert_eq!(kv.get("layout.cheque").unwrap().as_deref(), Some("second"));
    }
}
