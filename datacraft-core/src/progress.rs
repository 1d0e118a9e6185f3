use crate::error::Warning;

/// Observer for a running encode or decode. All methods default to no-ops.
pub trait Progress: Sync {
    fn begin(&self, _first_id: u32, _chunks: u64) {}

    /// `done` counts from 1.
    fn chunk(&self, _id: u32, _done: u64, _total: u64) {}

    fn trimmed(&self, _from: u64, _to: u64) {}

    fn warn(&self, _warning: &Warning) {}
}

pub struct NoProgress;

impl Progress for NoProgress {}

/// Forwards progress to `tracing`.
pub struct LogProgress;

impl Progress for LogProgress {
    fn begin(&self, first_id: u32, chunks: u64) {
        tracing::info!(first_id, chunks, "run started");
    }

    fn chunk(&self, id: u32, done: u64, total: u64) {
        tracing::debug!(id, done, total, "map processed");
    }

    fn trimmed(&self, from: u64, to: u64) {
        tracing::info!(from, to, "trimmed padding");
    }

    fn warn(&self, warning: &Warning) {
        tracing::warn!("{warning}");
    }
}
