//! High-level runtime engine settings
//!
//! Selects how many workers share the force computation and whether they
//! are spawned every step or kept alive for the whole run

use std::num::NonZeroUsize;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Fresh scoped threads every step, joined before integration
    #[default]
    SpawnPerStep,
    /// One set of scoped threads for the whole run, handed work each step
    PersistentPool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    pub workers: NonZeroUsize, // number of worker threads / partitions
    pub mode: ExecutionMode,
}

impl Engine {
    pub fn new(workers: NonZeroUsize, mode: ExecutionMode) -> Self {
        Self { workers, mode }
    }

    /// Build from a raw worker count as typed on the command line
    pub fn from_worker_count(count: i64, mode: ExecutionMode) -> Result<Self> {
        usize::try_from(count)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(|workers| Self::new(workers, mode))
            .ok_or_else(|| {
                SimError::InvalidConfiguration(format!("worker count must be at least 1, got {count}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_worker_counts_are_rejected() {
        for count in [0, -1, -64] {
            let err = Engine::from_worker_count(count, ExecutionMode::SpawnPerStep).unwrap_err();
            assert!(matches!(err, SimError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn positive_worker_count() {
        let engine = Engine::from_worker_count(4, ExecutionMode::PersistentPool).unwrap();
        assert_eq!(engine.workers.get(), 4);
        assert_eq!(engine.mode, ExecutionMode::PersistentPool);
    }
}
