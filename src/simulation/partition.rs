//! Splitting body indices across workers
//!
//! `partition(n, t)` cuts `[0, n)` into `t` contiguous ranges of `n / t`
//! bodies each; the last range absorbs the remainder. When `t > n` every
//! range but the last is empty and the last one is `[0, n)`.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Body index range `[start, finish)` owned by worker `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub start: usize,
    pub finish: usize,
}

impl Partition {
    pub fn range(&self) -> Range<usize> {
        self.start..self.finish
    }

    pub fn len(&self) -> usize {
        self.finish - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }
}

pub fn partition(n: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let t = workers.get();
    let local_n = n / t;

    (0..t)
        .map(|index| {
            let start = index * local_n;
            let finish = if index == t - 1 { n } else { start + local_n };
            Partition { index, start, finish }
        })
        .collect()
}
