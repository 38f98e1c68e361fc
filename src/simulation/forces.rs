//! Parallel pairwise gravity for the n-body engine
//!
//! Bodies are split into contiguous partitions, one per worker. Each step
//! runs in two phases separated by a barrier:
//!
//! 1. direct phase: a worker owning `[start, finish)` evaluates every pair
//!    `(i, j)` with `i` in its range and `j < finish`, stores the force in
//!    the cache at `(i, j)` and its negation at `(j, i)`
//! 2. reduction phase: after all workers reach the barrier, each worker adds
//!    the cache entries `(i, j)` for `j >= finish`, which the higher
//!    partitions wrote during their own direct phase
//!
//! For every body the contributions are summed in ascending `j`, whatever
//! the worker count, so results do not depend on how many workers ran.

use std::sync::Barrier;
use std::thread;

use log::debug;

use super::engine::Engine;
use super::partition::{partition, Partition};
use super::states::{ForceCache, NVec2, SimulationState};
use super::vector::{cubed_distance, floored};

/// Newtonian gravity with a floor on the cubed separation
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseGravity {
    pub G: f64, // gravitational constant
    pub eps: f64, // floor for |r|^3
}

impl PairwiseGravity {
    /// Force exerted on body i (at `xi`, mass `mi`) by body j
    ///
    /// F = G * (mi * mj) / max(|r|^3, eps) * r with r = xj - xi. Swapping the
    /// two bodies yields exactly the negated vector.
    #[inline]
    pub fn pair_force(&self, xi: &NVec2, mi: f64, xj: &NVec2, mj: f64) -> NVec2 {
        let d3 = floored(cubed_distance(xi, xj), self.eps);
        let coef = self.G * (mi * mj) / d3;
        (xj - xi) * coef
    }
}

/// Everything one worker needs for one step
pub struct WorkerContext<'a> {
    pub partition: Partition,
    pub positions: &'a [NVec2],
    pub masses: &'a [f64],
    pub cache: &'a ForceCache,
    pub barrier: &'a Barrier,
}

impl WorkerContext<'_> {
    /// Run both phases for this worker's partition
    ///
    /// `out` is the acceleration slice for the partition's bodies. Every
    /// worker of the step must call this, empty partitions included, or the
    /// barrier never opens.
    pub fn run(&self, gravity: &PairwiseGravity, out: &mut [NVec2]) {
        let Partition { start, finish, .. } = self.partition;
        debug_assert_eq!(out.len(), finish - start);

        // Direct phase: j over this partition and every lower one
        for i in start..finish {
            let xi = &self.positions[i];
            let mi = self.masses[i];
            let mut sum = NVec2::zeros();
            for j in 0..finish {
                if i == j {
                    continue;
                }
                let f = gravity.pair_force(xi, mi, &self.positions[j], self.masses[j]);
                self.cache.store(i, j, f);
                self.cache.store(j, i, -f);
                sum += f;
            }
            out[i - start] = sum;
        }

        self.barrier.wait();

        // Reduction phase: higher partitions already filled (i, j) for j >= finish
        let n = self.positions.len();
        for i in start..finish {
            let mut sum = out[i - start];
            for j in finish..n {
                sum += self.cache.get(i, j);
            }
            out[i - start] = sum / self.masses[i];
        }
    }
}

/// Split `out` into one mutable chunk per partition
pub(crate) fn split_by_partition<'a, T>(mut out: &'a mut [T], parts: &[Partition]) -> Vec<&'a mut [T]> {
    let mut chunks = Vec::with_capacity(parts.len());
    for p in parts {
        let (head, tail) = std::mem::take(&mut out).split_at_mut(p.len());
        chunks.push(head);
        out = tail;
    }
    chunks
}

/// Fill `sys.accelerations` for the current positions
///
/// Spawns one scoped thread per partition and returns once all of them have
/// finished both phases.
pub fn compute_accelerations(gravity: &PairwiseGravity, engine: &Engine, sys: &mut SimulationState) {
    let n = sys.len();
    if n == 0 { // No bodies, return
        return;
    }

    let parts = partition(n, engine.workers);
    debug!("force step: {} bodies over {:?}", n, parts.iter().map(Partition::len).collect::<Vec<_>>());

    let SimulationState { masses, positions, accelerations, cache, .. } = sys;
    let masses: &[f64] = masses;
    let positions: &[NVec2] = positions;
    let cache: &ForceCache = cache;
    let barrier = Barrier::new(parts.len());
    let chunks = split_by_partition(accelerations, &parts);

    thread::scope(|s| {
        for (p, out) in parts.iter().zip(chunks) {
            let ctx = WorkerContext {
                partition: *p,
                positions,
                masses,
                cache,
                barrier: &barrier,
            };
            s.spawn(move || ctx.run(gravity, out));
        }
    });
}
