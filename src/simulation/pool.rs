//! Persistent worker pool execution mode
//!
//! Instead of spawning fresh threads every step, the workers are spawned
//! once for the whole run and handed each step through two extra barriers
//! shared with the driver thread:
//!
//! - `start` (workers + driver): opens a step, or tells workers to exit
//! - `phase` (workers only): the direct/reduction barrier of a single step
//! - `done` (workers + driver): all partitions have their accelerations
//!
//! Between `done` and the next `start` the driver integrates alone, so
//! positions are never written while a worker reads them. Partitioning and
//! summation order are the same as in spawn-per-step mode.
//!
//! The barriers alone order every access. The `RwLock` around the positions
//! and the `Mutex` per acceleration chunk are never contended; they only
//! hand ownership back and forth between the workers and the driver across
//! steps, which long-lived threads cannot do with plain `&mut` borrows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Barrier, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;

use log::debug;

use super::engine::Engine;
use super::forces::{PairwiseGravity, WorkerContext};
use super::integrator::kick_drift;
use super::partition::partition;
use super::states::{ForceCache, NVec2, SimulationState};

// Locks are only ever taken between barriers, so they are never contended;
// a poisoned lock means a worker panicked and its data is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `steps` force + integration cycles on one long-lived set of workers
pub fn run_pooled(gravity: &PairwiseGravity, engine: &Engine, sys: &mut SimulationState, dt: f64, steps: usize) {
    let parts = partition(sys.len(), engine.workers);
    let workers = parts.len();

    let SimulationState { masses, positions, velocities, accelerations, cache, t } = sys;
    let masses: &[f64] = masses;
    let cache: &ForceCache = cache;

    let shared_positions = RwLock::new(std::mem::take(positions));
    let chunks: Vec<Mutex<Vec<NVec2>>> = parts
        .iter()
        .map(|p| Mutex::new(vec![NVec2::zeros(); p.len()]))
        .collect();

    let start = Barrier::new(workers + 1);
    let phase = Barrier::new(workers);
    let done = Barrier::new(workers + 1);
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        for (p, chunk) in parts.iter().zip(&chunks) {
            let (shared_positions, start, phase, done, stop) = (&shared_positions, &start, &phase, &done, &stop);
            let partition = *p;
            s.spawn(move || loop {
                start.wait();
                if stop.load(Ordering::Acquire) {
                    break;
                }
                {
                    let pos = read(shared_positions);
                    let mut out = lock(chunk);
                    let ctx = WorkerContext {
                        partition,
                        positions: &pos,
                        masses,
                        cache,
                        barrier: phase,
                    };
                    ctx.run(gravity, &mut out);
                }
                done.wait();
            });
        }

        for step in 0..steps {
            start.wait();
            done.wait();

            let mut pos = write(&shared_positions);
            for (p, chunk) in parts.iter().zip(&chunks) {
                let acc = lock(chunk);
                kick_drift(&mut pos[p.range()], &mut velocities[p.range()], &acc, dt);
            }
            *t += dt;
            debug!("pool step {} done, t = {}", step + 1, t);
        }

        stop.store(true, Ordering::Release);
        start.wait();
    });

    *positions = shared_positions.into_inner().unwrap_or_else(PoisonError::into_inner);
    for (p, chunk) in parts.iter().zip(chunks) {
        let acc = chunk.into_inner().unwrap_or_else(PoisonError::into_inner);
        accelerations[p.range()].copy_from_slice(&acc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use crate::simulation::engine::ExecutionMode;
    use crate::simulation::forces::compute_accelerations;
    use crate::simulation::integrator::semi_implicit_euler;
    use crate::simulation::states::Body;

    fn bodies() -> Vec<Body> {
        (0..7)
            .map(|i| {
                let i_f = i as f64;
                Body { x: NVec2::new(i_f.sin(), i_f.cos() * 2.0), v: NVec2::new(0.0, 0.1 * i_f), m: 1.0 + i_f }
            })
            .collect()
    }

    #[test]
    fn pool_matches_spawn_per_step() {
        let gravity = PairwiseGravity { G: 1.0, eps: 1e-4 };
        let engine = Engine::new(NonZeroUsize::new(3).unwrap(), ExecutionMode::PersistentPool);

        let mut spawned = SimulationState::from_bodies(&bodies()).unwrap();
        for _ in 0..5 {
            compute_accelerations(&gravity, &engine, &mut spawned);
            semi_implicit_euler(&mut spawned, 0.01);
        }

        let mut pooled = SimulationState::from_bodies(&bodies()).unwrap();
        run_pooled(&gravity, &engine, &mut pooled, 0.01, 5);

        assert_eq!(pooled.positions, spawned.positions);
        assert_eq!(pooled.velocities, spawned.velocities);
        assert_eq!(pooled.accelerations, spawned.accelerations);
        assert_eq!(pooled.t, spawned.t);
    }
}
