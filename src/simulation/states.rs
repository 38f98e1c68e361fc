//! Core state types for the n-body simulation
//!
//! - `Body` is the per-body record used when loading and reporting
//! - `SimulationState` stores the system as parallel arrays indexed `0..N`
//!   together with the pairwise force cache shared by the worker threads
//! - `ForceCache` is the N x N matrix of pairwise force vectors

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SimError};

pub use super::vector::NVec2;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
}

/// Whole-system state, owned by the driver and lent to the engine and integrator
#[derive(Debug)]
pub struct SimulationState {
    pub masses: Vec<f64>,
    pub positions: Vec<NVec2>,
    pub velocities: Vec<NVec2>,
    pub accelerations: Vec<NVec2>, // recomputed every step
    pub cache: ForceCache,
    pub t: f64, // simulated time
}

impl SimulationState {
    /// Allocate every array once, sized to the body count
    ///
    /// Fails when the N x N force cache cannot be allocated.
    pub fn from_bodies(bodies: &[Body]) -> Result<Self> {
        let n = bodies.len();
        Ok(Self {
            masses: bodies.iter().map(|b| b.m).collect(),
            positions: bodies.iter().map(|b| b.x).collect(),
            velocities: bodies.iter().map(|b| b.v).collect(),
            accelerations: vec![NVec2::zeros(); n],
            cache: ForceCache::new(n)?,
            t: 0.0,
        })
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Snapshot of body `i`
    pub fn body(&self, i: usize) -> Body {
        Body {
            x: self.positions[i],
            v: self.velocities[i],
            m: self.masses[i],
        }
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        (0..self.len()).map(move |i| self.body(i))
    }

    /// Sum of m * v over all bodies
    pub fn total_momentum(&self) -> NVec2 {
        self.masses
            .iter()
            .zip(&self.velocities)
            .fold(NVec2::zeros(), |p, (m, v)| p + v.scale(*m))
    }

    /// Sum of 1/2 m |v|^2 over all bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.masses
            .iter()
            .zip(&self.velocities)
            .map(|(m, v)| 0.5 * m * v.norm_squared())
            .sum()
    }
}

/// One cache cell: the f64 bit patterns of a 2D vector
#[derive(Debug, Default)]
struct AtomicVec2 {
    x: AtomicU64,
    y: AtomicU64,
}

/// N x N matrix of pairwise forces; entry (i, j) is the force body j exerts on body i
///
/// Cells are atomics so every worker can hold a shared reference. Which
/// worker writes which cell is decided by the partitioning, and reads of
/// cells written by other workers only happen after the step barrier, so
/// relaxed loads and stores are enough.
#[derive(Debug)]
pub struct ForceCache {
    n: usize,
    cells: Vec<AtomicVec2>,
}

impl ForceCache {
    pub fn new(n: usize) -> Result<Self> {
        let too_large = || SimError::InvalidConfiguration(format!("force cache for {n} bodies does not fit in memory"));

        let len = n.checked_mul(n).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.extend((0..len).map(|_| AtomicVec2::default()));

        Ok(Self { n, cells })
    }

    /// Number of bodies (the matrix is `len() x len()`)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> NVec2 {
        let cell = &self.cells[i * self.n + j];
        NVec2::new(
            f64::from_bits(cell.x.load(Ordering::Relaxed)),
            f64::from_bits(cell.y.load(Ordering::Relaxed)),
        )
    }

    pub fn store(&self, i: usize, j: usize, f: NVec2) {
        let cell = &self.cells[i * self.n + j];
        cell.x.store(f.x.to_bits(), Ordering::Relaxed);
        cell.y.store(f.y.to_bits(), Ordering::Relaxed);
    }
}
