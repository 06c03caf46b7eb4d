#![allow(dead_code)]

use fast_plane_convolve::{Convolver, CpuExtensions, Plane, ThreadPool};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plane with pseudo-random values in `[0, 1)`.
pub fn random_plane(width: u32, height: u32, seed: u64) -> Plane {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut plane = Plane::new(width, height);
    for row in plane.rows_mut() {
        row.iter_mut().for_each(|v| *v = rng.gen());
    }
    plane
}

pub fn supported_cpu_extensions() -> Vec<CpuExtensions> {
    CpuExtensions::all()
        .iter()
        .copied()
        .filter(|e| e.is_supported())
        .collect()
}

pub fn convolver(cpu_extensions: CpuExtensions) -> Convolver {
    let mut convolver = Convolver::new();
    assert!(cpu_extensions.is_supported());
    unsafe {
        convolver.set_cpu_extensions(cpu_extensions);
    }
    convolver
}

pub fn pool(num_threads: usize) -> ThreadPool {
    ThreadPool::new(num_threads).unwrap()
}

/// Planes of random values compared with the slow
/// reference implementation use these thresholds.
pub const THRESHOLD_L1: f32 = 1e-5;
pub const THRESHOLD_RELATIVE: f32 = 1e-5;
