use std::num::NonZeroU32;
use std::sync::Mutex;

use crate::simd::MAX_LANES;
use crate::{Plane, PlaneRowsMut, ThreadPoolError};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;
    }
}

/// Pool of worker threads used to convolve parts of a plane in parallel.
///
/// A pool with zero threads runs all tasks on the calling thread.
/// Without the `rayon` feature every pool behaves this way.
#[derive(Debug)]
pub struct ThreadPool {
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl ThreadPool {
    pub fn new(num_threads: usize) -> Result<Self, ThreadPoolError> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                let pool = match num_threads {
                    0 => None,
                    n => Some(
                        rayon::ThreadPoolBuilder::new()
                            .num_threads(n)
                            .thread_name(|i| format!("convolve-{i}"))
                            .build()?,
                    ),
                };
                Ok(Self { pool })
            } else {
                if num_threads > 0 {
                    log::warn!("`rayon` feature is disabled, {num_threads} threads are ignored");
                }
                Ok(Self {})
            }
        }
    }

    /// Count of threads which run tasks, at least one.
    pub fn num_threads(&self) -> usize {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                self.pool.as_ref().map_or(1, |pool| pool.current_num_threads())
            } else {
                1
            }
        }
    }

    /// Initialization callback for [ThreadPool::run] which does nothing.
    pub fn skip_init(_num_threads: usize) -> bool {
        true
    }

    /// Calls `init(num_threads)` once, then `task(index, thread)` for every
    /// index in `begin..end` exactly once.
    ///
    /// `thread` is an index of the worker running the task,
    /// it is less than [ThreadPool::num_threads].
    /// Returns [ThreadPoolError::InitFailed] without running any task
    /// if `init` returns `false`.
    pub fn run<I, T>(&self, begin: u32, end: u32, init: I, task: T) -> Result<(), ThreadPoolError>
    where
        I: FnOnce(usize) -> bool,
        T: Fn(u32, usize) + Sync + Send,
    {
        if !init(self.num_threads()) {
            return Err(ThreadPoolError::InitFailed);
        }
        #[cfg(feature = "rayon")]
        if let Some(pool) = &self.pool {
            pool.install(|| {
                (begin..end).into_par_iter().for_each(|index| {
                    task(index, rayon::current_thread_index().unwrap_or(0));
                });
            });
            return Ok(());
        }
        (begin..end).for_each(|index| task(index, 0));
        Ok(())
    }
}

/// Fills all rows of `dst` with `convolve_row(y, row)`.
///
/// Rows are split into parts processed by threads of `pool`.
/// Each row is computed independently, so the result
/// does not depend on count of parts.
pub(crate) fn process_rows<F>(
    dst: &mut Plane,
    radius: u32,
    pool: Option<&ThreadPool>,
    convolve_row: F,
) where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    let num_threads = pool.map_or(1, ThreadPool::num_threads) as u32;
    let max_num_parts = calculate_max_parts_number(dst.width(), dst.height(), radius);
    let num_parts = NonZeroU32::new(num_threads.min(max_num_parts)).unwrap_or(NonZeroU32::MIN);
    log::debug!(
        "process {}x{} rows in {num_parts} parts",
        dst.width(),
        dst.height()
    );

    let parts = dst.split_rows_mut(num_parts);
    let process_part = |mut part: PlaneRowsMut<'_>| {
        for (y, row) in part.rows_mut() {
            convolve_row(y, row);
        }
    };
    let Some(pool) = pool else {
        parts.into_iter().for_each(process_part);
        return;
    };

    // Every task takes its own part out of the cell.
    let cells: Vec<Mutex<Option<PlaneRowsMut<'_>>>> =
        parts.into_iter().map(|part| Mutex::new(Some(part))).collect();
    let res = pool.run(0, cells.len() as u32, ThreadPool::skip_init, |index, _thread| {
        let part = cells[index as usize].lock().ok().and_then(|mut cell| cell.take());
        if let Some(part) = part {
            process_part(part);
        }
    });
    // `skip_init` never fails.
    debug_assert!(res.is_ok());
}

/// It is not optimal to split planes on too small parts.
/// We have to calculate minimal height of one part.
/// A part has at least `radius + 1` rows and
/// at least one vector of values besides the radius.
fn calculate_max_parts_number(width: u32, height: u32, radius: u32) -> u32 {
    if width == 0 || height == 0 {
        return 1;
    }
    let min_height = (radius + 1).max((MAX_LANES as u32 + radius).div_ceil(width));
    (height / min_height).max(1)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn run_visits_every_index_once() {
        for num_threads in [0, 1, 3] {
            let pool = ThreadPool::new(num_threads).unwrap();
            let counters: Vec<AtomicUsize> = (0..100).map(|_| AtomicUsize::new(0)).collect();
            pool.run(10, 90, ThreadPool::skip_init, |index, thread| {
                assert!(thread < pool.num_threads());
                counters[index as usize].fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
            for (index, counter) in counters.iter().enumerate() {
                let expected = usize::from((10..90).contains(&index));
                assert_eq!(counter.load(Ordering::Relaxed), expected, "index {index}");
            }
        }
    }

    #[test]
    fn failed_init_stops_run() {
        let pool = ThreadPool::new(2).unwrap();
        let calls = AtomicUsize::new(0);
        let res = pool.run(0, 10, |_| false, |_, _| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert!(matches!(res, Err(ThreadPoolError::InitFailed)));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn init_receives_num_threads() {
        let pool = ThreadPool::new(0).unwrap();
        assert_eq!(pool.num_threads(), 1);
        let mut received = 0;
        pool.run(0, 0, |n| {
            received = n;
            true
        }, |_, _| {})
        .unwrap();
        assert_eq!(received, 1);
    }

    #[test]
    fn max_parts_number() {
        assert_eq!(calculate_max_parts_number(0, 10, 1), 1);
        assert_eq!(calculate_max_parts_number(100, 1, 1), 1);
        // Wide planes are limited by the radius.
        assert_eq!(calculate_max_parts_number(10000, 3, 1), 1);
        assert_eq!(calculate_max_parts_number(10000, 100, 2), 33);
        // Narrow planes need more rows per part.
        assert_eq!(calculate_max_parts_number(3, 10000, 1), 3333);
        assert_eq!(calculate_max_parts_number(2, 100, 1), 20);
    }

    #[test]
    fn process_rows_visits_every_row_once() {
        for num_threads in [0, 1, 2, 4] {
            let pool = ThreadPool::new(num_threads).unwrap();
            let visits: Vec<AtomicUsize> = (0..37).map(|_| AtomicUsize::new(0)).collect();
            let mut plane = Plane::new(3, 37);
            process_rows(&mut plane, 2, Some(&pool), |y, row| {
                visits[y].fetch_add(1, Ordering::Relaxed);
                row.fill(1.);
            });
            for (y, count) in visits.iter().enumerate() {
                assert_eq!(count.load(Ordering::Relaxed), 1, "{num_threads} threads, row {y}");
            }
            assert!(plane.rows().flatten().all(|&v| v == 1.));
        }
    }

    #[test]
    fn process_rows_fills_every_row() {
        let pool = ThreadPool::new(3).unwrap();
        let mut plane = Plane::new(5, 40);
        process_rows(&mut plane, 1, Some(&pool), |y, row| row.fill(y as f32));
        for (y, row) in plane.rows().enumerate() {
            assert!(row.iter().all(|&v| v == y as f32), "row {y}");
        }
    }
}
