#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::ThreadPool;
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use std::sync::OnceLock;

/// Crate-local Rayon pool used by the parallel encode phases.
///
/// Rayon's global pool panics on first use if it cannot be initialized (e.g. under heavy thread
/// limits on a shared test host). A private pool lets us detect that and run the sequential code
/// path instead.
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
static RAYON_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn desired_rayon_threads() -> usize {
    let from_env = std::env::var("RAYON_NUM_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0);
    from_env.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn build_rayon_pool() -> Option<ThreadPool> {
    let requested = desired_rayon_threads().max(1);
    let try_build = |n| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .thread_name(|idx| format!("formula-onehot-{idx}"))
            .build()
    };

    match try_build(requested) {
        Ok(pool) => {
            log::debug!("one-hot worker pool started with {requested} threads");
            Some(pool)
        }
        Err(err) if requested > 1 => {
            log::warn!(
                "failed to start {requested} one-hot worker threads ({err}); retrying with 1"
            );
            try_build(1).ok()
        }
        Err(err) => {
            log::warn!("failed to start one-hot worker pool ({err}); encoding sequentially");
            None
        }
    }
}

/// Returns the crate-local Rayon thread pool, if one could be created.
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
pub(crate) fn rayon_pool() -> Option<&'static ThreadPool> {
    RAYON_POOL.get_or_init(build_rayon_pool).as_ref()
}
