/// Parallel processing utilities

/// Number of worker threads for a requested count (0 = all available cores)
pub fn effective_threads(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

/// Build the global rayon pool, returning the thread count in use
pub fn configure_thread_pool(threads: usize) -> Result<usize, rayon::ThreadPoolBuildError> {
    let threads = effective_threads(threads);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    Ok(threads)
}
