pub mod channel;
pub mod cond;
pub mod map;
pub mod once;
pub mod wait_group;

use crate::error::{DemoError, Result};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

/// Joins `handle`, turning a panic into [`DemoError::ThreadPanicked`].
pub(crate) fn join<T>(name: &str, handle: JoinHandle<T>) -> Result<T> {
    handle
        .join()
        .map_err(|_| DemoError::ThreadPanicked(name.to_string()))
}

/// Locks `mutex`, recovering the data if a previous holder panicked.
///
/// The guarded values here are plain counters that a panic cannot leave
/// half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
