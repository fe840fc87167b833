//! Go-style wait group: a counter that `wait` blocks on until it hits zero.

use crate::config::WaitGroupConfig;
use crate::error::{DemoError, Result};
use crate::sync::{join, lock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, Once, PoisonError};
use std::thread;
use tracing::{debug, info};

/// Call [`add`](WaitGroup::add) before starting the work being waited for,
/// [`done`](WaitGroup::done) once per finished unit, and
/// [`wait`](WaitGroup::wait) to block until the counter is back at zero.
///
/// A `done` that happens before the `wait` it releases is visible to the
/// waiter once `wait` returns.
#[derive(Debug, Default)]
pub struct WaitGroup {
    count: Mutex<usize>,
    zero: Condvar,
}

impl WaitGroup {
    pub fn new(n: usize) -> Self {
        Self {
            count: Mutex::new(n),
            zero: Condvar::new(),
        }
    }

    pub fn add(&self, n: usize) {
        *lock(&self.count) += n;
    }

    /// Decrements the counter, waking every waiter when it reaches zero.
    ///
    /// Calling this more times than were added is a bug and leaves the counter at zero.
    pub fn done(&self) -> Result<()> {
        let mut count = lock(&self.count);
        if *count == 0 {
            return Err(DemoError::NegativeCounter);
        }
        *count -= 1;
        if *count == 0 {
            self.zero.notify_all();
        }
        Ok(())
    }

    pub fn wait(&self) {
        let mut count = lock(&self.count);
        while *count > 0 {
            count = self.zero.wait(count).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn count(&self) -> usize {
        *lock(&self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitGroupReport {
    pub workers: usize,
    pub executions: usize,
    /// Workers that had called `done` by the time `wait` returned.
    pub signalled_at_release: usize,
}

/// Ten workers share one `Once`; the main thread waits on the group and then
/// prints `Main Finished.`.
pub fn run(config: &WaitGroupConfig) -> Result<WaitGroupReport> {
    let workers = config.workers;
    let wg = Arc::new(WaitGroup::default());
    let once = Arc::new(Once::new());
    let executions = Arc::new(AtomicUsize::new(0));
    let signalled = Arc::new(AtomicUsize::new(0));

    wg.add(workers);
    let mut handles = Vec::with_capacity(workers);
    for i in 0..workers {
        let wg = Arc::clone(&wg);
        let once = Arc::clone(&once);
        let executions = Arc::clone(&executions);
        let signalled = Arc::clone(&signalled);
        let handle = thread::Builder::new()
            .name(format!("worker-{}", i))
            .spawn(move || -> Result<()> {
                once.call_once(|| {
                    executions.fetch_add(1, Ordering::SeqCst);
                    println!("Only once.");
                });
                signalled.fetch_add(1, Ordering::SeqCst);
                wg.done()?;
                println!("Goroutine {}", i);
                Ok(())
            })?;
        handles.push((i, handle));
    }

    wg.wait();
    let signalled_at_release = signalled.load(Ordering::SeqCst);
    println!("Main Finished.");
    debug!(signalled_at_release, "wait group released");

    for (i, handle) in handles {
        join(&format!("worker-{}", i), handle)??;
    }

    let report = WaitGroupReport {
        workers,
        executions: executions.load(Ordering::SeqCst),
        signalled_at_release,
    };
    info!(workers, executions = report.executions, "wait group demo done");
    Ok(report)
}
