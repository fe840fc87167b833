//! Many callers racing through a single `std::sync::Once`.

use crate::config::OnceConfig;
use crate::error::{DemoError, Result};
use crate::sync::join;
use crossbeam::channel::bounded;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnceReport {
    /// How many times the guarded body ran. Always 1.
    pub executions: usize,
    /// Completion signals the initiator received over the `done` channel.
    pub signals: usize,
    /// Callers that found the body already finished when `call_once` returned.
    pub saw_completion: usize,
}

/// Runs `body` through one `Once` from `callers` threads.
///
/// Each caller reports back on a rendezvous channel after its `call_once`
/// returns; the initiator waits for all of them.
pub fn race<F>(callers: usize, body: F) -> Result<OnceReport>
where
    F: Fn() + Send + Sync + 'static,
{
    let once = Arc::new(Once::new());
    let body = Arc::new(body);
    let executions = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicBool::new(false));
    let saw_completion = Arc::new(AtomicUsize::new(0));
    let (done_tx, done_rx) = bounded::<bool>(0);

    let mut handles = Vec::with_capacity(callers);
    for id in 0..callers {
        let once = Arc::clone(&once);
        let body = Arc::clone(&body);
        let executions = Arc::clone(&executions);
        let finished = Arc::clone(&finished);
        let saw_completion = Arc::clone(&saw_completion);
        let done_tx = done_tx.clone();
        let handle = thread::Builder::new()
            .name(format!("caller-{}", id))
            .spawn(move || {
                once.call_once(|| {
                    executions.fetch_add(1, Ordering::SeqCst);
                    body();
                    finished.store(true, Ordering::SeqCst);
                });
                if finished.load(Ordering::SeqCst) {
                    saw_completion.fetch_add(1, Ordering::SeqCst);
                }
                debug!(id, "caller passed the once guard");
                done_tx.send(true).map_err(|_| DemoError::Disconnected)
            })?;
        handles.push((id, handle));
    }
    drop(done_tx);

    let mut signals = 0;
    for _ in 0..callers {
        done_rx.recv().map_err(|_| DemoError::Disconnected)?;
        signals += 1;
    }
    for (id, handle) in handles {
        join(&format!("caller-{}", id), handle)??;
    }

    let report = OnceReport {
        executions: executions.load(Ordering::SeqCst),
        signals,
        saw_completion: saw_completion.load(Ordering::SeqCst),
    };
    info!(callers, executions = report.executions, "once demo done");
    Ok(report)
}

pub fn run(config: &OnceConfig) -> Result<OnceReport> {
    race(config.callers, || println!("Only once."))
}
