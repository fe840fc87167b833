//! A counter bounded to `[empty, full]`, guarded by a `Mutex` + `Condvar`.

use crate::config::CondConfig;
use crate::error::{DemoError, Result};
use crate::sync::{join, lock};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use tracing::{debug, info};

#[derive(Debug)]
struct State {
    count: usize,
    history: Vec<usize>,
}

#[derive(Debug)]
pub struct BoundedCounter {
    state: Mutex<State>,
    changed: Condvar,
    empty: usize,
    full: usize,
}

impl BoundedCounter {
    /// Starts at `empty`. Fails unless `full > empty`.
    pub fn new(empty: usize, full: usize) -> Result<Self> {
        if full <= empty {
            return Err(DemoError::invalid_config(format!(
                "counter bounds need full ({}) > empty ({})",
                full, empty
            )));
        }
        Ok(Self {
            state: Mutex::new(State {
                count: empty,
                history: Vec::new(),
            }),
            changed: Condvar::new(),
            empty,
            full,
        })
    }

    /// Waits for room, increments, and wakes every waiter. Returns the new count.
    pub fn produce(&self) -> usize {
        self.produce_with(|_| {})
    }

    /// Like [`produce`](Self::produce), running `observe` on the new count
    /// before the lock is released.
    pub fn produce_with<F: FnOnce(usize)>(&self, observe: F) -> usize {
        let mut state = lock(&self.state);
        while state.count >= self.full {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.count += 1;
        self.record(state, observe)
    }

    /// Waits for an item, decrements, and wakes every waiter. Returns the new count.
    pub fn consume(&self) -> usize {
        self.consume_with(|_| {})
    }

    /// Like [`consume`](Self::consume), running `observe` on the new count
    /// before the lock is released.
    pub fn consume_with<F: FnOnce(usize)>(&self, observe: F) -> usize {
        let mut state = lock(&self.state);
        while state.count <= self.empty {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.count -= 1;
        self.record(state, observe)
    }

    fn record<F: FnOnce(usize)>(&self, mut state: MutexGuard<'_, State>, observe: F) -> usize {
        let count = state.count;
        state.history.push(count);
        observe(count);
        drop(state);
        self.changed.notify_all();
        count
    }

    pub fn count(&self) -> usize {
        lock(&self.state).count
    }

    /// Every count observed after a change, in lock order.
    pub fn history(&self) -> Vec<usize> {
        lock(&self.state).history.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CondReport {
    pub produced: usize,
    pub consumed: usize,
    pub final_count: usize,
    pub history: Vec<usize>,
}

impl CondReport {
    pub fn within(&self, empty: usize, full: usize) -> bool {
        self.history.iter().all(|&c| c >= empty && c <= full)
    }
}

/// Splits `total` as evenly as possible across `parts` workers.
fn share(total: usize, parts: usize, index: usize) -> usize {
    total / parts + usize::from(index < total % parts)
}

/// Runs the configured producers and consumers to completion.
///
/// Consumers drain exactly what the producers make between them, so every
/// thread finishes and the counter ends back at `empty`.
pub fn run(config: &CondConfig) -> Result<CondReport> {
    let counter = Arc::new(BoundedCounter::new(config.empty, config.full)?);
    let delay = config.step_delay();
    let total = config.producers * config.iterations;
    let mut handles = Vec::new();

    for id in 0..config.producers {
        let counter = Arc::clone(&counter);
        let iterations = config.iterations;
        let handle = thread::Builder::new()
            .name(format!("producer-{}", id))
            .spawn(move || {
                for _ in 0..iterations {
                    thread::sleep(delay);
                    counter.produce_with(|count| println!("Producing... count: {}", count));
                }
                iterations
            })?;
        handles.push((format!("producer-{}", id), true, handle));
    }

    for id in 0..config.consumers {
        let counter = Arc::clone(&counter);
        let iterations = share(total, config.consumers, id);
        let handle = thread::Builder::new()
            .name(format!("consumer-{}", id))
            .spawn(move || {
                for _ in 0..iterations {
                    thread::sleep(delay);
                    counter.consume_with(|count| println!("Consuming... count: {}", count));
                }
                iterations
            })?;
        handles.push((format!("consumer-{}", id), false, handle));
    }

    let (mut produced, mut consumed) = (0, 0);
    for (name, is_producer, handle) in handles {
        let done = join(&name, handle)?;
        debug!(thread = %name, iterations = done, "worker finished");
        if is_producer {
            produced += done;
        } else {
            consumed += done;
        }
    }

    let report = CondReport {
        produced,
        consumed,
        final_count: counter.count(),
        history: counter.history(),
    };
    info!(produced, consumed, final_count = report.final_count, "cond demo done");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quick(producers: usize, consumers: usize, iterations: usize, full: usize) -> CondConfig {
        CondConfig {
            producers,
            consumers,
            iterations,
            empty: 0,
            full,
            step_delay_ms: 0,
        }
    }

    #[test]
    fn classic_layout_stays_in_bounds_and_drains() {
        let report = run(&quick(2, 1, 10, 5)).unwrap();
        assert_eq!(report.produced, 20);
        assert_eq!(report.consumed, 20);
        assert_eq!(report.final_count, 0);
        assert_eq!(report.history.len(), 40);
        assert!(report.within(0, 5));
    }

    #[test]
    fn many_threads_never_leave_bounds() {
        let report = run(&quick(4, 3, 200, 2)).unwrap();
        assert_eq!(report.consumed, 800);
        assert!(report.within(0, 2));
        assert_eq!(report.final_count, 0);
    }

    #[test]
    fn nonzero_floor_is_respected() {
        let config = CondConfig {
            empty: 3,
            full: 4,
            ..quick(2, 2, 25, 4)
        };
        let report = run(&config).unwrap();
        assert!(report.within(3, 4));
        assert_eq!(report.final_count, 3);
    }

    #[test]
    fn share_splits_remainder_across_first_workers() {
        assert_eq!((0..3).map(|i| share(20, 3, i)).collect::<Vec<_>>(), vec![7, 7, 6]);
        assert_eq!(share(20, 1, 0), 20);
    }

    #[test]
    fn produce_blocks_at_full() {
        let counter = Arc::new(BoundedCounter::new(0, 1).unwrap());
        assert_eq!(counter.produce(), 1);

        let blocked = Arc::clone(&counter);
        let handle = thread::spawn(move || blocked.produce());
        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.count(), 1);
        assert!(!handle.is_finished());

        assert_eq!(counter.consume(), 0);
        assert_eq!(handle.join().unwrap(), 1);
        assert_eq!(counter.history(), vec![1, 0, 1]);
    }

    #[test]
    fn consume_blocks_at_empty() {
        let counter = Arc::new(BoundedCounter::new(0, 5).unwrap());
        let waiting = Arc::clone(&counter);
        let handle = thread::spawn(move || waiting.consume());
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        counter.produce();
        assert_eq!(handle.join().unwrap(), 0);
    }

    #[test]
    fn rejects_bounds_without_room() {
        assert!(matches!(BoundedCounter::new(3, 1), Err(DemoError::InvalidConfig(_))));
        assert!(matches!(BoundedCounter::new(2, 2), Err(DemoError::InvalidConfig(_))));
    }

    #[test]
    fn observer_sees_counts_in_lock_order() {
        let counter = Arc::new(BoundedCounter::new(0, 3).unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let handles: Vec<_> = (0..4)
            .map(|id| {
                let counter = Arc::clone(&counter);
                let seen = Arc::clone(&seen);
                thread::spawn(move || {
                    for _ in 0..50 {
                        if id % 2 == 0 {
                            counter.produce_with(|c| seen.lock().unwrap().push(c));
                        } else {
                            counter.consume_with(|c| seen.lock().unwrap().push(c));
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 200);
        assert_eq!(seen, counter.history());
        assert!(seen.iter().all(|&c| c <= 3));
    }
}
