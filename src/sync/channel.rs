//! Producer/consumer over a bounded crossbeam channel.
//!
//! The producer blocks once `capacity` items are in flight; the consumer
//! blocks while the buffer is empty. Dropping the sender closes the channel.

use crate::config::ChannelConfig;
use crate::error::{DemoError, Result};
use crate::sync::join;
use crossbeam::channel::{bounded, Receiver, Sender};
use std::thread;
use tracing::{debug, info};

fn produce(tx: Sender<i64>, items: i64) {
    for i in 0..items {
        if tx.send(i).is_err() {
            debug!(i, "consumer gone, producer stopping");
            return;
        }
        println!("Producing {}", i);
    }
}

fn consume(rx: Receiver<i64>, items: i64) -> Result<Vec<i64>> {
    let mut received = Vec::with_capacity(items.max(0) as usize);
    for _ in 0..items {
        let value = rx.recv().map_err(|_| DemoError::Disconnected)?;
        println!("Consuming {}", value);
        received.push(value);
    }
    Ok(received)
}

/// Runs one producer and one consumer to completion and returns what the
/// consumer saw, in order.
pub fn run(config: &ChannelConfig) -> Result<Vec<i64>> {
    let (tx, rx) = bounded(config.capacity);
    let items = config.items;

    let producer = thread::Builder::new()
        .name("producer".into())
        .spawn(move || produce(tx, items))?;
    let consumer = thread::Builder::new()
        .name("consumer".into())
        .spawn(move || consume(rx, items))?;

    join("producer", producer)?;
    let received = join("consumer", consumer)??;
    info!(capacity = config.capacity, received = received.len(), "channel demo done");
    Ok(received)
}
