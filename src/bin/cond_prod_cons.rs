//! Two producers and one consumer sharing a Condvar-guarded counter.
//!
//! Run with: cargo run --bin cond_prod_cons [config.toml]

use std_idioms::demo::{heading, key_points};
use std_idioms::sync::cond;
use std_idioms::{logging, DemoConfig, Result};

fn main() -> Result<()> {
    logging::init();
    let config = DemoConfig::from_args()?;
    heading("Condvar Bounded Counter");

    let report = cond::run(&config.cond)?;
    println!(
        "\nproduced: {}, consumed: {}, final count: {}, stayed within [{}, {}]: {}",
        report.produced,
        report.consumed,
        report.final_count,
        config.cond.empty,
        config.cond.full,
        report.within(config.cond.empty, config.cond.full)
    );

    key_points(&[
        "Re-check the predicate in a loop after every wake-up",
        "notify_all wakes producers and consumers alike",
        "The lock is released while a thread waits",
    ]);
    Ok(())
}
