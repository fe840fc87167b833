//! A wait group holds the main thread until every worker has checked in.
//!
//! Run with: cargo run --bin wait_group [config.toml]

use std_idioms::demo::{heading, key_points};
use std_idioms::sync::wait_group;
use std_idioms::{logging, DemoConfig, Result};

fn main() -> Result<()> {
    logging::init();
    let config = DemoConfig::from_args()?;
    heading("Wait Group");

    let report = wait_group::run(&config.wait_group)?;
    println!(
        "\nworkers: {}, once-body executions: {}, signalled before release: {}",
        report.workers, report.executions, report.signalled_at_release
    );

    key_points(&[
        "add before spawning, done once per worker, wait on the main thread",
        "wait returns only when the counter is back at zero",
        "A done with nothing left to count is an error",
    ]);
    Ok(())
}
