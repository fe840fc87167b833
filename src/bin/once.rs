//! Ten threads race through one `Once`; the body runs a single time.
//!
//! Run with: cargo run --bin once [config.toml]

use std_idioms::demo::{heading, key_points};
use std_idioms::sync::once;
use std_idioms::{logging, DemoConfig, Result};

fn main() -> Result<()> {
    logging::init();
    let config = DemoConfig::from_args()?;
    heading("Run-Once Guard");

    let report = once::run(&config.once)?;
    println!(
        "\nbody executions: {}, done signals: {}",
        report.executions, report.signals
    );

    key_points(&[
        "call_once runs its closure exactly once across all threads",
        "Losing callers block until the winner's closure has returned",
    ]);
    Ok(())
}
