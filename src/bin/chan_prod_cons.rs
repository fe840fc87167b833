//! Producer/consumer over a bounded channel.
//!
//! Run with: cargo run --bin chan_prod_cons [config.toml]

use std_idioms::demo::{heading, key_points};
use std_idioms::sync::channel;
use std_idioms::{logging, DemoConfig, Result};

fn main() -> Result<()> {
    logging::init();
    let config = DemoConfig::from_args()?;
    heading("Bounded Channel Producer/Consumer");

    let received = channel::run(&config.channel)?;
    println!("\nConsumer received {} items", received.len());

    key_points(&[
        "The producer blocks while the buffer is full",
        "The consumer blocks while the buffer is empty",
        "Dropping the sender closes the channel",
    ]);
    Ok(())
}
