//! Concurrent map: store, load, load-or-store, load-and-delete, range.
//!
//! Run with: cargo run --bin sync_map

use std::io;
use std_idioms::demo::{heading, key_points};
use std_idioms::sync::map;
use std_idioms::{logging, Result};

fn main() -> Result<()> {
    logging::init();
    heading("Concurrent Map");

    map::walkthrough(&mut io::stdout())?;

    key_points(&[
        "Every operation takes &self, so the map shares behind an Arc",
        "load_or_store reports whether the value was already there",
        "range visits a snapshot and stops when the callback says so",
    ]);
    Ok(())
}
