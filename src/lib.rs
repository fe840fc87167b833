//! Small, self-contained demonstrations of byte-stream utilities, regular
//! expressions and classic thread synchronization primitives.
//!
//! Each binary under `src/bin` drives one module here; the modules carry the
//! logic so it can be tested without capturing stdout.

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod stream;
pub mod sync;

pub use config::DemoConfig;
pub use error::{DemoError, Result};
