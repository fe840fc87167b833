//! Regular expressions: replace, anchored matching, one-shot matching.
//!
//! Run with: cargo run --bin regexp

use std_idioms::demo::{heading, key_points, section};
use std_idioms::{logging, pattern, Result};

fn main() -> Result<()> {
    logging::init();
    heading("Regular Expressions");

    section("replace_all");
    let replaced = pattern::replace_all("a(x*)b", b"-ab-axxb", b"T")?;
    println!("{}", String::from_utf8_lossy(&replaced));

    section("anchored match");
    let re = r"^[a-z]+\[[0-9]+\]$";
    for text in [" adam[23]", "eve[7] ", "Job[30]", "snakey", "adam[23]"] {
        println!("{:>10?} -> {}", text, pattern::match_string(re, text)?);
    }

    section("one-shot match");
    println!("{} <nil>", pattern::matches("foo", b"seafood")?);

    key_points(&[
        "Compile once, reuse the Regex for every match",
        "Anchors ^ and $ reject leading or trailing noise",
        "Invalid patterns are errors, not panics",
    ]);
    Ok(())
}
