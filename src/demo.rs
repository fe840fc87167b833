//! Console framing shared by the demo binaries.

use colored::Colorize;

pub fn heading(title: &str) {
    println!("{}\n", format!("=== {} ===", title).bold().cyan());
}

pub fn section(title: &str) {
    println!("\n{}", format!("--- {} ---", title).bold());
}

pub fn key_points(points: &[&str]) {
    println!("\n{}", "=== Key Points ===".bold().green());
    for (i, point) in points.iter().enumerate() {
        println!("{}. {}", i + 1, point);
    }
}
