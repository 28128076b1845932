use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

/// Pico-class MCU target.
const DEVICE_TARGET: &str = "thumbv6m-none-eabi";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    cargo(
        "Platform crate (no_std)",
        &["check", "-p", "platform", "--target", DEVICE_TARGET],
        OnFailure::Abort,
    )?;
    cargo(
        "UI crate (no_std)",
        &["check", "-p", "ui", "--target", DEVICE_TARGET],
        OnFailure::Abort,
    )?;
    cargo(
        "Firmware backends (device)",
        &[
            "check",
            "-p",
            "firmware",
            "--target",
            DEVICE_TARGET,
            "--features",
            "hardware",
        ],
        OnFailure::Abort,
    )?;
    cargo(
        "Firmware with emulator (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--examples"],
        OnFailure::Abort,
    )?;
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    let fmt = cargo("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?;
    if !fmt.status.success() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
