//! xtask sim - build and launch the desktop simulator
//!
//! Runs `cargo run -p firmware --example simulator --features emulator`
//! with `SIM=1` and a default `RUST_LOG`, inheriting the terminal so the
//! example's tracing output is visible live.

use anyhow::{Context, Result};
use colored::Colorize;
use platform::config;
use platform::mode::SIM_ENV_VAR;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

pub fn run(release: bool, data_dir: Option<&Path>) -> Result<()> {
    print_banner();
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "firmware", "--example", "simulator", "--features", "emulator"]);
    if release {
        cmd.arg("--release");
    }
    cmd.env(SIM_ENV_VAR, "1")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if std::env::var("RUST_LOG").is_err() {
        cmd.env("RUST_LOG", "info");
    }
    if let Some(dir) = data_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        cmd.env("ORGANIZER_DATA", dir);
        println!("{}", format!("Storage: {}", dir.display()).dimmed());
    }

    let status = cmd.status().context("Failed to run cargo")?;
    if !status.success() {
        anyhow::bail!("Simulator build/run failed");
    }

    println!();
    println!(
        "{}",
        format!("Simulator closed after {:.1}s", start.elapsed().as_secs_f64()).green()
    );
    Ok(())
}

fn print_banner() {
    let banner_text = format!(
        "     {} v{} - Simulator       ",
        config::APP_NAME,
        config::APP_VERSION
    );
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!("{}", banner_text.cyan().bold());
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!();
}
