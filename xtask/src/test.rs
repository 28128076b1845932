use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    if !integration_only {
        let out = cargo("Unit tests", &["test", "--lib", "--workspace"], OnFailure::Abort)?;
        report(&out.stdout);
    }

    if !unit_only {
        let out = cargo(
            "Integration tests",
            &[
                "test",
                "--workspace",
                "--tests",
                "--features",
                "firmware/emulator,firmware/headless",
            ],
            OnFailure::Abort,
        )?;
        report(&out.stdout);
    }

    if !unit_only && !integration_only {
        let out = cargo("Doc tests", &["test", "--doc", "--workspace"], OnFailure::Warn)?;
        report(&out.stdout);
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn report(stdout: &[u8]) {
    let text = String::from_utf8_lossy(stdout);
    println!("{}", format!("    {}", extract_test_summary(&text)).dimmed());
    println!();
}

fn extract_test_summary(output: &str) -> String {
    // Sum every "test result: ok. 5 passed; 0 failed; ..." line.
    let mut passed = 0u64;
    let mut failed = 0u64;
    let mut suites = 0u64;
    for line in output.lines() {
        let Some(summary) = line.split("test result:").nth(1) else {
            continue;
        };
        suites = suites.saturating_add(1);
        for part in summary.split(';') {
            let mut words = part.split_whitespace().rev();
            let (Some(kind), Some(n)) = (words.next(), words.next()) else {
                continue;
            };
            let n: u64 = n.parse().unwrap_or(0);
            match kind {
                "passed" => passed = passed.saturating_add(n),
                "failed" => failed = failed.saturating_add(n),
                _ => {}
            }
        }
    }
    if suites == 0 {
        return "(summary not available)".to_string();
    }
    format!("{passed} passed, {failed} failed across {suites} suites")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_suites() {
        let out = "\
test result: ok. 5 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out
noise
test result: ok. 2 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out
";
        assert_eq!(extract_test_summary(out), "7 passed, 1 failed across 2 suites");
    }

    #[test]
    fn no_summary() {
        assert_eq!(extract_test_summary("error"), "(summary not available)");
    }
}
