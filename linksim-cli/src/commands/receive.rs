use anyhow::{bail, Context, Result};
use colored::*;
use linksim_core::{receive, LinkConfig, RxReport};
use std::fs;
use std::io::{self, Read};

pub fn execute(
    wire: Option<&str>,
    input: Option<&str>,
    config: &LinkConfig,
    json: bool,
) -> Result<()> {
    let wire = match (wire, input) {
        (_, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {path}"))?,
        (Some("-"), None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (Some(text), None) => text.to_string(),
        (None, None) => bail!("provide a wire bit-string via --wire or --input"),
    };

    let report =
        receive(wire.trim(), config).context("failed to decode the wire stream")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Human-readable verdict listing shared with the listen command
pub fn print_report(report: &RxReport) {
    println!("\n=== Frame Verdicts ===");
    for (i, verdict) in report.verdicts.iter().enumerate() {
        if verdict.error_detected {
            println!("frame {i:>3}: {} error detected", "✗".red());
        } else if let Some(position) = verdict.corrected {
            println!("frame {i:>3}: {} corrected bit {position}", "!".yellow());
        } else {
            println!("frame {i:>3}: {} clean", "✓".green());
        }
    }

    println!("\n=== Recovered Text ===");
    println!("{}", report.text);

    if report.is_clean() {
        println!("{} all frames verified", "✓".green());
    } else {
        println!("{} some frames arrived damaged", "✗".red());
    }
}
