//! `slotplan` CLI — validate availability plans and preview the slot batches
//! they expand to, without touching any backend.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a plan file
//! slotplan validate -i plan.json
//!
//! # Validate from stdin
//! cat plan.json | slotplan validate
//!
//! # Preview the exact slot-creation requests a submission would produce
//! slotplan expand -i plan.json -o requests.json
//!
//! # Per-day slot counts instead of the full request list
//! slotplan expand -i plan.json --summary
//!
//! # Pin "today" for reproducible past-day checks
//! slotplan validate -i plan.json --today 2025-06-01
//! ```

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use slot_engine::{expand_plan, validate_plan, PlanInput, ValidationReport};

#[derive(Parser)]
#[command(name = "slotplan", version, about = "Availability slot plan preview")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a plan for field-level problems
    Validate {
        /// Input plan file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference date for past-day checks (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Expand a valid plan into its slot-creation requests
    Expand {
        /// Input plan file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reference date for past-day checks (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Print per-day slot counts instead of the full request list
        #[arg(long)]
        summary: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input, today } => {
            let plan = read_plan(input.as_deref())?;
            match validate_plan(&plan, resolve_today(today)) {
                Ok(valid) => {
                    println!(
                        "Plan is valid: {} day(s), {} shift(s), {}-minute slots.",
                        valid.dates.len(),
                        valid.shifts.len(),
                        valid.slot_duration_minutes
                    );
                }
                Err(report) => fail_with_report(&report),
            }
        }
        Commands::Expand {
            input,
            output,
            today,
            summary,
        } => {
            let plan = read_plan(input.as_deref())?;
            let valid = match validate_plan(&plan, resolve_today(today)) {
                Ok(valid) => valid,
                Err(report) => fail_with_report(&report),
            };

            let requests = expand_plan(&valid);

            if summary {
                let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
                for request in &requests {
                    *per_day.entry(request.start_time.date_naive()).or_default() += 1;
                }
                for (date, count) in &per_day {
                    println!("{date}  {count} slot(s)");
                }
                println!("Total: {} slot(s)", requests.len());
            } else {
                let json = serde_json::to_string_pretty(&requests)
                    .context("Failed to serialize requests")?;
                write_output(output.as_deref(), &json)?;
            }
        }
    }

    Ok(())
}

/// Print every field-tagged issue and exit non-zero.
fn fail_with_report(report: &ValidationReport) -> ! {
    eprintln!("Plan is invalid:");
    for issue in report.issues() {
        eprintln!("  {issue}");
    }
    process::exit(1);
}

fn resolve_today(flag: Option<NaiveDate>) -> NaiveDate {
    flag.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn read_plan(path: Option<&str>) -> Result<PlanInput> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse plan JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
