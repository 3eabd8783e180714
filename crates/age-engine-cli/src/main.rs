//! age - compute ages and next-birthday countdowns from the command line.
//!
//! Each successful `calc` is appended to a ten-entry history kept in
//! `<history-dir>/age_history.json`.

use std::path::PathBuf;

use age_engine::format::{DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN, DEFAULT_WEEKDAY_PATTERN};
use age_engine::{
    AgeBreakdown, AgeCalculator, Clock, DisplayFormat, FileStorage, HistoryEntry, HistoryLog,
    HistoryStore, SystemClock,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// age - exact age, totals and next-birthday countdown
#[derive(Parser, Debug)]
#[command(name = "age")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the calculation history
    #[arg(long, global = true, default_value = ".")]
    history_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// strftime pattern for dates
    #[arg(long, global = true, default_value = DEFAULT_DATE_PATTERN)]
    date_format: String,

    /// strftime pattern for dates with a time of day
    #[arg(long, global = true, default_value = DEFAULT_DATE_TIME_PATTERN)]
    datetime_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute an age from a date of birth
    Calc {
        /// Date of birth (YYYY-MM-DD)
        dob: String,

        /// Time of birth (HH:MM, 24-hour)
        #[arg(short, long)]
        time: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Don't record this calculation in the history
        #[arg(long)]
        no_save: bool,
    },

    /// Show past calculations, newest first
    History {
        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all past calculations
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let format = DisplayFormat::new(&cli.date_format, &cli.datetime_format, DEFAULT_WEEKDAY_PATTERN)
        .context("invalid --date-format or --datetime-format")?;
    let store = HistoryStore::new(FileStorage::new(&cli.history_dir));
    debug!("Using history at {:?}", store.storage().slot_path(age_engine::HISTORY_KEY));

    match cli.command {
        Commands::Calc {
            dob,
            time,
            json,
            no_save,
        } => {
            let calculator = AgeCalculator::new(SystemClock).with_format(format);
            let tob = time.as_deref();
            let age = calculator.compute_age(&dob, tob)?;

            if !no_save {
                let ts = calculator.clock().timestamp_millis();
                store.append(HistoryEntry::from_breakdown(&dob, tob, &age, ts));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&age)?);
            } else {
                print_age(&age);
            }
        }
        Commands::History { json } => {
            let log = store.read();
            if json {
                println!("{}", serde_json::to_string_pretty(&log)?);
            } else {
                print_history(&log, &format);
            }
        }
        Commands::Clear => {
            store.clear();
            println!("History cleared.");
        }
    }

    Ok(())
}

fn print_age(age: &AgeBreakdown) {
    println!(
        "Age:            {} {}, {} {}, {} {}",
        age.years,
        plural(i64::from(age.years), "year"),
        age.months,
        plural(i64::from(age.months), "month"),
        age.days,
        plural(i64::from(age.days), "day"),
    );
    println!("                {}h {}m {}s", age.hours, age.minutes, age.seconds);
    println!("Born:           {} ({})", age.formatted_dob, age.weekday);
    println!(
        "Next birthday:  {} (in {})",
        age.next_birthday.date, age.next_birthday.countdown
    );
    println!("Totals:");
    println!("  months   {}", age.totals.months);
    println!("  weeks    {}", age.totals.weeks);
    println!("  days     {}", age.totals.days);
    println!("  hours    {}", age.totals.hours);
    println!("  minutes  {}", age.totals.minutes);
    println!("  seconds  {}", age.totals.seconds);
    println!();
    println!("{}", age.summary);
}

fn print_history(log: &HistoryLog, format: &DisplayFormat) {
    if log.is_empty() {
        println!("No history yet.");
        return;
    }
    for (i, entry) in log.iter().enumerate() {
        let when = DateTime::from_timestamp_millis(entry.ts)
            .map(|utc| format.format_date_time(utc.with_timezone(&Local).naive_local()))
            .unwrap_or_else(|| entry.ts.to_string());
        println!("{:>2}. [{}] {}", i + 1, when, entry.summary);
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
