mod clock;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabula_core::config::TabulaConfig;
use tabula_core::engine::TimetableEngine;
use tabula_core::source::HttpSource;
use tabula_core::{SchoolDay, WeekParity};
use tracing_subscriber::EnvFilter;

use crate::clock::Clock;

pub type Engine = TimetableEngine<HttpSource>;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Fetch the school timetable and see what's on now, next and this fortnight")]
struct Cli {
    /// More log output (-v info, -vv debug). TABULA_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print query results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the calendar export into the cache
    Fetch {
        /// Download even if a cached export exists
        #[arg(short, long)]
        force: bool,
    },
    /// Parse the cached export into a timetable
    Parse {
        /// Re-parse even if a parsed timetable is cached
        #[arg(short, long)]
        force: bool,
    },
    /// Show the week parity (1 or 2)
    Week {
        /// Date/time to evaluate (e.g. "2025-06-02", "next monday")
        #[arg(long)]
        at: Option<String>,
    },
    /// Show one day's classes
    Day {
        /// Monday to Friday (abbreviations allowed)
        day: SchoolDay,

        /// Week parity (defaults to the current week)
        #[arg(short, long, value_parser = parse_week)]
        week: Option<WeekParity>,
    },
    /// Show today's classes (next Monday's on a weekend)
    Today {
        #[arg(long)]
        at: Option<String>,
    },
    /// Show what the display shows: tomorrow's classes once school is out
    Display {
        #[arg(long)]
        at: Option<String>,
    },
    /// Show the next class
    Next {
        #[arg(long)]
        at: Option<String>,
    },
    /// Print both weeks of the timetable
    Timetable,
    /// Keep the display answer up to date, refreshing the export periodically
    Watch {
        /// Refresh interval (e.g. "30m"); defaults to refresh_interval from config
        #[arg(long)]
        interval: Option<String>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a commented default config file
    Init,
    /// Print the effective configuration
    Show,
}

fn parse_week(s: &str) -> Result<WeekParity, String> {
    let n: u8 = s.parse().map_err(|_| format!("'{s}' is not a week number"))?;
    WeekParity::try_from(n)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = TabulaConfig::load()?;
    let clock = Clock::from_config(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
        Commands::Fetch { force } => commands::fetch::fetch(&mut engine(&config)?, force),
        Commands::Parse { force } => commands::fetch::parse(&mut engine(&config)?, force),
        Commands::Week { at } => {
            let now = clock.resolve(at.as_deref())?;
            commands::week::run(&engine(&config)?, now, json)
        }
        Commands::Day { day, week } => {
            commands::day::run(&mut engine(&config)?, &clock, day, week, json)
        }
        Commands::Today { at } => {
            let now = clock.resolve(at.as_deref())?;
            commands::today::today(&mut engine(&config)?, now, json)
        }
        Commands::Display { at } => {
            let now = clock.resolve(at.as_deref())?;
            commands::today::display(&mut engine(&config)?, now, json)
        }
        Commands::Next { at } => {
            let now = clock.resolve(at.as_deref())?;
            commands::today::next(&mut engine(&config)?, now, json)
        }
        Commands::Timetable => commands::timetable::run(&mut engine(&config)?, json),
        Commands::Watch { interval } => {
            let interval = match interval {
                Some(s) => humantime::parse_duration(&s)
                    .map_err(|e| anyhow::anyhow!("Invalid interval '{s}': {e}"))?,
                None => config.refresh_interval()?,
            };
            commands::watch::run(engine(&config)?, interval, clock)
        }
    }
}

fn engine(config: &TabulaConfig) -> Result<Engine> {
    Ok(TimetableEngine::from_config(config)?)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("TABULA_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
