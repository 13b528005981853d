mod commands;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use schedule_engine::{CalendarView, EngineConfig, RepeatType};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "schedule")]
#[command(version, about = "Browse, edit and watch calendar events")]
struct Cli {
    /// Config file (default: ./schedule.toml, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Event file, overriding store.path from the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events in the week or month around a date
    List {
        #[arg(long, default_value = "month")]
        view: CalendarView,

        /// Anchor date (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,

        /// Only events whose title, description or location contain this
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Print a month grid with event counts
    Calendar {
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Add an event
    Add {
        #[command(flatten)]
        fields: EventFields,

        /// Save even if the event overlaps others
        #[arg(long)]
        force: bool,
    },
    /// Change an existing event
    Update {
        id: String,

        #[command(flatten)]
        fields: EventFields,

        #[arg(long)]
        force: bool,
    },
    /// Delete an event
    Delete { id: String },
    /// Show events overlapping a time slot
    Conflicts {
        #[arg(long, value_parser = parse_day)]
        date: NaiveDate,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        /// Ignore the event with this id
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Show reminders that are due now
    Upcoming {
        /// Current time (YYYY-MM-DDTHH:MM, default: local now)
        #[arg(long, value_parser = parse_moment)]
        now: Option<NaiveDateTime>,
    },
    /// Print reminders as they become due, until Ctrl-C
    Watch,
}

/// Event fields shared by `add` and `update`. On update, omitted fields keep
/// their stored value.
#[derive(Args, Default)]
pub struct EventFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub repeat: Option<RepeatType>,

    /// Repeat interval (ignored for 'none')
    #[arg(long)]
    pub interval: Option<u32>,

    /// Minutes before the start to remind (default on add: 10)
    #[arg(long)]
    pub notify: Option<u32>,
}

fn parse_day(s: &str) -> std::result::Result<NaiveDate, String> {
    schedule_engine::datetime::parse_date(s)
        .ok_or_else(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

fn parse_moment(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M")
        .map_err(|_| format!("invalid time '{s}' (expected YYYY-MM-DDTHH:MM)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::load().context("failed to load config")?,
    };
    init_tracing(&config, cli.verbose);

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    let mut session = Session::open(config, store_path, cli.json)?;

    match cli.command {
        Commands::List { view, date, search } => commands::list::run(&session, view, date, &search),
        Commands::Calendar { date } => commands::list::calendar(&session, date),
        Commands::Add { fields, force } => commands::edit::add(&mut session, fields, force),
        Commands::Update { id, fields, force } => {
            commands::edit::update(&mut session, &id, fields, force)
        }
        Commands::Delete { id } => commands::edit::delete(&mut session, &id),
        Commands::Conflicts {
            date,
            start,
            end,
            exclude,
        } => commands::conflicts::run(&session, date, &start, &end, exclude.as_deref()),
        Commands::Upcoming { now } => commands::upcoming::run(&session, now),
        Commands::Watch => commands::watch::run(session),
    }
}

/// `RUST_LOG` wins, then `-v`, then `logging.level` from the config.
fn init_tracing(config: &EngineConfig, verbose: u8) {
    let fallback = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
