//! spoon: browse curated events from the command line.
//!
//! Reads event and saved-list documents from JSON files and runs them through
//! the same pipeline the app uses.

use clap::{Parser, Subcommand};
use spoon_cli::output::{print_error, Status};
use spoon_core::error::exit_codes;
use spoon_feed::{FeedConfig, MissingDistance, SortKey};
use spoon_geo::DistanceUnit;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{config, distance, feed, geocode, saved};

/// Southern Spoon event discovery
#[derive(Parser)]
#[command(name = "spoon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to the standard locations)
    #[arg(long, global = true, env = "SPOON_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two coordinates
    #[command(allow_negative_numbers = true)]
    Distance {
        /// First latitude
        lat1: f64,
        /// First longitude
        lon1: f64,
        /// Second latitude
        lat2: f64,
        /// Second longitude
        lon2: f64,
        /// Output unit (miles or km)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Build the discovery feed from an events file
    #[command(allow_negative_numbers = true)]
    Feed {
        /// JSON array of event documents
        #[arg(long)]
        events: PathBuf,
        /// User latitude
        #[arg(long)]
        lat: f64,
        /// User longitude
        #[arg(long)]
        lon: f64,
        /// Event ids already swiped on
        #[arg(long, value_delimiter = ',')]
        seen: Vec<String>,
        /// Reference time (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<chrono::DateTime<chrono::Utc>>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's saved list
    Saved {
        /// JSON array of event documents
        #[arg(long)]
        events: PathBuf,
        /// JSON array of saved records
        #[arg(long)]
        saved: PathBuf,
        /// Owner of the saved list
        #[arg(long)]
        user: String,
        /// Sort key (date, distance or name)
        #[arg(long)]
        sort: Option<SortKey>,
        /// Placement of events without a distance (treat_as_zero or last)
        #[arg(long)]
        missing_distance: Option<MissingDistance>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a city, address or ZIP code to a coordinate
    Geocode {
        /// Free-text location, e.g. "Atlanta, GA"
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

impl Commands {
    fn wants_json(&self) -> bool {
        match self {
            Commands::Feed { json, .. }
            | Commands::Saved { json, .. }
            | Commands::Geocode { json, .. } => *json,
            Commands::Distance { .. } | Commands::Config => false,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match FeedConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            print_error(&err);
            return exit_code(exit_codes::for_code(err.code));
        }
    };

    let mut logging = loaded.schema.logging.clone();
    if cli.verbose {
        logging.log_level = "debug".to_string();
    }
    let _guard = match spoon_telemetry::init_with_config(logging) {
        Ok(guard) => guard,
        Err(err) => {
            Status::error(&format!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };

    let settings = &loaded.schema;
    let json_output = cli.command.wants_json();
    let result = match cli.command {
        Commands::Distance { lat1, lon1, lat2, lon2, unit } => {
            distance::run(lat1, lon1, lat2, lon2, unit.unwrap_or(settings.display.unit))
        }

        Commands::Feed { events, lat, lon, seen, now, json } => {
            feed::run(&events, lat, lon, seen, now, json, settings)
        }

        Commands::Saved { events, saved: saved_file, user, sort, missing_distance, json } => {
            let options = saved::Options {
                sort: sort.unwrap_or(settings.saved.default_sort),
                missing_distance: missing_distance.unwrap_or(settings.saved.missing_distance),
                json,
            };
            saved::run(&events, &saved_file, &user, options, settings).await
        }

        Commands::Geocode { query, json } => geocode::run(&query, json, settings).await,

        Commands::Config => config::run(&loaded),
    };

    tracing::debug!(metrics = %spoon_telemetry::metrics().export_json(), "Session metrics");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<spoon_core::Error>() {
            Some(coded) => {
                if json_output {
                    print_report(coded);
                }
                print_error(coded);
                exit_code(exit_codes::for_code(coded.code))
            }
            None => {
                Status::error(&format!("{err:#}"));
                ExitCode::FAILURE
            }
        },
    }
}

/// Machine-readable failure on stdout for `--json` callers
fn print_report(err: &spoon_core::Error) {
    match serde_json::to_string_pretty(&err.to_report()) {
        Ok(report) => println!("{report}"),
        Err(e) => Status::error(&format!("Failed to render error report: {e}")),
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
