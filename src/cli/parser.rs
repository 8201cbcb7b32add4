//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use reqwest::Url;
use std::path::PathBuf;

use super::validation;
use crate::models::{HeightUnit, Position, SortBy, SortDirection};

/// Command line dashboard for a football player roster service
#[derive(Parser, Debug)]
#[command(name = "roster-dash")]
#[command(about = "Command line dashboard for a football player roster service")]
#[command(long_about = "
roster-dash lists, filters, creates, edits and deletes players held by a
remote roster service, and bulk-imports players from CSV files. Running it
without a subcommand starts the interactive browse session.

EXAMPLES:
    # Browse interactively (default)
    roster-dash

    # First page of French and Brazilian forwards, tallest first
    roster-dash list --nationality FR,BR --position ST,LW,RW --sort height --order desc

    # Heights in feet
    roster-dash list --min-height 6 --units ft

    # Create a player
    roster-dash create --first-name Kylian --last-name Mbappe \\
        --date-of-birth 1998-12-20 --height 1.78 --nationality FR --position ST,LW

    # Check a CSV file without uploading it
    roster-dash import players.csv --check

    # Talk to another service instance
    roster-dash --base-url https://roster.example.com/api/players list

For more information about configuration options, see config/default.toml.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered config/ directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/roster-dash/production.toml
    #[arg(short, long, global = true, value_name = "FILE", value_parser = validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which config/{environment}.toml layer is loaded.
    ///
    /// Available values: development (dev), production (prod), test
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override
    ///
    /// Takes precedence over the configuration file and --verbose/--quiet.
    ///
    /// Available levels: error, warn, info, debug, trace
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Player service base URL
    ///
    /// Example: --base-url http://localhost:8081/api/players
    #[arg(long, global = true, value_name = "URL", value_parser = validation::validate_base_url)]
    pub base_url: Option<Url>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List players matching filters
    ///
    /// Examples:
    ///   roster-dash list                               # First page, sorted by name
    ///   roster-dash list --name mba --page 2           # Second page of a name search
    ///   roster-dash list --min-age 20 --max-age 25     # Age range
    List(ListArgs),

    /// Show one player
    Get {
        /// Player id
        #[arg(value_parser = validation::validate_player_id)]
        id: i64,

        /// Print the raw JSON record
        #[arg(long)]
        json: bool,

        /// Unit for the displayed height
        #[arg(long, value_name = "UNIT", value_parser = validation::validate_height_unit)]
        units: Option<HeightUnit>,
    },

    /// Create a player
    Create(CreateArgs),

    /// Change fields of an existing player
    ///
    /// Only the fields given are sent; everything else is left as it is.
    Update(UpdateArgs),

    /// Delete a player
    ///
    /// Asks for confirmation unless --yes is given.
    Delete {
        /// Player id
        #[arg(value_parser = validation::validate_player_id)]
        id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Bulk-import players from a CSV file
    ///
    /// Required columns: firstName, lastName, dateOfBirth, height,
    /// nationalities, positions. Multi-valued cells are separated with
    /// one of | / ; # ! %.
    ///
    /// Examples:
    ///   roster-dash import players.csv           # Check the header, then upload
    ///   roster-dash import players.csv --check   # Check every row, upload nothing
    Import {
        /// CSV file to upload
        #[arg(value_name = "FILE", value_parser = validation::validate_csv_file_path)]
        file: PathBuf,

        /// Only check the file locally
        #[arg(long)]
        check: bool,
    },

    /// Interactive session with debounced filters (default)
    Browse {
        /// Start from configured defaults instead of the saved session
        #[arg(long)]
        fresh: bool,
    },
}

/// Filters, sorting and paging for `list`
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Text matched against first and last name
    #[arg(long)]
    pub name: Option<String>,

    /// Nationality codes (ISO 3166-1 alpha-2), comma separated or repeated
    #[arg(long = "nationality", value_name = "CODE", value_delimiter = ',', value_parser = validation::validate_nationality)]
    pub nationalities: Vec<String>,

    /// Position codes, comma separated or repeated
    #[arg(long = "position", value_name = "CODE", value_delimiter = ',', value_parser = validation::validate_position)]
    pub positions: Vec<Position>,

    #[arg(long, value_name = "YEARS")]
    pub min_age: Option<u32>,

    #[arg(long, value_name = "YEARS")]
    pub max_age: Option<u32>,

    /// Minimum height in --units
    #[arg(long, value_name = "HEIGHT", value_parser = validation::validate_height)]
    pub min_height: Option<f64>,

    /// Maximum height in --units
    #[arg(long, value_name = "HEIGHT", value_parser = validation::validate_height)]
    pub max_height: Option<f64>,

    /// Sort key: name, age, height, positions, nationality
    #[arg(long, value_parser = validation::validate_sort_by)]
    pub sort: Option<SortBy>,

    /// Sort order: asc, desc
    #[arg(long, value_parser = validation::validate_sort_direction)]
    pub order: Option<SortDirection>,

    /// Page number, starting at 1
    #[arg(long, value_parser = validation::validate_positive_count)]
    pub page: Option<u32>,

    /// Players per page
    #[arg(long, value_parser = validation::validate_positive_count)]
    pub size: Option<u32>,

    /// Unit for entered and displayed heights: m, ft
    #[arg(long, value_name = "UNIT", value_parser = validation::validate_height_unit)]
    pub units: Option<HeightUnit>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fields of a new player
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// YYYY-MM-DD
    #[arg(long, value_parser = validation::validate_date)]
    pub date_of_birth: Date,

    /// Height in --units
    #[arg(long, value_parser = validation::validate_height)]
    pub height: f64,

    #[arg(long = "nationality", value_name = "CODE", required = true, value_delimiter = ',', value_parser = validation::validate_nationality)]
    pub nationalities: Vec<String>,

    #[arg(long = "position", value_name = "CODE", required = true, value_delimiter = ',', value_parser = validation::validate_position)]
    pub positions: Vec<Position>,

    #[arg(long, value_name = "UNIT", value_parser = validation::validate_height_unit)]
    pub units: Option<HeightUnit>,
}

/// Fields to change on an existing player
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(value_parser = validation::validate_player_id)]
    pub id: i64,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long, value_parser = validation::validate_date)]
    pub date_of_birth: Option<Date>,

    #[arg(long, value_parser = validation::validate_height)]
    pub height: Option<f64>,

    /// Replaces the player's nationalities
    #[arg(long = "nationality", value_name = "CODE", value_delimiter = ',', value_parser = validation::validate_nationality)]
    pub nationalities: Option<Vec<String>>,

    /// Replaces the player's positions
    #[arg(long = "position", value_name = "CODE", value_delimiter = ',', value_parser = validation::validate_position)]
    pub positions: Option<Vec<Position>>,

    #[arg(long, value_name = "UNIT", value_parser = validation::validate_height_unit)]
    pub units: Option<HeightUnit>,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks clap cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Some(Commands::List(args)) => {
                if let (Some(min), Some(max)) = (args.min_age, args.max_age)
                    && min > max
                {
                    return Err(format!("--min-age {} is greater than --max-age {}", min, max));
                }
                if let (Some(min), Some(max)) = (args.min_height, args.max_height)
                    && min > max
                {
                    return Err(format!(
                        "--min-height {} is greater than --max-height {}",
                        min, max
                    ));
                }
            }
            Some(Commands::Update(args)) => {
                if args.first_name.is_none()
                    && args.last_name.is_none()
                    && args.date_of_birth.is_none()
                    && args.height.is_none()
                    && args.nationalities.is_none()
                    && args.positions.is_none()
                {
                    return Err("update needs at least one field to change".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
