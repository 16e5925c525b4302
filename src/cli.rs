use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Set the logging level
    ///
    /// Set the logging level used for diagnostics about dropped lines and ignored units.
    #[arg(short, long, global = true, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,

    /// Write the log to this file instead of stderr
    #[arg(long, global = true, env="METRICNORM_LOG_FILE", value_hint=ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse Prometheus exposition text
    ///
    /// Prints the parsed metrics together with their summary and the extracted system snapshot.
    Metrics {
        /// File holding the scrape, or - for stdin
        #[arg(value_hint=ValueHint::FilePath, default_value="-")]
        input: PathBuf,

        /// Print only the parsed metrics
        #[arg(long)]
        metrics_only: bool,
    },

    /// Normalize a JSON array of device telemetry records
    ///
    /// Prints the series keyed by measurement type and their display metadata.
    Telemetry {
        /// File holding the records, or - for stdin
        #[arg(value_hint=ValueHint::FilePath, default_value="-")]
        input: PathBuf,

        /// Device the records belong to
        #[arg(short, long, env="DEVICE_ID", value_hint=ValueHint::Other)]
        device_id: Option<String>,
    },
}
