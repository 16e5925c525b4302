use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;

use crate::cli::{Cli, Command};
use crate::logging::app_config;
use metricnorm::{prom, telemetry};

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config(cli.log_file.as_deref(), cli.loglevel)?)?;

    let output = match &cli.command {
        Command::Metrics {
            input,
            metrics_only,
        } => {
            log::info!("Reading exposition text from {}", input.display());
            let metrics = prom::parse_bytes(&read_input(input)?)?;
            if *metrics_only {
                json!({ "metrics": metrics })
            } else {
                json!({
                    "summary": prom::summarize(&metrics),
                    "system": prom::extract(&metrics),
                    "metrics": metrics,
                })
            }
        }
        Command::Telemetry { input, device_id } => {
            log::info!("Reading telemetry records from {}", input.display());
            let payload = String::from_utf8(read_input(input)?)
                .with_context(|| format!("{} is not UTF-8 text", input.display()))?;
            let series = telemetry::parse_json_str(&payload, device_id.as_deref())?;
            json!({
                "metadata": telemetry::metadata(&series),
                "series": series,
            })
        }
    };

    print_json(&output, cli.pretty)
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json(value: &impl Serialize, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
