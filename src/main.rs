use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use structured_logger::json::new_writer;
use structured_logger::Builder;

use street_map::config::{load_user_config, UserConfig};
use street_map::errors::Result;
use street_map::{ElementRef, StreetMap};

/// Load an OpenStreetMap XML extract and look up nodes and ways in it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON config file with `data_path` and optional `log_level`.
    #[arg(short, long, conflicts_with = "input")]
    config: Option<PathBuf>,

    /// .osm or .osm.xz file to read.
    #[arg(required_unless_present = "config")]
    input: Option<String>,

    /// Node ids to print.
    #[arg(long = "node")]
    nodes: Vec<u64>,

    /// Way ids to print.
    #[arg(long = "way")]
    ways: Vec<u64>,
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

fn user_config(cli: &Cli) -> Result<UserConfig> {
    match (&cli.config, &cli.input) {
        (Some(path), _) => load_user_config(path),
        (None, Some(input)) => Ok(UserConfig::for_input(input)),
        (None, None) => Err("Either --config or an input file is required".into()),
    }
}

fn run(cli: &Cli, config: &UserConfig) -> Result<()> {
    let map = StreetMap::open(&config.data_path)?;
    info!(nodes = map.node_count(), ways = map.way_count(); "Loaded street map");

    let requested = cli
        .nodes
        .iter()
        .map(|&id| ElementRef::Node(id))
        .chain(cli.ways.iter().map(|&id| ElementRef::Way(id)));
    for element_ref in requested {
        match map.element(element_ref) {
            Some(element) => println!("{}", serde_json::to_string_pretty(&element)?),
            None => println!("{element_ref:?} not found"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match user_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config.log_level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.to_string();
            error!(err = message.as_str(); "Failed to load street map");
            ExitCode::FAILURE
        }
    }
}
