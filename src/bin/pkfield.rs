//! Command-line interface for pkfield
//!
//! Usage:
//!   pkfield `<path>` [--format `<format>`] [--config `<file>`]
//!
//! Prints the `p: ... k:` field of every digit-led line of `<path>`, one per line.
//! Set `RUST_LOG=pkfield=debug` to see what was read and how much was extracted.

use clap::{Arg, Command};
use pkfield::config::{Loader, Settings};
use pkfield::error::ProcessingError;
use pkfield::processor::{process_file, OutputFormat};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("pkfield")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract the field between 'p: ' and ' k:' from lines that start with a digit")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the text file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: 'plain' or 'json' (default: from configuration)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let format = matches.get_one::<String>("format").map(String::as_str);
    let config = matches.get_one::<String>("config").map(String::as_str);

    if let Err(e) = run(path, format, config) {
        tracing::debug!(error = ?e, "Run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(path: &str, format: Option<&str>, config: Option<&str>) -> Result<(), ProcessingError> {
    let settings = load_settings(format, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = process_file(path, &settings, &mut out)?;
    tracing::info!(path, written, "Done");
    Ok(())
}

fn load_settings(format: Option<&str>, config: Option<&str>) -> Result<Settings, ProcessingError> {
    let mut loader = Loader::new();
    if let Some(file) = config {
        loader = loader.with_file(file);
    }
    if let Some(format) = format {
        // Parse first so a typo reports the valid names instead of a deserializer message.
        let format: OutputFormat = format.parse()?;
        loader = loader.set_override("output.format", format.as_str())?;
    }
    Ok(loader.build()?)
}

/// Diagnostics go to stderr; stdout carries only extracted values.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pkfield=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
