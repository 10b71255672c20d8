/// enum-meta: extract enum metadata from interface-definition sources
///
/// Reads every file of an input directory, resolves the integer value of each
/// enum member (following imports across files) and writes the result as JSON.
/// Member comments of the property enum contribute titles and annotations.
use anyhow::{Context, Result};
use clap::Parser;
use enum_meta::base::constants::DEFAULT_PROPERTY_ENUM;
use enum_meta::project::{MetadataAssembler, MetadataConfig, output};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "enum-meta")]
#[command(about = "Extract enum metadata from interface-definition sources", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the source files (not searched recursively)
    #[arg(long)]
    input_dir: PathBuf,

    /// Output JSON file
    #[arg(long)]
    output_json: PathBuf,

    /// Enum whose member comments carry titles and annotations
    #[arg(long, default_value = DEFAULT_PROPERTY_ENUM)]
    property_enum: String,

    /// Titles longer than this keep the declared member name
    #[arg(long)]
    max_title_len: Option<usize>,

    /// Checked-in JSON file the output must match byte for byte
    #[arg(long)]
    check_against: Option<PathBuf>,

    /// Empty stamp file created once the check against --check-against passes
    #[arg(long)]
    output_empty_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let started = Instant::now();
    let config = MetadataConfig::new()
        .with_property_enum(cli.property_enum.clone())
        .with_max_title_len(cli.max_title_len);

    let descriptors = MetadataAssembler::new(config)
        .build(&cli.input_dir)
        .with_context(|| format!("Failed to extract metadata from {}", cli.input_dir.display()))?;

    output::write_json(&cli.output_json, &descriptors)
        .with_context(|| format!("Failed to write {}", cli.output_json.display()))?;

    if let Some(expected) = &cli.check_against {
        output::check_and_stamp(&cli.output_json, expected, cli.output_empty_file.as_deref())?;
    } else if cli.output_empty_file.is_some() {
        warn!("--output-empty-file is only written after --check-against passes");
    }

    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "done");
    println!(
        "Enum metadata from {} ({} enums) written to {}",
        cli.input_dir.display(),
        descriptors.len(),
        cli.output_json.display()
    );
    Ok(())
}

/// Initialize stderr logging; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
