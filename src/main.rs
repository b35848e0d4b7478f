use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use csv2arb::{Warning, FILE_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csv2arb")]
#[command(version)]
#[command(
    about = "Convert arbitrary waveform files (16384 x 14-bit samples) to text and back",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a binary waveform file to text, one normalized value per line
    #[command(visible_alias = "arb2csv")]
    Decode {
        /// Input waveform file (32768 bytes)
        input: PathBuf,
        /// Output text file
        output: PathBuf,
    },
    /// Convert a text file with one normalized value per line to a binary waveform file
    #[command(visible_alias = "csv2arb")]
    Encode {
        /// Input text file, lines starting with '#' are ignored
        input: PathBuf,
        /// Output waveform file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input, output } => decode(&input, &output),
        Commands::Encode { input, output } => encode(&input, &output),
    }
}

fn decode(input: &Path, output: &Path) -> Result<()> {
    log::info!("Input file: {}", input.display());

    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let decoded = csv2arb::decode(&bytes)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    report(&decoded.warnings);
    log::info!(
        "{} samples, {} points",
        decoded.samples.len(),
        decoded.points()
    );

    fs::write(output, decoded.to_text())
        .with_context(|| format!("Failed to write output file {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn encode(input: &Path, output: &Path) -> Result<()> {
    log::info!("Input file: {}", input.display());

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let encoded = csv2arb::encode(&text)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    report(&encoded.warnings);
    log::info!(
        "{} points, wrote {} bytes",
        encoded.points(),
        encoded.bytes_written()
    );
    if let Some(padding) = encoded.padding {
        log::info!(
            "Padding file from {} bytes to {} bytes with {} zero values",
            padding.from_bytes,
            padding.to_bytes,
            padding.words
        );
    }

    let bytes = encoded.to_bytes();
    debug_assert_eq!(bytes.len(), FILE_SIZE);
    fs::write(output, &bytes)
        .with_context(|| format!("Failed to write output file {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn report(warnings: &[Warning]) {
    for warning in warnings {
        log::warn!("{warning}");
    }
}
