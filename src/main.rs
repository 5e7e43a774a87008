use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use transposer::TransposeOptions;

/// Chord ratio used when neither the command line nor a config file sets one
const DEFAULT_CHORD_RATIO_THRESHOLD: f64 = 0.2;

#[derive(Parser)]
#[command(name = "transposer")]
#[command(author, version, about = "Transpose the chords of a plain-text chord sheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Input chord sheet (reads stdin when omitted)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// YAML options file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Minimum share of chords on a line for it to be rewritten (0-1)
    #[arg(short, long, global = true)]
    threshold: Option<f64>,

    /// Extra delimiter symbol; repeat for several
    #[arg(short, long = "delimiter", global = true)]
    delimiters: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpose into another key
    ToKey {
        /// Source key (guessed from the first chord when omitted)
        #[arg(short, long, default_value = "")]
        from: String,
        /// Target key
        #[arg(long)]
        to: String,
    },
    /// Rewrite chords as Nashville numbers
    ToNashville {
        #[arg(short, long, default_value = "")]
        from: String,
    },
    /// Rewrite Nashville numbers as chords in a key
    FromNashville {
        #[arg(long)]
        to: String,
    },
    /// Shift chords by a number of semitones
    Shift {
        #[arg(short, long, default_value = "")]
        from: String,
        #[arg(allow_hyphen_values = true)]
        semitones: i32,
    },
    /// Print the key guessed from the first chord
    GuessKey,
}

fn load_options(cli: &Cli) -> Result<TransposeOptions> {
    let mut options = match &cli.config {
        Some(path) => TransposeOptions::load(path)?,
        None => TransposeOptions::default().with_threshold(DEFAULT_CHORD_RATIO_THRESHOLD),
    };

    if let Some(threshold) = cli.threshold {
        options.chord_ratio_threshold = threshold;
    }
    if !cli.delimiters.is_empty() {
        options.delimiter_symbols = cli.delimiters.clone();
    }
    options.validate()?;
    Ok(options)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Error reading stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    let source = read_input(cli.input.as_ref())?;

    let result = match &cli.command {
        Commands::ToKey { from, to } => transposer::transpose_to_key(&source, from, to, &options)?,
        Commands::ToNashville { from } => transposer::transpose_to_nashville(&source, from, &options)?,
        Commands::FromNashville { to } => transposer::transpose_from_nashville(&source, to, &options)?,
        Commands::Shift { from, semitones } => {
            transposer::transpose_by(&source, from, *semitones, &options)?
        }
        Commands::GuessKey => {
            let key = transposer::guess_key(&source, &options)?;
            if key.relative_minor.is_empty() {
                key.major.to_string()
            } else {
                format!("{} ({})", key.major, key.relative_minor)
            }
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &result)
                .with_context(|| format!("Error writing to '{}'", path.display()))?;
            eprintln!("Wrote transposed sheet to {}", path.display());
        }
        None => println!("{}", result),
    }

    Ok(())
}
