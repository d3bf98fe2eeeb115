//! psycurve CLI - analyze a local trials export
//!
//! Commands:
//! - summary: descriptive statistics for one session export
//! - curve: psychometric curve for one session export
//! - report: full analysis (summary + curve + quality flags)

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use psycurve::adapters::{ColumnarAdapter, RowsAdapter, TrialPayloadAdapter};
use psycurve::{AnalysisError, SessionAnalyzer, SessionTrials, PSYCURVE_VERSION};

/// psycurve - psychometric analysis for contrast discrimination sessions
#[derive(Parser)]
#[command(name = "psycurve")]
#[command(version = PSYCURVE_VERSION)]
#[command(about = "Compute psychometric curves from behavioral trial exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print descriptive session statistics
    Summary {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input export format
        #[arg(long, default_value = "columnar")]
        format: ExportFormat,
    },

    /// Print the psychometric curve
    Curve {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input export format
        #[arg(long, default_value = "columnar")]
        format: ExportFormat,

        /// Print the (contrast %, rightward %) series instead of curve points
        #[arg(long)]
        percent: bool,
    },

    /// Print the full session analysis
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input export format
        #[arg(long, default_value = "columnar")]
        format: ExportFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum ExportFormat {
    /// JSON object of parallel arrays
    Columnar,
    /// JSON array of per-trial objects
    Rows,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("psycurve: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Summary { input, format } => {
            let trials = load_trials(&input, &format)?;
            let summary = psycurve::summarize(&trials)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }

        Commands::Curve {
            input,
            format,
            percent,
        } => {
            let trials = load_trials(&input, &format)?;
            let curve = psycurve::psychometric_curve(&trials)?;
            if percent {
                println!("{}", serde_json::to_string_pretty(&curve.percent_series())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&curve)?);
            }
            Ok(())
        }

        Commands::Report { input, format } => {
            let trials = load_trials(&input, &format)?;
            let analysis = SessionAnalyzer::new().analyze_trials(trials)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }
    }
}

fn load_trials(input: &PathBuf, format: &ExportFormat) -> Result<SessionTrials, CliError> {
    let raw = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let trials = match format {
        ExportFormat::Columnar => ColumnarAdapter.parse(&raw)?,
        ExportFormat::Rows => RowsAdapter.parse(&raw)?,
    };
    Ok(trials)
}
