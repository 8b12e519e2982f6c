use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;

use matrix_interpolate::interpolation::{interpolate_from_path, InterpolationOptions, LineLogObserver};

/// Fill `nan` holes in a CSV matrix with the mean of their non-diagonal neighbors.
///
/// Interpolated rows are written to stdout.
#[derive(Debug, Parser)]
#[command(name = "interpolate", version)]
struct Cli {
    /// Path to the CSV file to interpolate.
    path: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let opts = InterpolationOptions {
        observer: Some(Arc::new(LineLogObserver::stderr())),
        ..Default::default()
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match interpolate_from_path(&cli.path, &mut out, &opts) {
        // Failures were already reported by the observer.
        Ok(_) if out.flush().is_ok() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
