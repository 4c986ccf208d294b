//! `arcode`, a static-model arithmetic coding command-line tool.
//!
//! ```text
//! arcode [-@ FLAGS] encode <infile> <outfile>
//! arcode [-@ FLAGS] decode <infile> <outfile>
//! ```
//!
//! Argument parsing lives here rather than in the library: the core coder
//! only ever sees two byte streams, and everything about how those streams
//! are named or opened is this binary's concern. The `-@` debug-flag
//! surface is likewise external to the core contract; unrecognized flag
//! characters are logged and ignored rather than treated as a usage error.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use arcode::error::CoderError;

use clap::{Parser, Subcommand};

/// A static-model arithmetic coding file compressor.
#[derive(Parser)]
#[command(name = "arcode", version)]
struct Cli {
    /// Debug trace flag characters for the tracing facility, e.g. `-@ yzb`.
    #[arg(short = '@', value_name = "FLAGS")]
    debug_flags: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress `infile` into `outfile`.
    Encode { infile: PathBuf, outfile: PathBuf },
    /// Decompress `infile` into `outfile`.
    Decode { infile: PathBuf, outfile: PathBuf },
}

fn apply_debug_flags(flags: &str) {
    for flag in flags.chars() {
        match flag {
            // 'y' general progress, 'z' range-state transitions, 'b' bit I/O.
            'y' | 'z' | 'b' | 'x' | 'v' => log::debug!("trace category '{flag}' enabled"),
            other => log::warn!("unrecognized debug flag '{other}'"),
        }
    }
}

fn run(cli: Cli) -> Result<(), CoderError> {
    if let Some(flags) = &cli.debug_flags {
        apply_debug_flags(flags);
    }

    match cli.command {
        Command::Encode { infile, outfile } => {
            if infile == outfile {
                return Err(CoderError::UsageError(format!(
                    "infile and outfile must differ, got {infile:?} for both"
                )));
            }
            let input = std::fs::read(&infile).map_err(|source| CoderError::OpenFailed {
                path: infile.clone(),
                source,
            })?;
            let output = File::create(&outfile).map_err(|source| CoderError::OpenFailed {
                path: outfile.clone(),
                source,
            })?;
            log::info!("encoding {} bytes from {:?}", input.len(), infile);
            arcode::encode(&input, output)
        }
        Command::Decode { infile, outfile } => {
            if infile == outfile {
                return Err(CoderError::UsageError(format!(
                    "infile and outfile must differ, got {infile:?} for both"
                )));
            }
            let input = File::open(&infile).map_err(|source| CoderError::OpenFailed {
                path: infile.clone(),
                source,
            })?;
            let output = File::create(&outfile).map_err(|source| CoderError::OpenFailed {
                path: outfile.clone(),
                source,
            })?;
            log::info!("decoding {:?} into {:?}", infile, outfile);
            arcode::decode(input, output)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("arcode: {err}");
            ExitCode::FAILURE
        }
    }
}
