use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use errcode_core::{Classification, ErrorRecord, Rendering, log_line};
use errcode_tmf::{Converter, DefaultConverter, ResponseBuilder, ResponseDto, TmfError, codec};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "errcode", about = "Inspect and produce TMF error envelopes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decodes an envelope and prints its log line.
    Render {
        /// Envelope file; reads stdin when omitted or `-`.
        file: Option<PathBuf>,
        #[arg(long)]
        message_only: bool,
    },
    /// Prints the envelope for a new error.
    Build {
        #[arg(long)]
        code: String,
        #[arg(long)]
        reason: String,
        #[arg(long, default_value = "")]
        detail: String,
        #[arg(long)]
        status: Option<i32>,
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Envelope(#[from] TmfError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("errcode error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { file, message_only } => {
            let input = read_input(file.as_deref())?;
            let response: ResponseDto = codec::decode(&input)?;
            let err = DefaultConverter.build_error_code_error(&response);
            let rendering = if message_only {
                Rendering::Message
            } else {
                Rendering::Trace
            };
            println!("{}", log_line(&err, rendering));
            Ok(())
        }
        Command::Build {
            code,
            reason,
            detail,
            status,
            pretty,
        } => {
            let err = ErrorRecord::new(Classification::new(code, reason), detail, None);
            debug!(error_id = err.id(), "building envelope");

            let mut builder = ResponseBuilder::new(&err);
            if let Some(status) = status {
                builder = builder.status(status);
            }
            let response = builder.build();

            let json = if pretty {
                codec::encode_pretty(&response)?
            } else {
                codec::encode(&response)?
            };
            println!("{json}");
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
