use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cigilens_core::{BufferSource, PacketStream, decode_stream};
use clap::{Parser, Subcommand};
use glob::glob;

#[derive(Parser, Debug)]
#[command(name = "cigilens")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("CIGILENS_BUILD_COMMIT"), " ", env!("CIGILENS_BUILD_DATE"), ")"
))]
#[command(
    about = "Offline decoder and validator for CIGI frame captures.",
    long_about = None,
    after_help = "Examples:\n  cigilens frame decode frames/*.bin -o stream.json\n  cigilens frame decode frame-0001.bin --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw frame dumps (offline-first).
    Frame {
        #[command(subcommand)]
        command: FrameCommands,
    },
}

#[derive(Subcommand, Debug)]
enum FrameCommands {
    /// Decode raw frame files into a versioned JSON packet stream.
    #[command(
        after_help = "Examples:\n  cigilens frame decode frames/*.bin -o stream.json\n  cigilens frame decode frame-0001.bin --stdout --pretty"
    )]
    Decode {
        /// Raw frame files, one buffer per file; glob patterns allowed
        inputs: Vec<PathBuf>,

        /// Output stream path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        stream: Option<PathBuf>,

        /// Write the JSON stream to stdout
        #[arg(long, conflicts_with = "stream")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any frame carries errors
        #[arg(long)]
        strict: bool,

        /// List per-frame errors after decoding
        #[arg(long)]
        list_errors: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Frame { command } => match command {
            FrameCommands::Decode {
                inputs,
                stream,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_errors,
            } => cmd_frame_decode(
                inputs,
                stream,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_errors,
            ),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_frame_decode(
    inputs: Vec<PathBuf>,
    stream: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_errors: bool,
) -> Result<(), CliError> {
    let files = resolve_input_paths(&inputs)?;

    let mut buffers = Vec::with_capacity(files.len());
    for file in &files {
        let data = fs::read(file)
            .with_context(|| format!("Failed to read frame file: {}", file.display()))?;
        buffers.push(data);
    }

    let decoded = decode_stream(BufferSource::from_buffers(buffers))
        .context("Frame decoding failed")?;
    let json = serialize_stream(&decoded, pretty, compact)?;

    if stdout {
        print!("{}", json);
    } else {
        let stream = stream.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--stream or --stdout".to_string()),
            )
        })?;
        if let Some(parent) = stream.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&stream, json)
            .with_context(|| format!("Failed to write stream: {}", stream.display()))?;
        if !quiet {
            eprintln!("OK: stream written -> {}", stream.display());
        }
    }

    if list_errors && !quiet {
        print_errors(&decoded);
    }
    if strict && has_errors(&decoded) {
        return Err(CliError::new(
            "frame errors detected",
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_stream(
    stream: &PacketStream,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(stream)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(stream)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_errors(stream: &PacketStream) -> bool {
    stream
        .frames
        .iter()
        .any(|frame| frame.framing_error.is_some() || frame.packet.packet_error)
}

fn print_errors(stream: &PacketStream) {
    eprintln!("Frame errors:");
    for (index, frame) in stream.frames.iter().enumerate() {
        if let Some(framing) = &frame.framing_error {
            eprintln!("  frame {}: framing: {}", index, framing);
        }
        for layer in &frame.packet.layers {
            if !layer.control_error {
                continue;
            }
            let mut invalid: Vec<&str> = Vec::new();
            if !layer.control_size.valid {
                invalid.push(layer.control_size.name);
            }
            invalid.extend(
                layer
                    .fields
                    .iter()
                    .filter(|field| !field.valid)
                    .map(|field| field.name),
            );
            eprintln!("  frame {}: {}: {}", index, layer.name, invalid.join(", "));
        }
    }
}

fn resolve_input_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    if inputs.is_empty() {
        return Err(CliError::new(
            "no input files",
            Some("pass one or more raw frame files or glob patterns".to_string()),
        ));
    }

    let mut files = Vec::new();
    for input in inputs {
        let pattern = input.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            if !input.is_file() {
                return Err(CliError::new(
                    format!("input file not found: {}", input.display()),
                    Some("pass a raw frame file (one buffer per file)".to_string()),
                ));
            }
            files.push(input.clone());
            continue;
        }

        let paths = glob(&pattern).map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err.msg)),
            )
        })?;
        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|err| {
                CliError::new(
                    format!("invalid input pattern '{}'", pattern),
                    Some(format!("pattern error: {}", err)),
                )
            })?;
            if path.is_file() {
                matches.push(path);
            }
        }
        if matches.is_empty() {
            return Err(CliError::new(
                format!("no files match pattern '{}'", pattern),
                Some("check the path or quote the pattern".to_string()),
            ));
        }
        matches.sort();
        files.extend(matches);
    }
    Ok(files)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
