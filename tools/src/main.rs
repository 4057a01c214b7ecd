use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use codec::{decode_message, process_message, DecodeConfig, RawMessage};
use glob::Pattern;
use store::{MemoryStore, StoreConfig};
use stzb_tools::{capture_command_id, decoded_to_json, format_decoded_pretty, format_store_summary};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stzb-tools",
    version,
    about = "stzb capture decoding and replay tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode one captured payload and print its records.
    Decode {
        /// Path to the payload bytes.
        payload_file: PathBuf,
        /// Command id the payload was captured under.
        #[arg(long = "cmd")]
        command_id: u32,
        #[command(flatten)]
        decode: DecodeArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Replay a directory of `<cmd>_<seq>` captures into an in-memory store.
    Replay {
        /// Directory holding the captures.
        capture_dir: PathBuf,
        /// Optional glob filter on capture file names.
        #[arg(long)]
        glob: Option<String>,
        #[command(flatten)]
        decode: DecodeArgs,
    },
    /// Print a payload after envelope unwrapping.
    Unwrap {
        /// Path to the payload bytes.
        payload_file: PathBuf,
    },
    /// Print a type-5 diagnostic blob as text.
    Xor {
        /// Path to the blob bytes.
        blob_file: PathBuf,
    },
}

#[derive(Args)]
struct DecodeArgs {
    /// Decode configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Decode combat messages as detailed battle reports.
    #[arg(long)]
    detailed: bool,
    /// Skip summary report decoding.
    #[arg(long)]
    no_reports: bool,
    /// Position of interest (canonical wid) for summary reports.
    #[arg(long)]
    position: Option<String>,
    /// Log unwrapped payloads.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let debug = match &cli.command {
        Command::Decode { decode, .. } | Command::Replay { decode, .. } => decode.debug,
        Command::Unwrap { .. } | Command::Xor { .. } => false,
    };
    init_tracing(debug);

    match cli.command {
        Command::Decode {
            payload_file,
            command_id,
            decode,
            format,
        } => {
            let config = load_config(&decode)?;
            let bytes = fs::read(&payload_file)
                .with_context(|| format!("read payload {}", payload_file.display()))?;
            let decoded = decode_message(&RawMessage::new(command_id, &bytes), &config)
                .with_context(|| format!("decode payload {}", payload_file.display()))?;
            match format {
                DecodeFormat::Json => {
                    let value = decoded_to_json(&decoded).context("render json")?;
                    let json = serde_json::to_string_pretty(&value).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decoded_pretty(&decoded));
                }
            }
        }
        Command::Replay {
            capture_dir,
            glob,
            decode,
        } => {
            let config = load_config(&decode)?;
            let captures = collect_captures(&capture_dir, glob.as_deref())?;
            let mut store = MemoryStore::new(StoreConfig::default());
            for (path, command_id) in captures {
                let bytes =
                    fs::read(&path).with_context(|| format!("read capture {}", path.display()))?;
                match process_message(&RawMessage::new(command_id, &bytes), &config, &mut store) {
                    Ok(outcome) => {
                        tracing::info!(capture = %path.display(), ?outcome, "replayed capture");
                    }
                    Err(err) => {
                        tracing::warn!(capture = %path.display(), error = %err, "capture failed");
                    }
                }
            }
            print!("{}", format_store_summary(&store));
        }
        Command::Unwrap { payload_file } => {
            let bytes = fs::read(&payload_file)
                .with_context(|| format!("read payload {}", payload_file.display()))?;
            let plain = envelope::unwrap_payload(&bytes, &envelope::Limits::default())
                .with_context(|| format!("unwrap payload {}", payload_file.display()))?;
            println!("{}", String::from_utf8_lossy(&plain));
        }
        Command::Xor { blob_file } => {
            let bytes = fs::read(&blob_file)
                .with_context(|| format!("read blob {}", blob_file.display()))?;
            let text = envelope::decode_type5(&bytes);
            if text.is_empty() {
                anyhow::bail!("{} is not a type-5 blob", blob_file.display());
            }
            println!("{text}");
        }
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &DecodeArgs) -> Result<DecodeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&contents).context("parse config json")?
        }
        None => DecodeConfig::default(),
    };
    if args.detailed {
        config.detailed_capture = true;
    }
    if args.no_reports {
        config.report_capture = false;
    }
    if let Some(position) = &args.position {
        config.position_of_interest.clone_from(position);
    }
    if args.debug {
        config.debug = true;
    }
    Ok(config)
}

fn collect_captures(dir: &Path, glob: Option<&str>) -> Result<Vec<(PathBuf, u32)>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut captures = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_name && !pattern.matches_path(&path) {
                continue;
            }
        }
        match capture_command_id(&path) {
            Some(command_id) => captures.push((path, command_id)),
            None => tracing::warn!(capture = %path.display(), "no command id in file name"),
        }
    }
    captures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(captures)
}
