/// DESSEM command-line tool: inspect, validate, decode, encode, and
/// summarise HIDR.DAT hydro plant registries.
///
/// # Command overview
///
/// ```text
/// dessem <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one summary line per record
///   validate   Check that a file is a whole number of well-formed records
///   decode     Write the records as JSON
///   stats      Print record counts and per-subsystem capacity
///   encode     Build a HIDR.DAT file from a JSON record array
///   snapshot   Write or read a digest-stamped snapshot of a registry
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Raise log level (-v debug, -vv trace)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_snapshot;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "dessem", version, about = "DESSEM HIDR.DAT toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print one summary line per record.
    Inspect(InspectArgs),
    /// Check that a file is a whole number of well-formed records.
    Validate(ValidateArgs),
    /// Write the records as JSON.
    Decode(DecodeArgs),
    /// Print record counts and per-subsystem capacity.
    Stats(StatsArgs),
    /// Build a HIDR.DAT file from a JSON record array.
    Encode(EncodeArgs),
    /// Write or read a digest-stamped snapshot of a registry.
    Snapshot(SnapshotArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `dessem inspect`.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Flag            │ Effect                                           │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ --record N      │ Show only the record at index N                  │
/// │ --sets          │ Show each active machine set                     │
/// │ --show-reserved │ Hex dump of the 300-byte reserved span           │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the HIDR.DAT file.
    pub file: PathBuf,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,

    /// Show each active machine set.
    #[arg(long)]
    pub sets: bool,

    /// Hex dump of the reserved span (16 bytes per line).
    #[arg(long)]
    pub show_reserved: bool,
}

/// Arguments for `dessem validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the HIDR.DAT file.
    pub file: PathBuf,
}

/// Arguments for `dessem decode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the HIDR.DAT file.
    pub file: PathBuf,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Leave placeholder records (station id 0) out of the output.
    #[arg(long)]
    pub skip_placeholders: bool,
}

/// Arguments for `dessem stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the HIDR.DAT file.
    pub file: PathBuf,
}

/// Arguments for `dessem encode`.
///
/// The input is a JSON array of records in the shape `dessem decode`
/// produces, so `decode` followed by `encode` reproduces the file (apart
/// from the reserved span, which is written as zeros).
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// JSON file holding an array of records.
    pub input: PathBuf,

    /// Output HIDR.DAT path.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `dessem snapshot`.
///
/// ```text
/// dessem snapshot HIDR.DAT -o hidr.hsn [--compress]
/// dessem snapshot --read hidr.hsn [--verify HIDR.DAT]
/// ```
#[derive(clap::Args)]
pub struct SnapshotArgs {
    /// HIDR.DAT file to snapshot.
    #[arg(required_unless_present = "read", conflicts_with = "read")]
    pub file: Option<PathBuf>,

    /// Snapshot output path.
    #[arg(short, long, required_unless_present = "read", conflicts_with = "read")]
    pub output: Option<PathBuf>,

    /// zstd-compress the snapshot payload.
    #[arg(long, conflicts_with = "read")]
    pub compress: bool,

    /// zstd level used with `--compress`.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i32).range(1..=22))]
    pub level: i32,

    /// Summarise an existing snapshot instead of writing one.
    #[arg(long, value_name = "SNAPSHOT")]
    pub read: Option<PathBuf>,

    /// With `--read`, check the snapshot against this HIDR.DAT file.
    #[arg(long, requires = "read", value_name = "FILE")]
    pub verify: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Snapshot(args) => cmd_snapshot::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
