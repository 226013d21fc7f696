//! CLI for findkit — random ids, DEFLATE framing, LAN address, MD5, stats.

mod commands;

use clap::{Parser, Subcommand};
use findkit_core::logging::{self, LogConfig, Sink};

#[derive(Parser)]
#[command(name = "findkit")]
#[command(about = "findkit — small helpers for LAN location tracking")]
#[command(version = findkit_core::VERSION)]
struct Cli {
    /// Also print trace-level log lines (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print random letter strings
    RandString {
        /// Length of each string
        length: usize,

        /// How many strings to print
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output (default: wall clock)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compress stdin to stdout as raw DEFLATE
    Compress {
        /// Compression level, 0 (store) to 9 (smallest)
        #[arg(long, default_value = "9")]
        level: u32,
    },

    /// Decompress raw DEFLATE from stdin to stdout
    Decompress,

    /// Print the hex MD5 of a string
    Md5 {
        text: String,
    },

    /// Print this machine's 192.168.x.x address, or "localhost"
    LocalIp,

    /// Mean and sample standard deviation of the given numbers
    Stats {
        /// Values to summarize
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn log_config(verbose: bool, quiet: bool) -> LogConfig {
    if quiet {
        return LogConfig::quiet();
    }
    // stdout carries command output, so logs go to stderr.
    LogConfig {
        trace: if verbose { Sink::Stderr } else { Sink::Discard },
        debug: if verbose { Sink::Stderr } else { Sink::Discard },
        info: Sink::Stderr,
        warn: Sink::Stderr,
        error: Sink::Stderr,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(log_config(cli.verbose, cli.quiet)) {
        eprintln!("Error installing logger: {e}");
    }

    match cli.command {
        Commands::RandString {
            length,
            count,
            seed,
        } => commands::randstr::run(length, count, seed),
        Commands::Compress { level } => commands::codec::compress(level),
        Commands::Decompress => commands::codec::decompress(),
        Commands::Md5 { text } => commands::hash::run(&text),
        Commands::LocalIp => commands::net::run(),
        Commands::Stats { values, json } => commands::stats::run(&values, json),
    }
}
