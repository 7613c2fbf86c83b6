#![doc = include_str!("../README.md")]
mod bench;
mod files;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
pub enum Command {
    /// Compresses INPUT file and writes the result to OUTPUT
    #[clap(visible_alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,
        /// Compressed file to create
        output: PathBuf,
    },
    /// Decompresses INPUT file (created by compress) and writes the result to OUTPUT
    #[clap(visible_alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,
        /// Decompressed file to create
        output: PathBuf,
    },
    /// Measures speed of huffpack on pseudo-random text
    Bench(BenchConf),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, infer_subcommands=true)]
/// Huffman compression of files.
pub struct Conf {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct BenchConf {
    /// Length of the test text
    #[arg(short = 'l', long, default_value_t = 1024*1024)]
    pub len: usize,

    /// Number of different symbols in the test text.
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub symbols: u16,

    /// The spread of the number of symbols (0 for all about equal).
    /// Each successive symbol occurs 1+SPREAD/1000 times more often than the previous one.
    #[arg(short = 'r', long, default_value_t = 100)]
    pub spread: u32,

    /// Time (in seconds) of measuring and warming up the CPU cache before measuring
    #[arg(short='t', long, default_value_t = 5)]
    pub time: u16,

    /// Whether to check the validity
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Seed for random number generators
    #[arg(short='s', long, default_value_t = 1234)]
    pub seed: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let conf: Conf = Conf::parse();
    let result = match conf.command {
        Command::Compress { input, output } => files::compress(&input, &output),
        Command::Decompress { input, output } => files::decompress(&input, &output),
        Command::Bench(conf) => bench::benchmark(&conf),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
