//! CLI module - Command line interface definitions and handlers

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::{AlgorithmChoice, CharsetPreset};

/// Keydrill - Password strength checker and brute-force recovery demo
///
/// Enumerates every candidate of each length over a charset, in parallel,
/// against a plaintext or a sha256/sha1/md5/blake3 digest.
#[derive(Parser, Debug)]
#[command(name = "keydrill")]
#[command(author = "Ryan Cashmoney <tunclon@proton.me>")]
#[command(version)]
#[command(about = "🔑 Password strength checker and brute-force recovery demo", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Output format for machine parsing
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Brute-force a plaintext or digest target
    Crack(CrackArgs),

    /// Score password strength
    Check(CheckArgs),

    /// Print the hex digest of a password
    Hash(HashArgs),

    /// Print a sample config, or write the default config file
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct CrackArgs {
    /// Target: plaintext, or hex digest when --algorithm is a hash
    #[arg(required = true)]
    pub target: String,

    /// Comparison algorithm
    #[arg(long, short, value_enum, default_value = "plain")]
    pub algorithm: AlgorithmArg,

    /// Treat TARGET as plaintext and hash it with --algorithm first
    #[arg(long)]
    pub hashed: bool,

    /// Shortest candidate length
    #[arg(long = "min-length", visible_alias = "min")]
    pub min_length: Option<usize>,

    /// Longest candidate length
    #[arg(long = "max-length", visible_alias = "max")]
    pub max_length: Option<usize>,

    /// Charset preset
    #[arg(long, short, value_enum)]
    pub charset: Option<CharsetArg>,

    /// Explicit charset, overrides --charset (e.g. "abc123")
    #[arg(long)]
    pub custom_charset: Option<String>,

    /// Worker budget (default: CPU count)
    #[arg(long, short)]
    pub workers: Option<usize>,

    /// Stop after this many candidates
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Stop escalating lengths after this long (e.g. 30s, 5m)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub time_limit: Option<std::time::Duration>,
}

#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Passwords to score
    #[arg(required = true)]
    pub passwords: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct HashArgs {
    /// Password to hash
    #[arg(required = true)]
    pub password: String,

    /// Digest algorithm
    #[arg(long, short, value_enum, default_value = "sha256")]
    pub algorithm: AlgorithmArg,
}

#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    /// Write the default config file if it does not exist
    #[arg(long)]
    pub init: bool,

    /// Write the effective configuration (file plus defaults) to PATH
    #[arg(long, value_name = "PATH", conflicts_with = "init")]
    pub export: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable (default)
    Human,
    /// JSON output
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Plaintext equality
    Plain,
    Sha256,
    Sha1,
    Md5,
    Blake3,
}

impl From<AlgorithmArg> for AlgorithmChoice {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Plain => AlgorithmChoice::Plain,
            AlgorithmArg::Sha256 => AlgorithmChoice::Sha256,
            AlgorithmArg::Sha1 => AlgorithmChoice::Sha1,
            AlgorithmArg::Md5 => AlgorithmChoice::Md5,
            AlgorithmArg::Blake3 => AlgorithmChoice::Blake3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharsetArg {
    /// a-z
    Lower,
    /// A-Z
    Upper,
    /// 0-9
    Digits,
    /// Letters and digits
    Alnum,
    /// Letters, digits and punctuation
    Full,
    /// Detect from a plaintext target
    Auto,
}

impl From<CharsetArg> for CharsetPreset {
    fn from(arg: CharsetArg) -> Self {
        match arg {
            CharsetArg::Lower => CharsetPreset::Lower,
            CharsetArg::Upper => CharsetPreset::Upper,
            CharsetArg::Digits => CharsetPreset::Digits,
            CharsetArg::Alnum => CharsetPreset::Alnum,
            CharsetArg::Full => CharsetPreset::Full,
            CharsetArg::Auto => CharsetPreset::Auto,
        }
    }
}
