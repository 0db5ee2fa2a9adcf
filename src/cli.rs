//! Command-line interface definition for anagram-grouper
//!
//! Provides argument parsing and validation for the anagram grouping tool.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// High-performance anagram grouper for large wordlists
///
/// Groups words sharing the same character multiset and writes one group
/// per line. Very large inputs are first sharded by word length to bound
/// memory during grouping.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "anagram-grouper",
    author = "m0h1nd4",
    version,
    about = "High-performance anagram grouper for large wordlists",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                          ANAGRAM-GROUPER v1.0.0                              ║
║                     Length-Sharded Anagram Grouping                          ║
╚══════════════════════════════════════════════════════════════════════════════╝

Reads a wordlist (one word per line), groups words that are anagrams of each
other (case-insensitive), and writes each group with two or more members as a
space-separated line. Inputs above the line threshold are first split into
per-length shard files so each grouping pass fits in memory.

EXAMPLES:
    # Group the default wordlist (words.txt -> anagram_groups.txt)
    anagram-grouper

    # Explicit paths
    anagram-grouper -i rockyou.txt -o groups.txt

    # Force the length-sharded strategy regardless of input size
    anagram-grouper -i rockyou.txt --strategy sharded --shard-dir ./shards

    # Shard anything above one million lines, eight worker threads
    anagram-grouper -i big.txt --threshold 1000000 -t 8
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/anagram-grouper"
)]
pub struct Args {
    /// Input wordlist, one word per line
    #[arg(short, long, value_name = "PATH", default_value = "words.txt")]
    pub input: PathBuf,

    /// Combined output file, one anagram group per line
    #[arg(short, long, value_name = "PATH", default_value = "anagram_groups.txt")]
    pub output: PathBuf,

    /// Directory for per-length shard files (sharded strategy only)
    #[arg(long, value_name = "DIR", default_value = "words")]
    pub shard_dir: PathBuf,

    /// Line count above which the input is sharded by length
    #[arg(long, value_name = "LINES", default_value_t = 10_000_000)]
    pub threshold: u64,

    /// Strategy selection
    #[arg(long, value_enum, default_value_t = Strategy::Auto)]
    pub strategy: Strategy,

    /// Number of threads for sharded grouping (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Buffer size for file operations (default: 8MB)
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// How the pipeline decides between one grouping pass and length sharding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Shard only when the line count exceeds the threshold
    Auto,
    /// Always group the whole input in one pass
    Direct,
    /// Always shard by length first
    Sharded,
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if size_str.ends_with("GB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024 * 1024)
    } else if size_str.ends_with("MB") {
        (&size_str[..size_str.len() - 2], 1024 * 1024)
    } else if size_str.ends_with("KB") {
        (&size_str[..size_str.len() - 2], 1024)
    } else if size_str.ends_with("B") {
        (&size_str[..size_str.len() - 1], 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}
