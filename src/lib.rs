//! # Anagram Grouper
//!
//! High-performance anagram grouping for large wordlists.
//!
//! ## Features
//!
//! - **Anagram grouping**: Words sharing a character multiset land in one
//!   group; each group with two or more members becomes one output line
//! - **Length sharding**: Inputs above a line threshold are split into
//!   per-length shard files first, bounding grouping memory
//! - **Deterministic output**: Groups are emitted sorted by canonical key
//! - **Large file support**: Memory-mapped I/O with encoding detection
//! - **Parallel processing**: Shards are grouped on the rayon pool
//!
//! ## Usage
//!
//! ```bash
//! # Group words.txt into anagram_groups.txt
//! anagram-grouper
//!
//! # Explicit paths, forced sharding
//! anagram-grouper -i rockyou.txt -o groups.txt --strategy sharded
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use anagram_grouper::cli::Strategy;
//! use anagram_grouper::pipeline::{Pipeline, PipelineConfig};
//! use std::path::PathBuf;
//!
//! let config = PipelineConfig {
//!     input: PathBuf::from("words.txt"),
//!     output: PathBuf::from("anagram_groups.txt"),
//!     shard_dir: PathBuf::from("words"),
//!     threshold: 10_000_000,
//!     strategy: Strategy::Auto,
//!     buffer_size: 8 * 1024 * 1024,
//!     stats: false,
//!     quiet: false,
//!     verbose: false,
//! };
//!
//! let pipeline = Pipeline::new(config);
//! // pipeline.run().unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod group;
pub mod key;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod reader;
pub mod shard;

pub use cli::Args;
pub use pipeline::{Pipeline, PipelineConfig};
