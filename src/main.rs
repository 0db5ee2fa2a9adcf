//! Anagram Grouper - length-sharded anagram grouping for large wordlists
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use anagram_grouper::cli::Args;
use anagram_grouper::pipeline::{Pipeline, PipelineConfig};
use anagram_grouper::progress::{print_banner, print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Configure thread pool
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    // Validate arguments
    validate_args(&args)?;

    // Create pipeline configuration
    let config = PipelineConfig::from_args(&args)?;

    // Show configuration
    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    // Create and run the pipeline
    let pipeline = Pipeline::new(config);
    pipeline.run()?;

    Ok(())
}

/// Validate command-line arguments
fn validate_args(args: &Args) -> anyhow::Result<()> {
    // Check that input exists
    if !args.input.exists() {
        anyhow::bail!("Input wordlist does not exist: {:?}", args.input);
    }

    if !args.input.is_file() {
        anyhow::bail!("Input must be a file: {:?}", args.input);
    }

    // Validate buffer size specification
    args.parse_buffer_size()?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &PipelineConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {:?}", config.input));
    print_info(&format!("Output:       {:?}", config.output));
    print_info(&format!("Shard dir:    {:?}", config.shard_dir));
    print_info(&format!("Threshold:    {} lines", config.threshold));
    print_info(&format!("Strategy:     {:?}", config.strategy));
    print_info(&format!(
        "Buffer size:  {} MB",
        config.buffer_size / (1024 * 1024)
    ));
    print_info(&format!(
        "Threads:      {}",
        args.threads.unwrap_or_else(num_cpus::get)
    ));
}
