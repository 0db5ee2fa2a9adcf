//! Pipeline driver
//!
//! Sequences the run: count the input, pick a strategy, then either group
//! the whole file in one pass (Direct) or split it into per-length shards
//! and group each shard independently (Sharded). Shard grouping runs on
//! the rayon pool; each shard renders its groups privately and the blocks
//! are written to the combined output in shard-length order, so the output
//! is deterministic and no line ever interleaves.

use crate::cli::{Args, Strategy};
use crate::error::PipelineError;
use crate::group::group_words;
use crate::output::{emit_groups, render_groups, OutputWriter};
use crate::progress::{
    create_progress_bar, create_spinner, print_header, print_info, print_success, print_warning,
    RunStats,
};
use crate::reader::count_lines;
use crate::shard::{parse_shard_length, split_by_length};

use bytesize::ByteSize;
use colored::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Pipeline configuration
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub shard_dir: PathBuf,
    pub threshold: u64,
    pub strategy: Strategy,
    pub buffer_size: usize,
    pub stats: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            input: args.input.clone(),
            output: args.output.clone(),
            shard_dir: args.shard_dir.clone(),
            threshold: args.threshold,
            strategy: args.strategy,
            buffer_size: args.parse_buffer_size()?,
            stats: args.stats,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Whether a line count calls for the sharded strategy
///
/// The boundary is strictly greater than: a count equal to the threshold
/// still runs direct.
#[inline]
pub fn exceeds_threshold(line_count: u64, threshold: u64) -> bool {
    line_count > threshold
}

/// Main pipeline driver
pub struct Pipeline {
    config: PipelineConfig,
    stats: Arc<RunStats>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stats: Arc::new(RunStats::new()),
        }
    }

    /// Run one grouping pipeline end to end
    pub fn run(&self) -> anyhow::Result<()> {
        if !self.config.quiet {
            print_header("Counting input...");
        }

        let spinner = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_spinner("Counting lines...")
        };
        let line_count = count_lines(&self.config.input)
            .map_err(|e| PipelineError::input_unreadable(&self.config.input, e))?;
        spinner.finish_and_clear();

        self.stats.set_lines_read(line_count);

        let sharded = match self.config.strategy {
            Strategy::Auto => exceeds_threshold(line_count, self.config.threshold),
            Strategy::Direct => false,
            Strategy::Sharded => true,
        };

        if !self.config.quiet {
            let input_size = std::fs::metadata(&self.config.input)
                .map(|m| m.len())
                .unwrap_or(0);
            print_info(&format!(
                "{} lines in {:?} ({})",
                line_count,
                self.config.input,
                ByteSize(input_size)
            ));
            print_info(&format!(
                "Strategy: {}",
                if sharded { "sharded by length" } else { "direct" }
            ));
        }

        let mut writer = OutputWriter::new(self.config.output.clone(), self.config.buffer_size)
            .map_err(|e| PipelineError::output_unwritable(&self.config.output, e))?;

        if sharded {
            self.run_sharded(&mut writer)?;
        } else {
            self.run_direct(&mut writer, line_count)?;
        }

        writer
            .flush()
            .map_err(|e| PipelineError::output_unwritable(&self.config.output, e))?;

        if !self.config.quiet {
            print_success(&format!(
                "Wrote {} anagram groups to {:?}",
                writer.lines_written(),
                self.config.output
            ));
            if self.config.stats {
                self.stats.print_summary();
            }
        }

        Ok(())
    }

    /// Direct strategy: one grouping pass over the whole input
    fn run_direct(&self, writer: &mut OutputWriter, line_count: u64) -> anyhow::Result<()> {
        if !self.config.quiet {
            print_header("Grouping (direct)...");
        }

        let spinner = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_spinner("Grouping words...")
        };

        let table = group_words(&self.config.input, line_count as usize)?;
        self.stats.add_words_grouped(table.words_inserted());

        let summary = emit_groups(&table, writer)
            .map_err(|e| PipelineError::output_unwritable(&self.config.output, e))?;
        self.stats.add_groups_emitted(summary.groups_written);
        self.stats.add_singletons(summary.singletons_suppressed);

        spinner.finish_and_clear();
        Ok(())
    }

    /// Sharded strategy: split by length, group each shard independently
    fn run_sharded(&self, writer: &mut OutputWriter) -> anyhow::Result<()> {
        if !self.config.quiet {
            print_header("Sharding by length...");
        }

        let shard_set = split_by_length(
            &self.config.input,
            &self.config.shard_dir,
            self.config.buffer_size,
        )?;
        shard_set.finish()?;

        let shards = collect_shards(&self.config.shard_dir)?;
        self.stats.set_shards_created(shards.len() as u64);

        if shards.is_empty() {
            if !self.config.quiet {
                print_warning("No shards produced - input had no words");
            }
            return Ok(());
        }

        if !self.config.quiet {
            print_header(&format!("Grouping {} shards...", shards.len()));
        }

        self.process_shards(writer, &shards)?;

        if self.config.verbose {
            for (length, path) in &shards {
                log::debug!("shard len_{} at {:?}", length, path);
            }
        }

        Ok(())
    }

    /// Group each shard and append its rendered block in shard order
    ///
    /// One table per shard; a shard that fails to count or group is
    /// skipped with a warning and counted, and the shards that remain
    /// still contribute their groups.
    fn process_shards(
        &self,
        writer: &mut OutputWriter,
        shards: &[(usize, PathBuf)],
    ) -> anyhow::Result<()> {
        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_progress_bar(shards.len() as u64, "Grouping shards...")
        };

        let blocks: Vec<Option<(String, u64, u64, u64)>> = shards
            .par_iter()
            .map(|(length, path)| {
                let result = group_one_shard(path);
                pb.inc(1);

                match result {
                    Ok(block) => Some(block),
                    Err(e) => {
                        log::warn!("skipping shard len_{} ({:?}): {:#}", length, path, e);
                        self.stats.add_shard_error();
                        None
                    }
                }
            })
            .collect();

        pb.finish_with_message("Complete".green().to_string());

        for block in blocks.into_iter().flatten() {
            let (rendered, words, groups, singletons) = block;
            writer
                .write_block(&rendered, groups)
                .map_err(|e| PipelineError::output_unwritable(&self.config.output, e))?;
            self.stats.add_words_grouped(words);
            self.stats.add_groups_emitted(groups);
            self.stats.add_singletons(singletons);
        }

        Ok(())
    }

    /// Run statistics
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }
}

/// Group one shard file into a rendered output block
///
/// Returns (rendered block, words grouped, groups written, singletons).
fn group_one_shard(path: &Path) -> anyhow::Result<(String, u64, u64, u64)> {
    let hint = count_lines(path)?;
    let table = group_words(path, hint as usize)?;
    let (rendered, summary) = render_groups(&table);

    Ok((
        rendered,
        table.words_inserted(),
        summary.groups_written,
        summary.singletons_suppressed,
    ))
}

/// Enumerate shard files in a directory, sorted by word length
fn collect_shards(shard_dir: &Path) -> anyhow::Result<Vec<(usize, PathBuf)>> {
    let mut shards = Vec::new();

    for entry in WalkDir::new(shard_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() {
            if let Some(length) = parse_shard_length(path) {
                shards.push((length, path.to_path_buf()));
            }
        }
    }

    shards.sort_unstable_by_key(|(len, _)| *len);
    Ok(shards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &TempDir, strategy: Strategy) -> PipelineConfig {
        PipelineConfig {
            input: dir.path().join("words.txt"),
            output: dir.path().join("anagram_groups.txt"),
            shard_dir: dir.path().join("words"),
            threshold: 10_000_000,
            strategy,
            buffer_size: 64 * 1024,
            stats: false,
            quiet: true,
            verbose: false,
        }
    }

    fn sorted_group_sets(output: &Path) -> Vec<Vec<String>> {
        let content = std::fs::read_to_string(output).unwrap();
        let mut groups: Vec<Vec<String>> = content
            .lines()
            .map(|l| {
                let mut words: Vec<String> = l.split(' ').map(String::from).collect();
                words.sort_unstable();
                words
            })
            .collect();
        groups.sort_unstable();
        groups
    }

    #[test]
    fn test_threshold_is_strictly_greater_than() {
        assert!(!exceeds_threshold(10_000_000, 10_000_000));
        assert!(exceeds_threshold(10_000_001, 10_000_000));
        assert!(!exceeds_threshold(0, 10_000_000));
    }

    #[test]
    fn test_direct_run_scenario() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Direct);
        std::fs::write(&cfg.input, "listen\nsilent\nenlist\nfoo\ncat\nact\ndog\n").unwrap();

        let output = cfg.output.clone();
        Pipeline::new(cfg).run().unwrap();

        assert_eq!(
            sorted_group_sets(&output),
            vec![
                vec!["act".to_string(), "cat".to_string()],
                vec![
                    "enlist".to_string(),
                    "listen".to_string(),
                    "silent".to_string()
                ],
            ]
        );
    }

    #[test]
    fn test_direct_run_blank_lines_and_case() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Direct);
        std::fs::write(&cfg.input, "  Eat \n\ntea\n").unwrap();

        let output = cfg.output.clone();
        Pipeline::new(cfg).run().unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "eat tea\n");
    }

    #[test]
    fn test_sharded_equals_direct() {
        let words = "listen\nsilent\nenlist\nfoo\ncat\nact\ndog\npool\nloop\nPolo\nstop\npots\n";

        let direct_dir = TempDir::new().unwrap();
        let direct_cfg = config(&direct_dir, Strategy::Direct);
        std::fs::write(&direct_cfg.input, words).unwrap();
        let direct_out = direct_cfg.output.clone();
        Pipeline::new(direct_cfg).run().unwrap();

        let sharded_dir = TempDir::new().unwrap();
        let sharded_cfg = config(&sharded_dir, Strategy::Sharded);
        std::fs::write(&sharded_cfg.input, words).unwrap();
        let sharded_out = sharded_cfg.output.clone();
        Pipeline::new(sharded_cfg).run().unwrap();

        assert_eq!(
            sorted_group_sets(&direct_out),
            sorted_group_sets(&sharded_out)
        );
    }

    #[test]
    fn test_sharded_creates_length_files() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Sharded);
        std::fs::write(&cfg.input, "cat\nact\nlisten\nsilent\n").unwrap();

        let shard_dir = cfg.shard_dir.clone();
        Pipeline::new(cfg).run().unwrap();

        assert!(shard_dir.join("len_3.txt").exists());
        assert!(shard_dir.join("len_6.txt").exists());
    }

    #[test]
    fn test_direct_run_is_idempotent() {
        let dir = TempDir::new().unwrap();

        let mut outputs = Vec::new();
        for run in 0..2 {
            let mut cfg = config(&dir, Strategy::Direct);
            cfg.output = dir.path().join(format!("out_{}.txt", run));
            std::fs::write(&cfg.input, "rat\ntar\nart\nmoon\n").unwrap();
            let output = cfg.output.clone();
            Pipeline::new(cfg).run().unwrap();
            outputs.push(sorted_group_sets(&output));
        }

        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Direct);

        let err = Pipeline::new(cfg).run().unwrap_err();
        assert!(err.to_string().contains("input"));
    }

    #[test]
    fn test_stats_after_direct_run() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Direct);
        std::fs::write(&cfg.input, "cat\nact\ndog\n\n").unwrap();

        let pipeline = Pipeline::new(cfg);
        pipeline.run().unwrap();

        let stats = pipeline.stats();
        assert_eq!(stats.get_lines_read(), 4);
        assert_eq!(stats.get_words_grouped(), 3);
        assert_eq!(stats.get_groups_emitted(), 1);
        assert_eq!(stats.get_singletons(), 1);
    }

    #[test]
    fn test_failing_shard_is_skipped_and_counted() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Sharded);
        let shard_dir = cfg.shard_dir.clone();
        std::fs::create_dir_all(&shard_dir).unwrap();
        std::fs::write(shard_dir.join("len_3.txt"), "cat\nact\n").unwrap();

        let output = cfg.output.clone();
        let pipeline = Pipeline::new(cfg);
        let mut writer = OutputWriter::new(output.clone(), 1024).unwrap();

        // len_99.txt is never created, so counting it fails
        let shards = vec![
            (3, shard_dir.join("len_3.txt")),
            (99, shard_dir.join("len_99.txt")),
        ];
        pipeline.process_shards(&mut writer, &shards).unwrap();
        writer.flush().unwrap();

        assert_eq!(pipeline.stats().get_shard_errors(), 1);
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "cat act\n");
    }

    #[test]
    fn test_sharded_run_with_only_blank_lines() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir, Strategy::Sharded);
        std::fs::write(&cfg.input, "\n   \n\n").unwrap();

        let output = cfg.output.clone();
        let pipeline = Pipeline::new(cfg);
        pipeline.run().unwrap();

        assert_eq!(pipeline.stats().get_shards_created(), 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_config_from_args_wires_stats_flag() {
        let args = Args {
            input: PathBuf::from("words.txt"),
            output: PathBuf::from("anagram_groups.txt"),
            shard_dir: PathBuf::from("words"),
            threshold: 10_000_000,
            strategy: Strategy::Auto,
            threads: None,
            buffer_size: "8MB".to_string(),
            stats: true,
            quiet: false,
            verbose: false,
        };

        let cfg = PipelineConfig::from_args(&args).unwrap();
        assert!(cfg.stats);
        assert_eq!(cfg.buffer_size, 8 * 1024 * 1024);
    }

    #[test]
    fn test_collect_shards_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["len_10.txt", "len_3.txt", "len_7.txt", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let shards = collect_shards(dir.path()).unwrap();
        let lengths: Vec<_> = shards.iter().map(|(len, _)| *len).collect();
        assert_eq!(lengths, vec![3, 7, 10]);
    }

    #[test]
    fn test_output_deterministic_across_runs() {
        let words = "tab\nbat\nrat\ntar\nwolf\nflow\nfowl\n";

        let mut contents = Vec::new();
        for _ in 0..2 {
            let dir = TempDir::new().unwrap();
            let cfg = config(&dir, Strategy::Direct);
            std::fs::write(&cfg.input, words).unwrap();
            let output = cfg.output.clone();
            Pipeline::new(cfg).run().unwrap();
            contents.push(std::fs::read_to_string(&output).unwrap());
        }

        // Byte-identical, not just set-equal: groups are key-sorted
        assert_eq!(contents[0], contents[1]);
    }
}
