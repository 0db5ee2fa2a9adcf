//! Length sharding
//!
//! Splits a large wordlist into per-length shard files so each grouping
//! pass only holds one length class in memory. Anagrams always share a
//! length, so shards never split a group.

use crate::error::PipelineError;
use crate::key::normalize;
use crate::output::OutputWriter;
use crate::reader::MmapLineIterator;

use ahash::RandomState;
use hashbrown::HashMap;
use std::path::{Path, PathBuf};

/// Per-length shard writers, created lazily
///
/// Owned by the sharding call and finished explicitly; every writer
/// flushes on drop, covering error exits mid-scan.
pub struct ShardSet {
    dir: PathBuf,
    buffer_size: usize,
    writers: HashMap<usize, OutputWriter, RandomState>,
}

impl ShardSet {
    /// Create the shard directory (idempotent) and an empty set
    pub fn create(dir: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            buffer_size,
            writers: HashMap::with_hasher(RandomState::new()),
        })
    }

    /// Path of the shard file for a given word length
    pub fn shard_path(&self, length: usize) -> PathBuf {
        self.dir.join(format!("len_{}.txt", length))
    }

    fn writer_for(&mut self, length: usize) -> Result<&mut OutputWriter, PipelineError> {
        if !self.writers.contains_key(&length) {
            let path = self.shard_path(length);
            let writer = OutputWriter::new(path.clone(), self.buffer_size)
                .map_err(|e| PipelineError::shard_create_failed(path, e))?;
            self.writers.insert(length, writer);
        }
        Ok(self.writers.get_mut(&length).unwrap())
    }

    /// Route one trimmed word to its length shard, original case
    pub fn write_word(&mut self, word: &str) -> anyhow::Result<()> {
        let length = word.chars().count();
        let writer = self.writer_for(length)?;
        writer.write_line(word)?;
        Ok(())
    }

    /// Number of shards created so far
    pub fn shard_count(&self) -> usize {
        self.writers.len()
    }

    /// Total words routed across all shards
    pub fn words_written(&self) -> u64 {
        self.writers.values().map(|w| w.lines_written()).sum()
    }

    /// Flush every shard and return their paths sorted by length
    pub fn finish(mut self) -> anyhow::Result<Vec<(usize, PathBuf)>> {
        let mut shards: Vec<(usize, PathBuf)> = self
            .writers
            .iter_mut()
            .map(|(&len, writer)| {
                writer.flush()?;
                Ok((len, writer.path().to_path_buf()))
            })
            .collect::<std::io::Result<_>>()?;

        shards.sort_unstable_by_key(|(len, _)| *len);
        Ok(shards)
    }
}

/// Split a wordlist into per-length shards
///
/// Lines are trimmed; blanks are skipped. Words keep their original case
/// (lowercasing happens at grouping time) since length is case-independent.
/// Returns the populated set; call `finish()` for the flushed shard list.
pub fn split_by_length(
    input: &Path,
    shard_dir: &Path,
    buffer_size: usize,
) -> anyhow::Result<ShardSet> {
    let mut shards = ShardSet::create(shard_dir.to_path_buf(), buffer_size)?;

    for line in MmapLineIterator::new(input)? {
        let line = line?;
        if let Some(word) = normalize(&line) {
            shards.write_word(word)?;
        }
    }

    log::debug!(
        "sharded {} words into {} length shards under {:?}",
        shards.words_written(),
        shards.shard_count(),
        shard_dir
    );

    Ok(shards)
}

/// Parse the word length out of a shard filename (`len_<N>.txt`)
pub fn parse_shard_length(path: &Path) -> Option<usize> {
    path.file_name()?
        .to_str()?
        .strip_prefix("len_")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}
