//! Output writing
//!
//! Buffered line-oriented writing for the combined output file and the
//! per-length shard files, plus the emitter that turns a group table into
//! reportable output lines.

use crate::group::GroupTable;

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered output file writer
///
/// Flushes on drop so partially processed runs still land on disk.
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
}

impl OutputWriter {
    /// Create (truncating) an output file
    pub fn new(path: PathBuf, buffer_size: usize) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
        })
    }

    /// Write one newline-terminated line
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Append a pre-rendered block of newline-terminated lines
    pub fn write_block(&mut self, block: &str, line_count: u64) -> io::Result<()> {
        self.writer.write_all(block.as_bytes())?;
        self.lines_written += line_count;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Count of groups written vs. suppressed by one emit pass
#[derive(Debug, Default, Clone, Copy)]
pub struct EmitSummary {
    pub groups_written: u64,
    pub singletons_suppressed: u64,
}

/// Write every reportable group of a table to the combined output
///
/// A group is reportable with >= 2 members; singletons are silently
/// dropped. Members are joined by single spaces in first-seen order, one
/// group per line, groups ordered by key.
pub fn emit_groups(table: &GroupTable, writer: &mut OutputWriter) -> io::Result<EmitSummary> {
    let mut summary = EmitSummary::default();

    for (_, group) in table.sorted_groups() {
        if group.len() > 1 {
            writer.write_line(&group.join(" "))?;
            summary.groups_written += 1;
        } else {
            summary.singletons_suppressed += 1;
        }
    }

    Ok(summary)
}

/// Render a table's reportable groups into an in-memory block
///
/// Used by the sharded strategy: each shard renders privately, and the
/// driver appends the blocks to the combined output in shard order so
/// lines never interleave.
pub fn render_groups(table: &GroupTable) -> (String, EmitSummary) {
    let mut block = String::new();
    let mut summary = EmitSummary::default();

    for (_, group) in table.sorted_groups() {
        if group.len() > 1 {
            block.push_str(&group.join(" "));
            block.push('\n');
            summary.groups_written += 1;
        } else {
            summary.singletons_suppressed += 1;
        }
    }

    (block, summary)
}
