//! Wordlist input layer
//!
//! Memory-mapped line iteration for large wordlists, with automatic
//! encoding detection so non-UTF-8 lists (latin-1 dumps are common) decode
//! cleanly, plus the raw line count that drives the sharding decision.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a wordlist by sampling its first 64KB
pub fn detect_encoding(path: &Path) -> anyhow::Result<EncodingInfo> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut sample = vec![0u8; 64 * 1024];
    let bytes_read = reader.read(&mut sample)?;
    sample.truncate(bytes_read);

    if bytes_read == 0 {
        return Ok(EncodingInfo::default());
    }

    if let Some(encoding) = detect_bom(&sample) {
        return Ok(EncodingInfo {
            name: encoding.name(),
            encoding,
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&sample, true);
    let encoding = detector.guess(None, true);

    Ok(EncodingInfo {
        name: encoding.name(),
        encoding,
    })
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    if content.len() >= 3 && content[0..3] == [0xEF, 0xBB, 0xBF] {
        return Some(encoding_rs::UTF_8);
    }
    if content.len() >= 2 {
        if content[0..2] == [0xFE, 0xFF] {
            return Some(encoding_rs::UTF_16BE);
        }
        if content[0..2] == [0xFF, 0xFE] {
            return Some(encoding_rs::UTF_16LE);
        }
    }
    None
}

/// Count every line of a file, blank lines included
///
/// This feeds the sharding threshold decision and the group-table size
/// hints; it mirrors what a line-by-line read would report, so trailing
/// bytes without a final newline still count as a line.
pub fn count_lines(path: &Path) -> std::io::Result<u64> {
    let file = File::open(path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    let mut count = memchr::memchr_iter(b'\n', &mmap).count() as u64;
    if !mmap.is_empty() && mmap.last() != Some(&b'\n') {
        count += 1;
    }
    Ok(count)
}

/// Memory-mapped line iterator for large wordlists
///
/// Yields one `String` per line with the terminator (and any `\r`)
/// stripped, decoding through the detected encoding. Invalid UTF-8 falls
/// back to lossy conversion rather than failing the scan.
pub struct MmapLineIterator {
    mmap: memmap2::Mmap,
    encoding: &'static Encoding,
    position: usize,
    // UTF-16 code units contain 0x0A bytes mid-character, so those files
    // cannot be split on raw newline bytes; they are decoded up front.
    decoded: Option<std::vec::IntoIter<String>>,
}

impl MmapLineIterator {
    /// Open a file with automatic encoding detection
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let encoding_info = detect_encoding(path)?;
        let file = File::open(path)?;
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        // Skip BOM if present
        let position = if mmap.len() >= 3 && mmap[0..3] == [0xEF, 0xBB, 0xBF] {
            3
        } else {
            0
        };

        if encoding_info.encoding != encoding_rs::UTF_8 {
            log::debug!("detected {} encoding for {:?}", encoding_info.name, path);
        }

        let decoded = if encoding_info.encoding == encoding_rs::UTF_16LE
            || encoding_info.encoding == encoding_rs::UTF_16BE
        {
            // decode() sniffs and strips the BOM itself
            let (text, _, _) = encoding_info.encoding.decode(&mmap);
            Some(
                text.lines()
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .into_iter(),
            )
        } else {
            None
        };

        Ok(Self {
            mmap,
            encoding: encoding_info.encoding,
            position,
            decoded,
        })
    }

    /// Total size of the mapped file in bytes
    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    /// The encoding lines are decoded through
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Iterator for MmapLineIterator {
    type Item = anyhow::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(lines) = &mut self.decoded {
            return lines.next().map(Ok);
        }

        if self.position >= self.mmap.len() {
            return None;
        }

        let remaining = &self.mmap[self.position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        self.position += line_end;

        let line_bytes = line_bytes.strip_suffix(&[b'\n']).unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(&[b'\r']).unwrap_or(line_bytes);

        if self.encoding == encoding_rs::UTF_8 {
            match std::str::from_utf8(line_bytes) {
                Ok(s) => Some(Ok(s.to_string())),
                Err(_) => Some(Ok(String::from_utf8_lossy(line_bytes).into_owned())),
            }
        } else {
            let (decoded, _, _) = self.encoding.decode(line_bytes);
            Some(Ok(decoded.into_owned()))
        }
    }
}
