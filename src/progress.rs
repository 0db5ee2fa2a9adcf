//! Progress display module
//!
//! Styled console output, progress bars, and run statistics.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║      █████╗ ███╗   ██╗ █████╗  ██████╗ ██████╗  █████╗ ███╗   ███╗           ║
║     ██╔══██╗████╗  ██║██╔══██╗██╔════╝ ██╔══██╗██╔══██╗████╗ ████║           ║
║     ███████║██╔██╗ ██║███████║██║  ███╗██████╔╝███████║██╔████╔██║           ║
║     ██╔══██║██║╚██╗██║██╔══██║██║   ██║██╔══██╗██╔══██║██║╚██╔╝██║           ║
║     ██║  ██║██║ ╚████║██║  ██║╚██████╔╝██║  ██║██║  ██║██║ ╚═╝ ██║           ║
║     ╚═╝  ╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝     ╚═╝           ║
║                                                                              ║
║                 ██████╗ ██████╗  ██████╗ ██╗   ██╗██████╗                    ║
║                ██╔════╝ ██╔══██╗██╔═══██╗██║   ██║██╔══██╗                   ║
║                ██║  ███╗██████╔╝██║   ██║██║   ██║██████╔╝                   ║
║                ██║   ██║██╔══██╗██║   ██║██║   ██║██╔═══╝                    ║
║                ╚██████╔╝██║  ██║╚██████╔╝╚██████╔╝██║                        ║
║                 ╚═════╝ ╚═╝  ╚═╝ ╚═════╝  ╚═════╝ ╚═╝                        ║
║                                                                              ║
║                    Length-Sharded Anagram Grouping                           ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one pipeline run
#[derive(Debug)]
pub struct RunStats {
    pub lines_read: AtomicU64,
    pub words_grouped: AtomicU64,
    pub groups_emitted: AtomicU64,
    pub singletons_suppressed: AtomicU64,
    pub shards_created: AtomicU64,
    pub shard_errors: AtomicU64,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            lines_read: AtomicU64::new(0),
            words_grouped: AtomicU64::new(0),
            groups_emitted: AtomicU64::new(0),
            singletons_suppressed: AtomicU64::new(0),
            shards_created: AtomicU64::new(0),
            shard_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn set_lines_read(&self, count: u64) {
        self.lines_read.store(count, Ordering::Relaxed);
    }

    pub fn add_words_grouped(&self, count: u64) {
        self.words_grouped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_groups_emitted(&self, count: u64) {
        self.groups_emitted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_singletons(&self, count: u64) {
        self.singletons_suppressed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn set_shards_created(&self, count: u64) {
        self.shards_created.store(count, Ordering::Relaxed);
    }

    pub fn add_shard_error(&self) {
        self.shard_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_lines_read(&self) -> u64 {
        self.lines_read.load(Ordering::Relaxed)
    }

    pub fn get_words_grouped(&self) -> u64 {
        self.words_grouped.load(Ordering::Relaxed)
    }

    pub fn get_groups_emitted(&self) -> u64 {
        self.groups_emitted.load(Ordering::Relaxed)
    }

    pub fn get_singletons(&self) -> u64 {
        self.singletons_suppressed.load(Ordering::Relaxed)
    }

    pub fn get_shards_created(&self) -> u64 {
        self.shards_created.load(Ordering::Relaxed)
    }

    pub fn get_shard_errors(&self) -> u64 {
        self.shard_errors.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_words_grouped() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let shards = self.get_shards_created();
        let errors = self.get_shard_errors();

        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    GROUPING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!(
            "  {} {}",
            "Lines read:     ".green(),
            format_number(self.get_lines_read())
        );
        println!(
            "  {} {}",
            "Words grouped:  ".green(),
            format_number(self.get_words_grouped())
        );
        println!(
            "  {} {}",
            "Singletons:     ".yellow(),
            format_number(self.get_singletons())
        );
        println!(
            "  {} {}",
            "Anagram groups: ".green().bold(),
            format_number(self.get_groups_emitted()).green().bold()
        );

        if shards > 0 {
            println!(
                "  {} {}",
                "Length shards:  ".green(),
                format_number(shards)
            );
        }

        if errors > 0 {
            println!(
                "  {} {}",
                "Shard errors:   ".red(),
                format_number(errors).red()
            );
        }

        println!();
        println!(
            "  {} {}",
            "Duration:       ".green(),
            format_duration(self.elapsed())
        );
        println!(
            "  {} {:.2} words/sec",
            "Throughput:     ".green(),
            self.words_per_second()
        );
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
