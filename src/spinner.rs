//! Terminal progress indicators
//!
//! Provides:
//! - Animated key spinner while a search runs
//! - Color-coded status lines
//! - Duration and count formatting for reports

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use colored::Colorize;
use parking_lot::RwLock;

/// Spinner animation frames
const KEY_FRAMES: &[&str] = &["🔑", "◐ ", "◓ ", "◑ ", "◒ "];

/// Status indicators
pub struct StatusIcons;

impl StatusIcons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const SEARCH: &'static str = "🔍";
    pub const LOCK: &'static str = "🔐";
    pub const KEY: &'static str = "🔑";
}

/// Animated spinner drawn on stderr from a background thread
pub struct KeySpinner {
    running: Arc<AtomicBool>,
    message: Arc<RwLock<String>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl KeySpinner {
    /// Create and start a new spinner
    pub fn new(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let message = Arc::new(RwLock::new(message.to_string()));

        let r = Arc::clone(&running);
        let m = Arc::clone(&message);

        let handle = thread::spawn(move || {
            let mut frame = 0;
            while r.load(Ordering::Relaxed) {
                let msg = m.read().clone();
                eprint!("\r{} {} ", KEY_FRAMES[frame % KEY_FRAMES.len()].cyan(), msg);
                let _ = io::stderr().flush();

                frame += 1;
                thread::sleep(Duration::from_millis(120));
            }
        });

        Self {
            running,
            message,
            handle: Some(handle),
        }
    }

    /// Update the spinner message
    pub fn set_message(&self, msg: &str) {
        *self.message.write() = msg.to_string();
    }

    /// Stop and clear the line
    pub fn finish(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        eprint!("\r{}\r", " ".repeat(80));
        let _ = io::stderr().flush();
    }
}

impl Drop for KeySpinner {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop();
        }
    }
}

/// Format duration for display
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.3}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// Group digits in thousands: 1234567 -> "1,234,567"
pub fn format_count(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const HEADER_WIDTH: usize = 60;

/// Left padding that centers `title` in the header rule
fn header_padding(title: &str, width: usize) -> usize {
    width.saturating_sub(title.chars().count() + 4) / 2
}

/// Print a styled header
pub fn print_header(title: &str) {
    let width = HEADER_WIDTH;
    let padding = header_padding(title, width);

    println!();
    println!("{}", "═".repeat(width).cyan());
    println!("{}  {}", " ".repeat(padding), title.bright_white().bold());
    println!("{}", "═".repeat(width).cyan());
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {}", key.bright_black(), value.white());
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("{} {}", StatusIcons::SUCCESS.green(), msg.green());
}

/// Print an error message
pub fn print_error(msg: &str) {
    println!("{} {}", StatusIcons::ERROR.red(), msg.red());
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", StatusIcons::WARNING.yellow(), msg.yellow());
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", StatusIcons::INFO.cyan(), msg.cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3700)), "1h 1m 40s");
    }

    #[test]
    fn test_header_padding() {
        assert_eq!(header_padding("Search", HEADER_WIDTH), 25);
        assert_eq!(header_padding(&"x".repeat(80), HEADER_WIDTH), 0);
        print_header(&"long title ".repeat(10));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_spinner_stops_cleanly() {
        let spinner = KeySpinner::new("testing");
        spinner.set_message("still testing");
        thread::sleep(Duration::from_millis(50));
        spinner.finish();
    }
}
