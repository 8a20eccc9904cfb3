//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

use crate::detection::Detection;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level this logger emits when installed globally
    level: Level,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: Level::Debug,
        })
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = &mut *guard {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Records a detection result for a template file
    ///
    /// # Arguments
    ///
    /// * `source` - The template the box was detected in
    /// * `detection` - The detection result
    pub fn log_detection(&self, source: &Path, detection: &Detection) -> io::Result<()> {
        let bounds = &detection.bounds;
        self.log(&format!("Box detected in {}", source.display()))?;
        self.log(&format!("  Matched pixels: {}", detection.matched_pixels))?;
        self.log(&format!("  Position: X={}, Y={}", bounds.x, bounds.y))?;
        self.log(&format!("  Size: {}x{}", bounds.width, bounds.height))?;
        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path of the file the global logger writes to
    /// * `verbose` - Emit debug records when true, info and above otherwise
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, verbose: bool) -> io::Result<()> {
        let mut global_logger = Logger::new(log_file)?;
        let filter = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
        global_logger.level = if verbose { Level::Debug } else { Level::Info };

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(filter);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Console echo stays off stdout, which carries command output
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

    #[test]
    fn test_log_detection_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detect.log");
        let logger = Logger::new(&path).unwrap();

        let detection = Detection {
            bounds: BoundingBox::from_extent(2, 3, 12, 8),
            matched_pixels: 66,
        };
        logger.log_detection(Path::new("templates/shirt-box.png"), &detection).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Matched pixels: 66"));
        assert!(content.contains("Position: X=2, Y=3"));
        assert!(content.contains("Size: 10x5"));
    }
}
