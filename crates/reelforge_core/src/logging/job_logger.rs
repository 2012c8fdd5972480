//! Per-job logger with file output and a tail buffer.
//!
//! Each composition job gets its own logger that:
//! - Writes to a dedicated log file
//! - Mirrors messages to the process-wide `tracing` subscriber
//! - Maintains a tail buffer of toolchain output for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix};

/// Per-job logger with dual output (file + tracing).
pub struct JobLogger {
    /// Job name for identification.
    job_name: String,
    /// Path to log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Tail buffer of recent toolchain output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl JobLogger {
    /// Create a new job logger writing to `<log_dir>/<job_name>.log`.
    pub fn new(
        job_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
    ) -> std::io::Result<Self> {
        let job_name = job_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&job_name)));
        let file = File::create(&log_path)?;

        Ok(Self {
            job_name,
            log_path,
            file_writer: Mutex::new(Some(BufWriter::new(file))),
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(100)),
        })
    }

    /// Get the job name.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let line = if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S%.3f"), message)
        } else {
            message.to_string()
        };

        if let Some(writer) = self.file_writer.lock().as_mut() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }

        match level {
            LogLevel::Debug => tracing::debug!(job = %self.job_name, "{}", message),
            LogLevel::Info => tracing::info!(job = %self.job_name, "{}", message),
            LogLevel::Warn => tracing::warn!(job = %self.job_name, "{}", message),
            LogLevel::Error => tracing::error!(job = %self.job_name, "{}", message),
        }
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record a toolchain output line in the tail buffer.
    pub fn output_line(&self, line: &str) {
        let mut buffer = self.tail_buffer.lock();
        if buffer.len() >= self.config.error_tail {
            buffer.pop_front();
        }
        buffer.push_back(line.to_string());
    }

    /// Snapshot of the tail buffer, most recent last.
    pub fn tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush and close the log file.
    pub fn close(&self) {
        if let Some(mut writer) = self.file_writer.lock().take() {
            let _ = writer.flush();
        }
    }
}

/// Replace filesystem-hostile characters in a job name.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JobLogger::new("job-1", dir.path(), LogConfig::default()).unwrap();

        logger.info("starting");
        logger.phase("MixAudio");
        logger.close();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("starting"));
        assert!(content.contains("=== MixAudio ==="));
    }

    #[test]
    fn debug_is_filtered_at_info_level() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JobLogger::new("job-2", dir.path(), LogConfig::default()).unwrap();

        logger.debug("hidden");
        logger.info("visible");
        logger.close();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("visible"));
    }

    #[test]
    fn tail_buffer_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            error_tail: 3,
            ..LogConfig::default()
        };
        let logger = JobLogger::new("job-3", dir.path(), config).unwrap();

        for i in 0..10 {
            logger.output_line(&format!("line {}", i));
        }

        let tail = logger.tail();
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0], "line 7");
        assert_eq!(tail[2], "line 9");
    }

    #[test]
    fn job_names_are_sanitized_for_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JobLogger::new("job/with:odd chars", dir.path(), LogConfig::default()).unwrap();
        let filename = logger.log_path().file_name().unwrap().to_string_lossy();
        assert_eq!(filename, "job_with_odd_chars.log");
    }
}
