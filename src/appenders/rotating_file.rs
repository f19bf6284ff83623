//! Rotating file appender with daily log rotation
//!
//! Appends newline-terminated records to a single file and rotates it at the
//! first write after a local midnight boundary: the current file is renamed
//! to `<name>.<YYYY-MM-DD>` (the day its records belong to) and a fresh file
//! opens at the original path. The day an open segment belongs to is derived
//! from the file's modification time, so a process restarted on a later day
//! archives the stale file before writing to it.

use crate::appenders::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::format::OutputFormat;
use crate::core::level::LogLevel;
use crate::core::record::Record;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Retention configuration for rotated files
///
/// # Examples
///
/// ```
/// use applog::RotationPolicy;
///
/// // Keep a week of history, gzip-compressed
/// let policy = RotationPolicy::new()
///     .with_max_backups(7)
///     .with_compression(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    /// Maximum number of archived files to keep; `0` keeps everything.
    pub max_backups: usize,
    /// Whether to gzip archived files.
    pub compress: bool,
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

pub struct RotatingFileAppender {
    base_path: PathBuf,
    format: OutputFormat,
    policy: RotationPolicy,
    threshold: LogLevel,
    writer: Option<BufWriter<File>>,
    /// Local calendar day the open segment belongs to.
    open_day: NaiveDate,
}

impl RotatingFileAppender {
    /// Create a rotating appender with the default retention policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be opened.
    pub fn new<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        Self::with_policy(path, format, RotationPolicy::default())
    }

    /// Create a rotating appender with a custom retention policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be opened.
    pub fn with_policy<P: AsRef<Path>>(
        path: P,
        format: OutputFormat,
        policy: RotationPolicy,
    ) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "create log directory",
                        format!("Failed to create directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = Self::open_segment(&base_path)?;
        let open_day = file
            .metadata()
            .ok()
            .and_then(|meta| meta.modified().ok())
            .map(|mtime| DateTime::<Local>::from(mtime).date_naive())
            .unwrap_or_else(|| Local::now().date_naive());

        Ok(Self {
            base_path,
            format,
            policy,
            threshold: LogLevel::default(),
            writer: Some(BufWriter::new(file)),
            open_day,
        })
    }

    #[must_use]
    pub fn with_threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    fn open_segment(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })
    }

    fn file_name(&self) -> &str {
        self.base_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
    }

    fn archive_path(&self, day: NaiveDate) -> PathBuf {
        let mut path = self.base_path.clone();
        path.set_file_name(format!(
            "{}.{}",
            self.file_name(),
            day.format(ARCHIVE_DATE_FORMAT)
        ));
        path
    }

    fn should_rotate(&self) -> bool {
        Local::now().date_naive() > self.open_day
    }

    /// Close the current segment, archive it under its day's name, and open a
    /// fresh file at the base path.
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let archive = self.archive_path(self.open_day);
        if self.base_path.exists() {
            // rename replaces the destination atomically on most platforms;
            // fall back to remove-then-rename where it refuses.
            if fs::rename(&self.base_path, &archive).is_err() {
                if archive.exists() {
                    let _ = fs::remove_file(&archive);
                }
                fs::rename(&self.base_path, &archive).map_err(|e| {
                    LoggerError::file_rotation(
                        self.base_path.display().to_string(),
                        format!("Failed to archive current log file: {}", e),
                    )
                })?;
            }

            if self.policy.compress {
                self.compress_archive(&archive)?;
            }
        }

        self.prune_backups();

        let file = Self::open_segment(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.open_day = Local::now().date_naive();
        Ok(())
    }

    /// Gzip an archived segment, transactionally: the compressed file is
    /// written to a temporary path first and the original is removed only
    /// after the rename succeeds.
    fn compress_archive(&self, path: &Path) -> Result<()> {
        let gz_path = PathBuf::from(format!("{}.gz", path.display()));
        let tmp_path = PathBuf::from(format!("{}.gz.tmp", path.display()));

        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress archived log",
                format!("Failed to open '{}'", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::new(input);

        let output = File::create(&tmp_path).map_err(|e| {
            LoggerError::io_operation(
                "compress archived log",
                format!("Failed to create '{}'", tmp_path.display()),
                e,
            )
        })?;
        let mut encoder =
            flate2::write::GzEncoder::new(BufWriter::new(output), flate2::Compression::default());

        io::copy(&mut reader, &mut encoder).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LoggerError::io_operation(
                "compress archived log",
                format!("Failed to compress '{}'", path.display()),
                e,
            )
        })?;

        let mut inner = encoder.finish().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LoggerError::io_operation(
                "compress archived log",
                "Failed to finish compression".to_string(),
                e,
            )
        })?;
        inner.flush().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LoggerError::io_operation(
                "compress archived log",
                "Failed to flush compressed output".to_string(),
                e,
            )
        })?;

        fs::rename(&tmp_path, &gz_path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LoggerError::io_operation(
                "compress archived log",
                format!("Failed to rename compressed file to '{}'", gz_path.display()),
                e,
            )
        })?;

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[LOGGER WARNING] compressed '{}' but could not remove the original: {}",
                path.display(),
                e
            );
        }
        Ok(())
    }

    /// Delete the oldest date-suffixed archives beyond `max_backups`.
    /// Best effort; a file that cannot be removed is reported and skipped.
    fn prune_backups(&self) {
        if self.policy.max_backups == 0 {
            return;
        }
        let parent = match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return,
        };
        let entries = match fs::read_dir(parent) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        let prefix = format!("{}.", self.file_name());
        let mut archives: Vec<(NaiveDate, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                let suffix = name.strip_prefix(&prefix)?;
                let suffix = suffix.strip_suffix(".gz").unwrap_or(suffix);
                let day = NaiveDate::parse_from_str(suffix, ARCHIVE_DATE_FORMAT).ok()?;
                Some((day, entry.path()))
            })
            .collect();

        archives.sort_by_key(|(day, _)| *day);
        let excess = archives.len().saturating_sub(self.policy.max_backups);
        for (_, path) in archives.into_iter().take(excess) {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!(
                    "[LOGGER WARNING] failed to remove old backup '{}': {}",
                    path.display(),
                    e
                );
            }
        }
    }

    fn reopen(&mut self) -> Result<()> {
        let file = Self::open_segment(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_open_day(&mut self, day: NaiveDate) {
        self.open_day = day;
    }
}

impl Appender for RotatingFileAppender {
    fn append(&mut self, record: &Record) -> Result<()> {
        if self.should_rotate() {
            if let Err(e) = self.rotate() {
                // Keep logging to the current file rather than losing records.
                eprintln!(
                    "[LOGGER WARNING] log rotation failed: {}. Continuing with current file.",
                    e
                );
                if self.writer.is_none() {
                    self.reopen()?;
                }
                // Avoid re-attempting rotation on every subsequent append.
                self.open_day = Local::now().date_naive();
            }
        }

        let mut line = self.format.format(record);
        line.push('\n');

        match self.writer {
            Some(ref mut writer) => {
                writer.write_all(line.as_bytes()).map_err(|e| {
                    LoggerError::file_appender(
                        self.base_path.display().to_string(),
                        format!("Failed to write log record: {}", e),
                    )
                })?;
                writer.flush().map_err(|e| {
                    LoggerError::file_appender(
                        self.base_path.display().to_string(),
                        format!("Failed to flush: {}", e),
                    )
                })?;
                Ok(())
            }
            None => Err(LoggerError::writer("Writer not initialized")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn set_threshold(&mut self, level: LogLevel) {
        self.threshold = level;
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
