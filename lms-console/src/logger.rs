//! Logging setup
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, a daily rotating file is written as well and
//! files older than [`RETENTION_DAYS`] are removed on start-up.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

pub const RETENTION_DAYS: i64 = 14;

const FILE_PREFIX: &str = "lms-console";

/// Delete `lms-console.YYYY-MM-DD` files older than `days`
pub fn cleanup_old_logs(log_dir: &Path, days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Initialize logging
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset (e.g. "warn", "lms_client=debug")
/// * `json_format` - JSON lines instead of the human-readable format
/// * `log_dir` - also write a daily rotating file here
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let Some(log_dir) = log_dir else {
        subscriber.with(console_layer).init();
        return Ok(());
    };

    fs::create_dir_all(log_dir)?;
    let file_log = RollingFileAppender::new(Rotation::DAILY, log_dir, FILE_PREFIX);
    let file_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::sync::Mutex::new(file_log))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_log))
            .boxed()
    };

    subscriber.with(console_layer).with(file_layer).init();

    match cleanup_old_logs(log_dir, RETENTION_DAYS) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "Deleted old log files"),
        Err(e) => tracing::warn!(error = %e, "Failed to clean up old logs"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn only_expired_log_files_are_removed() {
        let dir = TempDir::new().unwrap();
        let today = chrono::Local::now().date_naive();
        let old = today - chrono::Duration::days(RETENTION_DAYS + 3);

        let fresh_name = format!("{FILE_PREFIX}.{}", today.format("%Y-%m-%d"));
        let old_name = format!("{FILE_PREFIX}.{}", old.format("%Y-%m-%d"));
        for name in [fresh_name.as_str(), old_name.as_str(), "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        assert_eq!(cleanup_old_logs(dir.path(), RETENTION_DAYS).unwrap(), 1);
        assert!(dir.path().join(&fresh_name).exists());
        assert!(!dir.path().join(&old_name).exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
