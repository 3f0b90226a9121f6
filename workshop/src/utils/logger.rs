//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - Console output, pretty or JSON
//! - Daily rotating application logs (deleted after [`APP_LOG_RETENTION_DAYS`])
//! - Permanent audit logs for status changes and finalizations (target `audit`)

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Target used by audit records
pub const AUDIT_TARGET: &str = "audit";

/// Application log retention
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the logger with console output only
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    init_logger_with_file(level, false, None)
}

/// Initialize the logging system with daily rotating logs
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether the console uses JSON (production) or pretty output
/// * `log_dir` - Optional directory for file logging (e.g., Some("./work_dir/logs"))
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_filter(console_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(console_filter(level))
            .boxed()
    };
    layers.push(console);

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        // Only log to app file if target is NOT "audit"
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != AUDIT_TARGET
                }))
                .boxed(),
        );

        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, "audit");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == AUDIT_TARGET
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// Clean up application log files older than [`APP_LOG_RETENTION_DAYS`]
///
/// Audit logs are never deleted. Returns the number of removed files.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    use chrono::{Local, NaiveTime, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        // Rolling appender names files app.YYYY-MM-DD
        if let Some(date_part) = name.strip_prefix("app.")
            && let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && let Some(local_datetime) = Local
                .from_local_datetime(&naive_date.and_time(NaiveTime::MIN))
                .single()
            && local_datetime < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}
