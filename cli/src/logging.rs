use std::path::PathBuf;

use tasksift_core::api::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "tasksift.log";

// The HTTP stack logs every connection at debug; keep it out of `level=debug`.
const QUIET_TARGETS: &[&str] = &["hyper=warn", "hyper_util=warn", "h2=warn", "rustls=warn"];

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// `RUST_LOG` as given, else the configured level with the HTTP stack quieted.
fn filter_spec(rust_log: Option<&str>, level: &str) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => spec.to_string(),
        None => std::iter::once(level.trim())
            .chain(QUIET_TARGETS.iter().copied())
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn build_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, String> {
    let spec = filter_spec(rust_log, level);
    EnvFilter::try_new(&spec).map_err(|e| format!("invalid log filter {spec:?}: {e}"))
}

fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("tasksift"))
}

/// Installs the global subscriber: compact console output on stderr and/or a
/// daily-rotated file (`logging.directory`, else `$TMPDIR/tasksift`).
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging disabled for both console and file".to_string());
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), &logging.level)?;

    let file_writer = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("create log dir {} failed: {e}", dir.display()))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
        let _ = LOG_GUARD.set(guard);
        Some(writer)
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_thread_ids(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())
}
