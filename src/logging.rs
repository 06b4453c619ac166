use std::path::{Path, PathBuf};

use color_eyre::eyre;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "property-search.log";

/// Sends `tracing` output to a file, since the terminal belongs to the UI.
///
/// The returned guard flushes pending lines when dropped; keep it alive for
/// the whole run.
pub fn init(log_file: Option<PathBuf>) -> eyre::Result<WorkerGuard> {
    let path = match log_file {
        Some(path) => path,
        None => default_log_path()?,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn default_log_path() -> eyre::Result<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or_else(|| eyre::eyre!("Could not find cache directory"))?;

    Ok(cache_dir.join("property-search").join(LOG_FILE_NAME))
}
