//! Tracing subscriber initialization.
//!
//! The terminal belongs to the TUI, so logs go to a file.
//! Follow them with `tail -f` from another terminal.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::error::{PokedexError, Result};

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaults to "info". The file is appended to,
/// and its parent directory is created if missing.
pub fn init(log_path: &Path) -> Result<()> {
    let file_name = log_path.file_name().ok_or_else(|| PokedexError::Config {
        reason: format!("log file '{}' has no file name", log_path.display()),
    })?;
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| PokedexError::Config {
            reason: format!("tracing subscriber already initialized: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pokedex.log");

        // Only the first init in a process succeeds; the directory is created first either way
        let result = init(&path);

        assert!(
            matches!(result, Ok(()) | Err(PokedexError::Config { .. })),
            "{result:?}"
        );
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_init_rejects_path_without_file_name() {
        let err = init(Path::new("/")).unwrap_err();
        assert!(matches!(err, PokedexError::Config { .. }));
    }
}
