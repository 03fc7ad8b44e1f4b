//! Log file setup
//!
//! The terminal belongs to the dashboard, so log output goes to a file.
//! Verbosity follows `RUST_LOG` and defaults to `meteodash=info`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "meteodash=info";

const LOG_FILE_NAME: &str = "meteodash.log";

/// Log file location under the platform cache directory.
///
/// `~/.cache/meteodash/meteodash.log` on Linux. Returns `None` when no home
/// directory can be determined.
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "meteodash")?;
    Some(project_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber writing to `path`, or to the default
/// location when `path` is `None`.
///
/// # Returns
/// * `Ok(Some(path))` - Where logs are written
/// * `Ok(None)` - No log location could be determined; logging is off
/// * `Err(io::Error)` - The log file could not be opened
pub fn init(path: Option<&Path>) -> io::Result<Option<PathBuf>> {
    let path = match path.map(Path::to_path_buf).or_else(default_log_path) {
        Some(path) => path,
        None => return Ok(None),
    };
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("app.log");
        let mut file = open_log_file(&path).expect("log file should open");
        writeln!(file, "first").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        writeln!(open_log_file(&path).unwrap(), "one").unwrap();
        writeln!(open_log_file(&path).unwrap(), "two").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn test_init_with_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meteodash.log");
        let used = init(Some(&path)).expect("init should succeed");
        assert_eq!(used, Some(path.clone()));
        assert!(path.exists());
    }

    #[test]
    fn test_init_fails_on_directory_path() {
        let temp_dir = TempDir::new().unwrap();
        assert!(init(Some(temp_dir.path())).is_err());
    }

    #[test]
    fn test_default_log_path_name() {
        if let Some(path) = default_log_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
        }
    }
}
