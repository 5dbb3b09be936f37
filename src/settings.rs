//! The key=value configuration file.
//!
//! The file holds the defaults used when the command line does not say
//! otherwise:
//!
//! ```text
//! chunk_size=8192
//! timeout=5
//! retries=3
//! download_dir=/home/me/Downloads
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Unknown keys are
//! logged and skipped. When the file does not exist it is created with the
//! defaults above.

use crate::error::{Error, Result};
use crate::request::{DEFAULT_CHUNK_SIZE, DEFAULT_RETRIES, DEFAULT_TIMEOUT};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Values loaded from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub chunk_size: usize,
    pub timeout: Duration,
    pub retries: u32,
    pub download_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            download_dir: default_download_dir(),
        }
    }
}

/// `<home>/Downloads`, or `./Downloads` when the home directory is unknown.
pub fn default_download_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Downloads")
}

impl Settings {
    /// `<config dir>/ictfd/ictfd.conf`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ictfd").join("ictfd.conf"))
    }

    /// Parses the key=value format, starting from the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Settings::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::Config(format!("line {}: expected key=value, got \"{}\"", index + 1, line))
            })?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "chunk_size" => settings.chunk_size = parse_positive(key, value, index)?,
                "timeout" => {
                    settings.timeout = Duration::from_secs(parse_positive(key, value, index)?)
                }
                "retries" => settings.retries = parse_positive(key, value, index)?,
                "download_dir" => {
                    if value.is_empty() {
                        return Err(Error::Config(format!(
                            "line {}: download_dir must not be empty",
                            index + 1
                        )));
                    }
                    settings.download_dir = PathBuf::from(value);
                }
                other => warn!("Ignoring unknown configuration key \"{}\"", other),
            }
        }

        Ok(settings)
    }

    /// Reads `path`, or writes the defaults there if it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Settings::default();
            debug!("Writing default configuration to {:?}", path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, settings.to_string())?;
            return Ok(settings);
        }

        debug!("Loading configuration from {:?}", path);
        let content = fs::read_to_string(path)?;
        Settings::parse(&content)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chunk_size={}", self.chunk_size)?;
        writeln!(f, "timeout={}", self.timeout.as_secs())?;
        writeln!(f, "retries={}", self.retries)?;
        writeln!(f, "download_dir={}", self.download_dir.display())
    }
}

fn parse_positive<T>(key: &str, value: &str, index: usize) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(Error::Config(format!(
            "line {}: {} must be a positive integer, got \"{}\"",
            index + 1,
            key,
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunk_size, 8192);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.retries, 3);
        assert!(settings.download_dir.ends_with("Downloads"));
    }

    #[test]
    fn test_parse_overrides_and_comments() {
        let settings = Settings::parse(
            "# tuned for a slow link\n\nchunk_size = 1024\ntimeout=30\nretries=5\ndownload_dir=/tmp/dl\n",
        )
        .unwrap();
        assert_eq!(settings.chunk_size, 1024);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.retries, 5);
        assert_eq!(settings.download_dir, PathBuf::from("/tmp/dl"));
    }

    #[test]
    fn test_parse_partial_keeps_defaults() {
        let settings = Settings::parse("retries=7").unwrap();
        assert_eq!(settings.retries, 7);
        assert_eq!(settings.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        assert!(Settings::parse("colour=blue\nretries=2").is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(matches!(Settings::parse("chunk_size=0"), Err(Error::Config(_))));
        assert!(matches!(Settings::parse("timeout=-1"), Err(Error::Config(_))));
        assert!(matches!(Settings::parse("retries=many"), Err(Error::Config(_))));
        assert!(matches!(Settings::parse("just words"), Err(Error::Config(_))));
        assert!(matches!(Settings::parse("download_dir="), Err(Error::Config(_))));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let settings = Settings {
            chunk_size: 4096,
            timeout: Duration::from_secs(12),
            retries: 4,
            download_dir: PathBuf::from("/srv/files"),
        };
        assert_eq!(Settings::parse(&settings.to_string()).unwrap(), settings);
    }
}
