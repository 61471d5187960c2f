//! Reader configuration.
//!
//! [`ReaderConfig`] carries the two bounds of the backward scan: the size of the
//! working buffer each chunk is loaded into, and the cap on a single line. With the
//! `config` feature enabled the same struct can be read from a TOML file.

use crate::error::{Result, RevLinesError};

/// Default working buffer capacity (1 MiB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default cap on the bytes of a single line (1 MiB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Bounds used by a [`ReversedReader`](crate::ReversedReader)
///
/// Memory held by a reader is at most `chunk_size + max_line_bytes`, no matter
/// how large the file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ReaderConfig {
    /// Maximum number of bytes loaded from the file in one chunk
    pub chunk_size: usize,

    /// Size of the line buffer, one slot of which is reserved for the terminator
    ///
    /// A line fails with `LineTooLong` once it reaches this many bytes, so the
    /// longest accepted line is `max_line_bytes - 1` bytes (terminators excluded).
    pub max_line_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ReaderConfig {
    /// Replace the working buffer capacity
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Replace the per-line cap
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Check that both bounds are usable
    ///
    /// A zero chunk size would never make progress through the file, and a zero
    /// line cap leaves no room for the reserved terminator slot.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RevLinesError::config("chunk_size must be greater than zero"));
        }
        if self.max_line_bytes == 0 {
            return Err(RevLinesError::config(
                "max_line_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
mod file {
    use super::ReaderConfig;
    use crate::error::{Result, RevLinesError};
    use std::path::{Path, PathBuf};

    impl ReaderConfig {
        /// Parse a configuration from TOML text; missing keys keep their defaults
        pub fn from_toml_str(text: &str) -> Result<Self> {
            let config: ReaderConfig = toml::from_str(text)
                .map_err(|e| RevLinesError::config(format!("Invalid TOML: {e}")))?;
            config.validate()?;
            Ok(config)
        }

        /// Read and parse a configuration file
        pub fn from_file(path: &Path) -> Result<Self> {
            let text = std::fs::read_to_string(path).map_err(|e| {
                RevLinesError::file_error(
                    format!("Failed to read config file: {}", path.display()),
                    e,
                )
            })?;
            Self::from_toml_str(&text)
        }

        /// Location of the per-user configuration file, if the platform has one
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("revlines").join("config.toml"))
        }

        /// Load the per-user configuration file, falling back to defaults when absent
        pub fn load_user_config() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.is_file() => {
                    log::debug!("Loading reader config from {}", path.display());
                    Self::from_file(&path)
                }
                _ => Ok(Self::default()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_one_mebibyte() {
        let config = ReaderConfig::default();
        assert_eq!(config.chunk_size, 1024 * 1024);
        assert_eq!(config.max_line_bytes, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ReaderConfig::default()
            .with_chunk_size(8)
            .with_max_line_bytes(16);
        assert_eq!(config.chunk_size, 8);
        assert_eq!(config.max_line_bytes, 16);
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let zero_chunk = ReaderConfig::default().with_chunk_size(0);
        match zero_chunk.validate() {
            Err(RevLinesError::ConfigError { message }) => {
                assert!(message.contains("chunk_size"));
            }
            other => panic!("Expected ConfigError, got {other:?}"),
        }

        let zero_line = ReaderConfig::default().with_max_line_bytes(0);
        assert!(matches!(
            zero_line.validate(),
            Err(RevLinesError::ConfigError { .. })
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str_partial() {
        let config = ReaderConfig::from_toml_str("chunk_size = 4096\n").unwrap();
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str_rejects_unknown_and_invalid() {
        assert!(ReaderConfig::from_toml_str("buffer = 3\n").is_err());
        assert!(ReaderConfig::from_toml_str("chunk_size = 0\n").is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chunk_size = 64\nmax_line_bytes = 128").unwrap();
        file.flush().unwrap();

        let config = ReaderConfig::from_file(file.path()).unwrap();
        assert_eq!(config, ReaderConfig::default().with_chunk_size(64).with_max_line_bytes(128));
    }
}
