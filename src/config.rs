//! Batch configuration.
//!
//! [`SplitConfig`] is the fully-resolved configuration a batch runs with. It is
//! built either directly with its builder setters or from [`Settings`], which
//! layers built-in defaults, an optional config file, and `CSVSPLIT_*`
//! environment variables.
//!
//! # Example
//!
//! ```
//! use csvsplit::config::{ReadMode, SplitConfig};
//!
//! let cfg = SplitConfig::default()
//!     .chunk_size(50_000)
//!     .prefix("part")
//!     .read_mode(ReadMode::InMemory);
//! assert_eq!(cfg.chunk_size, 50_000);
//! ```

use crate::error::{SplitError, SplitResult};
use crate::validation::validate_chunk_size;
use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rows per chunk when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Output file prefix when the caller does not pick one.
pub const DEFAULT_PREFIX: &str = "output_file";

/// Config file looked up in the working directory (any supported extension).
pub const DEFAULT_SETTINGS_FILE: &str = "csvsplit";

/// Environment variable prefix, e.g. `CSVSPLIT_CHUNK_SIZE`.
pub const ENV_PREFIX: &str = "CSVSPLIT";

/// How a source file is read before its chunks are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Copy records straight from the reader into the current chunk file.
    #[default]
    Streaming,
    /// Load the whole table into memory, then slice it by row range.
    InMemory,
}

/// What to emit for a source file with no data rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyInputPolicy {
    /// One chunk file holding only the header row.
    #[default]
    HeaderOnlyChunk,
    /// No chunk files at all.
    NoChunks,
}

/// CSV dialect shared by the reader and the chunk writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first row is a header that every chunk repeats.
    pub has_headers: bool,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Resolved configuration for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Maximum data rows per chunk (header excluded).
    pub chunk_size: usize,
    /// Parent of the generated `entries_*` directory. `None` means next to the first input.
    pub output_dir: Option<PathBuf>,
    /// Inserted into every output file name.
    pub prefix: String,
    pub format: CsvFormat,
    pub read_mode: ReadMode,
    pub empty_input: EmptyInputPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
            format: CsvFormat::default(),
            read_mode: ReadMode::default(),
            empty_input: EmptyInputPolicy::default(),
        }
    }
}

impl SplitConfig {
    /// Sets the maximum rows per chunk.
    #[must_use]
    pub fn chunk_size(mut self, rows: usize) -> Self {
        self.chunk_size = rows;
        self
    }

    /// Sets the output parent directory. An empty path means "not supplied".
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.output_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    /// Sets the output prefix. An empty prefix falls back to [`DEFAULT_PREFIX`].
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            prefix
        };
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.format.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.format.has_headers = yes;
        self
    }

    #[must_use]
    pub fn read_mode(mut self, mode: ReadMode) -> Self {
        self.read_mode = mode;
        self
    }

    #[must_use]
    pub fn empty_input(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
    }
}

/// Parse a delimiter given as text. Accepts one ASCII character or the word `tab`.
///
/// # Errors
/// Returns [`SplitError::InvalidDelimiter`] for anything else.
pub fn parse_delimiter(raw: &str) -> SplitResult<u8> {
    match raw {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match raw.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(SplitError::InvalidDelimiter(raw.to_string())),
        },
    }
}

/// Layered, unvalidated settings as read from file and environment.
///
/// Values stay in their raw form (signed chunk size, textual delimiter) so that
/// [`Settings::to_config`] can reject them with the same errors the command line
/// produces.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub chunk_size: i64,
    #[serde(default)]
    pub output_dir: Option<String>,
    pub prefix: String,
    pub delimiter: String,
    pub has_headers: bool,
    pub in_memory: bool,
    pub skip_empty: bool,
}

impl Settings {
    /// Load settings from defaults, a config file, and the environment.
    ///
    /// With `path = None` the file `csvsplit.{toml,json,yaml,...}` in the working
    /// directory is used if present. An explicit `path` must exist.
    ///
    /// # Errors
    /// Returns an error if an explicit file is missing or any source fails to parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// [`Settings::load`] with a caller-supplied environment layer.
    ///
    /// # Errors
    /// See [`Settings::load`].
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        let cfg = Config::builder()
            .set_default("chunk_size", DEFAULT_CHUNK_SIZE as i64)?
            .set_default("output_dir", None::<String>)?
            .set_default("prefix", DEFAULT_PREFIX)?
            .set_default("delimiter", ",")?
            .set_default("has_headers", true)?
            .set_default("in_memory", false)?
            .set_default("skip_empty", false)?
            .add_source(file)
            .add_source(env)
            .build()
            .context("load settings")?;
        cfg.try_deserialize().context("decode settings")
    }

    /// Validate and convert into a [`SplitConfig`].
    ///
    /// # Errors
    /// Returns a pre-flight [`SplitError`] for a non-positive chunk size or a bad delimiter.
    pub fn to_config(&self) -> SplitResult<SplitConfig> {
        let mut cfg = SplitConfig::default()
            .chunk_size(validate_chunk_size(self.chunk_size)?)
            .prefix(self.prefix.clone())
            .delimiter(parse_delimiter(&self.delimiter)?)
            .has_headers(self.has_headers)
            .read_mode(if self.in_memory {
                ReadMode::InMemory
            } else {
                ReadMode::Streaming
            })
            .empty_input(if self.skip_empty {
                EmptyInputPolicy::NoChunks
            } else {
                EmptyInputPolicy::HeaderOnlyChunk
            });
        if let Some(dir) = &self.output_dir {
            cfg = cfg.output_dir(dir);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    /// Environment layer fed from `vars` instead of the process environment.
    fn env_of(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = SplitConfig::default();
        assert_eq!(cfg.chunk_size, 100_000);
        assert_eq!(cfg.prefix, "output_file");
        assert_eq!(cfg.output_dir, None);
        assert_eq!(cfg.format.delimiter, b',');
        assert!(cfg.format.has_headers);
        assert_eq!(cfg.read_mode, ReadMode::Streaming);
        assert_eq!(cfg.empty_input, EmptyInputPolicy::HeaderOnlyChunk);
    }

    #[test]
    fn empty_fields_fall_back() {
        let cfg = SplitConfig::default().output_dir("").prefix("");
        assert_eq!(cfg.output_dir, None);
        assert_eq!(cfg.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn settings_file_overrides_defaults() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("split.toml");
        std::fs::write(
            &path,
            "chunk_size = 250\nprefix = \"part\"\ndelimiter = \";\"\nskip_empty = true\n",
        )?;

        let cfg = Settings::load_with_env(Some(&path), env_of(&[]))?.to_config()?;
        assert_eq!(cfg.chunk_size, 250);
        assert_eq!(cfg.prefix, "part");
        assert_eq!(cfg.format.delimiter, b';');
        assert_eq!(cfg.empty_input, EmptyInputPolicy::NoChunks);
        assert_eq!(cfg.read_mode, ReadMode::Streaming);
        Ok(())
    }

    #[test]
    fn settings_reject_non_positive_chunk_size() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("split.toml");
        std::fs::write(&path, "chunk_size = 0\n")?;

        let err = Settings::load_with_env(Some(&path), env_of(&[]))?
            .to_config()
            .unwrap_err();
        assert!(matches!(err, SplitError::InvalidChunkSize(0)));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("split.toml");
        std::fs::write(&path, "chunk_size = 250\nprefix = \"part\"\n")?;

        let env = env_of(&[
            ("CSVSPLIT_CHUNK_SIZE", "40"),
            ("CSVSPLIT_SKIP_EMPTY", "true"),
            ("CSVSPLIT_IN_MEMORY", "true"),
            ("CSVSPLIT_OUTPUT_DIR", "/srv/out"),
            ("OTHER_CHUNK_SIZE", "7"),
        ]);
        let cfg = Settings::load_with_env(Some(&path), env)?.to_config()?;
        assert_eq!(cfg.chunk_size, 40);
        assert_eq!(cfg.prefix, "part");
        assert_eq!(cfg.empty_input, EmptyInputPolicy::NoChunks);
        assert_eq!(cfg.read_mode, ReadMode::InMemory);
        assert_eq!(cfg.output_dir.as_deref(), Some(Path::new("/srv/out")));
        Ok(())
    }

    #[test]
    fn environment_alone_layers_over_defaults() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("empty.toml");
        std::fs::write(&path, "")?;

        let env = env_of(&[("CSVSPLIT_DELIMITER", "tab")]);
        let cfg = Settings::load_with_env(Some(&path), env)?.to_config()?;
        assert_eq!(cfg.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cfg.prefix, DEFAULT_PREFIX);
        assert_eq!(cfg.format.delimiter, b'\t');
        Ok(())
    }

    #[test]
    fn missing_explicit_settings_file_is_an_error() {
        let path = Path::new("/nonexistent/csvsplit.toml");
        assert!(Settings::load_with_env(Some(path), env_of(&[])).is_err());
    }
}
