//! `.env`-style override file parsing.
//!
//! Format: one `KEY=VALUE` per line, blank lines and `#` comments ignored,
//! split on the first `=`, key and value trimmed, no quoting or escaping.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::error::ConfigError;

/// Location of an override file and whether its absence is fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    path: PathBuf,
    required: bool,
}

impl OverrideFile {
    /// A file that is silently treated as empty when missing
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// A file that must exist
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// Path to read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether absence is an error
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

/// Parsed contents of an override file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl EnvFile {
    /// An override set with no values (no file given, or file absent)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and parse the file. A missing optional file yields an empty set.
    pub fn read(file: &OverrideFile) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(file.path()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if file.is_required() {
                    return Err(ConfigError::MissingFile {
                        path: file.path().to_path_buf(),
                    });
                }
                warn!(path = %file.path().display(), "override file not found, using defaults and environment only");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: file.path().to_path_buf(),
                    source,
                });
            }
        };

        let parsed = Self::parse(file.path(), &contents)?;
        debug!(
            path = %file.path().display(),
            keys = parsed.values.len(),
            "override file parsed"
        );
        Ok(parsed)
    }

    /// Parse file contents; `path` is only used for error messages
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let mut values = HashMap::new();

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = || ConfigError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                content: raw.to_string(),
            };

            let (key, value) = line.split_once('=').ok_or_else(malformed)?;
            let key = key.trim();
            if key.is_empty() || key.chars().any(char::is_whitespace) {
                return Err(malformed());
            }

            // Later assignments win, as when the file is sourced by a shell
            values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Raw value for `key`, last occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Path the values were read from, if a file was actually read
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no key was defined
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(contents: &str) -> Result<EnvFile, ConfigError> {
        EnvFile::parse(Path::new(".env"), contents)
    }

    #[test]
    fn test_parse_pairs_comments_and_blanks() {
        let file = parse(
            "# BlueMind local overrides\n\nDEBUG=false\n   # indented comment\nAPP_NAME = Reef API  \n",
        )
        .unwrap();

        assert_eq!(file.len(), 2);
        assert_eq!(file.get("DEBUG"), Some("false"));
        assert_eq!(file.get("APP_NAME"), Some("Reef API"));
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let file = parse("DATABASE_URL=postgres://u:p@h/db?sslmode=require\n").unwrap();
        assert_eq!(
            file.get("DATABASE_URL"),
            Some("postgres://u:p@h/db?sslmode=require")
        );
    }

    #[test]
    fn test_empty_value_allowed() {
        let file = parse("ALLOWED_ORIGINS=\n").unwrap();
        assert_eq!(file.get("ALLOWED_ORIGINS"), Some(""));
    }

    #[test]
    fn test_quotes_are_literal() {
        let file = parse("APP_NAME=\"quoted\"\n").unwrap();
        assert_eq!(file.get("APP_NAME"), Some("\"quoted\""));
    }

    #[test]
    fn test_crlf_and_bom() {
        let file = parse("\u{feff}DEBUG=true\r\nAPI_VERSION=v2\r\n").unwrap();
        assert_eq!(file.get("DEBUG"), Some("true"));
        assert_eq!(file.get("API_VERSION"), Some("v2"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let file = parse("API_VERSION=v1\nAPI_VERSION=v2\n").unwrap();
        assert_eq!(file.get("API_VERSION"), Some("v2"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let file = parse("debug=false\n").unwrap();
        assert_eq!(file.get("DEBUG"), None);
        assert_eq!(file.get("debug"), Some("false"));
    }

    #[test]
    fn test_line_without_equals_names_line_number() {
        let result = parse("DEBUG=true\n\n# comment\nNOT_A_PAIR\n");

        match result.unwrap_err() {
            ConfigError::Parse { line, content, .. } => {
                assert_eq!(line, 4);
                assert_eq!(content, "NOT_A_PAIR");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = parse("=value\n");
        assert!(matches!(result, Err(ConfigError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_key_with_inner_whitespace_rejected() {
        let result = parse("A=1\nexport B=2\n");
        assert!(matches!(result, Err(ConfigError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_read_missing_optional_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = EnvFile::read(&OverrideFile::optional(dir.path().join(".env"))).unwrap();
        assert!(file.is_empty());
        assert_eq!(file.path(), None);
    }

    #[test]
    fn test_read_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let result = EnvFile::read(&OverrideFile::required(&path));

        match result.unwrap_err() {
            ConfigError::MissingFile { path: missing } => assert_eq!(missing, path),
            other => panic!("Expected MissingFile error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_existing_file() {
        let mut env_file = NamedTempFile::new().unwrap();
        writeln!(env_file, "SENSOR_UPDATE_INTERVAL=10").unwrap();
        env_file.flush().unwrap();

        let file = EnvFile::read(&OverrideFile::required(env_file.path())).unwrap();
        assert_eq!(file.get("SENSOR_UPDATE_INTERVAL"), Some("10"));
        assert_eq!(file.path(), Some(env_file.path()));
    }

    #[test]
    fn test_read_non_utf8_file_is_io_error() {
        let mut env_file = NamedTempFile::new().unwrap();
        env_file.write_all(&[0x41, 0x3d, 0xff, 0xfe, 0x0a]).unwrap();
        env_file.flush().unwrap();

        let result = EnvFile::read(&OverrideFile::optional(env_file.path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
