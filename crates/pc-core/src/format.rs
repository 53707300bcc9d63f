//! Output formats and the fixed encoder parameter table for each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Highest gzip level ("best compression, not best speed").
pub const GZIP_BEST_LEVEL: u32 = 9;
/// Highest Brotli quality.
pub const BROTLI_MAX_QUALITY: u32 = 11;

/// Compressed sibling format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Gzip,
    Brotli,
}

impl Format {
    /// Every format, in the order jobs are scheduled for a file.
    pub const ALL: [Format; 2] = [Format::Gzip, Format::Brotli];

    /// File extension appended to the source path, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Brotli => "br",
        }
    }

    /// `<source>.<ext>`. The source extension is kept, never replaced.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let mut name = source.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }

    /// Encoder parameters for a source of `source_len` bytes.
    ///
    /// `source_len` must come from a metadata query made when the job starts.
    pub fn settings(&self, source_len: u64) -> EncoderSettings {
        match self {
            Self::Gzip => EncoderSettings::Gzip {
                level: GZIP_BEST_LEVEL,
            },
            Self::Brotli => EncoderSettings::Brotli {
                mode: BrotliMode::Text,
                quality: BROTLI_MAX_QUALITY,
                size_hint: source_len,
            },
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gzip => f.write_str("gzip"),
            Self::Brotli => f.write_str("brotli"),
        }
    }
}

/// Brotli content mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrotliMode {
    Text,
}

/// Exact codec parameters for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "codec", rename_all = "lowercase")]
pub enum EncoderSettings {
    Gzip {
        level: u32,
    },
    Brotli {
        mode: BrotliMode,
        quality: u32,
        size_hint: u64,
    },
}

impl EncoderSettings {
    pub fn format(&self) -> Format {
        match self {
            Self::Gzip { .. } => Format::Gzip,
            Self::Brotli { .. } => Format::Brotli,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(Format::Gzip.extension(), "gz");
        assert_eq!(Format::Brotli.extension(), "br");
    }

    #[test]
    fn test_output_path_appends() {
        let src = Path::new("/out/_app/immutable/start.abc123.js");
        assert_eq!(
            Format::Gzip.output_path(src),
            PathBuf::from("/out/_app/immutable/start.abc123.js.gz")
        );
        assert_eq!(
            Format::Brotli.output_path(src),
            PathBuf::from("/out/_app/immutable/start.abc123.js.br")
        );
    }

    #[test]
    fn test_output_path_hidden_file() {
        let src = Path::new("/out/.well-known/manifest.json");
        assert_eq!(
            Format::Gzip.output_path(src),
            PathBuf::from("/out/.well-known/manifest.json.gz")
        );
    }

    #[test]
    fn test_gzip_settings_best_level() {
        assert_eq!(Format::Gzip.settings(12345), EncoderSettings::Gzip { level: 9 });
    }

    #[test]
    fn test_brotli_settings_carry_size_hint() {
        match Format::Brotli.settings(4096) {
            EncoderSettings::Brotli { mode, quality, size_hint } => {
                assert_eq!(mode, BrotliMode::Text);
                assert_eq!(quality, 11);
                assert_eq!(size_hint, 4096);
            }
            other => panic!("unexpected settings: {other:?}"),
        }
    }

    #[test]
    fn test_settings_format_matches() {
        for f in Format::ALL {
            assert_eq!(f.settings(1).format(), f);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Format::Gzip.to_string(), "gzip");
        assert_eq!(Format::Brotli.to_string(), "brotli");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Format::Brotli).unwrap(), "\"brotli\"");
        let f: Format = serde_json::from_str("\"gzip\"").unwrap();
        assert_eq!(f, Format::Gzip);
        let s = serde_json::to_value(Format::Brotli.settings(7)).unwrap();
        assert_eq!(s["codec"], "brotli");
        assert_eq!(s["size_hint"], 7);
    }
}
