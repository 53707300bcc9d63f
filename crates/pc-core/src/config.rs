use crate::error::{PrecompressError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions compressed by default: text assets emitted by a static build.
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["html", "js", "json", "css", "svg", "xml"];

/// Chunk size for the source reader and destination writer.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompressConfig {
    /// Filename suffixes (after the last `.`) selected by discovery.
    pub extensions: Vec<String>,
    pub buffer_size: usize,
}

impl Default for PrecompressConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl PrecompressConfig {
    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(extensions = ?config.extensions, buffer_size = config.buffer_size, "loaded precompress config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(PrecompressError::Config("extension set is empty".into()));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.contains('.') || e.contains('/'))
        {
            return Err(PrecompressError::Config(format!("invalid extension: {bad:?}")));
        }
        if self.buffer_size == 0 {
            return Err(PrecompressError::Config("buffer_size must be positive".into()));
        }
        Ok(())
    }

    /// True when the file name's suffix after the last `.` is a configured extension.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        // Undecodable bytes become U+FFFD, which never equals a configured
        // extension, and the position of the last `.` is preserved.
        match name.to_string_lossy().rsplit_once('.') {
            Some((_, ext)) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }
}

/// Output options of the static build adapter.
///
/// `assets` falls back to `pages` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOptions {
    #[serde(default = "default_pages")]
    pub pages: PathBuf,
    #[serde(default)]
    pub assets: Option<PathBuf>,
    #[serde(default)]
    pub precompress: bool,
}

fn default_pages() -> PathBuf {
    PathBuf::from("build")
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            assets: None,
            precompress: false,
        }
    }
}

impl AdapterOptions {
    pub fn assets_dir(&self) -> &Path {
        self.assets.as_deref().unwrap_or(&self.pages)
    }
}
