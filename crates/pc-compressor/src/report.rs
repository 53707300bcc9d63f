//! Outcome records for finished jobs and whole compress calls.

use pc_core::format::Format;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One successfully written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub format: Format,
    /// Bytes actually streamed from the source.
    pub input_bytes: u64,
    /// Size of the artifact on disk.
    pub output_bytes: u64,
}

impl JobOutcome {
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 1.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Result of compressing one asset root.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub root: PathBuf,
    pub files: usize,
    pub outcomes: Vec<JobOutcome>,
}

impl CompressionReport {
    /// Total source bytes, counted once per file (not once per format).
    pub fn input_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|o| o.format == Format::Gzip)
            .map(|o| o.input_bytes)
            .sum()
    }

    pub fn output_bytes(&self, format: Format) -> u64 {
        self.outcomes
            .iter()
            .filter(|o| o.format == format)
            .map(|o| o.output_bytes)
            .sum()
    }

    /// Compressed/original size for one format across the whole root.
    pub fn ratio(&self, format: Format) -> f64 {
        let input = self.input_bytes();
        if input == 0 {
            return 1.0;
        }
        self.output_bytes(format) as f64 / input as f64
    }

    pub fn outcomes_for<'a>(&'a self, source: &'a Path) -> impl Iterator<Item = &'a JobOutcome> + 'a {
        self.outcomes.iter().filter(move |o| o.source == source)
    }
}
