//! A single (source file, format) compression job.

use crate::codec::{self, CountingReader};
use crate::report::JobOutcome;
use pc_core::error::CompressionError;
use pc_core::format::{EncoderSettings, Format};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompressionJob {
    pub source: PathBuf,
    pub format: Format,
}

impl CompressionJob {
    pub fn new(source: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            source: source.into(),
            format,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.format.output_path(&self.source)
    }

    /// Encoder settings from a fresh metadata query on the source.
    pub async fn settings(&self) -> io::Result<EncoderSettings> {
        let meta = tokio::fs::metadata(&self.source).await?;
        Ok(self.format.settings(meta.len()))
    }

    /// Stream the source through the codec into `<source>.<ext>`.
    ///
    /// The encoder runs on the blocking pool; file handles live only inside
    /// that closure and are closed when it returns, on every path.
    pub async fn run(self, buffer_size: usize) -> Result<JobOutcome, CompressionError> {
        let settings = self
            .settings()
            .await
            .map_err(|e| CompressionError::new(&self.source, self.format, e))?;

        let source = self.source.clone();
        let output = self.output_path();
        let (input_bytes, output_bytes) =
            tokio::task::spawn_blocking(move || stream_file(&source, &output, &settings, buffer_size))
                .await
                .map_err(|e| CompressionError::task_failed(&self.source, self.format, e.to_string()))?
                .map_err(|e| CompressionError::new(&self.source, self.format, e))?;

        Ok(JobOutcome {
            output: self.output_path(),
            source: self.source,
            format: self.format,
            input_bytes,
            output_bytes,
        })
    }
}

/// Returns (bytes read, bytes on disk).
fn stream_file(
    source: &Path,
    output: &Path,
    settings: &EncoderSettings,
    buffer_size: usize,
) -> io::Result<(u64, u64)> {
    // Open the source first so a vanished file leaves no empty artifact behind.
    let mut reader = CountingReader::new(BufReader::with_capacity(buffer_size, File::open(source)?));
    let writer = BufWriter::with_capacity(buffer_size, File::create(output)?);

    let writer = codec::encode(settings, &mut reader, writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;

    let output_bytes = file.metadata()?.len();
    Ok((reader.count(), output_bytes))
}
