//! Fan-out of compression jobs over a discovered file set.

use crate::discovery::discover;
use crate::job::CompressionJob;
use crate::report::{CompressionReport, JobOutcome};
use pc_core::config::PrecompressConfig;
use pc_core::error::{CompressionError, Result};
use pc_core::format::Format;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::task::{self, JoinSet};

/// Compresses asset roots with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: PrecompressConfig,
}

impl Compressor {
    pub fn new(config: PrecompressConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PrecompressConfig {
        &self.config
    }

    /// Discover every matching file under `directory` and write its `.gz`
    /// and `.br` siblings.
    pub async fn compress(&self, directory: impl AsRef<Path>) -> Result<CompressionReport> {
        let directory = directory.as_ref();
        let files = discover(directory, &self.config).await?;
        tracing::info!(directory = %directory.display(), files = files.len(), "compressing");

        let outcomes = self.fan_out(&files).await?;

        let report = CompressionReport {
            root: directory.to_path_buf(),
            files: files.len(),
            outcomes,
        };
        tracing::info!(
            directory = %directory.display(),
            jobs = report.outcomes.len(),
            input_bytes = report.input_bytes(),
            gzip_bytes = report.output_bytes(Format::Gzip),
            brotli_bytes = report.output_bytes(Format::Brotli),
            "compression finished"
        );
        Ok(report)
    }

    /// Run one job per (file, format), all at once, and wait for every one.
    ///
    /// Fails with the first error in completion order, but only after the
    /// remaining jobs have finished, so no task outlives the call.
    pub async fn fan_out(&self, files: &[PathBuf]) -> std::result::Result<Vec<JobOutcome>, CompressionError> {
        let mut set = JoinSet::new();
        let mut scheduled = HashMap::with_capacity(files.len() * Format::ALL.len());
        for file in files {
            for format in Format::ALL {
                let job = CompressionJob::new(file.clone(), format);
                let handle = set.spawn(job.run(self.config.buffer_size));
                scheduled.insert(handle.id(), (file.clone(), format));
            }
        }
        drain(set, scheduled).await
    }
}

type JobResult = std::result::Result<JobOutcome, CompressionError>;

/// Await every task in `set`. A task that panics or is cancelled is charged
/// to the (file, format) it was scheduled for.
async fn drain(
    mut set: JoinSet<JobResult>,
    mut scheduled: HashMap<task::Id, (PathBuf, Format)>,
) -> std::result::Result<Vec<JobOutcome>, CompressionError> {
    let mut outcomes = Vec::with_capacity(scheduled.len());
    let mut first_error: Option<CompressionError> = None;
    while let Some(joined) = set.join_next_with_id().await {
        let result = match joined {
            Ok((id, result)) => {
                scheduled.remove(&id);
                result
            }
            Err(e) => match scheduled.remove(&e.id()) {
                Some((file, format)) => Err(CompressionError::task_failed(file, format, e.to_string())),
                None => {
                    tracing::error!(task = %e.id(), error = %e, "job task failed with no scheduled job");
                    continue;
                }
            },
        };
        match result {
            Ok(outcome) => {
                tracing::debug!(
                    source = %outcome.source.display(),
                    format = %outcome.format,
                    input_bytes = outcome.input_bytes,
                    output_bytes = outcome.output_bytes,
                    "job finished"
                );
                outcomes.push(outcome);
            }
            Err(err) => {
                tracing::warn!(error = %err, "job failed");
                first_error.get_or_insert(err);
            }
        }
    }

    // Every scheduled job must have reported.
    if let Some((file, format)) = scheduled.into_values().next() {
        let err = CompressionError::task_failed(file, format, "job did not report a result");
        tracing::error!(error = %err, "job lost");
        first_error.get_or_insert(err);
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(outcomes),
    }
}

/// Compress one asset root with the default extension set.
pub async fn compress(directory: impl AsRef<Path>) -> Result<CompressionReport> {
    Compressor::default().compress(directory).await
}
