use napi_derive::napi;
use pc_compressor::{CompressionReport, Compressor, PrecompressPlan};
use pc_core::{AdapterOptions, Format, PrecompressConfig, PrecompressError};
use std::path::PathBuf;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Log to stderr, filtered by `PRECOMPRESS_LOG` (default `warn`).
fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_env("PRECOMPRESS_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn to_napi(err: PrecompressError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

#[napi]
pub fn ping() -> String {
    format!("pc-napi v{}", env!("CARGO_PKG_VERSION"))
}

#[napi]
pub fn compressed_extensions() -> Vec<String> {
    PrecompressConfig::default().extensions
}

// ========== Compression ==========

#[napi(object)]
pub struct CompressionSummary {
    pub directory: String,
    pub files: f64,
    pub input_bytes: f64,
    pub gzip_bytes: f64,
    pub brotli_bytes: f64,
}

impl From<&CompressionReport> for CompressionSummary {
    fn from(r: &CompressionReport) -> Self {
        Self {
            directory: r.root.to_string_lossy().to_string(),
            files: r.files as f64,
            input_bytes: r.input_bytes() as f64,
            gzip_bytes: r.output_bytes(Format::Gzip) as f64,
            brotli_bytes: r.output_bytes(Format::Brotli) as f64,
        }
    }
}

/// Write `.gz` and `.br` siblings for every text asset under `directory`.
#[napi]
pub async fn compress(directory: String) -> napi::Result<CompressionSummary> {
    init_logging();
    let report = pc_compressor::compress(&directory).await.map_err(to_napi)?;
    Ok(CompressionSummary::from(&report))
}

/// Compress the adapter's output directories: assets, then pages, or one
/// pass when they are the same directory.
#[napi]
pub async fn precompress(pages: Option<String>, assets: Option<String>) -> napi::Result<Vec<CompressionSummary>> {
    init_logging();
    let options = AdapterOptions {
        pages: pages.map(PathBuf::from).unwrap_or_else(|| AdapterOptions::default().pages),
        assets: assets.map(PathBuf::from),
        precompress: true,
    };
    let reports = PrecompressPlan::from_options(&options)
        .run(&Compressor::default())
        .await
        .map_err(to_napi)?;
    Ok(reports.iter().map(CompressionSummary::from).collect())
}
