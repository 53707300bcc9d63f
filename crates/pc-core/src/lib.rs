pub mod config;
pub mod error;
pub mod format;

pub use config::{AdapterOptions, PrecompressConfig, DEFAULT_BUFFER_SIZE, DEFAULT_EXTENSIONS};
pub use error::{
    CompressionError, CompressionErrorKind, DiscoveryError, DiscoveryErrorKind, PrecompressError, Result,
};
pub use format::{BrotliMode, EncoderSettings, Format};
