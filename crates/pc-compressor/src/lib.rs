//! Asset precompression: writes `.gz` and `.br` siblings for every text
//! asset under a build output directory.
//!
//! - `discovery`: recursive, dotfile-inclusive extension match
//! - `codec`: blocking gzip/Brotli stream encoders
//! - `job`: one (file, format) unit of work
//! - `compressor`: concurrent fan-out over a discovered file set
//! - `plan`: which build directories to compress, in order

pub mod codec;
pub mod compressor;
pub mod discovery;
pub mod job;
pub mod plan;
pub mod report;

pub use compressor::{compress, Compressor};
pub use discovery::discover;
pub use job::CompressionJob;
pub use plan::{PlanTarget, PrecompressPlan, TargetKind};
pub use report::{CompressionReport, JobOutcome};
