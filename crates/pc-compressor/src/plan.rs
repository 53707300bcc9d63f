//! Which output directories a build compresses, and in what order.

use crate::compressor::Compressor;
use crate::report::CompressionReport;
use pc_core::config::AdapterOptions;
use pc_core::error::Result;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Pages and assets share one directory.
    AssetsAndPages,
    Assets,
    Pages,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetsAndPages => f.write_str("assets and pages"),
            Self::Assets => f.write_str("assets"),
            Self::Pages => f.write_str("pages"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTarget {
    pub kind: TargetKind,
    pub dir: PathBuf,
}

/// Ordered list of distinct directories to compress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecompressPlan {
    pub targets: Vec<PlanTarget>,
}

impl PrecompressPlan {
    /// Empty unless `precompress` is set. A shared pages/assets directory is
    /// compressed once; otherwise assets go first, then pages.
    pub fn from_options(options: &AdapterOptions) -> Self {
        if !options.precompress {
            return Self::default();
        }
        let assets = options.assets_dir();
        let targets = if assets == options.pages.as_path() {
            vec![PlanTarget {
                kind: TargetKind::AssetsAndPages,
                dir: assets.to_path_buf(),
            }]
        } else {
            vec![
                PlanTarget {
                    kind: TargetKind::Assets,
                    dir: assets.to_path_buf(),
                },
                PlanTarget {
                    kind: TargetKind::Pages,
                    dir: options.pages.clone(),
                },
            ]
        };
        Self { targets }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Compress each target in order, stopping at the first failure.
    pub async fn run(&self, compressor: &Compressor) -> Result<Vec<CompressionReport>> {
        let mut reports = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            tracing::info!(dir = %target.dir.display(), "Compressing {}", target.kind);
            reports.push(compressor.compress(&target.dir).await?);
        }
        Ok(reports)
    }
}
