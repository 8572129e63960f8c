// ABOUTME: Progress and warning events emitted during an export
// ABOUTME: Observers receive events; the tracing observer turns them into log records

use crate::model::ExportResult;
use std::path::Path;
use tracing::{info, warn};

/// Where the export state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Start,
    MetadataFetched,
    TreeAvailable,
    TreeUnavailable,
    Finished,
}

#[derive(Debug)]
pub enum ExportEvent<'a> {
    Phase(ExportPhase),
    FetchingDeployment { id_or_url: &'a str },
    DeploymentResolved { id: &'a str },
    TreeUnavailable { reason: &'a str },
    FilesDiscovered { count: usize },
    MetadataSaved { path: &'a Path },
    FileWritten { path: &'a str },
    FileSkipped { path: &'a str, reason: &'a str },
    Finished { result: &'a ExportResult, output: &'a Path },
}

pub trait ExportObserver {
    fn on_event(&mut self, event: &ExportEvent<'_>);
}

/// Logs every event through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ExportObserver for TracingObserver {
    fn on_event(&mut self, event: &ExportEvent<'_>) {
        match event {
            ExportEvent::Phase(phase) => tracing::debug!(?phase, "export phase"),
            ExportEvent::FetchingDeployment { id_or_url } => {
                info!(deployment = %id_or_url, "Fetching deployment")
            }
            ExportEvent::DeploymentResolved { id } => info!(%id, "Deployment resolved"),
            ExportEvent::TreeUnavailable { reason } => warn!(
                %reason,
                "File tree unavailable (Git deployments may not expose one); saving metadata only"
            ),
            ExportEvent::FilesDiscovered { count } => info!(count, "Files to download"),
            ExportEvent::MetadataSaved { path } => {
                info!(path = %path.display(), "Deployment metadata saved")
            }
            ExportEvent::FileWritten { path } => info!(%path, "Wrote file"),
            ExportEvent::FileSkipped { path, reason } => warn!(%path, %reason, "Skipped file"),
            ExportEvent::Finished { result, output } => info!(
                output = %output.display(),
                persisted = result.persisted,
                skipped = result.skipped_count(),
                "Done"
            ),
        }
    }
}
