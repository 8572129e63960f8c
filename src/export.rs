// ABOUTME: Export pipeline: metadata, file tree, per-file download and write
// ABOUTME: Metadata failures are fatal; tree and per-file failures degrade gracefully

use crate::{
    api::DeploymentSource,
    config::ExportConfig,
    flatten::flatten,
    model::{ExportResult, FlatEntry, SkippedEntry},
    observer::{ExportEvent, ExportObserver, ExportPhase},
    storage::OutputDir,
    Result,
};

/// Runs one export. Calls are issued strictly one at a time, in flattened
/// order. A failed file download is recorded in the result and never retried.
pub fn export_deployment(
    source: &dyn DeploymentSource,
    config: &ExportConfig,
    observer: &mut dyn ExportObserver,
) -> Result<ExportResult> {
    observer.on_event(&ExportEvent::Phase(ExportPhase::Start));
    config.validate()?;

    observer.on_event(&ExportEvent::FetchingDeployment {
        id_or_url: &config.deployment,
    });
    let deployment = source.get_deployment(&config.deployment)?;
    observer.on_event(&ExportEvent::Phase(ExportPhase::MetadataFetched));
    observer.on_event(&ExportEvent::DeploymentResolved { id: &deployment.id });

    let out = OutputDir::new(&config.output_dir);
    let mut result = ExportResult {
        deployment_id: deployment.id.clone(),
        ..ExportResult::default()
    };

    match source.list_file_tree(&deployment.id) {
        Err(e) => {
            let reason = e.to_string();
            observer.on_event(&ExportEvent::TreeUnavailable { reason: &reason });
            observer.on_event(&ExportEvent::Phase(ExportPhase::TreeUnavailable));

            let path = out.write_metadata_snapshot(&deployment)?;
            observer.on_event(&ExportEvent::MetadataSaved { path: &path });
        }
        Ok(tree) => {
            observer.on_event(&ExportEvent::Phase(ExportPhase::TreeAvailable));
            result.tree_available = true;

            let files = flatten(&tree);
            observer.on_event(&ExportEvent::FilesDiscovered { count: files.len() });

            let path = out.write_metadata_snapshot(&deployment)?;
            observer.on_event(&ExportEvent::MetadataSaved { path: &path });

            for entry in &files {
                result.attempted += 1;
                match download_file(source, &out, &deployment.id, entry) {
                    Ok(()) => {
                        result.persisted += 1;
                        observer.on_event(&ExportEvent::FileWritten { path: &entry.path });
                    }
                    Err(e) => {
                        let reason = e.to_string();
                        observer.on_event(&ExportEvent::FileSkipped {
                            path: &entry.path,
                            reason: &reason,
                        });
                        result.skipped.push(SkippedEntry {
                            path: entry.path.clone(),
                            reason,
                        });
                    }
                }
            }
        }
    }

    observer.on_event(&ExportEvent::Phase(ExportPhase::Finished));
    observer.on_event(&ExportEvent::Finished {
        result: &result,
        output: &out.root,
    });

    Ok(result)
}

fn download_file(
    source: &dyn DeploymentSource,
    out: &OutputDir,
    deployment_id: &str,
    entry: &FlatEntry,
) -> Result<()> {
    // Reject unsafe paths before spending a request on them
    out.resolve(&entry.path)?;
    let content = source.get_file_content(deployment_id, &entry.content_id)?;
    out.write_file(&entry.path, content.as_bytes())?;
    Ok(())
}
