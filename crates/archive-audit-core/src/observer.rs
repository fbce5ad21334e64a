use crate::auditor::AuditResult;
use crate::error::Error;
use crate::model::{ArchiveId, FolderId, RecordId};
use crate::report::RunReport;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Folder,
    File,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::Folder => write!(f, "folder"),
            PathKind::File => write!(f, "file"),
        }
    }
}

/// Structured audit events.
///
/// The resolvers call these as they go; what happens with them (logging,
/// progress bars, nothing) is up to the implementation. All methods have
/// default no-op implementations.
pub trait AuditObserver: Send + Sync {
    fn on_run_start(&self, _archive_count: usize) {}
    fn on_archive_start(&self, _archive_id: ArchiveId) {}
    fn on_dangling_reference(
        &self,
        _archive_id: ArchiveId,
        _folder_id: FolderId,
        _missing_id: FolderId,
    ) {
    }
    fn on_cyclic_chain(
        &self,
        _archive_id: ArchiveId,
        _folder_id: FolderId,
        _repeated_id: FolderId,
    ) {
    }
    fn on_walk_depth_exceeded(
        &self,
        _archive_id: ArchiveId,
        _folder_id: FolderId,
        _max_depth: usize,
    ) {
    }
    fn on_orphan_record(
        &self,
        _archive_id: ArchiveId,
        _record_id: RecordId,
        _parent_folder_id: FolderId,
    ) {
    }
    fn on_duplicate_path(
        &self,
        _archive_id: ArchiveId,
        _kind: PathKind,
        _path: &str,
        _occurrences: usize,
    ) {
    }
    fn on_archive_complete(&self, _result: &AuditResult) {}
    fn on_archive_failed(&self, _archive_id: ArchiveId, _error: &Error) {}
    fn on_run_complete(&self, _report: &RunReport) {}
}

/// No-op observer for silent operation.
pub struct SilentObserver;

impl AuditObserver for SilentObserver {}

/// Observer that forwards every event to `tracing`.
pub struct TracingObserver;

impl AuditObserver for TracingObserver {
    fn on_run_start(&self, archive_count: usize) {
        info!("Auditing {} archives", archive_count);
    }

    fn on_archive_start(&self, archive_id: ArchiveId) {
        debug!("Finding duplicate paths for archive {}", archive_id);
    }

    fn on_dangling_reference(
        &self,
        archive_id: ArchiveId,
        folder_id: FolderId,
        missing_id: FolderId,
    ) {
        warn!(
            "Missing parent {} of folder {} in archive {}",
            missing_id, folder_id, archive_id
        );
    }

    fn on_cyclic_chain(&self, archive_id: ArchiveId, folder_id: FolderId, repeated_id: FolderId) {
        warn!(
            "Cyclic parent chain from folder {} (repeats {}) in archive {}",
            folder_id, repeated_id, archive_id
        );
    }

    fn on_walk_depth_exceeded(
        &self,
        archive_id: ArchiveId,
        folder_id: FolderId,
        max_depth: usize,
    ) {
        warn!(
            "Parent chain from folder {} deeper than {} in archive {}",
            folder_id, max_depth, archive_id
        );
    }

    fn on_orphan_record(
        &self,
        archive_id: ArchiveId,
        record_id: RecordId,
        parent_folder_id: FolderId,
    ) {
        warn!(
            "Record {} links to missing folder {} in archive {}",
            record_id, parent_folder_id, archive_id
        );
    }

    fn on_duplicate_path(
        &self,
        archive_id: ArchiveId,
        kind: PathKind,
        path: &str,
        occurrences: usize,
    ) {
        debug!(
            "Duplicate {} path {:?} x{} in archive {}",
            kind, path, occurrences, archive_id
        );
    }

    fn on_archive_complete(&self, result: &AuditResult) {
        if result.is_flagged() {
            info!(
                "Archive {}: {} duplicate folders, {} duplicate files, \
                 folder errors: {}, record errors: {}",
                result.archive_id,
                result.duplicate_folder_count,
                result.duplicate_file_count,
                result.has_folder_structure_errors,
                result.has_record_structure_errors,
            );
        }
    }

    fn on_archive_failed(&self, archive_id: ArchiveId, error: &Error) {
        warn!("Audit of archive {} failed: {}", archive_id, error);
    }

    fn on_run_complete(&self, report: &RunReport) {
        info!(
            "{} archives audited, {} with duplicate folders, {} with duplicate files, {} failed",
            report.archives_processed,
            report.with_duplicate_folders,
            report.with_duplicate_files,
            report.archives_failed,
        );
    }
}
