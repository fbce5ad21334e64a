use crate::config::DEFAULT_MAX_WALK_DEPTH;
use crate::duplicates::{self, DuplicatePath};
use crate::error::Error;
use crate::loader::{self, ExclusionPolicy, LoadedArchive};
use crate::model::ArchiveId;
use crate::observer::{AuditObserver, PathKind, SilentObserver};
use crate::records;
use crate::resolver;
use crate::source::RowSource;
use tracing::debug;

static SILENT: SilentObserver = SilentObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditState {
    Pending,
    Completed,
}

/// Outcome of auditing one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditResult {
    pub archive_id: ArchiveId,
    pub folder_count: usize,
    pub record_link_count: usize,
    pub folder_paths: Vec<String>,
    pub file_paths: Vec<String>,
    pub duplicate_folder_count: usize,
    pub duplicate_file_count: usize,
    pub duplicate_folder_paths: Vec<DuplicatePath>,
    pub duplicate_file_paths: Vec<DuplicatePath>,
    pub has_folder_structure_errors: bool,
    pub has_record_structure_errors: bool,
    pub dangling_folder_references: usize,
    pub cyclic_chains: usize,
    pub orphan_records: usize,
}

impl AuditResult {
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_folder_count > 0 || self.duplicate_file_count > 0
    }

    pub fn has_structure_errors(&self) -> bool {
        self.has_folder_structure_errors || self.has_record_structure_errors
    }

    pub fn is_flagged(&self) -> bool {
        self.has_duplicates() || self.has_structure_errors()
    }
}

/// Audits a single archive. Runs once: `Pending` until `run` succeeds, then
/// `Completed`.
pub struct ArchiveAuditor<'a, S: RowSource + ?Sized> {
    archive_id: ArchiveId,
    source: &'a S,
    policy: ExclusionPolicy,
    max_walk_depth: usize,
    observer: &'a dyn AuditObserver,
    state: AuditState,
    result: Option<AuditResult>,
}

impl<'a, S: RowSource + ?Sized> ArchiveAuditor<'a, S> {
    pub fn new(archive_id: ArchiveId, source: &'a S) -> Self {
        Self {
            archive_id,
            source,
            policy: ExclusionPolicy::default(),
            max_walk_depth: DEFAULT_MAX_WALK_DEPTH,
            observer: &SILENT,
            state: AuditState::Pending,
            result: None,
        }
    }

    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Most ancestors a folder may resolve through. Values below 1 are raised
    /// to 1 so children of roots always resolve.
    pub fn with_max_walk_depth(mut self, max_walk_depth: usize) -> Self {
        self.max_walk_depth = max_walk_depth.max(1);
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn AuditObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> AuditState {
        self.state
    }

    pub fn result(&self) -> Option<&AuditResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<AuditResult> {
        self.result
    }

    /// Load, resolve folders, count folder duplicates, resolve files, count
    /// file duplicates. A data source error aborts the audit and leaves the
    /// auditor `Pending`.
    pub fn run(&mut self) -> Result<&AuditResult, Error> {
        if self.state == AuditState::Completed {
            return Err(Error::AuditAlreadyCompleted {
                archive_id: self.archive_id,
            });
        }
        self.observer.on_archive_start(self.archive_id);

        let LoadedArchive {
            folders: mut tree,
            records: record_links,
        } = loader::load_archive(self.source, self.archive_id, &self.policy)?;

        let folder_resolution = resolver::resolve_folder_paths(
            &mut tree,
            self.archive_id,
            self.max_walk_depth,
            self.observer,
        );
        let duplicate_folder_paths = duplicates::find_duplicates(&folder_resolution.folder_paths);
        self.report_duplicates(PathKind::Folder, &duplicate_folder_paths);

        let record_resolution =
            records::resolve_record_paths(&tree, &record_links, self.archive_id, self.observer);
        let duplicate_file_paths = duplicates::find_duplicates(&record_resolution.file_paths);
        self.report_duplicates(PathKind::File, &duplicate_file_paths);

        debug!(
            "Archive {} resolved {} folder paths and {} file paths",
            self.archive_id,
            folder_resolution.folder_paths.len(),
            record_resolution.file_paths.len()
        );

        let result = AuditResult {
            archive_id: self.archive_id,
            folder_count: tree.len(),
            record_link_count: record_links.len(),
            has_folder_structure_errors: folder_resolution.has_structure_errors(),
            has_record_structure_errors: record_resolution.has_structure_errors(),
            dangling_folder_references: folder_resolution.dangling_references,
            cyclic_chains: folder_resolution.cyclic_chains,
            orphan_records: record_resolution.orphan_records,
            folder_paths: folder_resolution.folder_paths,
            file_paths: record_resolution.file_paths,
            duplicate_folder_count: duplicate_folder_paths.len(),
            duplicate_file_count: duplicate_file_paths.len(),
            duplicate_folder_paths,
            duplicate_file_paths,
        };

        self.state = AuditState::Completed;
        self.observer.on_archive_complete(&result);
        Ok(&*self.result.insert(result))
    }

    fn report_duplicates(&self, kind: PathKind, found: &[DuplicatePath]) {
        for duplicate in found {
            self.observer
                .on_duplicate_path(self.archive_id, kind, &duplicate.path, duplicate.occurrences);
        }
    }
}
