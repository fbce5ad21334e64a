use crate::error::Error;
use crate::model::{ArchiveId, FolderTree, RecordLink};
use crate::source::{FolderRow, RecordRow, RowSource};
use tracing::debug;

pub const STATUS_DELETED: &str = "status.generic.deleted";
pub const STATUS_ERROR: &str = "status.generic.error";

/// Folder and link types that never take part in an audit.
///
/// Vault types are deprecated. Share types belong to a different archive
/// and would otherwise pull foreign folders into this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    pub folder_types: Vec<String>,
    pub link_types: Vec<String>,
    pub statuses: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            folder_types: vec![
                "type.folder.vault".to_string(),
                "type.folder.root.vault".to_string(),
                "type.folder.root.share".to_string(),
            ],
            link_types: vec![
                "type.folder_link.root.share".to_string(),
                "type.folder_link.share".to_string(),
                "type.folder_link.vault".to_string(),
            ],
            statuses: vec![STATUS_DELETED.to_string(), STATUS_ERROR.to_string()],
        }
    }
}

impl ExclusionPolicy {
    fn excludes_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s == status)
    }

    fn excludes_link_type(&self, link_type: &str) -> bool {
        self.link_types.iter().any(|t| t == link_type)
    }

    pub fn admits_folder(&self, row: &FolderRow) -> bool {
        !self.folder_types.iter().any(|t| *t == row.folder_type)
            && !self.excludes_link_type(&row.link_type)
            && !self.excludes_status(&row.status)
            && !self.excludes_status(&row.link_status)
    }

    pub fn admits_record(&self, row: &RecordRow) -> bool {
        !self.excludes_link_type(&row.link_type)
            && !self.excludes_status(&row.status)
            && !self.excludes_status(&row.link_status)
    }
}

/// Everything one audit needs, in the typed shape the resolvers consume.
#[derive(Debug, Default)]
pub struct LoadedArchive {
    pub folders: FolderTree,
    pub records: Vec<RecordLink>,
}

pub fn load_archive<S: RowSource + ?Sized>(
    source: &S,
    archive_id: ArchiveId,
    policy: &ExclusionPolicy,
) -> Result<LoadedArchive, Error> {
    let folders = load_folders(source, archive_id, policy)?;
    let records = load_records(source, archive_id, policy)?;
    debug!(
        "Loaded archive {}: {} folders, {} record links",
        archive_id,
        folders.len(),
        records.len()
    );
    Ok(LoadedArchive { folders, records })
}

pub fn load_folders<S: RowSource + ?Sized>(
    source: &S,
    archive_id: ArchiveId,
    policy: &ExclusionPolicy,
) -> Result<FolderTree, Error> {
    let mut tree = FolderTree::new();
    for row in source.folder_rows(archive_id)? {
        if policy.admits_folder(&row) {
            tree.insert_link(row.folder_id, &row.name, row.parent_folder_id);
        }
    }
    Ok(tree)
}

pub fn load_records<S: RowSource + ?Sized>(
    source: &S,
    archive_id: ArchiveId,
    policy: &ExclusionPolicy,
) -> Result<Vec<RecordLink>, Error> {
    Ok(source
        .record_rows(archive_id)?
        .into_iter()
        .filter(|row| policy.admits_record(row))
        .map(|row| RecordLink {
            record_id: row.record_id,
            name: row.name,
            parent_folder_id: row.parent_folder_id,
        })
        .collect())
}
