use crate::config::AppConfig;
use crate::error::Error;
use crate::model::{ArchiveId, FolderId, RecordId};
use serde::Serialize;

/// One folder row joined with one of its links. A folder with several links
/// yields several rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub folder_id: FolderId,
    pub name: String,
    pub folder_type: String,
    pub status: String,
    pub link_type: String,
    pub link_status: String,
    pub parent_folder_id: Option<FolderId>,
}

/// One record row joined with one of its folder links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub record_id: RecordId,
    pub name: String,
    pub status: String,
    pub link_type: String,
    pub link_status: String,
    pub parent_folder_id: FolderId,
}

/// Per-archive row access. Implementations issue one read for folders and
/// one for records, and are used sequentially.
pub trait RowSource {
    fn folder_rows(&self, archive_id: ArchiveId) -> Result<Vec<FolderRow>, Error>;
    fn record_rows(&self, archive_id: ArchiveId) -> Result<Vec<RecordRow>, Error>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveOwner {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Which archives a run should visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub excluded_email_domain: String,
    pub created_after: String,
    pub limit: Option<i64>,
}

impl From<&AppConfig> for SelectionCriteria {
    fn from(config: &AppConfig) -> Self {
        Self {
            excluded_email_domain: config.excluded_email_domain.clone(),
            created_after: config.created_after.clone(),
            limit: config.archive_limit,
        }
    }
}

pub trait ArchiveSelector {
    /// Archives to audit in report order, each listed once.
    fn select_archives(
        &self,
        criteria: &SelectionCriteria,
    ) -> Result<Vec<(ArchiveId, ArchiveOwner)>, Error>;
}
