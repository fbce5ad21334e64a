//! Writers for building small archive stores, used by tests and by the
//! `seed-demo` CLI command.

use super::sqlite::Database;
use crate::model::{ArchiveId, FolderId, RecordId};
use rusqlite::{params, Result};

pub const STATUS_OK: &str = "status.generic.ok";
pub const ROLE_OWNER: &str = "access.role.owner";
pub const ACCOUNT_STANDARD: &str = "type.account.standard";
pub const FOLDER_ROOT_PRIVATE: &str = "type.folder.root.private";
pub const FOLDER_PRIVATE: &str = "type.folder.private";
pub const LINK_PRIVATE: &str = "type.folder_link.private";

impl Database {
    pub fn insert_archive(&self, archive_id: ArchiveId, display_name: &str) -> Result<()> {
        self.connection().execute(
            "INSERT INTO archive (archive_id, display_name, type, status) \
             VALUES (?1, ?2, 'type.archive.person', ?3)",
            params![archive_id, display_name, STATUS_OK],
        )?;
        Ok(())
    }

    pub fn insert_account(&self, account_id: i64, email: &str, created_dt: &str) -> Result<()> {
        self.connection().execute(
            "INSERT INTO account (account_id, primary_email, type, created_dt) \
             VALUES (?1, ?2, ?3, ?4)",
            params![account_id, email, ACCOUNT_STANDARD, created_dt],
        )?;
        Ok(())
    }

    pub fn insert_account_archive(
        &self,
        account_id: i64,
        archive_id: ArchiveId,
        access_role: &str,
    ) -> Result<()> {
        self.connection().execute(
            "INSERT INTO account_archive (account_id, archive_id, access_role, status) \
             VALUES (?1, ?2, ?3, ?4)",
            params![account_id, archive_id, access_role, STATUS_OK],
        )?;
        Ok(())
    }

    pub fn insert_folder(
        &self,
        folder_id: FolderId,
        archive_id: ArchiveId,
        name: &str,
        folder_type: &str,
    ) -> Result<()> {
        self.connection().execute(
            "INSERT INTO folder (folder_id, archive_id, display_name, type, status) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![folder_id, archive_id, name, folder_type, STATUS_OK],
        )?;
        Ok(())
    }

    /// Link a folder under `parent_folder_id`, or as a root when `None`.
    pub fn insert_folder_link(
        &self,
        archive_id: ArchiveId,
        folder_id: FolderId,
        parent_folder_id: Option<FolderId>,
        link_type: &str,
    ) -> Result<i64> {
        self.connection().execute(
            "INSERT INTO folder_link (archive_id, folder_id, parent_folder_id, type, status) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![archive_id, folder_id, parent_folder_id, link_type, STATUS_OK],
        )?;
        Ok(self.connection().last_insert_rowid())
    }

    pub fn insert_record(
        &self,
        record_id: RecordId,
        archive_id: ArchiveId,
        name: &str,
    ) -> Result<()> {
        self.connection().execute(
            "INSERT INTO record (record_id, archive_id, display_name, status) \
             VALUES (?1, ?2, ?3, ?4)",
            params![record_id, archive_id, name, STATUS_OK],
        )?;
        Ok(())
    }

    pub fn insert_record_link(
        &self,
        archive_id: ArchiveId,
        record_id: RecordId,
        parent_folder_id: FolderId,
        link_type: &str,
    ) -> Result<i64> {
        self.connection().execute(
            "INSERT INTO folder_link (archive_id, record_id, parent_folder_id, type, status) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![archive_id, record_id, parent_folder_id, link_type, STATUS_OK],
        )?;
        Ok(self.connection().last_insert_rowid())
    }

    /// Change the status of one row, e.g. to mark a folder or link deleted.
    pub fn set_status(&self, table: StatusTable, id: i64, status: &str) -> Result<usize> {
        let sql = match table {
            StatusTable::Folder => "UPDATE folder SET status = ?1 WHERE folder_id = ?2",
            StatusTable::Record => "UPDATE record SET status = ?1 WHERE record_id = ?2",
            StatusTable::FolderLink => {
                "UPDATE folder_link SET status = ?1 WHERE folder_link_id = ?2"
            }
            StatusTable::Archive => "UPDATE archive SET status = ?1 WHERE archive_id = ?2",
        };
        self.connection().execute(sql, params![status, id])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTable {
    Archive,
    Folder,
    Record,
    FolderLink,
}
