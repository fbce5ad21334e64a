use super::sqlite::Database;
use crate::error::Error;
use crate::model::ArchiveId;
use crate::source::{
    ArchiveOwner, ArchiveSelector, FolderRow, RecordRow, RowSource, SelectionCriteria,
};
use ahash::AHashMap;
use rusqlite::params;
use tracing::{debug, warn};

impl Database {
    // ── Archive selection ────────────────────────────────────────

    /// Owner rows for every auditable archive, newest archive first. An
    /// archive with several owners appears once per owner.
    pub fn get_owned_archives(
        &self,
        criteria: &SelectionCriteria,
    ) -> rusqlite::Result<Vec<(ArchiveId, ArchiveOwner)>> {
        let mut stmt = self.connection().prepare(
            "SELECT a.archive_id, acc.primary_email, a.display_name \
             FROM archive a \
             INNER JOIN account_archive aa ON a.archive_id = aa.archive_id \
             INNER JOIN account acc ON aa.account_id = acc.account_id \
             WHERE a.type IS NOT NULL \
               AND a.status = 'status.generic.ok' \
               AND aa.status = 'status.generic.ok' \
               AND aa.access_role = 'access.role.owner' \
               AND acc.type = 'type.account.standard' \
               AND acc.primary_email NOT LIKE ?1 \
               AND acc.created_dt > ?2 \
             ORDER BY a.archive_id DESC, aa.account_archive_id \
             LIMIT ?3",
        )?;

        let email_pattern = format!("%{}", criteria.excluded_email_domain);
        // SQLite treats a negative LIMIT as no limit.
        let limit = criteria.limit.unwrap_or(-1);

        let rows = stmt
            .query_map(
                params![email_pattern, criteria.created_after, limit],
                |row| {
                    Ok((
                        row.get(0)?,
                        ArchiveOwner {
                            email: row.get(1)?,
                            display_name: row.get(2)?,
                        },
                    ))
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Folders and records ──────────────────────────────────────

    pub fn get_folder_rows(&self, archive_id: ArchiveId) -> rusqlite::Result<Vec<FolderRow>> {
        let mut stmt = self.connection().prepare_cached(
            "SELECT f.folder_id, f.display_name, f.type, f.status, \
                    fl.type, fl.status, fl.parent_folder_id \
             FROM folder f \
             INNER JOIN folder_link fl ON f.folder_id = fl.folder_id \
             WHERE f.archive_id = ?1 \
             ORDER BY fl.folder_link_id",
        )?;

        let rows = stmt
            .query_map(params![archive_id], |row| {
                Ok(FolderRow {
                    folder_id: row.get(0)?,
                    name: row.get(1)?,
                    folder_type: row.get(2)?,
                    status: row.get(3)?,
                    link_type: row.get(4)?,
                    link_status: row.get(5)?,
                    parent_folder_id: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn get_record_rows(&self, archive_id: ArchiveId) -> rusqlite::Result<Vec<RecordRow>> {
        let mut stmt = self.connection().prepare_cached(
            "SELECT r.record_id, r.display_name, r.status, \
                    fl.type, fl.status, fl.parent_folder_id \
             FROM record r \
             INNER JOIN folder_link fl ON r.record_id = fl.record_id \
             WHERE r.archive_id = ?1 AND fl.parent_folder_id IS NOT NULL \
             ORDER BY fl.folder_link_id",
        )?;

        let rows = stmt
            .query_map(params![archive_id], |row| {
                Ok(RecordRow {
                    record_id: row.get(0)?,
                    name: row.get(1)?,
                    status: row.get(2)?,
                    link_type: row.get(3)?,
                    link_status: row.get(4)?,
                    parent_folder_id: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl RowSource for Database {
    fn folder_rows(&self, archive_id: ArchiveId) -> Result<Vec<FolderRow>, Error> {
        Ok(self.get_folder_rows(archive_id)?)
    }

    fn record_rows(&self, archive_id: ArchiveId) -> Result<Vec<RecordRow>, Error> {
        Ok(self.get_record_rows(archive_id)?)
    }
}

impl ArchiveSelector for Database {
    fn select_archives(
        &self,
        criteria: &SelectionCriteria,
    ) -> Result<Vec<(ArchiveId, ArchiveOwner)>, Error> {
        let rows = self.get_owned_archives(criteria)?;

        let mut archives: Vec<(ArchiveId, ArchiveOwner)> = Vec::with_capacity(rows.len());
        let mut positions: AHashMap<ArchiveId, usize> = AHashMap::new();
        for (archive_id, owner) in rows {
            match positions.get(&archive_id) {
                Some(&position) => {
                    warn!("Error on archive {}, more than one owner.", archive_id);
                    archives[position].1 = owner;
                }
                None => {
                    positions.insert(archive_id, archives.len());
                    archives.push((archive_id, owner));
                }
            }
        }

        debug!("Selected {} archives", archives.len());
        Ok(archives)
    }
}
