use archive_audit_core::loader::STATUS_DELETED;
use archive_audit_core::storage::fixtures::*;
use archive_audit_core::storage::Database;
use archive_audit_core::Error;

/// Seed two owned archives: one with a duplicated folder link and a
/// duplicate file name, one with a folder linked under a deleted parent.
pub fn seed_demo(db: &Database) -> Result<(), Error> {
    db.insert_archive(1, "Family Photos")?;
    db.insert_account(100, "owner@example.com", "2020-05-01 00:00:00")?;
    db.insert_account_archive(100, 1, ROLE_OWNER)?;

    db.insert_folder(1, 1, "Home", FOLDER_ROOT_PRIVATE)?;
    db.insert_folder(2, 1, "Photos", FOLDER_PRIVATE)?;
    db.insert_folder_link(1, 1, None, LINK_PRIVATE)?;
    db.insert_folder_link(1, 2, Some(1), LINK_PRIVATE)?;
    db.insert_folder_link(1, 2, Some(1), LINK_PRIVATE)?;
    db.insert_record(10, 1, "beach.jpg")?;
    db.insert_record(11, 1, "beach.jpg")?;
    db.insert_record_link(1, 10, 1, LINK_PRIVATE)?;
    db.insert_record_link(1, 11, 1, LINK_PRIVATE)?;

    db.insert_archive(2, "Letters")?;
    db.insert_account(200, "writer@example.com", "2021-02-11 09:30:00")?;
    db.insert_account_archive(200, 2, ROLE_OWNER)?;

    db.insert_folder(20, 2, "Letters", FOLDER_ROOT_PRIVATE)?;
    db.insert_folder(21, 2, "1999", FOLDER_PRIVATE)?;
    db.insert_folder(22, 2, "Drafts", FOLDER_PRIVATE)?;
    db.insert_folder_link(2, 20, None, LINK_PRIVATE)?;
    db.insert_folder_link(2, 21, Some(20), LINK_PRIVATE)?;
    db.insert_folder_link(2, 22, Some(21), LINK_PRIVATE)?;
    db.set_status(StatusTable::Folder, 21, STATUS_DELETED)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_audit_core::{AppConfig, AuditEngine, SilentObserver};

    #[test]
    fn test_demo_store_flags_both_archives() {
        let db = Database::open_in_memory().unwrap();
        seed_demo(&db).unwrap();

        let report = AuditEngine::new(AppConfig::default())
            .run(&db, &SilentObserver)
            .unwrap();
        assert_eq!(report.archives_processed, 2);
        assert_eq!(report.with_duplicate_folders, 1);
        assert_eq!(report.with_duplicate_files, 1);
        assert_eq!(report.with_folder_structure_errors, 1);
        assert_eq!(report.findings.len(), 2);
    }
}
