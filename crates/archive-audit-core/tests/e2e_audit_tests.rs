use std::sync::Mutex;

use archive_audit_core::loader::{ExclusionPolicy, STATUS_DELETED};
use archive_audit_core::storage::fixtures::*;
use archive_audit_core::storage::Database;
use archive_audit_core::{
    AppConfig, ArchiveAuditor, AuditEngine, AuditObserver, PathKind, SilentObserver,
};

/// Archive 1 layout:
///   /Home                    (root)
///   /Home/Photos             linked twice under Home  ← duplicate folder path
///   /Home/Docs
///   /Home/Docs/report.pdf    two distinct records      ← duplicate file path
///   /Home/Docs/notes.txt
fn seed_duplicated_archive(db: &Database, archive_id: i64) {
    db.insert_folder(1, archive_id, "Home", FOLDER_ROOT_PRIVATE).unwrap();
    db.insert_folder(2, archive_id, "Photos", FOLDER_PRIVATE).unwrap();
    db.insert_folder(3, archive_id, "Docs", FOLDER_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 1, None, LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 2, Some(1), LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 2, Some(1), LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 3, Some(1), LINK_PRIVATE).unwrap();

    db.insert_record(10, archive_id, "report.pdf").unwrap();
    db.insert_record(11, archive_id, "report.pdf").unwrap();
    db.insert_record(12, archive_id, "notes.txt").unwrap();
    db.insert_record_link(archive_id, 10, 3, LINK_PRIVATE).unwrap();
    db.insert_record_link(archive_id, 11, 3, LINK_PRIVATE).unwrap();
    db.insert_record_link(archive_id, 12, 3, LINK_PRIVATE).unwrap();
}

/// Archive 2: a clean tree with one folder linked to a deleted parent.
fn seed_dangling_archive(db: &Database, archive_id: i64) {
    db.insert_folder(20, archive_id, "Root", FOLDER_ROOT_PRIVATE).unwrap();
    db.insert_folder(21, archive_id, "Kept", FOLDER_PRIVATE).unwrap();
    db.insert_folder(22, archive_id, "Gone", FOLDER_PRIVATE).unwrap();
    db.insert_folder(23, archive_id, "Stray", FOLDER_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 20, None, LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 21, Some(20), LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 22, Some(20), LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 23, Some(20), LINK_PRIVATE).unwrap();
    db.insert_folder_link(archive_id, 23, Some(22), LINK_PRIVATE).unwrap();
    db.set_status(StatusTable::Folder, 22, STATUS_DELETED).unwrap();

    db.insert_record(30, archive_id, "a.txt").unwrap();
    db.insert_record_link(archive_id, 30, 22, LINK_PRIVATE).unwrap();
}

fn add_owner(db: &Database, archive_id: i64, account_id: i64, email: &str) {
    db.insert_archive(archive_id, &format!("Archive {}", archive_id))
        .unwrap();
    db.insert_account(account_id, email, "2020-05-01 00:00:00")
        .unwrap();
    db.insert_account_archive(account_id, archive_id, ROLE_OWNER)
        .unwrap();
}

#[derive(Default)]
struct EventLog {
    duplicates: Mutex<Vec<(i64, PathKind, String, usize)>>,
    dangling: Mutex<Vec<(i64, i64, i64)>>,
    failures: Mutex<Vec<i64>>,
}

impl AuditObserver for EventLog {
    fn on_dangling_reference(&self, archive_id: i64, folder_id: i64, missing_id: i64) {
        self.dangling
            .lock()
            .unwrap()
            .push((archive_id, folder_id, missing_id));
    }

    fn on_duplicate_path(&self, archive_id: i64, kind: PathKind, path: &str, occurrences: usize) {
        self.duplicates
            .lock()
            .unwrap()
            .push((archive_id, kind, path.to_string(), occurrences));
    }

    fn on_archive_failed(&self, archive_id: i64, _error: &archive_audit_core::Error) {
        self.failures.lock().unwrap().push(archive_id);
    }
}

#[test]
fn test_single_archive_audit_against_sqlite() {
    let db = Database::open_in_memory().unwrap();
    seed_duplicated_archive(&db, 1);

    let mut auditor = ArchiveAuditor::new(1, &db);
    let result = auditor.run().unwrap();

    assert_eq!(
        result.folder_paths,
        vec!["/Home", "/Home/Photos", "/Home/Photos", "/Home/Docs"]
    );
    assert_eq!(result.duplicate_folder_count, 1);
    assert_eq!(result.duplicate_file_count, 1);
    assert_eq!(result.duplicate_file_paths[0].path, "/Home/Docs/report.pdf");
    assert_eq!(result.duplicate_file_paths[0].occurrences, 2);
    assert!(!result.has_structure_errors());
}

#[test]
fn test_deleted_parent_becomes_dangling_reference() {
    let db = Database::open_in_memory().unwrap();
    seed_dangling_archive(&db, 2);
    let events = EventLog::default();

    let mut auditor = ArchiveAuditor::new(2, &db).with_observer(&events);
    let result = auditor.run().unwrap();

    assert_eq!(result.folder_paths, vec!["/Root", "/Root/Kept", "/Root/Stray"]);
    assert!(result.has_folder_structure_errors);
    assert_eq!(result.dangling_folder_references, 1);
    // The record under the deleted folder has no loaded parent.
    assert!(result.has_record_structure_errors);
    assert!(result.file_paths.is_empty());
    assert_eq!(*events.dangling.lock().unwrap(), vec![(2, 23, 22)]);
}

#[test]
fn test_permissive_policy_loads_deleted_rows() {
    let db = Database::open_in_memory().unwrap();
    seed_dangling_archive(&db, 2);
    let policy = ExclusionPolicy {
        statuses: vec![],
        ..ExclusionPolicy::default()
    };

    let mut auditor = ArchiveAuditor::new(2, &db).with_policy(policy);
    let result = auditor.run().unwrap();

    assert!(!result.has_structure_errors());
    assert_eq!(result.file_paths, vec!["/Root/Gone/a.txt"]);
}

#[test]
fn test_engine_policy_reaches_every_auditor() {
    let db = Database::open_in_memory().unwrap();
    add_owner(&db, 2, 200, "dangling@example.com");
    seed_dangling_archive(&db, 2);
    let policy = ExclusionPolicy {
        statuses: vec![],
        ..ExclusionPolicy::default()
    };

    let engine = AuditEngine::new(AppConfig::default()).with_policy(policy);
    let single = engine.audit_archive(&db, 2, &SilentObserver).unwrap();
    assert!(!single.has_structure_errors());
    assert_eq!(single.file_paths, vec!["/Root/Gone/a.txt"]);

    let report = engine.run(&db, &SilentObserver).unwrap();
    assert_eq!(report.archives_processed, 1);
    assert_eq!(report.with_folder_structure_errors, 0);
    assert_eq!(report.with_record_structure_errors, 0);
    assert!(report.findings.is_empty());
}

#[test]
fn test_engine_run_tallies_every_archive() {
    let db = Database::open_in_memory().unwrap();
    add_owner(&db, 1, 100, "dupes@example.com");
    add_owner(&db, 2, 200, "dangling@example.com");
    add_owner(&db, 3, 300, "empty@example.com");
    seed_duplicated_archive(&db, 1);
    seed_dangling_archive(&db, 2);
    let events = EventLog::default();

    let engine = AuditEngine::new(AppConfig::default());
    let report = engine.run(&db, &events).unwrap();

    assert_eq!(report.archives_processed, 3);
    assert_eq!(report.archives_failed, 0);
    assert_eq!(report.with_duplicate_folders, 1);
    assert_eq!(report.with_duplicate_files, 1);
    assert_eq!(report.with_folder_structure_errors, 1);
    assert_eq!(report.with_record_structure_errors, 1);

    // Findings follow selection order: newest archive first, clean archive 3 omitted.
    let flagged: Vec<i64> = report.findings.iter().map(|f| f.archive_id).collect();
    assert_eq!(flagged, vec![2, 1]);
    assert_eq!(
        report.findings[1].owner_email.as_deref(),
        Some("dupes@example.com")
    );

    let duplicates = events.duplicates.lock().unwrap();
    assert!(duplicates.contains(&(1, PathKind::Folder, "/Home/Photos".to_string(), 2)));
    assert!(duplicates.contains(&(1, PathKind::File, "/Home/Docs/report.pdf".to_string(), 2)));
}

#[test]
fn test_engine_survives_failing_data_source() {
    let db = Database::open_in_memory().unwrap();
    add_owner(&db, 1, 100, "one@example.com");
    add_owner(&db, 2, 200, "two@example.com");
    seed_duplicated_archive(&db, 1);
    db.connection().execute_batch("DROP TABLE record;").unwrap();
    let events = EventLog::default();

    let engine = AuditEngine::new(AppConfig::default());
    let report = engine.run(&db, &events).unwrap();

    assert_eq!(report.archives_processed, 2);
    assert_eq!(report.archives_failed, 2);
    assert!(report.findings.is_empty());
    assert_eq!(*events.failures.lock().unwrap(), vec![2, 1]);
}

#[test]
fn test_engine_honors_archive_limit() {
    let db = Database::open_in_memory().unwrap();
    add_owner(&db, 1, 100, "one@example.com");
    add_owner(&db, 2, 200, "two@example.com");
    seed_duplicated_archive(&db, 1);

    let config = AppConfig {
        archive_limit: Some(1),
        ..AppConfig::default()
    };
    let report = AuditEngine::new(config)
        .run(&db, &SilentObserver)
        .unwrap();

    assert_eq!(report.archives_processed, 1);
    assert!(report.findings.is_empty());
}

#[test]
fn test_cyclic_links_in_store_do_not_hang() {
    let db = Database::open_in_memory().unwrap();
    db.insert_folder(1, 9, "a", FOLDER_PRIVATE).unwrap();
    db.insert_folder(2, 9, "b", FOLDER_PRIVATE).unwrap();
    db.insert_folder_link(9, 1, Some(2), LINK_PRIVATE).unwrap();
    db.insert_folder_link(9, 2, Some(1), LINK_PRIVATE).unwrap();

    let engine = AuditEngine::new(AppConfig::default());
    let result = engine.audit_archive(&db, 9, &SilentObserver).unwrap();

    assert!(result.folder_paths.is_empty());
    assert_eq!(result.cyclic_chains, 2);
    assert!(result.has_folder_structure_errors);
}
