use crate::auditor::AuditResult;
use crate::duplicates::DuplicatePath;
use crate::error::Error;
use crate::model::ArchiveId;
use crate::source::ArchiveOwner;
use serde::Serialize;

/// One archive that showed duplicates or structural errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveFinding {
    pub archive_id: ArchiveId,
    pub owner_email: Option<String>,
    pub display_name: Option<String>,
    pub duplicate_folder_count: usize,
    pub duplicate_file_count: usize,
    pub has_folder_structure_errors: bool,
    pub has_record_structure_errors: bool,
    pub duplicate_folder_paths: Vec<DuplicatePath>,
    pub duplicate_file_paths: Vec<DuplicatePath>,
}

/// An archive whose rows could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveFailure {
    pub archive_id: ArchiveId,
    pub owner_email: Option<String>,
    pub error: String,
}

/// Aggregate tally of one audit run, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub archives_processed: usize,
    pub archives_failed: usize,
    pub with_duplicate_folders: usize,
    pub with_duplicate_files: usize,
    pub with_folder_structure_errors: usize,
    pub with_record_structure_errors: usize,
    pub findings: Vec<ArchiveFinding>,
    pub failures: Vec<ArchiveFailure>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, owner: &ArchiveOwner, result: &AuditResult) {
        self.archives_processed += 1;
        if result.duplicate_folder_count > 0 {
            self.with_duplicate_folders += 1;
        }
        if result.duplicate_file_count > 0 {
            self.with_duplicate_files += 1;
        }
        if result.has_folder_structure_errors {
            self.with_folder_structure_errors += 1;
        }
        if result.has_record_structure_errors {
            self.with_record_structure_errors += 1;
        }
        if result.is_flagged() {
            self.findings.push(ArchiveFinding {
                archive_id: result.archive_id,
                owner_email: owner.email.clone(),
                display_name: owner.display_name.clone(),
                duplicate_folder_count: result.duplicate_folder_count,
                duplicate_file_count: result.duplicate_file_count,
                has_folder_structure_errors: result.has_folder_structure_errors,
                has_record_structure_errors: result.has_record_structure_errors,
                duplicate_folder_paths: result.duplicate_folder_paths.clone(),
                duplicate_file_paths: result.duplicate_file_paths.clone(),
            });
        }
    }

    pub fn record_failure(&mut self, archive_id: ArchiveId, owner: &ArchiveOwner, error: &Error) {
        self.archives_processed += 1;
        self.archives_failed += 1;
        self.failures.push(ArchiveFailure {
            archive_id,
            owner_email: owner.email.clone(),
            error: error.to_string(),
        });
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(email: &str) -> ArchiveOwner {
        ArchiveOwner {
            email: Some(email.to_string()),
            display_name: None,
        }
    }

    #[test]
    fn test_clean_archive_counts_but_adds_no_finding() {
        let mut report = RunReport::new();
        report.record(&owner("a@example.com"), &AuditResult::default());
        assert_eq!(report.archives_processed, 1);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_flagged_archive_tallies_each_category() {
        let mut report = RunReport::new();
        let result = AuditResult {
            archive_id: 3,
            duplicate_folder_count: 2,
            has_record_structure_errors: true,
            ..AuditResult::default()
        };
        report.record(&owner("b@example.com"), &result);

        assert_eq!(report.with_duplicate_folders, 1);
        assert_eq!(report.with_duplicate_files, 0);
        assert_eq!(report.with_record_structure_errors, 1);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].owner_email.as_deref(), Some("b@example.com"));
    }

    #[test]
    fn test_failures_are_kept_apart_from_findings() {
        let mut report = RunReport::new();
        report.record_failure(9, &owner("c@example.com"), &Error::Other("timeout".to_string()));
        assert_eq!(report.archives_processed, 1);
        assert_eq!(report.archives_failed, 1);
        assert_eq!(report.failures[0].error, "timeout");

        let json = report.to_json().unwrap();
        assert!(json.contains("\"archives_failed\": 1"));
    }
}
