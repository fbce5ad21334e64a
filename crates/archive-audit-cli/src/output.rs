use archive_audit_core::{ArchiveFinding, AuditResult, RunReport};
use colored::*;
use std::error::Error;
use tracing::info;

pub fn print_summary(report: &RunReport) {
    info!(
        "{} archives audited, {} failed",
        format!("{}", report.archives_processed).green(),
        format!("{}", report.archives_failed).red(),
    );
    info!(
        "{} with duplicate folders, {} with duplicate files",
        format!("{}", report.with_duplicate_folders).red(),
        format!("{}", report.with_duplicate_files).red(),
    );
    info!(
        "{} with folder structure errors, {} with record structure errors",
        format!("{}", report.with_folder_structure_errors).yellow(),
        format!("{}", report.with_record_structure_errors).yellow(),
    );

    for finding in &report.findings {
        info!(
            "Archive {} ({}): {} duplicate folders, {} duplicate files",
            finding.archive_id,
            finding.owner_email.as_deref().unwrap_or("no owner"),
            finding.duplicate_folder_count,
            finding.duplicate_file_count,
        );
    }
    for failure in &report.failures {
        info!(
            "Archive {} could not be audited: {}",
            failure.archive_id,
            failure.error.red()
        );
    }
}

pub fn print_archive(result: &AuditResult) {
    println!(
        "Archive {}: {} folders, {} record links, {} folder paths, {} file paths",
        result.archive_id,
        result.folder_count,
        result.record_link_count,
        result.folder_paths.len(),
        result.file_paths.len(),
    );
    for duplicate in &result.duplicate_folder_paths {
        println!("  {} {} x{}", "folder".red(), duplicate.path, duplicate.occurrences);
    }
    for duplicate in &result.duplicate_file_paths {
        println!("  {} {} x{}", "file".red(), duplicate.path, duplicate.occurrences);
    }
    if result.has_folder_structure_errors {
        println!(
            "  {} {} dangling parents, {} cyclic or too-deep chains",
            "folder errors:".yellow(),
            result.dangling_folder_references,
            result.cyclic_chains,
        );
    }
    if result.has_record_structure_errors {
        println!(
            "  {} {} records linked to missing folders",
            "record errors:".yellow(),
            result.orphan_records,
        );
    }
}

const CSV_HEADER: [&str; 7] = [
    "archive_id",
    "owner_email",
    "display_name",
    "duplicate_folder_count",
    "duplicate_file_count",
    "has_folder_structure_errors",
    "has_record_structure_errors",
];

fn csv_row(finding: &ArchiveFinding) -> Vec<String> {
    vec![
        finding.archive_id.to_string(),
        finding.owner_email.clone().unwrap_or_default(),
        finding.display_name.clone().unwrap_or_default(),
        finding.duplicate_folder_count.to_string(),
        finding.duplicate_file_count.to_string(),
        finding.has_folder_structure_errors.to_string(),
        finding.has_record_structure_errors.to_string(),
    ]
}

/// Write one row per flagged archive.
pub fn write_csv(path: &str, report: &RunReport) -> Result<usize, Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for finding in &report.findings {
        writer.write_record(csv_row(finding))?;
    }
    writer.flush()?;
    Ok(report.findings.len())
}
