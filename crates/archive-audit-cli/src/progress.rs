use archive_audit_core::{
    AuditObserver, AuditResult, Error, PathKind, RunReport, TracingObserver,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI observer: one progress bar over the selected archives, with
/// structural events forwarded to tracing.
pub struct CliObserver {
    bar: Mutex<Option<ProgressBar>>,
    log: TracingObserver,
}

impl CliObserver {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            log: TracingObserver,
        }
    }

    fn advance(&self) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.inc(1);
        }
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl AuditObserver for CliObserver {
    fn on_run_start(&self, archive_count: usize) {
        let pb = ProgressBar::new(archive_count as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Auditing [{bar:30.cyan/dim}] \
                 {pos}/{len} archives ({eta} remaining)",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_archive_start(&self, archive_id: i64) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("archive {}", archive_id));
        }
        drop(guard);
        self.log.on_archive_start(archive_id);
    }

    fn on_dangling_reference(&self, archive_id: i64, folder_id: i64, missing_id: i64) {
        self.log.on_dangling_reference(archive_id, folder_id, missing_id);
    }

    fn on_cyclic_chain(&self, archive_id: i64, folder_id: i64, repeated_id: i64) {
        self.log.on_cyclic_chain(archive_id, folder_id, repeated_id);
    }

    fn on_walk_depth_exceeded(&self, archive_id: i64, folder_id: i64, max_depth: usize) {
        self.log.on_walk_depth_exceeded(archive_id, folder_id, max_depth);
    }

    fn on_orphan_record(&self, archive_id: i64, record_id: i64, parent_folder_id: i64) {
        self.log.on_orphan_record(archive_id, record_id, parent_folder_id);
    }

    fn on_duplicate_path(&self, archive_id: i64, kind: PathKind, path: &str, occurrences: usize) {
        self.log.on_duplicate_path(archive_id, kind, path, occurrences);
    }

    fn on_archive_complete(&self, result: &AuditResult) {
        self.advance();
        self.log.on_archive_complete(result);
    }

    fn on_archive_failed(&self, archive_id: i64, error: &Error) {
        self.advance();
        self.log.on_archive_failed(archive_id, error);
    }

    fn on_run_complete(&self, report: &RunReport) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Audit complete: {} archives, {} flagged, {} failed",
            report.archives_processed,
            report.findings.len(),
            report.archives_failed
        );
    }
}
