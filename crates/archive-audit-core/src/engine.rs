use crate::auditor::{ArchiveAuditor, AuditResult};
use crate::config::AppConfig;
use crate::error::Error;
use crate::loader::ExclusionPolicy;
use crate::model::ArchiveId;
use crate::observer::AuditObserver;
use crate::report::RunReport;
use crate::source::{ArchiveSelector, RowSource, SelectionCriteria};
use std::time::Instant;
use tracing::{debug, info};

pub struct AuditEngine {
    config: AppConfig,
    policy: ExclusionPolicy,
}

impl AuditEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            policy: ExclusionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Audit every selected archive in order, one at a time.
    ///
    /// A failing selector ends the run. A failing archive is recorded in the
    /// report and the run moves on to the next archive.
    pub fn run<D>(&self, store: &D, observer: &dyn AuditObserver) -> Result<RunReport, Error>
    where
        D: ArchiveSelector + RowSource + ?Sized,
    {
        let criteria = SelectionCriteria::from(&self.config);
        let archives = store.select_archives(&criteria)?;
        info!("Selected {} archives for audit", archives.len());
        observer.on_run_start(archives.len());

        let start = Instant::now();
        let mut report = RunReport::new();
        for (archive_id, owner) in &archives {
            match self.audit_archive(store, *archive_id, observer) {
                Ok(result) => report.record(owner, &result),
                Err(err) => {
                    observer.on_archive_failed(*archive_id, &err);
                    report.record_failure(*archive_id, owner, &err);
                }
            }
        }
        debug!(
            "Audited {} archives in {:.2}s",
            report.archives_processed,
            start.elapsed().as_secs_f64()
        );

        observer.on_run_complete(&report);
        Ok(report)
    }

    pub fn audit_archive<D>(
        &self,
        source: &D,
        archive_id: ArchiveId,
        observer: &dyn AuditObserver,
    ) -> Result<AuditResult, Error>
    where
        D: RowSource + ?Sized,
    {
        let mut auditor = ArchiveAuditor::new(archive_id, source)
            .with_policy(self.policy.clone())
            .with_max_walk_depth(self.config.max_walk_depth)
            .with_observer(observer);
        auditor.run()?;
        auditor
            .into_result()
            .ok_or_else(|| Error::Other(format!("archive {} produced no result", archive_id)))
    }
}
