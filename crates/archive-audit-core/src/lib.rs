pub mod auditor;
pub mod config;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod observer;
pub mod records;
pub mod report;
pub mod resolver;
pub mod source;
pub mod storage;

pub use auditor::{ArchiveAuditor, AuditResult, AuditState};
pub use config::AppConfig;
pub use engine::AuditEngine;
pub use error::Error;
pub use observer::{AuditObserver, PathKind, SilentObserver, TracingObserver};
pub use report::{ArchiveFinding, RunReport};
pub use source::{ArchiveOwner, ArchiveSelector, RowSource, SelectionCriteria};
