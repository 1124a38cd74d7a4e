//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod analysis_snapshot_repo;
pub mod excluded_channel_repo;
pub mod safety_report_repo;
pub mod title_repo;

pub use analysis_snapshot_repo::AnalysisSnapshotRepo;
pub use excluded_channel_repo::ExcludedChannelRepo;
pub use safety_report_repo::SafetyReportRepo;
pub use title_repo::TitleRepo;
