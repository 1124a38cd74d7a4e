//! Database row models and create/update DTOs.

pub mod analysis_snapshot;
pub mod excluded_channel;
pub mod safety_report;
pub mod title;
