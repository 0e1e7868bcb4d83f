// src/records/mod.rs
pub mod assembly;
pub mod models;

pub use assembly::{dedupe_by_identity, render_records, CleanedDocument};
pub use models::{Entity, FacultyRecord, MemberRecord, RecordKind, ResearchGroupRecord};
