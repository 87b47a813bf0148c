//! Records produced by the registration scraper.
//!
//! Field names follow the scraper's camelCase JSON. Every optional field may
//! be absent; the store's column encoders decide what an absent value becomes.

mod class;
mod dump;
mod professor;
mod section;
mod term;

pub use class::{ClassRecord, ReverseRequisites};
pub use dump::TermDump;
pub use professor::ProfessorRecord;
pub use section::{Meeting, SectionRecord, TimeRange};
pub use term::{SubjectRecord, TermInfo};
