//! Sales pipeline: deals, scheduled revenue, and revenue recognition

mod data;
pub mod loader;
pub mod recognition;
pub mod summary;

pub use data::{Deal, EntryKind, Stage, TimelineEntry};
pub use loader::{attach_timeline, load_deals, load_deals_from_reader, load_timeline};
pub use recognition::{monthly_contribution, Recognition, RevenueSchedule, ScheduledDeal};
pub use summary::{summarize, PipelineSummary, StageSummary};
