//! Unit of work: identity map, dirty set and staged changes.

mod change;
mod staging_buffer;
mod unit_of_work;

pub use change::{Change, CommitSummary, EntryState, TableCounts, TrackedEntry, TrackingId};
pub use staging_buffer::StagingBuffer;
pub use unit_of_work::UnitOfWork;
