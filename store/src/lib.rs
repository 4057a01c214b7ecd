//! In-memory persistence for decoded capture records.
//!
//! [`MemoryStore`] implements [`codec::RecordSink`] with the semantics the
//! decoder expects from a real database: roster messages replace the whole
//! member table, battles are upserted by id, and every roster replacement
//! recomputes the per-group daily merit history.

mod error;
mod history;
mod memory;

pub use error::{LimitKind, StoreError, StoreResult};
pub use history::{group_stats, GroupStats, GroupWuHistory};
pub use memory::{MemoryStore, RosterChange, StoreConfig};
