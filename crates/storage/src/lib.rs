//! osydata-storage: case-store seam for conversion output.
//!
//! The conversion pipeline only returns data structures; persisting record
//! groups is the caller's concern, expressed through the [`CaseStore`]
//! trait. Backends are configured with an explicit [`StoreConfig`] fixed at
//! construction -- there is no process-wide storage state.

pub mod error;
pub mod traits;

pub use error::StorageError;
pub use traits::{CaseStore, StoreConfig};
