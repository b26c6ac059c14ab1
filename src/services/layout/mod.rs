// Layout services
// Time grid mapping, overlap packing and the per-period layout pass

pub mod engine;
pub mod overlap;
pub mod time_grid;

pub use engine::LayoutEngine;
pub use overlap::OverlapResolver;
pub use time_grid::{MappingError, TimeGridMapper};
