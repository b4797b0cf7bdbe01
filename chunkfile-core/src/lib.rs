#![forbid(unsafe_code)]

pub mod error;
pub mod naming;

pub mod util {
    pub mod size;
}

pub mod merge;
pub mod split;

// Re-exports: stable API surface
pub use merge::{MergeJob, merge};
pub use split::{SplitJob, split};
