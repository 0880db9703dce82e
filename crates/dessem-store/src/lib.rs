#![warn(clippy::pedantic)]

pub mod compression;
pub mod error;
pub mod preamble;
pub mod snapshot;

pub use error::StoreError;
pub use preamble::Preamble;
pub use snapshot::{Snapshot, SnapshotOptions};
