//! # FormPilot Store
//!
//! Reference implementations of [`formpilot_protocols::ProfileStore`].
//!
//! - [`MemoryProfileStore`] - In-process store for tests and embedding hosts
//! - [`FileProfileStore`] - JSON files under a directory

mod file;
mod memory;

pub use file::FileProfileStore;
pub use memory::MemoryProfileStore;
