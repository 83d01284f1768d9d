//! # shoprank Storage
//!
//! Keeps the product catalog on disk: an idempotent seeding step, a one-time
//! image path migration, and atomic JSON snapshots.

pub mod record;
pub mod snapshot;
pub mod store;

pub use record::{read_seed_file, write_seed_file, ProductRecord, SeedFormat};
pub use snapshot::{CatalogSnapshot, SnapshotManager, SNAPSHOT_FILENAME};
pub use store::{CatalogStore, StartupReport};
