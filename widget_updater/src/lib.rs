//! Update pipeline for the Calorize home-screen widgets.
//!
//! The widget host hands a batch of instances to [`UpdateCoordinator`],
//! which decodes the persisted nutrition snapshot, maps it onto the slots of
//! each widget variant, binds tappable slots to deep links and commits the
//! finished view back to the host.

pub mod coordinator;
pub mod decoder;
pub mod deeplinks;
pub mod error;
pub mod host;
pub mod mapper;
pub mod renderers;
pub mod store;

pub use coordinator::{BatchReport, SkippedInstance, UpdateCoordinator};
pub use decoder::{DecodedSnapshot, decode, try_decode};
pub use error::{StoreError, WidgetError};
pub use host::{InMemoryWidgetHost, WidgetHost};
pub use store::{
    DEFAULT_SNAPSHOT_KEY, FileSnapshotStore, MemorySnapshotStore, SnapshotStore,
};
