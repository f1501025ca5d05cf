//! Research artifact persistence
//!
//! Artifacts are immutable JSON records saved by the agents while they research
//! a product category. Each one lives in its own file; see [`ArtifactStore`].

mod mirror;
mod store;
mod types;

pub use mirror::{ArtifactMirror, InMemoryArtifactMirror};
pub use store::ArtifactStore;
pub use types::{
    iso_timestamp, ArtifactDocument, ArtifactQuery, ArtifactScan, ArtifactSummary,
    ArtifactType, RecentArtifact, SaveReceipt, SkippedFile,
};
