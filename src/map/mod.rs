//! Shared property map collaborator seam
//!
//! The benchmark core is written against the shape of the external
//! replicated-map library, not its implementation: a handle with
//! commit-based writes plus an asynchronous change-notification stream.
//! [`loopback`] provides the in-process implementation the demo and tests
//! drive.

pub mod loopback;

pub use loopback::{LoopbackHub, LoopbackView};

use crate::error::Result;
use async_trait::async_trait;

/// Change notification delivered to an attached view.
///
/// Events arrive asynchronously after the originating view commits, in
/// commit order per view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// A key was created
    Inserted { key: String, value: String },
    /// An existing key's value changed
    Updated { key: String, value: String },
    /// A key was removed
    Deleted { key: String },
}

impl MapEvent {
    /// The key this event concerns
    pub fn key(&self) -> &str {
        match self {
            MapEvent::Inserted { key, .. }
            | MapEvent::Updated { key, .. }
            | MapEvent::Deleted { key } => key,
        }
    }

    /// Whether this is a write confirmation (insert or update)
    pub fn is_write(&self) -> bool {
        !matches!(self, MapEvent::Deleted { .. })
    }
}

/// Handle onto one view of a replicated property map.
///
/// Mutations are staged locally until [`commit`](SharedPropertyMap::commit),
/// which publishes them; the library then notifies every attached view
/// through its event stream.
#[async_trait]
pub trait SharedPropertyMap: Send + Sync {
    /// Stage a key/value write
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Stage a key deletion
    async fn delete(&self, key: &str) -> Result<()>;

    /// Whether the committed map currently contains `key`
    async fn has(&self, key: &str) -> bool;

    /// Publish all staged operations
    async fn commit(&self) -> Result<()>;

    /// Identifier of the logical map this view is attached to
    fn map_id(&self) -> String;
}
