//! Core identifier types for the inventory mirror.

use serde::{Deserialize, Serialize};

/// Stable, globally unique identifier of an inventory node.
pub type NodeId = uuid::Uuid;

/// Identifier of the avatar that owns an inventory subtree.
pub type OwnerId = uuid::Uuid;

/// Opaque handle to the asset an item refers to.
pub type AssetId = uuid::Uuid;

/// Sort order hint sent with folder content requests.
///
/// The remote store streams contents back as notifications; this only hints
/// at the order it should use when batching them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    ByDate,
    ByName,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::ByDate
    }
}
