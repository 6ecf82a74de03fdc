//! Fetch Tracker
//!
//! Deduplicates on-demand subtree loads. A folder's contents are requested
//! at most once; the store streams them in as ordinary notifications, so a
//! second expansion must not generate redundant network load. An explicit
//! force-refresh bypasses the gate.

use crate::types::NodeId;
use std::collections::HashSet;

/// Per-folder fetch state. The `requested` flag never expires on its own;
/// only an explicit force-refresh re-issues a request.
#[derive(Debug, Default)]
pub struct FetchTracker {
    requested: HashSet<NodeId>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a content request should be issued for `folder_id`,
    /// marking the folder requested either way.
    ///
    /// Returns `false` when the folder has already been requested and
    /// `force` is not set.
    pub fn should_fetch(&mut self, folder_id: NodeId, force: bool) -> bool {
        if force {
            self.requested.insert(folder_id);
            return true;
        }
        self.requested.insert(folder_id)
    }

    pub fn is_requested(&self, folder_id: NodeId) -> bool {
        self.requested.contains(&folder_id)
    }

    /// Drop state for a folder that left the mirror.
    pub fn forget(&mut self, folder_id: NodeId) {
        self.requested.remove(&folder_id);
    }
}
