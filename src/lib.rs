//! Invmirror: client-side inventory tree mirror
//!
//! Maintains a local replica of a remote, hierarchical inventory and keeps
//! it eventually consistent with the store's asynchronous add/update/remove
//! notifications, while supporting lazy subtree loading, deterministic
//! display ordering, in-place rename, and drag-and-drop reparenting.

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod store;
pub mod sync;
pub mod tree;
pub mod types;
pub mod views;
