//! Identity Sync
//!
//! Users are mirrored from the identity provider via webhook events; this
//! service owns the translation from provider payloads to local records.

pub mod sync;

pub use sync::{IdentityEvent, IdentityEventData, UserSyncService};
