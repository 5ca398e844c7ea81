//! # System Lifecycle
//!
//! Starting, wiring, and shutting down the running pieces of the tracker.
//!
//! ## Main Components
//!
//! - [`InventorySystem`] - Spawns the in-process collection actor and exposes
//!   the [`InventoryService`](crate::service::InventoryService) built on it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the actor's channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs final state** - the record count at shutdown
//! 4. **Await completion** - the actor task is joined
//!
//! The Firestore-backed store owns no task; dropping it is enough.

pub mod inventory_system;
pub mod tracing;

pub use inventory_system::*;
pub use self::tracing::setup_tracing;
