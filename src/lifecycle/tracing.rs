//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for
//! the whole process.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The output uses the
//! compact format without the crate/module prefix (`with_target(false)`); the
//! structured fields (`collection`, `key`, `quantity`, `outcome`) carry the
//! context instead.
//!
//! ## What Gets Traced
//!
//! - **Collection Lifecycle**: startup and shutdown with the final record count
//! - **Store Requests**: one span per `get`/`set`/`delete`/`list_all`
//! - **Service Operations**: `add`/`remove`/`refresh` spans with their outcome
//! - **Failures**: every failed operation is logged once at the view boundary
//!
//! ## Usage Examples
//!
//! ```bash
//! # Outcomes and lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every store request
//! RUST_LOG=debug cargo run
//!
//! # Only the service layer
//! RUST_LOG=inventory_tracker::service=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Collection started collection="inventory"
//! INFO add: Stored collection="inventory" key="banana" quantity=1 size=1
//! INFO add: Item added name="Banana" key="banana" outcome=Created
//! INFO Operation succeeded notice="Item added successfully!"
//! ```

/// Installs the global fmt subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
