//! # Inventory Tracker
//!
//! > **Named items and their quantities, kept in a document collection.**
//!
//! A user adds, increments, decrements, removes and searches inventory items.
//! Every item is one record in a collection, keyed by its lowercased name and
//! holding a single `quantity`. A record never holds zero: removing the last
//! unit deletes it.
//!
//! ## 🏗️ Architecture Notes
//!
//! ### 1. One Store Contract, Several Backends
//! [`InventoryStore`](store::InventoryStore) is the only thing the service knows
//! about. The in-process [`CollectionActor`](store::CollectionActor) and the
//! remote [`FirestoreStore`](store::FirestoreStore) both implement it, and so does
//! the scripted store in [`store::mock`].
//!
//! ### 2. Stateless Service, Explicit View State
//! [`InventoryService`](service::InventoryService) holds nothing but its store
//! handle. The search term, dialog and notices live in
//! [`InventoryView`](view::InventoryView), which is also where failures are
//! caught, logged, and reduced to one generic message.
//!
//! ### 3. Concurrency Model
//! The collection actor runs in its own Tokio task and handles one request at a
//! time, so each request is atomic. An add or remove is a read followed by a
//! write, and that pair is not: concurrent updates of one item may lose a step.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - [`InventoryItem`](model::InventoryItem), key normalization, search filter
//! - [`store`] - the store contract, its backends, and [`StoreError`](store::StoreError)
//! - [`service`] - add / remove / refresh
//! - [`view`] - presentation-layer state and the error boundary
//! - [`config`] - connection settings read from the environment
//! - [`lifecycle`] - starting and stopping the in-process collection, tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # In-process collection
//! RUST_LOG=info cargo run
//!
//! # Firestore collection
//! INVENTORY_PROJECT_ID=my-project INVENTORY_API_KEY=... RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod service;
pub mod store;
pub mod view;
