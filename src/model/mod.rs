//! Pure data structures shared by the store, the service and the view.

pub mod item;

pub use item::*;
