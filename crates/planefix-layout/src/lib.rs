#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Layout configuration.
pub mod config;

/// Error types for the layout module.
pub mod error;

/// Greedy justified row layout.
pub mod rows;

pub use crate::config::LayoutConfig;
pub use crate::error::LayoutError;
pub use crate::rows::{canvas_height, layout_rows, LayoutItem, PlacementRect};
