//! Drag-to-reorder for single-section terminal lists.
//!
//! A [`ReorderController`] attaches to any [`HostListView`], turns a long
//! press on a row into a drag, and reports each slot the row crosses to a
//! [`ReorderDelegate`]. The delegate owns the data and keeps it in step.

pub mod config;
pub mod controller;
pub mod delegate;
pub mod error;
mod gesture;
pub mod host;
pub mod input;
pub mod list;
pub mod position;
pub mod rect;
pub mod session;

pub use config::{CrossingThreshold, ReorderConfig};
pub use controller::ReorderController;
pub use delegate::{ReorderCallbacks, ReorderDelegate};
pub use error::{BindingError, InvalidStateError, ReorderError, Result};
pub use host::HostListView;
pub use input::{EventResult, MouseButton, PointerEvent};
pub use list::RowList;
pub use position::{Direction, Position};
pub use rect::Rect;
pub use session::{DragSession, Grab};
