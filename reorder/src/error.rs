//! Error types returned by the reorder controller.
//!
//! Every failing operation leaves the controller exactly as it was before
//! the call.

use thiserror::Error;

use crate::position::Position;

/// Attaching the controller to a host list view failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The controller is already bound to a host. Detach first.
    #[error("controller is already attached to a list view")]
    AlreadyAttached,
    /// Only single-section list views can be reordered.
    #[error("list view has {0} sections, exactly one is supported")]
    SectionCount(usize),
}

/// An operation was requested in a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidStateError {
    #[error("reordering is disabled")]
    Disabled,
    #[error("controller is not attached to a list view")]
    NotAttached,
    #[error("a drag session is already active")]
    SessionActive,
    #[error("no drag session is active")]
    NoSession,
    #[error("{position} is out of range for a list of {row_count} rows")]
    PositionOutOfRange { position: Position, row_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

pub type Result<T> = std::result::Result<T, ReorderError>;
