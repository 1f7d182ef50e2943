//! Editable targets and reversible editor actions.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: a reversible edit operation (Command pattern)
//! - [`EditActionError`] / [`EditActionResult`]: error handling for actions
//!
//! Actions are self-contained: each implementation stores whatever it needs
//! to redo and undo itself (target values, snapshots of prior state).

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::material::MaterialError;

/// Helper trait for downcasting trait objects to concrete types.
///
/// Automatically implemented for all `'static` types. Used by
/// [`EditAction::merge`] to downcast `&dyn EditAction<T>` to the
/// concrete action type for merging.
pub trait AsAny: 'static {
    /// Returns a reference to `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Marker trait for types that serve as editing targets.
pub trait Editable: 'static {}

/// Error type for action execution failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// The target object was not found.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    /// The target is in an invalid state for this action.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Undo was requested with an empty undo stack.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo was requested with an empty redo stack.
    #[error("nothing to redo")]
    NothingToRedo,
    /// A material write was rejected; the whole transaction was rolled back.
    #[error(transparent)]
    Material(#[from] MaterialError),
}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// # Merging
///
/// Actions that represent incremental changes (each frame of a slider drag)
/// can override [`merge`](Self::merge) so that consecutive actions coalesce
/// into one undo step. Use [`AsAny::as_any`] on the `other` action to
/// downcast it to the concrete type.
///
/// # Object Safety
///
/// This trait is dyn-compatible so that different action types can share
/// one [`EditActionHistory`](super::EditActionHistory) as
/// `Box<dyn EditAction<T>>`.
pub trait EditAction<T: Editable>: fmt::Debug + AsAny + Send {
    /// Applies the action to the target (forward / redo direction).
    ///
    /// A failed apply must leave the target unchanged.
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    /// Reverses the action, restoring the state seen by the last
    /// [`apply`](Self::apply).
    fn undo(&mut self, target: &mut T) -> EditActionResult;

    /// Short label shown in undo menus, e.g. `"Rendering Mode"`.
    fn description(&self) -> &str;

    /// Tries to merge `other` into `self`, taking ownership.
    ///
    /// Returns `None` if `other` was absorbed, `Some(other)` otherwise.
    /// Default: never merges.
    fn merge(&mut self, other: Box<dyn EditAction<T>>) -> Option<Box<dyn EditAction<T>>> {
        Some(other)
    }

    /// Whether this action is pushed onto the undo stack. Default: `true`.
    fn is_recorded(&self) -> bool {
        true
    }
}
