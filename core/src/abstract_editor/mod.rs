//! Reversible editing operations.
//!
//! Material edits are expressed as [`EditAction`]s and executed through an
//! [`EditActionHistory`], which records them for undo/redo. The history is
//! generic over the [`Editable`] target so hosts can reuse it for their own
//! documents; inside this crate the target is a
//! [`MaterialBatch`](crate::material::MaterialBatch).
//!
//! # Recorded vs non-recorded actions
//!
//! By default, actions are **recorded** in the undo/redo history. Override
//! [`EditAction::is_recorded`] to return `false` for edits that should take
//! effect without an undo entry.
//!
//! Consecutive recorded actions can coalesce into one undo step through
//! [`EditAction::merge`], which is how a slider drag ends up as a single
//! "Set property" entry.

mod action;
mod history;

pub use action::{AsAny, EditAction, EditActionError, EditActionResult, Editable};
pub use history::{DEFAULT_MAX_UNDO, EditActionHistory};
