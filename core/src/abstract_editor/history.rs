//! Undo/redo action history.
//!
//! [`EditActionHistory`] manages a linear undo/redo stack of [`EditAction`]
//! trait objects. Executing a recorded action after undoing clears the redo
//! stack.

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, EditActionError, EditActionResult, Editable};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Manages an undo/redo stack of editor actions.
///
/// The undo stack is a bounded [`VecDeque`]; when it exceeds `max_undo`
/// the oldest action is dropped from the front.
pub struct EditActionHistory<T: Editable> {
    undo_stack: VecDeque<Box<dyn EditAction<T>>>,
    redo_stack: Vec<Box<dyn EditAction<T>>>,
    max_undo: usize,
    /// Successful executions, merged ones included.
    transactions: usize,
}

impl<T: Editable> EditActionHistory<T> {
    /// Creates an empty history with the given maximum undo depth.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
            transactions: 0,
        }
    }

    /// Applies an action and, if it is [recorded](EditAction::is_recorded),
    /// pushes it onto the undo stack, merging it into the top entry when the
    /// top entry accepts it.
    ///
    /// If the action fails, nothing is recorded and the error is returned.
    pub fn execute(
        &mut self,
        mut action: Box<dyn EditAction<T>>,
        target: &mut T,
    ) -> EditActionResult {
        if let Err(e) = action.apply(target) {
            log::debug!("\"{}\" rejected: {e}", action.description());
            return Err(e);
        }
        self.transactions += 1;
        log::debug!("\"{}\" committed", action.description());

        if !action.is_recorded() {
            return Ok(());
        }

        self.redo_stack.clear();
        if let Some(last) = self.undo_stack.back_mut() {
            match last.merge(action) {
                None => return Ok(()),
                Some(returned) => action = returned,
            }
        }

        self.undo_stack.push_back(action);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
        Ok(())
    }

    /// Executes each action in order, stopping at the first failure.
    pub fn execute_all(
        &mut self,
        actions: impl IntoIterator<Item = Box<dyn EditAction<T>>>,
        target: &mut T,
    ) -> EditActionResult {
        for action in actions {
            self.execute(action, target)?;
        }
        Ok(())
    }

    /// Undoes the most recent action.
    ///
    /// A failed undo puts the action back so it can be retried.
    pub fn undo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .undo_stack
            .pop_back()
            .ok_or(EditActionError::NothingToUndo)?;
        if let Err(e) = action.undo(target) {
            self.undo_stack.push_back(action);
            return Err(e);
        }
        self.redo_stack.push(action);
        Ok(())
    }

    /// Redoes the most recently undone action.
    pub fn redo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self.redo_stack.pop().ok_or(EditActionError::NothingToRedo)?;
        if let Err(e) = action.apply(target) {
            self.redo_stack.push(action);
            return Err(e);
        }
        self.undo_stack.push_back(action);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|a| a.description())
    }

    /// Redo descriptions, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|a| a.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    /// Number of actions successfully executed so far. Undo and redo do not
    /// count.
    pub fn transaction_count(&self) -> usize {
        self.transactions
    }

    /// Drops both stacks. The transaction count is kept.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T: Editable> fmt::Debug for EditActionHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditActionHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .field("transactions", &self.transactions)
            .finish()
    }
}
