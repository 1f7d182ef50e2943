//! Materials edited together.
//!
//! Every write to a [`MaterialBatch`] goes through [`MaterialBatch::transact`],
//! which runs the edit on a staged copy of all members and swaps the copy in
//! only when every member succeeded. Observers never see a batch where some
//! members carry the new state and others the old.

use crate::abstract_editor::Editable;

use super::error::{MaterialError, MaterialResult};
use super::mode::{ModeVariant, decode_mode};
use super::render_state::RenderStateSnapshot;
use super::resource::ShadingResource;

/// An ordered set of materials edited as one unit. The first member is the
/// primary one: inspectors display its values.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBatch<R: ShadingResource> {
    members: Vec<R>,
}

impl<R: ShadingResource> MaterialBatch<R> {
    pub fn new(members: Vec<R>) -> Self {
        Self { members }
    }

    /// A batch with a single member.
    pub fn single(member: R) -> Self {
        Self {
            members: vec![member],
        }
    }

    /// The member whose values are displayed.
    pub fn primary(&self) -> Option<&R> {
        self.members.first()
    }

    pub fn members(&self) -> &[R] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<R> {
        self.members
    }

    /// Runs `edit` on every member as one transaction.
    ///
    /// Fails without touching any member if the batch is empty, a member is
    /// not editable, or `edit` fails for any member.
    pub fn transact<F>(&mut self, mut edit: F) -> MaterialResult
    where
        F: FnMut(&mut R) -> MaterialResult,
    {
        if self.members.is_empty() {
            return Err(MaterialError::EmptyBatch);
        }

        let mut staged = self.members.clone();
        for member in &mut staged {
            if !member.is_editable() {
                return Err(MaterialError::ResourceUnavailable(member.name().to_owned()));
            }
            edit(member)?;
        }
        self.members = staged;
        Ok(())
    }

    /// Copies all members, for undo.
    pub fn snapshot(&self) -> Vec<R> {
        self.members.clone()
    }

    /// Replaces all members with a previous [`snapshot`](Self::snapshot).
    pub fn restore(&mut self, snapshot: Vec<R>) {
        self.members = snapshot;
    }

    /// Returns `true` if all members decode to the same mode and carry the
    /// same mode-derived render state.
    pub fn is_uniform(&self, variant: ModeVariant) -> bool {
        let mut states = self
            .members
            .iter()
            .map(|m| (decode_mode(m, variant), RenderStateSnapshot::read(m)));
        let Some(first) = states.next() else {
            return true;
        };
        states.all(|state| state == first)
    }
}

impl<R: ShadingResource + 'static> Editable for MaterialBatch<R> {}
