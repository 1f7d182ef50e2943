//! Undoable material edits.
//!
//! Every edit the display pass produces is a [`MaterialEditAction`]: a
//! labelled list of [`MaterialEdit`]s that runs as one batch transaction.
//! The action snapshots the batch before applying and restores the snapshot
//! on undo.

use crate::abstract_editor::{EditAction, EditActionError, EditActionResult};
use crate::material::{
    GlobalIllumination, MaterialBatch, MaterialError, MaterialResult, MaterialValue, ModeVariant,
    RenderingMode, ShadingResource, TextureRef, TextureSlot,
};
use crate::resolver::{log_mode_change, switch_mode};

/// One write applied to every member of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialEdit {
    /// Encode `mode` and copy its render-state record.
    RenderingMode {
        variant: ModeVariant,
        profile: String,
        mode: RenderingMode,
    },
    /// Enable or disable a keyword.
    Keyword {
        keyword: String,
        enabled: bool,
    },
    /// Set `keyword` to whether the texture slot `texture` is occupied,
    /// evaluated per member.
    TextureKeyword {
        keyword: String,
        texture: String,
    },
    /// Replace a named property value.
    Property {
        name: String,
        value: MaterialValue,
    },
    /// Assign (or clear) the texture of a slot, keeping each member's
    /// tiling and offset.
    Texture {
        name: String,
        texture: Option<TextureRef>,
    },
    /// Set the tiling and offset of a slot, keeping each member's texture.
    ScaleOffset {
        name: String,
        scale_offset: [f32; 4],
    },
    /// Set the illumination-baking flags.
    GlobalIllumination(GlobalIllumination),
}

impl MaterialEdit {
    /// Applies the edit to one material.
    pub fn apply_to<R: ShadingResource>(&self, resource: &mut R) -> MaterialResult {
        match self {
            Self::RenderingMode {
                variant,
                profile,
                mode,
            } => switch_mode(resource, *variant, profile, *mode)?,
            Self::Keyword { keyword, enabled } => resource.set_keyword(keyword, *enabled),
            Self::TextureKeyword { keyword, texture } => {
                let assigned = resource.has_texture(texture);
                resource.set_keyword(keyword, assigned);
            }
            Self::Property { name, value } => resource.set_property_value(name, value.clone())?,
            Self::Texture { name, texture } => {
                let mut slot = texture_slot(resource, name)?;
                slot.texture = texture.clone();
                resource.set_property_value(name, MaterialValue::Texture(slot))?;
            }
            Self::ScaleOffset { name, scale_offset } => {
                let mut slot = texture_slot(resource, name)?;
                slot.scale_offset = *scale_offset;
                resource.set_property_value(name, MaterialValue::Texture(slot))?;
            }
            Self::GlobalIllumination(flags) => resource.set_global_illumination(*flags),
        }
        Ok(())
    }

    /// What the edit writes, for merge checks: the value kind and the
    /// property name.
    fn target(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::Property { name, .. } => Some(("value", name.as_str())),
            Self::Texture { name, .. } => Some(("texture", name.as_str())),
            Self::ScaleOffset { name, .. } => Some(("scale_offset", name.as_str())),
            _ => None,
        }
    }
}

/// The current slot of a texture property on one member.
fn texture_slot<R: ShadingResource>(resource: &R, name: &str) -> MaterialResult<TextureSlot> {
    let property = resource
        .find_property(name)
        .ok_or_else(|| MaterialError::UnknownProperty {
            resource: resource.name().to_owned(),
            property: name.to_owned(),
        })?;
    match &property.value {
        MaterialValue::Texture(slot) => Ok(slot.clone()),
        other => Err(MaterialError::PropertyTypeMismatch {
            property: name.to_owned(),
            expected: other.kind_name(),
            found: "texture",
        }),
    }
}

/// A labelled group of edits committed as one batch transaction.
#[derive(Debug)]
pub struct MaterialEditAction<R: ShadingResource> {
    label: String,
    edits: Vec<MaterialEdit>,
    mergeable: bool,
    before: Option<Vec<R>>,
}

impl<R: ShadingResource> MaterialEditAction<R> {
    pub fn new(label: impl Into<String>, edits: Vec<MaterialEdit>) -> Self {
        Self {
            label: label.into(),
            edits,
            mergeable: false,
            before: None,
        }
    }

    /// Lets consecutive actions with the same label and the same edited
    /// properties coalesce into one undo step.
    #[must_use]
    pub fn mergeable(mut self) -> Self {
        self.mergeable = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn edits(&self) -> &[MaterialEdit] {
        &self.edits
    }

    fn same_properties(&self, other: &Self) -> bool {
        self.edits
            .iter()
            .filter_map(MaterialEdit::target)
            .eq(other.edits.iter().filter_map(MaterialEdit::target))
    }
}

impl<R> EditAction<MaterialBatch<R>> for MaterialEditAction<R>
where
    R: ShadingResource + std::fmt::Debug + Send + 'static,
{
    fn apply(&mut self, target: &mut MaterialBatch<R>) -> EditActionResult {
        let before = target.snapshot();
        let edits = &self.edits;
        target.transact(|member| {
            for edit in edits {
                edit.apply_to(member)?;
            }
            Ok(())
        })?;
        self.before = Some(before);
        for edit in edits {
            if let MaterialEdit::RenderingMode { mode, .. } = edit {
                log_mode_change(*mode, target.len());
            }
        }
        Ok(())
    }

    fn undo(&mut self, target: &mut MaterialBatch<R>) -> EditActionResult {
        let before = self.before.take().ok_or_else(|| {
            EditActionError::InvalidState(format!("\"{}\" was never applied", self.label))
        })?;
        if before.len() != target.len() {
            let len = before.len();
            self.before = Some(before);
            return Err(EditActionError::TargetNotFound(format!(
                "batch of {len} material(s)"
            )));
        }
        target.restore(before);
        Ok(())
    }

    fn description(&self) -> &str {
        &self.label
    }

    fn merge(
        &mut self,
        other: Box<dyn EditAction<MaterialBatch<R>>>,
    ) -> Option<Box<dyn EditAction<MaterialBatch<R>>>> {
        if let Some(other) = other.as_any().downcast_ref::<Self>()
            && self.mergeable
            && other.mergeable
            && self.label == other.label
            && self.same_properties(other)
        {
            self.edits = other.edits.clone();
            return None;
        }
        Some(other)
    }
}
