//! Dependent-field visibility.
//!
//! Which optional inspector fields are shown is a pure function of the
//! decoded mode, the semitransparent-shadows toggle, and which texture slots
//! are occupied. It is recomputed on every display pass and never stored.

use bitflags::bitflags;

use crate::config::ShaderProfile;

use super::keywords::SEMITRANSPARENT_SHADOWS;
use super::mode::RenderingMode;
use super::resource::ShadingResource;

bitflags! {
    /// Optional inspector fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EditorFields: u32 {
        /// Alpha cutoff threshold slider.
        const ALPHA_CUTOFF = 1 << 0;
        /// Semitransparent shadows toggle.
        const SEMITRANSPARENT_SHADOWS = 1 << 1;
        /// Normal map scale, next to the normal map.
        const NORMAL_SCALE = 1 << 2;
        /// Occlusion strength, next to the occlusion map.
        const OCCLUSION_STRENGTH = 1 << 3;
        /// Smoothness source popup.
        const SMOOTHNESS_SOURCE = 1 << 4;
    }
}

/// Everything visibility depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityInputs {
    pub mode: RenderingMode,
    pub semitransparent_shadows: bool,
    pub normal_map_assigned: bool,
    pub occlusion_map_assigned: bool,
}

impl VisibilityInputs {
    /// Reads the inputs from a material already decoded as `mode`, using
    /// the slot names of `profile`.
    pub fn read<R: ShadingResource>(
        resource: &R,
        profile: &ShaderProfile,
        mode: RenderingMode,
    ) -> Self {
        Self {
            mode,
            semitransparent_shadows: resource.is_keyword_enabled(SEMITRANSPARENT_SHADOWS),
            normal_map_assigned: resource.has_texture(&profile.properties.normal_map),
            occlusion_map_assigned: resource.has_texture(&profile.properties.occlusion_map),
        }
    }
}

/// Computes the optional fields to show.
///
/// Disabling semitransparent shadows in a blended mode falls back to
/// alpha-tested shadows, so the cutoff threshold is shown again.
pub fn resolve_visibility(inputs: &VisibilityInputs) -> EditorFields {
    let mut fields = EditorFields::SMOOTHNESS_SOURCE;

    let blended = inputs.mode.is_blended();
    if inputs.mode == RenderingMode::Cutout || (blended && !inputs.semitransparent_shadows) {
        fields |= EditorFields::ALPHA_CUTOFF;
    }
    if blended {
        fields |= EditorFields::SEMITRANSPARENT_SHADOWS;
    }
    if inputs.normal_map_assigned {
        fields |= EditorFields::NORMAL_SCALE;
    }
    if inputs.occlusion_map_assigned {
        fields |= EditorFields::OCCLUSION_STRENGTH;
    }
    fields
}
