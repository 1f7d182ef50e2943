//! Rendering-mode resolver.
//!
//! [`ModeResolver`] bundles the keyword codec, the render-state table and the
//! visibility rules behind one object configured by a [`ShaderProfile`]. It
//! has no widget dependencies; [`MaterialInspector`](crate::inspector::MaterialInspector)
//! drives it from a display pass.

use crate::config::ShaderProfile;
use crate::material::{
    EditorFields, MaterialBatch, MaterialError, MaterialResult, ModeVariant, RenderingMode,
    RenderingSettings, ShadingResource, VisibilityInputs, decode_mode, encode_mode,
    resolve_visibility,
};

/// Decodes, encodes and applies rendering modes for one shader profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeResolver {
    profile: ShaderProfile,
}

impl ModeResolver {
    pub fn new(profile: ShaderProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ShaderProfile {
        &self.profile
    }

    pub fn variant(&self) -> ModeVariant {
        self.profile.variant
    }

    /// Current mode of `resource`.
    pub fn decode<R: ShadingResource>(&self, resource: &R) -> RenderingMode {
        let mode = decode_mode(resource, self.profile.variant);
        log::debug!("material \"{}\" decodes as {mode}", resource.name());
        mode
    }

    /// Rewrites the mode keywords of `resource`.
    pub fn encode<R: ShadingResource>(&self, resource: &mut R, mode: RenderingMode) {
        encode_mode(resource, self.profile.variant, mode);
    }

    /// Encodes `mode` on one material and copies its render-state record.
    ///
    /// Fails only for a mode the profile does not offer.
    pub fn switch_mode<R: ShadingResource>(
        &self,
        resource: &mut R,
        mode: RenderingMode,
    ) -> MaterialResult {
        switch_mode(resource, self.profile.variant, &self.profile.name, mode)
    }

    /// Switches every member of `batch` to `mode` in one transaction.
    ///
    /// On error no member is modified.
    pub fn apply<R: ShadingResource>(
        &self,
        mode: RenderingMode,
        batch: &mut MaterialBatch<R>,
    ) -> MaterialResult {
        batch.transact(|resource| self.switch_mode(resource, mode))?;
        log_mode_change(mode, batch.len());
        Ok(())
    }

    /// Optional fields to show for `resource`.
    pub fn resolve_visibility<R: ShadingResource>(&self, resource: &R) -> EditorFields {
        let mode = self.decode(resource);
        resolve_visibility(&VisibilityInputs::read(resource, &self.profile, mode))
    }
}

/// Encodes `mode` for `variant` and copies the mode's render-state record.
///
/// `profile` names the shader in the error for a mode `variant` does not
/// offer; the resource is left untouched in that case.
pub fn switch_mode<R: ShadingResource>(
    resource: &mut R,
    variant: ModeVariant,
    profile: &str,
    mode: RenderingMode,
) -> MaterialResult {
    if !variant.supports(mode) {
        return Err(MaterialError::UnsupportedMode {
            mode,
            profile: profile.to_owned(),
        });
    }
    encode_mode(resource, variant, mode);
    RenderingSettings::for_mode(mode).apply_to(resource);
    Ok(())
}

/// Logs a committed mode change.
pub(crate) fn log_mode_change(mode: RenderingMode, count: usize) {
    log::info!("rendering mode set to {mode} on {count} material(s)");
}

impl Default for ModeResolver {
    fn default() -> Self {
        Self::new(ShaderProfile::standard())
    }
}
