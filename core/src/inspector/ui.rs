//! Widget toolkit capability.
//!
//! The display pass never draws anything itself. It calls into an
//! [`InspectorUi`] implementation supplied by the host (egui, an immediate
//! mode debug overlay, a scripted test double) and learns about edits
//! through the change-check bracket.

use crate::material::{Label, MaterialProperty};

/// Widgets the material inspector needs.
///
/// Widgets edit the value passed to them in place. Whether the user changed
/// anything between [`begin_change_check`](Self::begin_change_check) and
/// [`end_change_check`](Self::end_change_check) is reported by the closing
/// call; brackets may nest.
pub trait InspectorUi {
    /// Opens a change-check bracket.
    fn begin_change_check(&mut self);

    /// Closes the innermost bracket; `true` if any widget inside changed.
    fn end_change_check(&mut self) -> bool;

    /// Drop-down over `options`. Returns the selected index.
    fn enum_popup(&mut self, label: &Label, selected: usize, options: &[&str]) -> usize;

    /// Checkbox. Returns the new state.
    fn toggle(&mut self, label: &Label, value: bool) -> bool;

    /// Single-line texture row with an optional value next to the texture
    /// (tint, scale, strength).
    fn texture_property(
        &mut self,
        label: &Label,
        texture: &mut MaterialProperty,
        extra: Option<&mut MaterialProperty>,
    );

    /// Texture row with an HDR color next to it.
    fn texture_with_hdr_color(
        &mut self,
        label: &Label,
        texture: &mut MaterialProperty,
        color: &mut MaterialProperty,
    ) {
        self.texture_property(label, texture, Some(color));
    }

    /// Scalar or color property (sliders use the property range).
    fn shader_property(&mut self, label: &Label, property: &mut MaterialProperty);

    /// Tiling and offset fields of a texture property.
    fn texture_scale_offset(&mut self, texture: &mut MaterialProperty);

    /// Shifts the indentation of following rows by `levels`.
    fn indent(&mut self, levels: i32);
}
