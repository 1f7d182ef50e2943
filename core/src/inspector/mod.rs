//! Toolkit-independent material inspector.
//!
//! [`MaterialInspector::show`] runs one display pass over a
//! [`MaterialBatch`]: it decodes the primary member, asks an [`InspectorUi`]
//! to draw every row, and turns the rows the user changed into
//! [`EditAction`]s. The pass itself never writes to the batch; the host
//! executes the returned actions through an
//! [`EditActionHistory`](crate::abstract_editor::EditActionHistory), which
//! makes each change one undoable transaction.
//!
//! A pass in which nothing changed returns no actions.

mod actions;
mod ui;

pub use actions::{MaterialEdit, MaterialEditAction};
pub use ui::InspectorUi;

use crate::abstract_editor::EditAction;
use crate::config::ShaderProfile;
use crate::material::keywords::{
    EMISSION_MAP, METALLIC_MAP, OCCLUSION_MAP, SEMITRANSPARENT_SHADOWS, SMOOTHNESS_ALBEDO,
};
use crate::material::{
    EditorFields, GlobalIllumination, MaterialBatch, MaterialProperty, MaterialValue,
    RenderingMode, ShadingResource, SmoothnessSource, VisibilityInputs, make_label,
    property_label, resolve_visibility,
};
use crate::resolver::ModeResolver;

/// Actions produced by one display pass.
pub type InspectorActions<R> = Vec<Box<dyn EditAction<MaterialBatch<R>>>>;

/// Draws the material rows of one shader profile.
#[derive(Debug, Clone, Default)]
pub struct MaterialInspector {
    resolver: ModeResolver,
}

impl MaterialInspector {
    pub fn new(profile: ShaderProfile) -> Self {
        Self {
            resolver: ModeResolver::new(profile),
        }
    }

    pub fn resolver(&self) -> &ModeResolver {
        &self.resolver
    }

    /// Runs one display pass and returns the edits the user made.
    pub fn show<R, U>(&self, ui: &mut U, batch: &MaterialBatch<R>) -> InspectorActions<R>
    where
        R: ShadingResource + std::fmt::Debug + Send + 'static,
        U: InspectorUi + ?Sized,
    {
        let Some(primary) = batch.primary() else {
            return Vec::new();
        };
        let mut pass = Pass {
            resolver: &self.resolver,
            primary,
            ui,
            actions: Vec::new(),
        };
        pass.run();
        pass.actions
    }
}

struct Pass<'a, R: ShadingResource + 'static, U: ?Sized> {
    resolver: &'a ModeResolver,
    primary: &'a R,
    ui: &'a mut U,
    actions: InspectorActions<R>,
}

impl<'a, R, U> Pass<'a, R, U>
where
    R: ShadingResource + std::fmt::Debug + Send + 'static,
    U: InspectorUi + ?Sized,
{
    fn run(&mut self) {
        let decoded = self.resolver.decode(self.primary);
        let mut inputs = VisibilityInputs::read(self.primary, self.resolver.profile(), decoded);
        inputs.mode = self.rendering_mode(decoded);

        let mut fields = resolve_visibility(&inputs);
        if fields.contains(EditorFields::SEMITRANSPARENT_SHADOWS) {
            inputs.semitransparent_shadows =
                self.semitransparent_shadows(inputs.semitransparent_shadows);
            fields = resolve_visibility(&inputs);
        }

        self.main(fields);
    }

    fn push(&mut self, action: MaterialEditAction<R>) {
        self.actions.push(Box::new(action));
    }

    fn rendering_mode(&mut self, current: RenderingMode) -> RenderingMode {
        let variant = self.resolver.variant();
        let modes = variant.modes();
        let options: Vec<&str> = modes.iter().map(|m| m.label()).collect();
        let selected = modes.iter().position(|&m| m == current).unwrap_or(0);

        self.ui.begin_change_check();
        let index = self
            .ui
            .enum_popup(&make_label("Rendering Mode", None), selected, &options);
        let changed = self.ui.end_change_check();

        let mode = modes.get(index).copied().unwrap_or(current);
        if changed && mode != current {
            self.push(MaterialEditAction::new(
                "Rendering Mode",
                vec![MaterialEdit::RenderingMode {
                    variant,
                    profile: self.resolver.profile().name.clone(),
                    mode,
                }],
            ));
        }
        mode
    }

    fn semitransparent_shadows(&mut self, current: bool) -> bool {
        self.ui.begin_change_check();
        let enabled = self
            .ui
            .toggle(&make_label("Semitransparent Shadows", None), current);
        if self.ui.end_change_check() && enabled != current {
            self.push(MaterialEditAction::new(
                "Semitransparent Shadows",
                vec![MaterialEdit::Keyword {
                    keyword: SEMITRANSPARENT_SHADOWS.into(),
                    enabled,
                }],
            ));
        }
        enabled
    }

    fn main(&mut self, fields: EditorFields) {
        let names = self.resolver.profile().properties.clone();

        self.property_row(
            &[names.main_tex.as_str(), names.color.as_str()],
            Vec::new,
            |ui, props| {
                let (tex, color) = props.split_at_mut(1);
                ui.texture_property(
                    &property_label(&tex[0], Some("Albedo (RGB)")),
                    &mut tex[0],
                    color.first_mut(),
                );
            },
        );

        if fields.contains(EditorFields::ALPHA_CUTOFF) {
            self.ui.indent(2);
            self.slider_row(&names.cutoff);
            self.ui.indent(-2);
        }

        self.property_row(
            &[names.metallic_map.as_str(), names.metallic.as_str()],
            || {
                vec![MaterialEdit::TextureKeyword {
                    keyword: METALLIC_MAP.into(),
                    texture: names.metallic_map.clone(),
                }]
            },
            |ui, props| {
                let (map, value) = props.split_at_mut(1);
                ui.texture_property(
                    &property_label(&map[0], Some("Metallic (R)")),
                    &mut map[0],
                    value.first_mut(),
                );
            },
        );

        self.smoothness(&names.smoothness);

        let mut normal: Vec<&str> = vec![names.normal_map.as_str()];
        if fields.contains(EditorFields::NORMAL_SCALE) {
            normal.push(names.normal_scale.as_str());
        }
        self.property_row(&normal, Vec::new, |ui, props| {
            let (map, scale) = props.split_at_mut(1);
            ui.texture_property(&property_label(&map[0], None), &mut map[0], scale.first_mut());
        });

        let mut occlusion: Vec<&str> = vec![names.occlusion_map.as_str()];
        if fields.contains(EditorFields::OCCLUSION_STRENGTH) {
            occlusion.push(names.occlusion_strength.as_str());
        }
        self.property_row(
            &occlusion,
            || {
                vec![MaterialEdit::TextureKeyword {
                    keyword: OCCLUSION_MAP.into(),
                    texture: names.occlusion_map.clone(),
                }]
            },
            |ui, props| {
                let (map, strength) = props.split_at_mut(1);
                ui.texture_property(
                    &property_label(&map[0], Some("Occlusion (G)")),
                    &mut map[0],
                    strength.first_mut(),
                );
            },
        );

        self.emission(&names.emission_map, &names.emission);

        self.property_row(&[names.main_tex.as_str()], Vec::new, |ui, props| {
            ui.texture_scale_offset(&mut props[0]);
        });
    }

    fn slider_row(&mut self, name: &str) {
        self.property_row(&[name], Vec::new, |ui, props| {
            let label = property_label(&props[0], None);
            ui.shader_property(&label, &mut props[0]);
        });
    }

    fn smoothness(&mut self, name: &str) {
        let current = SmoothnessSource::decode(self.primary);

        self.ui.indent(2);
        self.slider_row(name);
        self.ui.indent(1);

        let options: Vec<&str> = SmoothnessSource::ALL.iter().map(|s| s.label()).collect();
        self.ui.begin_change_check();
        let index = self.ui.enum_popup(
            &make_label("Source", None),
            SmoothnessSource::ALL
                .iter()
                .position(|&s| s == current)
                .unwrap_or(0),
            &options,
        );
        let changed = self.ui.end_change_check();
        let source = SmoothnessSource::ALL.get(index).copied().unwrap_or(current);
        if changed && source != current {
            self.push(MaterialEditAction::new(
                "Smoothness Source",
                vec![MaterialEdit::Keyword {
                    keyword: SMOOTHNESS_ALBEDO.into(),
                    enabled: source == SmoothnessSource::Albedo,
                }],
            ));
        }

        self.ui.indent(-3);
    }

    fn emission(&mut self, map_name: &str, color_name: &str) {
        let (Some(map), Some(color)) = (
            self.find(map_name).cloned(),
            self.find(color_name).cloned(),
        ) else {
            return;
        };

        let label = property_label(&map, Some("Emission (RGB)"));
        let mut edited_map = map.clone();
        let mut edited_color = color.clone();
        self.ui.begin_change_check();
        self.ui
            .texture_with_hdr_color(&label, &mut edited_map, &mut edited_color);
        if !self.ui.end_change_check() {
            return;
        }

        let mut edits = property_edits(&map, &edited_map);
        let texture_changed = edits
            .iter()
            .any(|edit| matches!(edit, MaterialEdit::Texture { .. }));
        edits.extend(property_edits(&color, &edited_color));
        if edits.is_empty() {
            return;
        }
        if texture_changed {
            edits.push(MaterialEdit::TextureKeyword {
                keyword: EMISSION_MAP.into(),
                texture: map_name.to_owned(),
            });
        }
        edits.push(MaterialEdit::GlobalIllumination(
            GlobalIllumination::BakedEmissive,
        ));
        self.push(MaterialEditAction::new(set_label(&map), edits).mergeable());
    }

    /// Draws one row over the named properties of the primary member and
    /// records an action if any of their values changed. `extra` supplies
    /// edits appended after the property writes.
    fn property_row<E, D>(&mut self, names: &[&str], extra: E, draw: D)
    where
        E: FnOnce() -> Vec<MaterialEdit>,
        D: FnOnce(&mut U, &mut [MaterialProperty]),
    {
        let mut original = Vec::with_capacity(names.len());
        for name in names {
            let Some(property) = self.find(name) else {
                return;
            };
            original.push(property.clone());
        }

        let mut edited = original.clone();
        self.ui.begin_change_check();
        draw(&mut *self.ui, &mut edited);
        if !self.ui.end_change_check() {
            return;
        }

        let mut edits: Vec<MaterialEdit> = original
            .iter()
            .zip(&edited)
            .flat_map(|(before, after)| property_edits(before, after))
            .collect();
        if edits.is_empty() {
            return;
        }
        edits.extend(extra());
        self.push(MaterialEditAction::new(set_label(&original[0]), edits).mergeable());
    }

    fn find(&self, name: &str) -> Option<&'a MaterialProperty> {
        let property = self.primary.find_property(name);
        if property.is_none() {
            log::warn!(
                "material \"{}\" has no property \"{name}\", row skipped",
                self.primary.name()
            );
        }
        property
    }
}

/// Edits that carry a row's change over to every batch member.
///
/// Texture slots are split so that only the part the user touched is
/// written: the texture reference, the tiling and offset, or both.
fn property_edits(before: &MaterialProperty, after: &MaterialProperty) -> Vec<MaterialEdit> {
    let name = &after.name;
    match (&before.value, &after.value) {
        (MaterialValue::Texture(old), MaterialValue::Texture(new)) => {
            let mut edits = Vec::new();
            if old.texture != new.texture {
                edits.push(MaterialEdit::Texture {
                    name: name.clone(),
                    texture: new.texture.clone(),
                });
            }
            if old.scale_offset != new.scale_offset {
                edits.push(MaterialEdit::ScaleOffset {
                    name: name.clone(),
                    scale_offset: new.scale_offset,
                });
            }
            edits
        }
        (old, new) if old != new => vec![MaterialEdit::Property {
            name: name.clone(),
            value: new.clone(),
        }],
        _ => Vec::new(),
    }
}

fn set_label(property: &MaterialProperty) -> String {
    format!("Set {}", property.display_name)
}
