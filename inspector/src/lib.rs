//! egui front end for the material inspector.
//!
//! [`EguiInspectorUi`] implements [`InspectorUi`] on top of an
//! [`egui::Ui`], and [`inspect_materials_ui`] draws a complete inspector
//! panel for a batch: the rows of [`MaterialInspector`] followed by a
//! read-only view of the primary member's render state.

use matmode_core::inspector::{InspectorActions, InspectorUi, MaterialInspector};
use matmode_core::material::{
    BlendFactor, Label, MaterialBatch, MaterialProperty, MaterialValue, RenderQueue,
    RenderStateSnapshot, ShadingResource, TextureRef,
};

/// Horizontal space per indentation level, in points.
const INDENT_WIDTH: f32 = 8.0;

/// [`InspectorUi`] backed by egui widgets.
pub struct EguiInspectorUi<'u> {
    ui: &'u mut egui::Ui,
    checks: Vec<bool>,
    indent: i32,
}

impl<'u> EguiInspectorUi<'u> {
    pub fn new(ui: &'u mut egui::Ui) -> Self {
        Self {
            ui,
            checks: Vec::new(),
            indent: 0,
        }
    }

    /// Current indentation level.
    pub fn indent_level(&self) -> i32 {
        self.indent
    }

    /// Number of change-check brackets still open.
    pub fn open_checks(&self) -> usize {
        self.checks.len()
    }

    fn mark_changed(&mut self, changed: bool) {
        if changed {
            for open in &mut self.checks {
                *open = true;
            }
        }
    }

    /// Lays out one row at the current indentation.
    fn row<T>(&mut self, add_contents: impl FnOnce(&mut egui::Ui) -> T) -> T {
        let space = self.indent.max(0) as f32 * INDENT_WIDTH;
        self.ui
            .horizontal(|ui| {
                ui.add_space(space);
                add_contents(ui)
            })
            .inner
    }
}

fn label_widget(ui: &mut egui::Ui, label: &Label) {
    let response = ui.label(label.text.as_str());
    if let Some(tooltip) = &label.tooltip {
        response.on_hover_text(tooltip.as_str());
    }
}

/// Texture name field. An empty name clears the slot.
fn texture_widget(ui: &mut egui::Ui, property: &mut MaterialProperty) -> bool {
    let MaterialValue::Texture(slot) = &mut property.value else {
        return value_widget(ui, property);
    };
    let mut name = slot
        .texture
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();
    let changed = ui
        .add(
            egui::TextEdit::singleline(&mut name)
                .hint_text("None")
                .desired_width(120.0),
        )
        .changed();
    if changed {
        slot.texture = (!name.is_empty()).then(|| TextureRef::new(name));
    }
    changed
}

/// Slider for ranged floats, drag values otherwise, color button for
/// non-HDR colors.
fn value_widget(ui: &mut egui::Ui, property: &mut MaterialProperty) -> bool {
    match &mut property.value {
        MaterialValue::Float(v) => match property.range {
            Some([min, max]) => ui.add(egui::Slider::new(v, min..=max)).changed(),
            None => ui.add(egui::DragValue::new(v).speed(0.01)).changed(),
        },
        MaterialValue::Vec4(v) if !property.hdr => {
            ui.color_edit_button_rgba_unmultiplied(v).changed()
        }
        MaterialValue::Vec4(v) => {
            let mut changed = false;
            for (component, prefix) in v.iter_mut().zip(["r: ", "g: ", "b: ", "a: "]) {
                changed |= ui
                    .add(egui::DragValue::new(component).speed(0.01).prefix(prefix))
                    .changed();
            }
            changed
        }
        MaterialValue::Texture(slot) => {
            ui.weak(slot.texture.as_ref().map_or("None", |t| t.name.as_str()));
            false
        }
    }
}

impl InspectorUi for EguiInspectorUi<'_> {
    fn begin_change_check(&mut self) {
        self.checks.push(false);
    }

    fn end_change_check(&mut self) -> bool {
        self.checks.pop().unwrap_or(false)
    }

    fn enum_popup(&mut self, label: &Label, selected: usize, options: &[&str]) -> usize {
        let mut current = selected;
        self.row(|ui| {
            label_widget(ui, label);
            egui::ComboBox::from_id_salt(&label.text)
                .selected_text(options.get(selected).copied().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for (i, option) in options.iter().enumerate() {
                        ui.selectable_value(&mut current, i, *option);
                    }
                });
        });
        self.mark_changed(current != selected);
        current
    }

    fn toggle(&mut self, label: &Label, value: bool) -> bool {
        let mut value = value;
        let changed = self.row(|ui| {
            let response = ui.checkbox(&mut value, label.text.as_str());
            let changed = response.changed();
            if let Some(tooltip) = &label.tooltip {
                response.on_hover_text(tooltip.as_str());
            }
            changed
        });
        self.mark_changed(changed);
        value
    }

    fn texture_property(
        &mut self,
        label: &Label,
        texture: &mut MaterialProperty,
        extra: Option<&mut MaterialProperty>,
    ) {
        let changed = self.row(|ui| {
            label_widget(ui, label);
            let mut changed = texture_widget(ui, texture);
            if let Some(extra) = extra {
                changed |= value_widget(ui, extra);
            }
            changed
        });
        self.mark_changed(changed);
    }

    fn shader_property(&mut self, label: &Label, property: &mut MaterialProperty) {
        let changed = self.row(|ui| {
            label_widget(ui, label);
            value_widget(ui, property)
        });
        self.mark_changed(changed);
    }

    fn texture_scale_offset(&mut self, texture: &mut MaterialProperty) {
        let MaterialValue::Texture(slot) = &mut texture.value else {
            return;
        };
        let [sx, sy, ox, oy] = &mut slot.scale_offset;
        let mut changed = false;
        for (name, x, y) in [("Tiling", sx, sy), ("Offset", ox, oy)] {
            changed |= self.row(|ui| {
                ui.label(name);
                let x = ui.add(egui::DragValue::new(x).speed(0.01).prefix("x: "));
                let y = ui.add(egui::DragValue::new(y).speed(0.01).prefix("y: "));
                x.changed() || y.changed()
            });
        }
        self.mark_changed(changed);
    }

    fn indent(&mut self, levels: i32) {
        self.indent += levels;
    }
}

/// Draws the full inspector for `batch` and returns the edits made this
/// frame. The host executes them through its undo history.
pub fn inspect_materials_ui<R>(
    ui: &mut egui::Ui,
    inspector: &MaterialInspector,
    batch: &MaterialBatch<R>,
) -> InspectorActions<R>
where
    R: ShadingResource + std::fmt::Debug + Send + 'static,
{
    let Some(primary) = batch.primary() else {
        ui.weak("No material selected");
        return Vec::new();
    };

    ui.horizontal(|ui| {
        ui.label("material");
        ui.label(primary.name());
        if batch.len() > 1 {
            ui.weak(format!("(+{} more)", batch.len() - 1));
        }
    });
    if !batch.is_uniform(inspector.resolver().variant()) {
        ui.colored_label(
            egui::Color32::YELLOW,
            "Selected materials use different rendering modes",
        );
    }
    ui.add_space(4.0);

    let actions = inspector.show(&mut EguiInspectorUi::new(ui), batch);
    show_render_state(ui, primary);
    actions
}

/// Read-only render state of the primary member.
fn show_render_state<R: ShadingResource>(ui: &mut egui::Ui, resource: &R) {
    let state = RenderStateSnapshot::read(resource);
    egui::CollapsingHeader::new("Render State")
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("queue");
                match RenderQueue::from_value(state.queue) {
                    Some(queue) => ui.label(format!("{queue:?} ({})", state.queue)),
                    None => ui.label(state.queue.to_string()),
                };
            });
            ui.horizontal(|ui| {
                ui.label("RenderType");
                if state.render_type.is_empty() {
                    ui.weak("(none)");
                } else {
                    ui.label(state.render_type.as_str());
                }
            });
            for (name, value) in [("src_blend", state.src_blend), ("dst_blend", state.dst_blend)] {
                ui.horizontal(|ui| {
                    ui.label(name);
                    match value.and_then(BlendFactor::from_value) {
                        Some(factor) => ui.label(format!("{factor:?}")),
                        None => ui.weak("(unset)"),
                    };
                });
            }
            ui.horizontal(|ui| {
                ui.label("z_write");
                ui.label(match state.z_write {
                    Some(0) => "Off",
                    Some(_) => "On",
                    None => "(unset)",
                });
            });
        });
}
