use matmode_core::abstract_editor::EditActionHistory;
use matmode_core::config::ShaderProfile;
use matmode_core::inspector::{InspectorUi, MaterialInspector};
use matmode_core::material::keywords::{
    EMISSION_MAP, METALLIC_MAP, RENDERING_FADE, SEMITRANSPARENT_SHADOWS, SMOOTHNESS_ALBEDO,
};
use matmode_core::material::{
    GlobalIllumination, Label, MaterialBatch, MaterialProperty, MaterialValue, RenderingMode,
    RenderingSettings, ShadingMaterial, ShadingResource, TextureRef, TextureSlot,
};

// ---------------------------------------------------------------------------
// Scripted toolkit
// ---------------------------------------------------------------------------

/// Widgets that apply scripted edits and report changes through the
/// change-check brackets. A change marks every open bracket.
#[derive(Default)]
struct ScriptedUi {
    open: Vec<bool>,
    select: Vec<(String, usize)>,
    toggles: Vec<(String, bool)>,
    floats: Vec<(String, f32)>,
    textures: Vec<(String, Option<String>)>,
    tiling: Option<[f32; 4]>,
    /// Report a change without altering any value.
    touch_everything: bool,
}

impl ScriptedUi {
    fn mark(&mut self) {
        for changed in &mut self.open {
            *changed = true;
        }
    }

    fn edit(&mut self, property: &mut MaterialProperty) {
        if self.touch_everything {
            self.mark();
        }
        match &mut property.value {
            MaterialValue::Float(v) => {
                if let Some(&(_, value)) = self.floats.iter().find(|(n, _)| *n == property.name) {
                    *v = value;
                    self.mark();
                }
            }
            MaterialValue::Texture(slot) => {
                if let Some((_, texture)) = self.textures.iter().find(|(n, _)| *n == property.name)
                {
                    slot.texture = texture.clone().map(TextureRef::new);
                    self.mark();
                }
            }
            MaterialValue::Vec4(_) => {}
        }
    }
}

impl InspectorUi for ScriptedUi {
    fn begin_change_check(&mut self) {
        self.open.push(false);
    }

    fn end_change_check(&mut self) -> bool {
        self.open.pop().unwrap_or(false)
    }

    fn enum_popup(&mut self, label: &Label, selected: usize, _options: &[&str]) -> usize {
        if self.touch_everything {
            self.mark();
        }
        match self.select.iter().find(|(l, _)| *l == label.text) {
            Some(&(_, index)) => {
                self.mark();
                index
            }
            None => selected,
        }
    }

    fn toggle(&mut self, label: &Label, value: bool) -> bool {
        if self.touch_everything {
            self.mark();
        }
        match self.toggles.iter().find(|(l, _)| *l == label.text) {
            Some(&(_, value)) => {
                self.mark();
                value
            }
            None => value,
        }
    }

    fn texture_property(
        &mut self,
        _label: &Label,
        texture: &mut MaterialProperty,
        extra: Option<&mut MaterialProperty>,
    ) {
        self.edit(texture);
        if let Some(extra) = extra {
            self.edit(extra);
        }
    }

    fn shader_property(&mut self, _label: &Label, property: &mut MaterialProperty) {
        self.edit(property);
    }

    fn texture_scale_offset(&mut self, texture: &mut MaterialProperty) {
        if let (Some(tiling), MaterialValue::Texture(slot)) = (self.tiling, &mut texture.value) {
            slot.scale_offset = tiling;
            self.mark();
        }
    }

    fn indent(&mut self, _levels: i32) {}
}

type Batch = MaterialBatch<ShadingMaterial>;

fn batch(n: usize) -> Batch {
    let profile = ShaderProfile::standard();
    MaterialBatch::new((0..n).map(|i| profile.new_material(format!("m{i}"))).collect())
}

fn run_pass(
    inspector: &MaterialInspector,
    ui: &mut ScriptedUi,
    batch: &mut Batch,
    history: &mut EditActionHistory<Batch>,
) {
    let actions = inspector.show(ui, batch);
    history.execute_all(actions, batch).unwrap();
}

fn float(mat: &ShadingMaterial, name: &str) -> f32 {
    match mat.find_property(name).map(|p| &p.value) {
        Some(MaterialValue::Float(v)) => *v,
        other => panic!("{name} is {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

#[test]
fn passes_without_edits_commit_nothing() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(2);
    let before = batch.clone();
    let mut history = EditActionHistory::new(10);

    for _ in 0..2 {
        run_pass(&inspector, &mut ScriptedUi::default(), &mut batch, &mut history);
    }
    assert_eq!(history.transaction_count(), 0);
    assert_eq!(batch, before);
}

#[test]
fn reported_change_with_same_values_commits_nothing() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(1);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        touch_everything: true,
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);
    assert_eq!(history.transaction_count(), 0);
}

// ---------------------------------------------------------------------------
// Rendering mode
// ---------------------------------------------------------------------------

#[test]
fn mode_change_applies_to_whole_batch() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(3);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        select: vec![("Rendering Mode".into(), RenderingMode::Fade.index())],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    assert_eq!(history.transaction_count(), 1);
    assert_eq!(history.undo_descriptions().next(), Some("Rendering Mode"));
    for member in batch.members() {
        assert!(member.keywords.contains(RENDERING_FADE));
        assert!(RenderingSettings::for_mode(RenderingMode::Fade).matches(member));
    }

    history.undo(&mut batch).unwrap();
    for member in batch.members() {
        assert!(!member.keywords.contains(RENDERING_FADE));
        assert!(RenderingSettings::for_mode(RenderingMode::Opaque).matches(member));
    }
}

#[test]
fn disabling_shadows_in_same_pass_shows_cutoff() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(1);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        select: vec![("Rendering Mode".into(), RenderingMode::Transparent.index())],
        toggles: vec![("Semitransparent Shadows".into(), false)],
        floats: vec![("_Cutoff".into(), 0.3)],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    // the toggle already reads `false`, so only mode and cutoff commit
    assert_eq!(history.transaction_count(), 2);
    let mat = batch.primary().unwrap();
    assert!((float(mat, "_Cutoff") - 0.3).abs() < f32::EPSILON);
}

#[test]
fn shadows_toggle_records_keyword() {
    let inspector = MaterialInspector::default();
    let mut batch = MaterialBatch::single(
        ShaderProfile::standard()
            .new_material("m")
            .with_keyword(RENDERING_FADE),
    );
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        toggles: vec![("Semitransparent Shadows".into(), true)],
        floats: vec![("_Cutoff".into(), 0.9)],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    let mat = batch.primary().unwrap();
    assert!(mat.keywords.contains(SEMITRANSPARENT_SHADOWS));
    // cutoff row is hidden once semitransparent shadows are on
    assert!((float(mat, "_Cutoff") - 0.5).abs() < f32::EPSILON);
    assert_eq!(
        history.undo_descriptions().collect::<Vec<_>>(),
        vec!["Semitransparent Shadows"]
    );
}

#[test]
fn cutout_only_profile_offers_two_modes() {
    let profile = ShaderProfile::cutout_only();
    let inspector = MaterialInspector::new(profile.clone());
    let mut batch = MaterialBatch::single(profile.new_material("m"));
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        select: vec![("Rendering Mode".into(), 1)],
        floats: vec![("_AlphaCutoff".into(), 0.25)],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    let mat = batch.primary().unwrap();
    assert_eq!(inspector.resolver().decode(mat), RenderingMode::Cutout);
    assert_eq!(mat.render_queue(), 2450);
    assert!((float(mat, "_AlphaCutoff") - 0.25).abs() < f32::EPSILON);
}

// ---------------------------------------------------------------------------
// Property rows
// ---------------------------------------------------------------------------

#[test]
fn slider_drag_is_one_undo_step() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(2);
    let original = batch.clone();
    let mut history = EditActionHistory::new(10);

    for value in [0.2, 0.4, 0.6] {
        let mut ui = ScriptedUi {
            floats: vec![("_Smoothness".into(), value)],
            ..Default::default()
        };
        run_pass(&inspector, &mut ui, &mut batch, &mut history);
    }
    assert_eq!(history.transaction_count(), 3);
    assert_eq!(history.undo_count(), 1);
    assert!(
        batch
            .members()
            .iter()
            .all(|m| (float(m, "_Smoothness") - 0.6).abs() < f32::EPSILON)
    );

    history.undo(&mut batch).unwrap();
    assert_eq!(batch, original);
}

#[test]
fn smoothness_source_writes_keyword() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(2);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        select: vec![("Source".into(), 1)],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    assert!(
        batch
            .members()
            .iter()
            .all(|m| m.keywords.contains(SMOOTHNESS_ALBEDO))
    );
    assert_eq!(history.undo_descriptions().next(), Some("Smoothness Source"));
}

#[test]
fn metallic_map_syncs_keyword() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(2);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        textures: vec![("_MetallicMap".into(), Some("rust_m".into()))],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);
    assert!(batch.members().iter().all(|m| m.keywords.contains(METALLIC_MAP)));

    let mut ui = ScriptedUi {
        textures: vec![("_MetallicMap".into(), None)],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);
    assert!(batch.members().iter().all(|m| !m.keywords.contains(METALLIC_MAP)));
}

#[test]
fn emission_bakes_and_syncs_keyword() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(2);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        textures: vec![("_EmissionMap".into(), Some("lava_e".into()))],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    for member in batch.members() {
        assert!(member.keywords.contains(EMISSION_MAP));
        assert_eq!(
            member.global_illumination(),
            GlobalIllumination::BakedEmissive
        );
    }
    assert_eq!(history.undo_descriptions().next(), Some("Set Emission"));
}

#[test]
fn missing_property_on_secondary_member_rolls_back() {
    let inspector = MaterialInspector::default();
    let mut members = batch(2).into_members();
    members[1].properties.retain(|p| p.name != "_Metallic");
    let mut batch = MaterialBatch::new(members);
    let before = batch.clone();
    let mut history = EditActionHistory::new(10);

    let mut ui = ScriptedUi {
        floats: vec![("_Metallic".into(), 1.0)],
        ..Default::default()
    };
    let actions = inspector.show(&mut ui, &batch);
    assert!(history.execute_all(actions, &mut batch).is_err());
    assert_eq!(batch, before);
    assert_eq!(history.transaction_count(), 0);
}

#[test]
fn empty_texture_name_clears_map_keyword() {
    let inspector = MaterialInspector::default();
    let mut batch = batch(1);
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        textures: vec![("_MetallicMap".into(), Some(String::new()))],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);
    assert_eq!(history.transaction_count(), 1);
    assert!(!batch.members()[0].keywords.contains(METALLIC_MAP));
}

// ---------------------------------------------------------------------------
// Texture slots across a batch
// ---------------------------------------------------------------------------

fn albedo_batch() -> Batch {
    let profile = ShaderProfile::standard();
    let members = [
        ("a", "a_albedo", [1.0, 1.0, 0.0, 0.0]),
        ("b", "b_albedo", [3.0, 3.0, 0.0, 0.0]),
    ]
    .into_iter()
    .map(|(name, texture, scale_offset)| {
        let mut mat = profile.new_material(name);
        mat.set_property_value(
            "_MainTex",
            MaterialValue::Texture(TextureSlot {
                scale_offset,
                ..TextureSlot::assigned(texture)
            }),
        )
        .unwrap();
        mat
    })
    .collect();
    MaterialBatch::new(members)
}

fn main_tex(mat: &ShadingMaterial) -> TextureSlot {
    mat.find_property("_MainTex")
        .and_then(|p| p.value.as_texture())
        .cloned()
        .unwrap()
}

#[test]
fn tiling_edit_keeps_secondary_texture() {
    let inspector = MaterialInspector::default();
    let mut batch = albedo_batch();
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        tiling: Some([2.0, 1.0, 0.0, 0.0]),
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    let [a, b] = batch.members() else {
        panic!("expected two members");
    };
    assert_eq!(main_tex(a).texture, Some(TextureRef::new("a_albedo")));
    assert_eq!(main_tex(b).texture, Some(TextureRef::new("b_albedo")));
    assert_eq!(main_tex(b).scale_offset, [2.0, 1.0, 0.0, 0.0]);
}

#[test]
fn texture_assignment_keeps_secondary_tiling() {
    let inspector = MaterialInspector::default();
    let mut batch = albedo_batch();
    let mut history = EditActionHistory::new(10);
    let mut ui = ScriptedUi {
        textures: vec![("_MainTex".into(), Some("shared".into()))],
        ..Default::default()
    };
    run_pass(&inspector, &mut ui, &mut batch, &mut history);

    let [a, b] = batch.members() else {
        panic!("expected two members");
    };
    assert_eq!(main_tex(a).texture, Some(TextureRef::new("shared")));
    assert_eq!(main_tex(b).texture, Some(TextureRef::new("shared")));
    assert_eq!(main_tex(b).scale_offset, [3.0, 3.0, 0.0, 0.0]);
}
