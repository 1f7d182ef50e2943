//! Shader profiles.
//!
//! A [`ShaderProfile`] tells the resolver which modes a shader supports and
//! which property names its inspector rows bind to. Profiles are loaded from
//! TOML:
//!
//! ```toml
//! name = "My Standard (cutout)"
//! variant = "cutout_only"
//! max_undo = 50
//!
//! [properties]
//! color = "_Tint"
//! cutoff = "_AlphaCutoff"
//! ```
//!
//! Omitted fields take the values of [`ShaderProfile::standard`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::abstract_editor::DEFAULT_MAX_UNDO;
use crate::material::{
    MaterialProperty, MaterialValue, ModeVariant, RenderingMode, RenderingSettings,
    ShadingMaterial, TextureSlot,
};

/// Errors raised while loading or saving profiles and material files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Property names the inspector binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub main_tex: String,
    pub color: String,
    pub cutoff: String,
    pub metallic_map: String,
    pub metallic: String,
    pub smoothness: String,
    pub normal_map: String,
    pub normal_scale: String,
    pub occlusion_map: String,
    pub occlusion_strength: String,
    pub emission_map: String,
    pub emission: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            main_tex: "_MainTex".into(),
            color: "_Color".into(),
            cutoff: "_Cutoff".into(),
            metallic_map: "_MetallicMap".into(),
            metallic: "_Metallic".into(),
            smoothness: "_Smoothness".into(),
            normal_map: "_NormalMap".into(),
            normal_scale: "_NormalScale".into(),
            occlusion_map: "_OcclusionMap".into(),
            occlusion_strength: "_OcclusionStrength".into(),
            emission_map: "_EmissionMap".into(),
            emission: "_Emission".into(),
        }
    }
}

/// Shader-specific resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderProfile {
    pub name: String,
    pub variant: ModeVariant,
    /// Undo depth for editors hosting this profile.
    pub max_undo: usize,
    pub properties: PropertyNames,
}

impl Default for ShaderProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShaderProfile {
    /// Four rendering modes, `_Color` tint and `_Cutoff` threshold.
    pub fn standard() -> Self {
        Self {
            name: "My Standard".into(),
            variant: ModeVariant::Full,
            max_undo: DEFAULT_MAX_UNDO,
            properties: PropertyNames::default(),
        }
    }

    /// Opaque/Cutout only, `_Tint` tint and `_AlphaCutoff` threshold.
    pub fn cutout_only() -> Self {
        Self {
            name: "My Standard (cutout)".into(),
            variant: ModeVariant::CutoutOnly,
            max_undo: DEFAULT_MAX_UNDO,
            properties: PropertyNames {
                color: "_Tint".into(),
                cutoff: "_AlphaCutoff".into(),
                ..PropertyNames::default()
            },
        }
    }

    /// Creates an opaque material carrying every property this profile binds.
    pub fn new_material(&self, name: impl Into<String>) -> ShadingMaterial {
        let p = &self.properties;
        let texture = || MaterialValue::Texture(TextureSlot::default());
        let mut material = ShadingMaterial::new(name)
            .with_shader(self.name.clone())
            .with_property(
                MaterialProperty::new(&p.main_tex, texture()).with_display_name("Albedo"),
            )
            .with_property(
                MaterialProperty::new(&p.color, MaterialValue::Vec4([1.0; 4]))
                    .with_display_name("Tint"),
            )
            .with_property(
                MaterialProperty::new(&p.cutoff, MaterialValue::Float(0.5))
                    .with_display_name("Alpha Cutoff")
                    .with_range(0.0, 1.0),
            )
            .with_property(
                MaterialProperty::new(&p.metallic_map, texture()).with_display_name("Metallic"),
            )
            .with_property(
                MaterialProperty::new(&p.metallic, MaterialValue::Float(0.0))
                    .with_display_name("Metallic")
                    .with_range(0.0, 1.0),
            )
            .with_property(
                MaterialProperty::new(&p.smoothness, MaterialValue::Float(0.1))
                    .with_display_name("Smoothness")
                    .with_range(0.0, 1.0),
            )
            .with_property(
                MaterialProperty::new(&p.normal_map, texture()).with_display_name("Normals"),
            )
            .with_property(
                MaterialProperty::new(&p.normal_scale, MaterialValue::Float(1.0))
                    .with_display_name("Bump Scale"),
            )
            .with_property(
                MaterialProperty::new(&p.occlusion_map, texture()).with_display_name("Occlusion"),
            )
            .with_property(
                MaterialProperty::new(&p.occlusion_strength, MaterialValue::Float(1.0))
                    .with_display_name("Occlusion Strength")
                    .with_range(0.0, 1.0),
            )
            .with_property(
                MaterialProperty::new(&p.emission_map, texture()).with_display_name("Emission"),
            )
            .with_property(
                MaterialProperty::new(&p.emission, MaterialValue::Vec4([0.0, 0.0, 0.0, 1.0]))
                    .with_display_name("Emission")
                    .with_hdr(),
            );
        RenderingSettings::for_mode(RenderingMode::Opaque).apply_to(&mut material);
        material
    }
}

/// Loads a profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<ShaderProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Loads a profile, falling back to [`ShaderProfile::standard`] on any error.
pub fn load_or_default(path: &Path) -> ShaderProfile {
    match load_profile(path) {
        Ok(profile) => {
            log::info!(
                "Loaded shader profile: {} ({:?})",
                profile.name,
                profile.variant
            );
            profile
        }
        Err(e) => {
            log::warn!("{e}, using the standard profile");
            ShaderProfile::standard()
        }
    }
}

/// Loads a material from a TOML file.
pub fn load_material(path: &Path) -> Result<ShadingMaterial, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Serializes a material to TOML text.
pub fn material_to_toml(material: &ShadingMaterial) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(material)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModeResolver;
    use crate::material::{EditorFields, ShadingResource};

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: ShaderProfile = toml::from_str(
            r#"
            name = "Cutout test"
            variant = "cutout_only"

            [properties]
            cutoff = "_AlphaCutoff"
            "#,
        )
        .unwrap();
        assert_eq!(profile.variant, ModeVariant::CutoutOnly);
        assert_eq!(profile.max_undo, DEFAULT_MAX_UNDO);
        assert_eq!(profile.properties.cutoff, "_AlphaCutoff");
        assert_eq!(profile.properties.color, "_Color");
    }

    #[test]
    fn builtin_profiles_differ_in_names() {
        let standard = ShaderProfile::standard();
        let cutout = ShaderProfile::cutout_only();
        assert_eq!(standard.properties.cutoff, "_Cutoff");
        assert_eq!(cutout.properties.cutoff, "_AlphaCutoff");
        assert_eq!(cutout.properties.color, "_Tint");
        assert_eq!(cutout.variant.modes().len(), 2);
    }

    #[test]
    fn new_material_binds_every_slot() {
        let profile = ShaderProfile::cutout_only();
        let material = profile.new_material("crate");
        let p = &profile.properties;
        for name in [
            &p.main_tex,
            &p.color,
            &p.cutoff,
            &p.metallic_map,
            &p.metallic,
            &p.smoothness,
            &p.normal_map,
            &p.normal_scale,
            &p.occlusion_map,
            &p.occlusion_strength,
            &p.emission_map,
            &p.emission,
        ] {
            assert!(material.find_property(name).is_some(), "missing {name}");
        }
        assert!(RenderingSettings::for_mode(RenderingMode::Opaque).matches(&material));
    }

    #[test]
    fn material_toml_round_trip() {
        let material = ShaderProfile::standard().new_material("brick");
        let text = material_to_toml(&material).unwrap();
        let parsed: ShadingMaterial = toml::from_str(&text).unwrap();
        assert_eq!(parsed, material);
    }

    #[test]
    fn empty_texture_name_in_file_is_unassigned() {
        let profile = ShaderProfile::standard();
        let mut material = profile.new_material("blank");
        material
            .set_property_value(
                &profile.properties.normal_map,
                MaterialValue::Texture(TextureSlot::assigned("")),
            )
            .unwrap();
        let text = material_to_toml(&material).unwrap();
        assert!(text.contains("texture = \"\""));

        let parsed: ShadingMaterial = toml::from_str(&text).unwrap();
        assert!(!parsed.has_texture(&profile.properties.normal_map));
        let fields = ModeResolver::new(profile).resolve_visibility(&parsed);
        assert!(!fields.contains(EditorFields::NORMAL_SCALE));
    }

    #[test]
    fn missing_profile_file_is_io_error() {
        let err = load_profile(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(
            load_or_default(Path::new("/nonexistent/profile.toml")),
            ShaderProfile::standard()
        );
    }
}
