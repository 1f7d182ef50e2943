//! Shading resources: the material instances the resolver edits.
//!
//! The resolver never owns materials. It talks to them through the
//! [`ShadingResource`] capability trait, which covers keyword flags, named
//! property lookup, and the low-level render state (queue, override tags,
//! integer state slots, illumination baking). [`ShadingMaterial`] is the
//! in-memory implementation used by the CLI, the tests and any host that
//! has no material type of its own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{MaterialError, MaterialResult};
use super::keywords::KeywordSet;

/// Reference to a texture asset by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef {
    /// Asset name, resolved by the host.
    pub name: String,
}

impl TextureRef {
    /// Creates a texture reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A texture property: an optional texture plus its tiling and offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Assigned texture. `None` means the slot is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureRef>,
    /// Tiling `[x, y]` followed by offset `[x, y]`.
    #[serde(default = "default_scale_offset")]
    pub scale_offset: [f32; 4],
}

fn default_scale_offset() -> [f32; 4] {
    [1.0, 1.0, 0.0, 0.0]
}

impl Default for TextureSlot {
    fn default() -> Self {
        Self {
            texture: None,
            scale_offset: default_scale_offset(),
        }
    }
}

impl TextureSlot {
    /// Creates a slot holding `texture` with identity tiling.
    pub fn assigned(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(TextureRef::new(texture)),
            ..Self::default()
        }
    }

    /// Returns `true` if a texture with a non-empty name is assigned.
    pub fn is_assigned(&self) -> bool {
        self.texture.as_ref().is_some_and(|t| !t.name.is_empty())
    }
}

/// A typed material property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialValue {
    /// Single float (metallic, smoothness, normal scale, cutoff).
    Float(f32),
    /// 4-component vector (tint and emission colors).
    Vec4([f32; 4]),
    /// Texture slot.
    Texture(TextureSlot),
}

impl MaterialValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec4(_) => "vec4",
            Self::Texture(_) => "texture",
        }
    }

    /// The texture slot, if this is a texture value.
    pub fn as_texture(&self) -> Option<&TextureSlot> {
        match self {
            Self::Texture(slot) => Some(slot),
            _ => None,
        }
    }
}

/// A named property on a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    /// Shader-side name (e.g. `_MainTex`).
    pub name: String,
    /// Human-readable name shown by inspectors.
    pub display_name: String,
    /// Current value.
    pub value: MaterialValue,
    /// Slider range `[min, max]` for float properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f32; 2]>,
    /// Color is high dynamic range (emission).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hdr: bool,
}

impl MaterialProperty {
    /// Creates a property whose display name equals its shader name.
    pub fn new(name: impl Into<String>, value: MaterialValue) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            value,
            range: None,
            hdr: false,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the slider range.
    #[must_use]
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.range = Some([min, max]);
        self
    }

    /// Mark the color as HDR.
    #[must_use]
    pub fn with_hdr(mut self) -> Self {
        self.hdr = true;
        self
    }
}

/// How emission participates in global illumination baking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalIllumination {
    /// Emission does not contribute to GI.
    #[default]
    None,
    /// Emission contributes to realtime GI.
    RealtimeEmissive,
    /// Emission is baked into lightmaps.
    BakedEmissive,
    /// Emission is known to be black; skip it.
    EmissiveIsBlack,
}

/// Capability surface the resolver needs from a material.
///
/// Writes to keywords, queue, tags and integer slots are infallible; named
/// property writes fail when the property is missing or the value kind does
/// not match.
pub trait ShadingResource: Clone {
    /// Name for logs and errors.
    fn name(&self) -> &str;

    /// Whether the material can currently be written.
    fn is_editable(&self) -> bool {
        true
    }

    fn is_keyword_enabled(&self, keyword: &str) -> bool;

    fn set_keyword(&mut self, keyword: &str, enabled: bool);

    /// Looks up a named property.
    fn find_property(&self, name: &str) -> Option<&MaterialProperty>;

    /// Replaces the value of an existing property.
    fn set_property_value(&mut self, name: &str, value: MaterialValue) -> MaterialResult;

    fn render_queue(&self) -> i32;

    fn set_render_queue(&mut self, queue: i32);

    fn override_tag(&self, tag: &str) -> Option<&str>;

    /// Sets an override tag. An empty value removes the tag.
    fn set_override_tag(&mut self, tag: &str, value: &str);

    /// Reads an integer state slot such as `_SrcBlend`.
    fn int(&self, name: &str) -> Option<i32>;

    fn set_int(&mut self, name: &str, value: i32);

    fn global_illumination(&self) -> GlobalIllumination;

    fn set_global_illumination(&mut self, flags: GlobalIllumination);

    /// Returns `true` if the named texture slot holds a texture.
    ///
    /// Missing or non-texture properties count as empty.
    fn has_texture(&self, name: &str) -> bool {
        self.find_property(name)
            .and_then(|p| p.value.as_texture())
            .is_some_and(TextureSlot::is_assigned)
    }
}

/// In-memory material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadingMaterial {
    /// Material name.
    pub name: String,
    /// Shader the material binds (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader: Option<String>,
    /// Built-in materials are read-only and reject every transaction.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    /// Draw-queue value.
    #[serde(default = "default_render_queue")]
    pub render_queue: i32,
    /// Enabled keywords.
    #[serde(default)]
    pub keywords: KeywordSet,
    /// Override tags (`RenderType`, ...).
    #[serde(default)]
    pub override_tags: BTreeMap<String, String>,
    /// Integer state slots (`_SrcBlend`, `_DstBlend`, `_ZWrite`).
    #[serde(default)]
    pub ints: BTreeMap<String, i32>,
    /// Illumination baking flags.
    #[serde(default)]
    pub global_illumination: GlobalIllumination,
    /// Named properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<MaterialProperty>,
}

fn default_render_queue() -> i32 {
    super::render_state::RenderQueue::Geometry.value()
}

impl ShadingMaterial {
    /// Creates an empty, editable material in the geometry queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: None,
            read_only: false,
            render_queue: default_render_queue(),
            keywords: KeywordSet::new(),
            override_tags: BTreeMap::new(),
            ints: BTreeMap::new(),
            global_illumination: GlobalIllumination::None,
            properties: Vec::new(),
        }
    }

    /// Add a property.
    #[must_use]
    pub fn with_property(mut self, property: MaterialProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Enable a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keywords.set(keyword, true);
        self
    }

    /// Set the shader name.
    #[must_use]
    pub fn with_shader(mut self, shader: impl Into<String>) -> Self {
        self.shader = Some(shader.into());
        self
    }
}

impl ShadingResource for ShadingMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_editable(&self) -> bool {
        !self.read_only
    }

    fn is_keyword_enabled(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    fn set_keyword(&mut self, keyword: &str, enabled: bool) {
        self.keywords.set(keyword, enabled);
    }

    fn find_property(&self, name: &str) -> Option<&MaterialProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    fn set_property_value(&mut self, name: &str, value: MaterialValue) -> MaterialResult {
        let Some(property) = self.properties.iter_mut().find(|p| p.name == name) else {
            return Err(MaterialError::UnknownProperty {
                resource: self.name.clone(),
                property: name.to_owned(),
            });
        };
        if std::mem::discriminant(&property.value) != std::mem::discriminant(&value) {
            return Err(MaterialError::PropertyTypeMismatch {
                property: name.to_owned(),
                expected: property.value.kind_name(),
                found: value.kind_name(),
            });
        }
        property.value = value;
        Ok(())
    }

    fn render_queue(&self) -> i32 {
        self.render_queue
    }

    fn set_render_queue(&mut self, queue: i32) {
        self.render_queue = queue;
    }

    fn override_tag(&self, tag: &str) -> Option<&str> {
        self.override_tags.get(tag).map(String::as_str)
    }

    fn set_override_tag(&mut self, tag: &str, value: &str) {
        if value.is_empty() {
            self.override_tags.remove(tag);
        } else {
            self.override_tags.insert(tag.to_owned(), value.to_owned());
        }
    }

    fn int(&self, name: &str) -> Option<i32> {
        self.ints.get(name).copied()
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.ints.insert(name.to_owned(), value);
    }

    fn global_illumination(&self) -> GlobalIllumination {
        self.global_illumination
    }

    fn set_global_illumination(&mut self, flags: GlobalIllumination) {
        self.global_illumination = flags;
    }
}
