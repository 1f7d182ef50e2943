//! Fixed render-state table keyed by [`RenderingMode`].
//!
//! Applying a mode copies its [`RenderingSettings`] record onto a material:
//! draw queue, `RenderType` override tag, blend factor slots and depth write.
//! The table is a constant and the single source of truth for how a mode
//! maps onto low-level blend/queue state.

use serde::{Deserialize, Serialize};

use super::mode::RenderingMode;
use super::resource::ShadingResource;

/// Override tag consumed by replacement shaders and pipeline passes.
pub const RENDER_TYPE_TAG: &str = "RenderType";
/// Integer slot holding the source blend factor.
pub const SRC_BLEND: &str = "_SrcBlend";
/// Integer slot holding the destination blend factor.
pub const DST_BLEND: &str = "_DstBlend";
/// Integer slot holding the depth-write switch (0 or 1).
pub const Z_WRITE: &str = "_ZWrite";

/// Coarse draw-order bucket. Lower queues draw first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderQueue {
    /// Drawn before everything else (skyboxes).
    Background,
    /// Opaque geometry.
    Geometry,
    /// Alpha-tested geometry, after opaque.
    AlphaTest,
    /// Blended geometry, back to front.
    Transparent,
    /// Drawn last (lens flares, HUD).
    Overlay,
}

impl RenderQueue {
    /// Numeric queue value stored on materials.
    pub fn value(self) -> i32 {
        match self {
            Self::Background => 1000,
            Self::Geometry => 2000,
            Self::AlphaTest => 2450,
            Self::Transparent => 3000,
            Self::Overlay => 4000,
        }
    }

    /// Maps a stored queue value back to its named bucket, if exact.
    pub fn from_value(value: i32) -> Option<Self> {
        [
            Self::Background,
            Self::Geometry,
            Self::AlphaTest,
            Self::Transparent,
            Self::Overlay,
        ]
        .into_iter()
        .find(|q| q.value() == value)
    }
}

/// Blend factor stored in the `_SrcBlend` / `_DstBlend` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendFactor {
    /// 0.0
    Zero,
    /// 1.0
    One,
    /// Destination color
    DstColor,
    /// Source color
    SrcColor,
    /// 1 - destination color
    OneMinusDstColor,
    /// Source alpha
    SrcAlpha,
    /// 1 - source color
    OneMinusSrcColor,
    /// Destination alpha
    DstAlpha,
    /// 1 - destination alpha
    OneMinusDstAlpha,
    /// min(source alpha, 1 - destination alpha)
    SrcAlphaSaturate,
    /// 1 - source alpha
    OneMinusSrcAlpha,
}

impl BlendFactor {
    const ALL: [Self; 11] = [
        Self::Zero,
        Self::One,
        Self::DstColor,
        Self::SrcColor,
        Self::OneMinusDstColor,
        Self::SrcAlpha,
        Self::OneMinusSrcColor,
        Self::DstAlpha,
        Self::OneMinusDstAlpha,
        Self::SrcAlphaSaturate,
        Self::OneMinusSrcAlpha,
    ];

    /// Integer encoding written to the blend slots.
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Decodes a blend slot value.
    pub fn from_value(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Render state for one rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingSettings {
    /// Draw queue.
    pub queue: RenderQueue,
    /// `RenderType` override tag. Empty means "no tag".
    pub render_type: &'static str,
    /// Source blend factor.
    pub src_blend: BlendFactor,
    /// Destination blend factor.
    pub dst_blend: BlendFactor,
    /// Whether depth is written.
    pub z_write: bool,
}

/// One record per [`RenderingMode`], indexed by [`RenderingMode::index`].
pub static RENDERING_SETTINGS: [RenderingSettings; 4] = [
    RenderingSettings {
        queue: RenderQueue::Geometry,
        render_type: "",
        src_blend: BlendFactor::One,
        dst_blend: BlendFactor::Zero,
        z_write: true,
    },
    RenderingSettings {
        queue: RenderQueue::AlphaTest,
        render_type: "TransparentCutout",
        src_blend: BlendFactor::One,
        dst_blend: BlendFactor::Zero,
        z_write: true,
    },
    RenderingSettings {
        queue: RenderQueue::Transparent,
        render_type: "Transparent",
        src_blend: BlendFactor::SrcAlpha,
        dst_blend: BlendFactor::OneMinusSrcAlpha,
        z_write: false,
    },
    RenderingSettings {
        queue: RenderQueue::Transparent,
        render_type: "Transparent",
        src_blend: BlendFactor::One,
        dst_blend: BlendFactor::OneMinusSrcAlpha,
        z_write: false,
    },
];

impl RenderingSettings {
    /// The table record for `mode`.
    pub fn for_mode(mode: RenderingMode) -> &'static Self {
        &RENDERING_SETTINGS[mode.index()]
    }

    /// Copies this record onto a single material.
    pub fn apply_to<R: ShadingResource>(&self, resource: &mut R) {
        resource.set_render_queue(self.queue.value());
        resource.set_override_tag(RENDER_TYPE_TAG, self.render_type);
        resource.set_int(SRC_BLEND, self.src_blend.value());
        resource.set_int(DST_BLEND, self.dst_blend.value());
        resource.set_int(Z_WRITE, i32::from(self.z_write));
    }

    /// Returns `true` if `resource` currently carries exactly this record.
    pub fn matches<R: ShadingResource>(&self, resource: &R) -> bool {
        resource.render_queue() == self.queue.value()
            && resource.override_tag(RENDER_TYPE_TAG).unwrap_or("") == self.render_type
            && resource.int(SRC_BLEND) == Some(self.src_blend.value())
            && resource.int(DST_BLEND) == Some(self.dst_blend.value())
            && resource.int(Z_WRITE) == Some(i32::from(self.z_write))
    }
}

/// Low-level render state read back from a material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStateSnapshot {
    /// Draw queue value.
    pub queue: i32,
    /// `RenderType` tag, empty when absent.
    pub render_type: String,
    /// Source blend slot.
    pub src_blend: Option<i32>,
    /// Destination blend slot.
    pub dst_blend: Option<i32>,
    /// Depth-write slot.
    pub z_write: Option<i32>,
}

impl RenderStateSnapshot {
    /// Reads the mode-derived render state of `resource`.
    pub fn read<R: ShadingResource>(resource: &R) -> Self {
        Self {
            queue: resource.render_queue(),
            render_type: resource
                .override_tag(RENDER_TYPE_TAG)
                .unwrap_or_default()
                .to_owned(),
            src_blend: resource.int(SRC_BLEND),
            dst_blend: resource.int(DST_BLEND),
            z_write: resource.int(Z_WRITE),
        }
    }
}
