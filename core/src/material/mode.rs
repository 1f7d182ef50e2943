//! Rendering-mode keyword codec.
//!
//! The current [`RenderingMode`] is never stored on a material. It is derived
//! from mutually exclusive mode keywords, checked in a fixed priority order:
//! Cutout, then Fade, then Transparent, otherwise Opaque. When external state
//! violates the exclusion (two mode keywords enabled) the highest-priority
//! keyword wins and the next [`encode_mode`] rewrites every mode keyword,
//! which restores a canonical set. Inconsistent input is never an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keywords::{RENDERING_CUTOUT, RENDERING_FADE, RENDERING_TRANSPARENT, SMOOTHNESS_ALBEDO};
use super::resource::ShadingResource;

/// How a material composites its surface, ordered
/// `Opaque < Cutout < Fade < Transparent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RenderingMode {
    /// Alpha ignored.
    #[default]
    Opaque,
    /// Alpha tested against a cutoff threshold.
    Cutout,
    /// Alpha blended; lighting fades with alpha.
    Fade,
    /// Premultiplied alpha blending.
    Transparent,
}

impl RenderingMode {
    /// All modes in enumeration order.
    pub const ALL: [Self; 4] = [Self::Opaque, Self::Cutout, Self::Fade, Self::Transparent];

    /// Position in [`ALL`](Self::ALL), also the render-state table index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Opaque => "Opaque",
            Self::Cutout => "Cutout",
            Self::Fade => "Fade",
            Self::Transparent => "Transparent",
        }
    }

    /// The keyword that selects this mode. Opaque has none.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Opaque => None,
            Self::Cutout => Some(RENDERING_CUTOUT),
            Self::Fade => Some(RENDERING_FADE),
            Self::Transparent => Some(RENDERING_TRANSPARENT),
        }
    }

    /// Fade and Transparent blend with the framebuffer.
    pub fn is_blended(self) -> bool {
        matches!(self, Self::Fade | Self::Transparent)
    }
}

impl fmt::Display for RenderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RenderingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rendering mode \"{s}\""))
    }
}

/// Which subset of [`RenderingMode`] a shader supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeVariant {
    /// Opaque, Cutout, Fade and Transparent.
    #[default]
    Full,
    /// Opaque and Cutout only; no blended modes, no shadow sub-toggle.
    CutoutOnly,
}

impl ModeVariant {
    /// Selectable modes, in enumeration order.
    pub fn modes(self) -> &'static [RenderingMode] {
        const CUTOUT_ONLY: [RenderingMode; 2] = [RenderingMode::Opaque, RenderingMode::Cutout];
        match self {
            Self::Full => &RenderingMode::ALL,
            Self::CutoutOnly => &CUTOUT_ONLY,
        }
    }

    /// Mode keywords in decode priority order.
    pub fn mode_keywords(self) -> &'static [(RenderingMode, &'static str)] {
        const FULL: [(RenderingMode, &str); 3] = [
            (RenderingMode::Cutout, RENDERING_CUTOUT),
            (RenderingMode::Fade, RENDERING_FADE),
            (RenderingMode::Transparent, RENDERING_TRANSPARENT),
        ];
        const CUTOUT_ONLY: [(RenderingMode, &str); 1] = [(RenderingMode::Cutout, RENDERING_CUTOUT)];
        match self {
            Self::Full => &FULL,
            Self::CutoutOnly => &CUTOUT_ONLY,
        }
    }

    /// Returns `true` if `mode` is selectable in this variant.
    pub fn supports(self, mode: RenderingMode) -> bool {
        self.modes().contains(&mode)
    }
}

/// Derives the current mode from the material's keywords.
///
/// Total: an inconsistent keyword set decodes to its highest-priority mode.
pub fn decode_mode<R: ShadingResource>(resource: &R, variant: ModeVariant) -> RenderingMode {
    let mut enabled = variant
        .mode_keywords()
        .iter()
        .filter(|(_, keyword)| resource.is_keyword_enabled(keyword));

    let Some(&(mode, _)) = enabled.next() else {
        return RenderingMode::Opaque;
    };
    let extra = enabled.count();
    if extra > 0 {
        log::warn!(
            "material \"{}\" has {} conflicting rendering keywords, using {mode}",
            resource.name(),
            extra + 1
        );
    }
    mode
}

/// Writes every mode keyword of `variant` as `keyword_mode == mode`.
///
/// Idempotent, and repairs any inconsistent keyword set. A mode outside the
/// variant clears all mode keywords, which decodes as Opaque.
pub fn encode_mode<R: ShadingResource>(
    resource: &mut R,
    variant: ModeVariant,
    mode: RenderingMode,
) {
    for &(keyword_mode, keyword) in variant.mode_keywords() {
        resource.set_keyword(keyword, keyword_mode == mode);
    }
}

/// Where the smoothness value is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothnessSource {
    /// Metallic map alpha (or uniform value).
    #[default]
    Metallic,
    /// Albedo map alpha.
    Albedo,
}

impl SmoothnessSource {
    /// Both sources in enumeration order.
    pub const ALL: [Self; 2] = [Self::Metallic, Self::Albedo];

    pub fn label(self) -> &'static str {
        match self {
            Self::Metallic => "Metallic",
            Self::Albedo => "Albedo",
        }
    }

    pub fn decode<R: ShadingResource>(resource: &R) -> Self {
        if resource.is_keyword_enabled(SMOOTHNESS_ALBEDO) {
            Self::Albedo
        } else {
            Self::Metallic
        }
    }

    pub fn encode<R: ShadingResource>(self, resource: &mut R) {
        resource.set_keyword(SMOOTHNESS_ALBEDO, self == Self::Albedo);
    }
}
