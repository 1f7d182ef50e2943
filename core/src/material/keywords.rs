//! Shader feature keywords.
//!
//! A keyword is a named boolean switch stored on a material. The bound
//! shader program picks its code path from the set of enabled keywords, so
//! the set has plain set semantics: a keyword is either present or absent.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Alpha-tested rendering.
pub const RENDERING_CUTOUT: &str = "_RENDERING_CUTOUT";
/// Alpha-blended rendering, lighting fades with alpha.
pub const RENDERING_FADE: &str = "_RENDERING_FADE";
/// Premultiplied-alpha rendering, specular survives low alpha.
pub const RENDERING_TRANSPARENT: &str = "_RENDERING_TRANSPARENT";
/// Blended modes cast dithered instead of alpha-tested shadows.
pub const SEMITRANSPARENT_SHADOWS: &str = "_SEMITRANSPARENT_SHADOWS";
/// Smoothness is read from the albedo alpha channel.
pub const SMOOTHNESS_ALBEDO: &str = "_SMOOTHNESS_ALBEDO";
/// A metallic map is assigned.
pub const METALLIC_MAP: &str = "_METALLIC_MAP";
/// An occlusion map is assigned.
pub const OCCLUSION_MAP: &str = "_OCCLUSION_MAP";
/// An emission map is assigned.
pub const EMISSION_MAP: &str = "_EMISSION_MAP";

/// Set of enabled keywords on one material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    enabled: BTreeSet<String>,
}

impl KeywordSet {
    /// Creates an empty keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `keyword` is enabled.
    pub fn contains(&self, keyword: &str) -> bool {
        self.enabled.contains(keyword)
    }

    /// Enables or disables `keyword`. Returns `true` if the set changed.
    pub fn set(&mut self, keyword: &str, enabled: bool) -> bool {
        if enabled {
            if self.enabled.contains(keyword) {
                return false;
            }
            self.enabled.insert(keyword.to_owned())
        } else {
            self.enabled.remove(keyword)
        }
    }

    /// Iterates enabled keywords in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    /// Number of enabled keywords.
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Returns `true` if no keyword is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(Into::into).collect(),
        }
    }
}
