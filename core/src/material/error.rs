//! Material editing error types.

use thiserror::Error;

use super::mode::RenderingMode;

/// Errors raised while writing material state.
///
/// Decoding and visibility resolution never fail; only writes that touch
/// named properties or a whole batch can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// A transaction was started on a batch with no materials in it.
    #[error("material batch is empty")]
    EmptyBatch,
    /// A batch member can no longer be edited (unloaded or locked).
    #[error("material \"{0}\" is no longer available")]
    ResourceUnavailable(String),
    /// The material has no property with the requested name.
    #[error("material \"{resource}\" has no property \"{property}\"")]
    UnknownProperty {
        /// Material name.
        resource: String,
        /// Requested property name.
        property: String,
    },
    /// The shader variant does not offer the requested mode.
    #[error("rendering mode {mode} is not offered by \"{profile}\"")]
    UnsupportedMode {
        /// Requested mode.
        mode: RenderingMode,
        /// Profile name.
        profile: String,
    },
    /// The new value's kind does not match the property's declared kind.
    #[error("property \"{property}\" expects a {expected} value, got {found}")]
    PropertyTypeMismatch {
        /// Property name.
        property: String,
        /// Kind stored on the material.
        expected: &'static str,
        /// Kind supplied by the edit.
        found: &'static str,
    },
}

/// Result type for material writes.
pub type MaterialResult<T = ()> = Result<T, MaterialError>;
