//! Material model and rendering-mode resolution.
//!
//! - [`ShadingResource`]: capability surface of a material (keywords,
//!   named properties, queue, tags, integer state slots)
//! - [`ShadingMaterial`]: in-memory material implementing it
//! - [`RenderingMode`] / [`decode_mode`] / [`encode_mode`]: keyword codec
//! - [`RenderingSettings`]: fixed render-state table keyed by mode
//! - [`resolve_visibility`]: which optional inspector fields to show
//! - [`MaterialBatch`]: materials edited together, written atomically
//! - [`Label`]: stateless inspector label construction

mod batch;
mod error;
pub mod keywords;
mod label;
mod mode;
mod render_state;
mod resource;
mod visibility;

pub use batch::MaterialBatch;
pub use error::{MaterialError, MaterialResult};
pub use keywords::KeywordSet;
pub use label::{Label, make_label, property_label};
pub use mode::{ModeVariant, RenderingMode, SmoothnessSource, decode_mode, encode_mode};
pub use render_state::{
    BlendFactor, DST_BLEND, RENDER_TYPE_TAG, RENDERING_SETTINGS, RenderQueue, RenderStateSnapshot,
    RenderingSettings, SRC_BLEND, Z_WRITE,
};
pub use resource::{
    GlobalIllumination, MaterialProperty, MaterialValue, ShadingMaterial, ShadingResource,
    TextureRef, TextureSlot,
};
pub use visibility::{EditorFields, VisibilityInputs, resolve_visibility};
