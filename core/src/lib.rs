//! # matmode core
//!
//! Rendering-mode resolution for shading materials: the keyword codec, the
//! render-state table, dependent-field visibility, atomic batch edits, and a
//! toolkit-independent inspector whose edits are undoable actions.

pub mod abstract_editor;
pub mod config;
pub mod inspector;
pub mod material;
pub mod resolver;

pub use resolver::ModeResolver;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the library version.
pub fn init() {
    log::info!("matmode core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
