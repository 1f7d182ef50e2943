//! Inspector labels.

use super::resource::MaterialProperty;

/// Text and optional tooltip for one inspector row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    pub text: String,
    pub tooltip: Option<String>,
}

/// Builds a label from literal text.
pub fn make_label(text: &str, tooltip: Option<&str>) -> Label {
    Label {
        text: text.to_owned(),
        tooltip: tooltip.map(str::to_owned),
    }
}

/// Builds a label from a property's display name.
pub fn property_label(property: &MaterialProperty, tooltip: Option<&str>) -> Label {
    make_label(&property.display_name, tooltip)
}
