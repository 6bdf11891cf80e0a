//! Editable regions discovered in rendered element content

use crate::dom::NodeId;

use super::ContainerId;

/// Marker attribute naming the region's edit type
pub const EDIT_TYPE_ATTR: &str = "data-edit-type";
/// Marker attribute naming the region for downstream persistence
pub const EDIT_NAME_ATTR: &str = "data-edit-name";

/// Edit type of a region; selects its option set
///
/// The set is open: unrecognised values are kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditType {
    Text,
    Image,
    BackgroundImage,
    Other(String),
}

impl EditType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "text" => EditType::Text,
            "image" => EditType::Image,
            "background-image" => EditType::BackgroundImage,
            other => EditType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EditType::Text => "text",
            EditType::Image => "image",
            EditType::BackgroundImage => "background-image",
            EditType::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for EditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable zone of an element's rendered output
///
/// Regions are regenerated by every scan; they are not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRegion {
    /// `None` when the node carries no edit-type marker
    pub edit_type: Option<EditType>,
    /// Empty when the node carries no edit-name marker
    pub edit_name: String,
    pub owner: NodeId,
    /// Tag name of the owner node at scan time
    pub tag: String,
    /// Index among the marked nodes of the element, in document order
    pub position: usize,
    pub container: ContainerId,
}

impl EditableRegion {
    /// Both marker attributes were present
    pub fn is_well_formed(&self) -> bool {
        self.edit_type.is_some() && !self.edit_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_type_parse_known() {
        assert_eq!(EditType::parse("text"), EditType::Text);
        assert_eq!(EditType::parse("image"), EditType::Image);
        assert_eq!(
            EditType::parse("background-image"),
            EditType::BackgroundImage
        );
    }

    #[test]
    fn test_edit_type_parse_is_open() {
        let ty = EditType::parse("video");
        assert_eq!(ty, EditType::Other("video".to_string()));
        assert_eq!(ty.as_str(), "video");
    }
}
