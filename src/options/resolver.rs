//! Option resolver: edit type → ordered option keys → rendered controls
//!
//! The per-type tables are ordered; the order is the left-to-right layout of
//! the toolbelt and must not change.

use crate::dom::{Dom, Listener, NodeId};
use crate::model::{EditType, EditableRegion, ToolbeltKey};

use super::catalog::{OptionKey, OptionKind, OptionRef};
use super::controls::RichControl;

pub const TEXT_OPTIONS: &[OptionKey] = &[
    OptionKey::TextColor,
    OptionKey::BgColor,
    OptionKey::EditText,
    OptionKey::Size,
];

pub const IMAGE_OPTIONS: &[OptionKey] = &[
    OptionKey::BorderColor,
    OptionKey::BgColor,
    OptionKey::Crop,
    OptionKey::Effect,
    OptionKey::ImageReplace,
];

pub const BACKGROUND_IMAGE_OPTIONS: &[OptionKey] = &[
    OptionKey::BgColor,
    OptionKey::Effect,
    OptionKey::ImageReplace,
];

/// Options for an edit type; unregistered types get none
pub fn options_for(edit_type: &EditType) -> &'static [OptionKey] {
    match edit_type {
        EditType::Text => TEXT_OPTIONS,
        EditType::Image => IMAGE_OPTIONS,
        EditType::BackgroundImage => BACKGROUND_IMAGE_OPTIONS,
        EditType::Other(_) => &[],
    }
}

/// Options for a raw edit-type string
pub fn resolve_options(edit_type: &str) -> &'static [OptionKey] {
    options_for(&EditType::parse(edit_type))
}

/// Options for a region; a region without an edit type gets none
pub fn resolve_for_region(region: &EditableRegion) -> Vec<OptionRef> {
    match &region.edit_type {
        Some(edit_type) => options_for(edit_type)
            .iter()
            .copied()
            .map(OptionRef::Known)
            .collect(),
        None => Vec::new(),
    }
}

/// One rendered option inside a toolbelt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub option: OptionRef,
    pub icon: &'static str,
    pub label: &'static str,
    pub kind: OptionKind,
    /// The control node in the popup
    pub node: NodeId,
}

/// Build a control node per option under `parent`, wired to `toolbelt`
pub fn materialize(
    dom: &mut Dom,
    parent: NodeId,
    toolbelt: &ToolbeltKey,
    options: &[OptionRef],
) -> Vec<OptionView> {
    options
        .iter()
        .map(|option| {
            let kind = option.kind();
            let rich = option.key().and_then(RichControl::for_option);
            let node = match &rich {
                Some(control) => dom.create_element(control.kind.tag()),
                None => {
                    let node = dom.create_element("div");
                    dom.add_class(node, "option");
                    node
                }
            };
            dom.set_attribute(node, "option", option.as_str());

            let icon = dom.create_element("sl-icon");
            dom.set_attribute(icon, "name", option.icon());
            dom.append_child(node, icon);

            let text = dom.create_element("span");
            dom.add_class(text, "option-text");
            dom.set_text(text, option.label());
            dom.append_child(node, text);

            dom.add_listener(
                node,
                Listener::OptionClick {
                    toolbelt: toolbelt.clone(),
                    option: option.clone(),
                },
            );
            dom.append_child(parent, node);

            OptionView {
                option: option.clone(),
                icon: option.icon(),
                label: option.label(),
                kind,
                node,
            }
        })
        .collect()
}
