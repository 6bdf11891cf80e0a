//! Profile header block: backdrop, avatar, display name and subtitle

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};
use crate::model::{EDIT_NAME_ATTR, EDIT_TYPE_ATTR};
use crate::options::Property;

use super::ElementRenderer;

pub const DEFAULT_TEXT: &str = "Mystery Shibe";
pub const DEFAULT_SUBTEXT: &str = "Moon 🌒";

#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileHeader;

/// Copy `vals[key]` into the inline style of `node`, if present and non-empty
fn style_from(dom: &mut Dom, node: NodeId, vals: &BTreeMap<String, String>, key: &str, property: &str) {
    if let Some(value) = vals.get(key).filter(|v| !v.is_empty()) {
        dom.set_style(node, property, value.clone());
    }
}

fn marked(dom: &mut Dom, class: &str, edit_type: &str, edit_name: &str) -> NodeId {
    let node = dom.create_element("div");
    dom.add_class(node, class);
    dom.set_attribute(node, EDIT_TYPE_ATTR, edit_type);
    dom.set_attribute(node, EDIT_NAME_ATTR, edit_name);
    node
}

fn wrap(dom: &mut Dom, parent: NodeId, class: &str, child: NodeId) {
    let wrapper = dom.create_element("div");
    dom.add_class(wrapper, class);
    dom.append_child(parent, wrapper);
    dom.append_child(wrapper, child);
}

impl ElementRenderer for ProfileHeader {
    fn kind(&self) -> &'static str {
        "profile_header"
    }

    fn render(&self, dom: &mut Dom, vals: &BTreeMap<String, String>) -> NodeId {
        let root = dom.create_element("profile-header");
        for key in ["text", "text_color", "subtext"] {
            if let Some(value) = vals.get(key) {
                dom.set_attribute(root, key, value.clone());
            }
        }

        // Backdrop
        let background = marked(dom, "background", "background-image", "profileBackdrop");
        dom.set_sheet_style(background, "background-color", "#aaa");
        dom.set_sheet_style(background, "background-size", "contain");
        dom.set_sheet_style(background, "opacity", "0.4");
        style_from(dom, background, vals, "bg_color", "background-color");
        style_from(dom, background, vals, "bg_img_url", "background-image");
        style_from(dom, background, vals, "bg_size", "background-size");
        style_from(dom, background, vals, "bg_filter", "filter");
        style_from(dom, background, vals, "bg_opacity", "opacity");
        wrap(dom, root, "background-wrap", background);

        let subject = dom.create_element("div");
        dom.add_class(subject, "subject-wrap");
        dom.append_child(root, subject);

        // Avatar
        let avatar = marked(dom, "avatar", "image", "avatarImage");
        dom.set_sheet_style(avatar, "border-color", "black");
        dom.set_sheet_style(avatar, "background-color", "#ddd");
        dom.set_sheet_style(avatar, "background-size", "contain");
        style_from(dom, avatar, vals, "avatar_border_color", "border-color");
        style_from(dom, avatar, vals, "avatar_bg_color", "background-color");
        style_from(dom, avatar, vals, "avatar_img_url", "background-image");
        style_from(dom, avatar, vals, "avatar_bg_size", "background-size");
        style_from(dom, avatar, vals, "avatar_filter", "filter");
        wrap(dom, subject, "avatar-wrap", avatar);

        // Display name
        let text = marked(dom, "text", "text", "displayName");
        dom.set_sheet_style(text, "color", "white");
        dom.set_sheet_style(text, "font-size", "2rem");
        style_from(dom, text, vals, "text_color", "color");
        style_from(dom, text, vals, "text_bg_color", "background-color");
        style_from(dom, text, vals, "text_size", "font-size");
        let label = vals
            .get("text")
            .filter(|t| !t.is_empty())
            .map_or(DEFAULT_TEXT, String::as_str);
        dom.set_text(text, label);
        wrap(dom, subject, "text-wrap", text);

        // Subtitle
        let subtext = marked(dom, "subtext", "text", "subTitle");
        dom.set_sheet_style(subtext, "color", "white");
        dom.set_sheet_style(subtext, "font-size", "1.2rem");
        style_from(dom, subtext, vals, "subtext_color", "color");
        style_from(dom, subtext, vals, "subtext_bg_color", "background-color");
        style_from(dom, subtext, vals, "subtext_size", "font-size");
        let label = vals
            .get("subtext")
            .filter(|t| !t.is_empty())
            .map_or(DEFAULT_SUBTEXT, String::as_str);
        dom.set_text(subtext, label);
        wrap(dom, subject, "text-wrap", subtext);

        root
    }

    fn binding(&self, edit_name: &str, property: Property) -> Option<&'static str> {
        match (edit_name, property) {
            ("profileBackdrop", Property::BackgroundColor) => Some("bg_color"),
            ("profileBackdrop", Property::BackgroundImage) => Some("bg_img_url"),
            ("profileBackdrop", Property::BackgroundSize) => Some("bg_size"),
            ("profileBackdrop", Property::Filter) => Some("bg_filter"),

            ("avatarImage", Property::BorderColor) => Some("avatar_border_color"),
            ("avatarImage", Property::BackgroundColor) => Some("avatar_bg_color"),
            ("avatarImage", Property::BackgroundImage) => Some("avatar_img_url"),
            ("avatarImage", Property::BackgroundSize) => Some("avatar_bg_size"),
            ("avatarImage", Property::Filter) => Some("avatar_filter"),

            ("displayName", Property::Text) => Some("text"),
            ("displayName", Property::Color) => Some("text_color"),
            ("displayName", Property::BackgroundColor) => Some("text_bg_color"),
            ("displayName", Property::FontSize) => Some("text_size"),

            ("subTitle", Property::Text) => Some("subtext"),
            ("subTitle", Property::Color) => Some("subtext_color"),
            ("subTitle", Property::BackgroundColor) => Some("subtext_bg_color"),
            ("subTitle", Property::FontSize) => Some("subtext_size"),

            _ => None,
        }
    }
}
