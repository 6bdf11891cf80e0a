//! End-to-end composer scenarios
//!
//! Drives the composer through clicks and input the way a user would, and
//! checks presentation, working data and notifications.

mod common;

use common::{
    click_option, click_region, profile_headers, record, region, test_composer, test_composer_with,
};
use doge_composer::config::ComposerConfig;
use doge_composer::model::{ComposerModel, Composition, ContainerId, Element, Invocation};
use doge_composer::notifications::{Notification, Topic};
use doge_composer::options::controls::{CONTENT_EDITABLE_ATTR, FOCUSED_CLASS};
use doge_composer::options::OptionKey;
use doge_composer::render::DEFAULT_TEXT;
use doge_composer::runtime::Composer;

// ========================================================================
// Avatar Scenario
// ========================================================================

#[test]
fn test_avatar_crop_scenario() {
    let composition = Composition::new(vec![Element::new("profile_header")
        .with_val("text", "Such Profile")
        .with_val("avatar_img_url", "url(\"doge.png\")")]);
    let mut composer = test_composer_with(composition, ComposerConfig::default());
    let avatar = region(&composer, "avatarImage");

    click_region(&mut composer, "avatarImage");
    assert_eq!(composer.model().registry.active_count(), 1);
    assert_eq!(composer.active_toolbelt().unwrap().options.len(), 5);

    click_option(&mut composer, "crop");

    assert_eq!(
        composer.model().last_invocation,
        Some(Invocation {
            option: OptionKey::Crop,
            target: avatar,
        })
    );
    // Propagation stopped inside the popup: still showing
    assert_eq!(composer.model().registry.active_count(), 1);
    assert_eq!(composer.model().dom.style(avatar, "background-size"), Some("cover"));
    assert_eq!(
        composer.working().get(ContainerId(0), "avatar_bg_size"),
        Some("cover")
    );
}

#[test]
fn test_handlers_cycle_on_repeated_clicks() {
    let mut composer = test_composer();
    let avatar = region(&composer, "avatarImage");
    click_region(&mut composer, "avatarImage");

    click_option(&mut composer, "effect");
    click_option(&mut composer, "effect");
    assert_eq!(composer.model().dom.style(avatar, "filter"), Some("grayscale(1)"));

    click_option(&mut composer, "crop");
    click_option(&mut composer, "crop");
    assert_eq!(composer.model().dom.style(avatar, "background-size"), Some("contain"));
}

#[test]
fn test_rotation_is_per_composer() {
    let mut first = test_composer();
    let mut second = test_composer();
    let name = region(&second, "displayName");

    click_region(&mut first, "displayName");
    click_option(&mut first, "textColor");
    click_option(&mut first, "textColor");

    click_region(&mut second, "displayName");
    click_option(&mut second, "textColor");
    assert_eq!(second.model().dom.style(name, "color"), Some("white"));
}

#[test]
fn test_image_replace_uses_library() {
    let config = ComposerConfig {
        image_library: vec!["https://example.test/shibe.png".to_string()],
        ..ComposerConfig::default()
    };
    let mut composer = test_composer_with(Composition::new(vec![Element::new("profile_header")]), config);
    let backdrop = region(&composer, "profileBackdrop");

    click_region(&mut composer, "profileBackdrop");
    click_option(&mut composer, "imageReplace");

    assert_eq!(
        composer.model().dom.style(backdrop, "background-image"),
        Some("url(\"https://example.test/shibe.png\")")
    );
    assert_eq!(
        composer.working().get(ContainerId(0), "bg_img_url"),
        Some("url(\"https://example.test/shibe.png\")")
    );
}

#[test]
fn test_committed_snapshot_is_untouched() {
    let mut composer = test_composer();
    click_region(&mut composer, "subTitle");
    click_option(&mut composer, "size");

    let model = composer.model();
    assert!(model.committed.elements[0].vals.is_empty());
    let changes = model.pending_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].key, "subtext_size");
}

// ========================================================================
// Rich Control Tests
// ========================================================================

/// Text-edit control value of the active toolbelt
fn edit_text_value(composer: &Composer) -> Option<String> {
    composer
        .active_toolbelt()
        .and_then(|t| t.control(OptionKey::EditText))
        .and_then(|c| c.value().map(str::to_string))
}

#[test]
fn test_rich_control_seeds_on_first_show_only() {
    let mut model = ComposerModel::new(profile_headers(1), ComposerConfig::default());
    let name = model.find_region("displayName").unwrap().owner;

    // Changed after discovery, before the first show
    model.dom.set_text(name, "Much Wow");
    let mut composer = Composer::from_model(model);
    click_region(&mut composer, "displayName");
    assert!(composer.active_toolbelt().unwrap().control(OptionKey::EditText).unwrap().is_seeded());
    assert_eq!(edit_text_value(&composer).as_deref(), Some("Much Wow"));

    // Changed while hidden: re-show keeps the first seed
    let host = composer.model().layout.containers[0].host;
    composer.click(host);
    assert_eq!(composer.model().registry.active_count(), 0);
    let mut model = composer.into_model();
    model.dom.set_text(name, "Such Edit");
    let mut composer = Composer::from_model(model);
    click_region(&mut composer, "displayName");

    assert_eq!(edit_text_value(&composer).as_deref(), Some("Much Wow"));
    assert_eq!(composer.model().dom.text_content(name), "Such Edit");
}

#[test]
fn test_rich_control_seed_survives_style_change() {
    let mut composer = test_composer();
    click_region(&mut composer, "displayName");
    assert_eq!(edit_text_value(&composer).as_deref(), Some(DEFAULT_TEXT));

    click_option(&mut composer, "textColor");
    click_region(&mut composer, "avatarImage");
    click_region(&mut composer, "displayName");
    assert_eq!(edit_text_value(&composer).as_deref(), Some(DEFAULT_TEXT));
}

#[test]
fn test_color_picker_seeds_from_stylesheet() {
    let mut composer = test_composer();
    click_region(&mut composer, "avatarImage");

    let control = composer
        .active_toolbelt()
        .unwrap()
        .control(OptionKey::BorderColor)
        .unwrap();
    assert_eq!(control.value(), Some("black"));
}

#[test]
fn test_color_picker_input_writes_region_and_notifies() {
    let mut composer = test_composer();
    let changes = record(&mut composer, Topic::ValueChange);
    let avatar = region(&composer, "avatarImage");
    click_region(&mut composer, "avatarImage");

    let picker = composer.option_node("borderColor").unwrap();
    composer.input(picker, "#ff0000");

    assert_eq!(composer.model().dom.style(avatar, "border-color"), Some("#ff0000"));
    assert_eq!(
        composer.working().get(ContainerId(0), "avatar_border_color"),
        Some("#ff0000")
    );
    assert_eq!(
        *changes.borrow(),
        vec![Notification::ValueChange {
            for_element: avatar,
            edit_name: "avatarImage".to_string(),
        }]
    );
    // Input does not dismiss
    assert_eq!(composer.model().registry.active_count(), 1);
}

#[test]
fn test_text_edit_click_toggles_inline_editing() {
    let mut composer = test_composer();
    let name = region(&composer, "displayName");
    click_region(&mut composer, "displayName");

    click_option(&mut composer, "editText");
    assert_eq!(composer.model().dom.attribute(name, CONTENT_EDITABLE_ATTR), Some("true"));
    assert!(composer.model().dom.has_class(name, FOCUSED_CLASS));

    click_option(&mut composer, "editText");
    assert_eq!(composer.model().dom.attribute(name, CONTENT_EDITABLE_ATTR), Some("false"));
}

#[test]
fn test_input_on_simple_option_is_ignored() {
    let mut composer = test_composer();
    click_region(&mut composer, "avatarImage");
    let crop = composer.option_node("crop").unwrap();

    assert!(!composer.input(crop, "cover"));
    assert!(composer.model().pending_changes().is_empty());
}

// ========================================================================
// Malformed Markup Tests
// ========================================================================

#[test]
fn test_unknown_element_type_has_no_regions() {
    let composition = Composition::new(vec![Element::new("mystery_block")]);
    let composer = test_composer_with(composition, ComposerConfig::default());
    assert_eq!(composer.model().region_count(), 0);
    assert_eq!(composer.model().layout.containers.len(), 1);
}
