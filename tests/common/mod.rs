//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use doge_composer::config::ComposerConfig;
use doge_composer::dom::NodeId;
use doge_composer::model::{Composition, Element};
use doge_composer::notifications::{Notification, Topic};
use doge_composer::runtime::Composer;

/// A composition holding `count` profile headers
pub fn profile_headers(count: usize) -> Composition {
    Composition::new((0..count).map(|_| Element::new("profile_header")).collect())
}

/// Composer over a single profile header with default config
pub fn test_composer() -> Composer {
    Composer::new(profile_headers(1))
}

pub fn test_composer_with(composition: Composition, config: ComposerConfig) -> Composer {
    Composer::with_config(composition, config)
}

/// Region owner node by edit name, panicking if missing
pub fn region(composer: &Composer, edit_name: &str) -> NodeId {
    composer
        .region_node(edit_name)
        .unwrap_or_else(|| panic!("no region named {}", edit_name))
}

/// Region owner node by edit name within one container
pub fn region_in(composer: &Composer, container: usize, edit_name: &str) -> NodeId {
    composer.model().regions[&doge_composer::model::ContainerId(container)]
        .iter()
        .find(|r| r.edit_name == edit_name)
        .map(|r| r.owner)
        .unwrap_or_else(|| panic!("no region named {} in container {}", edit_name, container))
}

/// Click a region by edit name
pub fn click_region(composer: &mut Composer, edit_name: &str) {
    let node = region(composer, edit_name);
    composer.click(node);
}

/// Click an option of the active toolbelt by key
pub fn click_option(composer: &mut Composer, key: &str) {
    let node = composer
        .option_node(key)
        .unwrap_or_else(|| panic!("option {} not in the active toolbelt", key));
    composer.click(node);
}

/// Record every notification on `topic`
pub fn record(composer: &mut Composer, topic: Topic) -> Rc<RefCell<Vec<Notification>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    composer.subscribe(topic, move |n| sink.borrow_mut().push(n.clone()));
    seen
}

/// Option keys of the active toolbelt, in display order
pub fn active_options(composer: &Composer) -> Vec<String> {
    composer
        .active_toolbelt()
        .map(|t| t.options.iter().map(|v| v.option.as_str().to_string()).collect())
        .unwrap_or_default()
}
