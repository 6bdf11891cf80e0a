//! Option handlers
//!
//! Handlers receive the option key, the target region node and an explicit
//! [`HandlerContext`] holding everything they may touch. They write the
//! target's live presentation immediately and, when the element renderer binds
//! the region, the composer's working data. No handler can fail: anything it
//! cannot do is logged and reported as [`HandlerOutcome::NoOp`].

use crate::config::ComposerConfig;
use crate::dom::{Dom, NodeId};
use crate::model::{Composition, ContainerId};
use crate::render::ElementRenderer;

use super::catalog::{OptionKey, OptionRef, RotationState, Rotor, CROP_MODES, EFFECTS, SIZE_STEPS};
use super::controls;

/// A presentation property an option can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Color,
    BackgroundColor,
    BorderColor,
    FontSize,
    BackgroundSize,
    BackgroundImage,
    Filter,
    /// The node's text content
    Text,
}

impl Property {
    /// CSS property name, `None` for text content
    pub fn css_name(self) -> Option<&'static str> {
        match self {
            Property::Color => Some("color"),
            Property::BackgroundColor => Some("background-color"),
            Property::BorderColor => Some("border-color"),
            Property::FontSize => Some("font-size"),
            Property::BackgroundSize => Some("background-size"),
            Property::BackgroundImage => Some("background-image"),
            Property::Filter => Some("filter"),
            Property::Text => None,
        }
    }
}

/// What a handler did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// A property was written on the target
    Applied {
        property: Property,
        value: String,
        /// Working data key that was written as well, if the region is bound
        bound: Option<&'static str>,
    },
    /// Inline text editing was switched on or off
    EditingToggled { editing: bool },
    /// Nothing changed
    NoOp,
}

/// Capabilities handed to a handler for one invocation
pub struct HandlerContext<'a> {
    pub dom: &'a mut Dom,
    pub working: &'a mut Composition,
    pub rotation: &'a mut RotationState,
    pub config: &'a ComposerConfig,
    /// Renderer of the element owning the region, for value bindings
    pub renderer: Option<&'a dyn ElementRenderer>,
    pub container: ContainerId,
    pub edit_name: &'a str,
}

impl HandlerContext<'_> {
    /// Write `value` to the target's presentation and its bound working value
    pub fn write(&mut self, target: NodeId, property: Property, value: &str) -> HandlerOutcome {
        match property.css_name() {
            Some(css) => self.dom.set_style(target, css, value),
            None => self.dom.set_text(target, value),
        }

        let bound = self
            .renderer
            .and_then(|renderer| renderer.binding(self.edit_name, property));
        if let Some(key) = bound {
            if !self.working.set(self.container, key, value) {
                tracing::warn!(container = %self.container, key, "working data has no such container");
            }
        }

        HandlerOutcome::Applied {
            property,
            value: value.to_string(),
            bound,
        }
    }

    fn rotate(&mut self, target: NodeId, rotor: Rotor, items: &[&str], property: Property) -> HandlerOutcome {
        match self.rotation.next_of(rotor, items) {
            Some(value) => self.write(target, property, value),
            None => HandlerOutcome::NoOp,
        }
    }

    fn rotate_palette(&mut self, target: NodeId, rotor: Rotor, property: Property) -> HandlerOutcome {
        let config = self.config;
        match self.rotation.next_of(rotor, &config.palette) {
            Some(color) => self.write(target, property, color),
            None => HandlerOutcome::NoOp,
        }
    }
}

/// Run the handler for `option` against `target`
pub fn invoke(ctx: &mut HandlerContext<'_>, option: &OptionRef, target: NodeId) -> HandlerOutcome {
    let key = match option {
        OptionRef::Known(key) => *key,
        OptionRef::Unknown(raw) => {
            tracing::warn!(option = %raw, "handler not found for option");
            return HandlerOutcome::NoOp;
        }
    };

    tracing::debug!(option = %key, target = %target, edit_name = ctx.edit_name, "invoking option");

    match key {
        OptionKey::TextColor => ctx.rotate_palette(target, Rotor::TextColor, Property::Color),
        OptionKey::BgColor => ctx.rotate_palette(target, Rotor::BgColor, Property::BackgroundColor),
        OptionKey::Size => ctx.rotate(target, Rotor::Size, SIZE_STEPS, Property::FontSize),
        OptionKey::Crop => ctx.rotate(target, Rotor::Crop, CROP_MODES, Property::BackgroundSize),
        OptionKey::Effect => ctx.rotate(target, Rotor::Effect, EFFECTS, Property::Filter),
        OptionKey::ImageReplace => replace_image(ctx, target),
        OptionKey::EditText => HandlerOutcome::EditingToggled {
            editing: controls::toggle_editing(ctx.dom, target),
        },
        // The color picker is driven by its input, a click only focuses it
        OptionKey::BorderColor => HandlerOutcome::NoOp,
    }
}

fn replace_image(ctx: &mut HandlerContext<'_>, target: NodeId) -> HandlerOutcome {
    let config = ctx.config;
    let Some(url) = ctx.rotation.next_of(Rotor::Image, &config.image_library) else {
        tracing::info!("image library is empty, nothing to replace with");
        return HandlerOutcome::NoOp;
    };
    let value = format!("url(\"{}\")", url);
    ctx.write(target, Property::BackgroundImage, &value)
}
