//! Rich controls: stateful inputs bound to a region
//!
//! A control reads the region's current value exactly once, the first time
//! its toolbelt is shown, and keeps it from then on. Input writes straight
//! back onto the region.

use crate::dom::{Dom, NodeId};

use super::catalog::OptionKey;
use super::handlers::{HandlerContext, HandlerOutcome, Property};

/// Attribute toggled by the text editor
pub const CONTENT_EDITABLE_ATTR: &str = "contenteditable";
/// Class added to a region while it is being edited inline
pub const FOCUSED_CLASS: &str = "is-focused";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Color input, seeded from the region's computed border color
    ColorPicker,
    /// Inline text editor, seeded from the region's text content
    TextEdit,
}

impl ControlKind {
    pub fn property(self) -> Property {
        match self {
            ControlKind::ColorPicker => Property::BorderColor,
            ControlKind::TextEdit => Property::Text,
        }
    }

    /// Tag of the control node inside the popup
    pub fn tag(self) -> &'static str {
        match self {
            ControlKind::ColorPicker => "option-color-picker",
            ControlKind::TextEdit => "option-text-edit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichControl {
    pub kind: ControlKind,
    value: Option<String>,
    seeded: bool,
}

impl RichControl {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            value: None,
            seeded: false,
        }
    }

    /// Control for a rich option, `None` for simple actions
    pub fn for_option(key: OptionKey) -> Option<Self> {
        match key {
            OptionKey::BorderColor => Some(Self::new(ControlKind::ColorPicker)),
            OptionKey::EditText => Some(Self::new(ControlKind::TextEdit)),
            OptionKey::TextColor
            | OptionKey::BgColor
            | OptionKey::Size
            | OptionKey::Crop
            | OptionKey::Effect
            | OptionKey::ImageReplace => None,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Value currently held by the control
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Read the region's current value, the first time only
    ///
    /// Returns `true` if this call did the seeding.
    pub fn seed(&mut self, dom: &Dom, target: NodeId) -> bool {
        if self.seeded {
            return false;
        }
        self.value = match self.kind {
            ControlKind::ColorPicker => dom
                .computed_style(target, "border-color")
                .map(str::to_string),
            ControlKind::TextEdit => Some(dom.text_content(target)),
        };
        self.seeded = true;
        tracing::trace!(control = ?self.kind, value = ?self.value, "seeded rich control");
        true
    }

    /// Apply user input: hold it and write it onto the target
    pub fn input(&mut self, ctx: &mut HandlerContext<'_>, target: NodeId, value: &str) -> HandlerOutcome {
        self.value = Some(value.to_string());
        self.seeded = true;
        ctx.write(target, self.kind.property(), value)
    }
}

/// Flip inline editing on `target`. Returns the new state.
pub fn toggle_editing(dom: &mut Dom, target: NodeId) -> bool {
    let editing = dom.attribute(target, CONTENT_EDITABLE_ATTR) == Some("true");
    let editing = !editing;
    dom.set_attribute(target, CONTENT_EDITABLE_ATTR, editing.to_string());
    if editing {
        dom.add_class(target, FOCUSED_CLASS);
    } else {
        dom.remove_class(target, FOCUSED_CLASS);
    }
    editing
}
