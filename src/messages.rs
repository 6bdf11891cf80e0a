//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::collections::BTreeMap;

use crate::dom::NodeId;
use crate::model::{ContainerId, ToolbeltKey};
use crate::options::{OptionKey, OptionRef};

/// Toolbelt registry messages (activation, dismissal)
#[derive(Debug, Clone)]
pub enum ToolbeltMsg {
    /// A region was clicked: resolve its toolbelt and make it the active one
    Activate {
        container: ContainerId,
        position: usize,
    },
    /// Hide every toolbelt
    DeactivateAll,
}

/// Option messages (handler invocation, rich control input)
#[derive(Debug, Clone)]
pub enum OptionMsg {
    /// An option control was clicked
    Invoke {
        toolbelt: ToolbeltKey,
        option: OptionRef,
    },
    /// A rich control produced a new value
    Input {
        toolbelt: ToolbeltKey,
        option: OptionKey,
        value: String,
    },
}

/// Composer messages (highlight, dismissal, content changes)
#[derive(Debug, Clone)]
pub enum ComposerMsg {
    /// A toolbelt-shown notification reached the composer
    ToolbeltShown {
        toolbelt_id: String,
        container_id: String,
    },
    /// Capture-phase click on the composer root
    RootClick { target: NodeId },
    /// Replace an element's working values and re-render it
    UpdateElement {
        container: ContainerId,
        vals: BTreeMap<String, String>,
    },
    /// A container's slotted content changed; rescan it
    SlotChanged { container: ContainerId },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Toolbelt(ToolbeltMsg),
    Option(OptionMsg),
    Composer(ComposerMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn activate(container: ContainerId, position: usize) -> Self {
        Msg::Toolbelt(ToolbeltMsg::Activate {
            container,
            position,
        })
    }

    pub fn deactivate_all() -> Self {
        Msg::Toolbelt(ToolbeltMsg::DeactivateAll)
    }

    pub fn invoke(toolbelt: ToolbeltKey, option: impl Into<OptionRef>) -> Self {
        Msg::Option(OptionMsg::Invoke {
            toolbelt,
            option: option.into(),
        })
    }

    pub fn input(toolbelt: ToolbeltKey, option: OptionKey, value: impl Into<String>) -> Self {
        Msg::Option(OptionMsg::Input {
            toolbelt,
            option,
            value: value.into(),
        })
    }
}
