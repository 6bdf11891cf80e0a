//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod composer;
mod option;
pub mod toolbelt;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::ComposerModel;

#[cfg(debug_assertions)]
use crate::tracing::RegistrySnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use composer::{set_actively_editing, update_composer};
pub use option::{control_input, invoke_option, update_option};
pub use toolbelt::{activate_region, update_toolbelt};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Toolbelt(m) => toolbelt::update_toolbelt(model, m),
        Msg::Option(m) => option::update_option(model, m),
        Msg::Composer(m) => composer::update_composer(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after registry state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut ComposerModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = RegistrySnapshot::from_registry(&model.registry);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = RegistrySnapshot::from_registry(&model.registry);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "toolbelt", %diff, "state changed");
    }
    debug_assert!(
        after.active.len() <= 1,
        "more than one active toolbelt after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Example outputs:
/// - `Toolbelt::Activate { container: ContainerId(0), position: 1 }`
/// - `Composer::RootClick { target: NodeId(4) }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Toolbelt(m) => format!("Toolbelt::{:?}", m),
        Msg::Option(m) => format!("Option::{:?}", m),
        Msg::Composer(m) => format!("Composer::{:?}", m),
    }
}
