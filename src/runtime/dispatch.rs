//! Click dispatch over the node tree
//!
//! A click is turned into messages in event order:
//! 1. capture at the composer root ([`ComposerMsg::RootClick`])
//! 2. bubbling from the target up, collecting each node's listeners
//!
//! Every listener stops propagation: bubbling ends after the first node
//! carrying any, so a click inside a popup only reaches that popup.

use crate::dom::{Dom, Listener, NodeId};
use crate::messages::{ComposerMsg, Msg};

/// Message produced by one listener when its node is clicked
pub fn listener_msg(listener: &Listener) -> Option<Msg> {
    match listener {
        Listener::ActivateRegion {
            container,
            position,
        } => Some(Msg::activate(*container, *position)),
        Listener::StopPropagation => None,
        Listener::OptionClick { toolbelt, option } => Some(Msg::invoke(toolbelt.clone(), option.clone())),
    }
}

/// All messages a click on `target` produces, in delivery order
///
/// Clicks on nodes outside the composer tree produce nothing.
pub fn click_messages(dom: &Dom, root: NodeId, target: NodeId) -> Vec<Msg> {
    if !dom.is_attached(target, root) {
        tracing::debug!(target: "message", node = %target, "click on a detached node ignored");
        return Vec::new();
    }

    let mut msgs = vec![Msg::Composer(ComposerMsg::RootClick { target })];
    if let Some(node) = dom
        .path_to_root(target)
        .into_iter()
        .find(|node| !dom.listeners(*node).is_empty())
    {
        msgs.extend(dom.listeners(node).iter().filter_map(listener_msg));
    }
    msgs
}
