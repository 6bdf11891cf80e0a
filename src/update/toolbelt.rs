//! Toolbelt activation and dismissal

use crate::commands::Cmd;
use crate::dom::{Listener, NodeId};
use crate::messages::ToolbeltMsg;
use crate::model::{ComposerModel, ContainerId, EditableRegion, Toolbelt, ToolbeltKey};
use crate::notifications::Notification;
use crate::options::resolver::{materialize, resolve_for_region};

/// Attribute on a popup naming the region node it floats over
pub const ANCHOR_ATTR: &str = "anchor";

pub fn update_toolbelt(model: &mut ComposerModel, msg: ToolbeltMsg) -> Option<Cmd> {
    match msg {
        ToolbeltMsg::Activate {
            container,
            position,
        } => activate_region(model, container, position),

        ToolbeltMsg::DeactivateAll => {
            if model.registry.deactivate_all() > 0 {
                Some(Cmd::Redraw)
            } else {
                None
            }
        }
    }
}

/// Make the toolbelt of the region at `position` the single active one
///
/// Builds the toolbelt on first activation and reuses it afterwards. The
/// shown notification is emitted once, after every other toolbelt is hidden.
pub fn activate_region(model: &mut ComposerModel, container: ContainerId, position: usize) -> Option<Cmd> {
    let Some(region) = model.region(container, position).cloned() else {
        tracing::warn!(%container, position, "click on a region that is no longer scanned");
        return None;
    };
    if !region.is_well_formed() {
        tracing::warn!(
            %container,
            position,
            edit_type = ?region.edit_type,
            edit_name = %region.edit_name,
            "activating a region with missing markers"
        );
    }

    let key = ToolbeltKey::for_region(&region);
    let reassigned = model
        .registry
        .get(&key)
        .is_some_and(|t| t.for_region.edit_name != region.edit_name || t.for_region.edit_type != region.edit_type);
    if reassigned {
        if let Some(stale) = model.registry.remove(&key) {
            tracing::debug!(
                target: "toolbelt",
                toolbelt = %stale.id(),
                from = %stale.edit_name(),
                to = %region.edit_name,
                "key now names another region; rebuilding toolbelt"
            );
            model.dom.detach(stale.popup);
        }
    }

    if let Some(toolbelt) = model.registry.get_mut(&key) {
        if toolbelt.target() != region.owner {
            tracing::debug!(
                target: "toolbelt",
                toolbelt = %toolbelt.id(),
                from = %toolbelt.target(),
                to = %region.owner,
                "retargeting toolbelt to re-rendered region"
            );
            model
                .dom
                .set_attribute(toolbelt.popup, ANCHOR_ATTR, region.owner.to_string());
            toolbelt.retarget(region);
        }
    } else {
        let toolbelt = build_toolbelt(model, region)?;
        model.registry.insert(toolbelt);
    }

    let activation = model.registry.activate(&key)?;
    for evicted in &activation.evicted {
        model.dom.detach(evicted.popup);
    }

    if let Some(toolbelt) = model.registry.get_mut(&key) {
        let target = toolbelt.target();
        for control in toolbelt.controls.values_mut() {
            control.seed(&model.dom, target);
        }
    }

    tracing::debug!(
        target: "toolbelt",
        toolbelt = %activation.toolbelt_id,
        instance = activation.instance.0,
        %container,
        "toolbelt shown"
    );

    Some(Cmd::Notify(Notification::ToolbeltShown {
        toolbelt_id: activation.toolbelt_id,
        container_id: container.to_string(),
    }))
}

/// Build the popup for `region` under its container's editable host
fn build_toolbelt(model: &mut ComposerModel, region: EditableRegion) -> Option<Toolbelt> {
    let Some(host) = model.layout.nodes(region.container).map(|n| n.host) else {
        tracing::warn!(container = %region.container, "region belongs to no rendered container");
        return None;
    };
    let key = ToolbeltKey::for_region(&region);
    let dom = &mut model.dom;

    let popup = dom.create_element("sl-popup");
    dom.set_attribute(popup, "id", key.toolbelt_id());
    dom.set_attribute(popup, "placement", "top");
    dom.set_attribute(popup, ANCHOR_ATTR, region.owner.to_string());
    dom.add_listener(popup, Listener::StopPropagation);

    let container = dom.create_element("div");
    dom.add_class(container, "box");
    let options = dom.create_element("div");
    dom.add_class(options, "options");
    let drawer = dom.create_element("div");
    dom.add_class(drawer, "drawer");
    dom.append_child(container, options);
    dom.append_child(container, drawer);
    dom.append_child(popup, container);

    let views = materialize(dom, options, &key, &resolve_for_region(&region));
    dom.append_child(host, popup);

    let instance = model.registry.next_instance_id();
    tracing::debug!(
        target: "toolbelt",
        toolbelt = %key.toolbelt_id(),
        instance = instance.0,
        options = views.len(),
        "built toolbelt"
    );
    Some(Toolbelt::new(instance, region, popup, views))
}

/// Region node a toolbelt popup floats over, as written on the popup
pub fn anchor_of(model: &ComposerModel, popup: NodeId) -> Option<&str> {
    model.dom.attribute(popup, ANCHOR_ATTR)
}
