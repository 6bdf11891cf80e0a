//! Composer-level message handlers

use std::collections::BTreeMap;

use crate::commands::Cmd;
use crate::dom::NodeId;
use crate::messages::ComposerMsg;
use crate::model::{ComposerModel, ContainerId};
use crate::render::{render_content, ACTIVELY_EDITING_CLASS};

pub fn update_composer(model: &mut ComposerModel, msg: ComposerMsg) -> Option<Cmd> {
    match msg {
        ComposerMsg::ToolbeltShown {
            toolbelt_id,
            container_id,
        } => {
            let Some(container) = ContainerId::parse(&container_id) else {
                tracing::warn!(%toolbelt_id, %container_id, "toolbelt shown for an unparseable container id");
                return None;
            };
            set_actively_editing(model, Some(container));
            Some(Cmd::Redraw)
        }

        ComposerMsg::RootClick { target } => dismiss_from_root(model, target),

        ComposerMsg::UpdateElement { container, vals } => update_element(model, container, vals),

        ComposerMsg::SlotChanged { container } => {
            model.rescan(container);
            None
        }
    }
}

/// Move the highlight to `container`, or clear it
pub fn set_actively_editing(model: &mut ComposerModel, container: Option<ContainerId>) {
    for (index, nodes) in model.layout.containers.iter().enumerate() {
        if container == Some(ContainerId(index)) {
            model.dom.add_class(nodes.container, ACTIVELY_EDITING_CLASS);
        } else {
            model.dom.remove_class(nodes.container, ACTIVELY_EDITING_CLASS);
        }
    }
    model.actively_editing = container;
}

/// Capture-phase click: anything outside every popup hides every toolbelt
fn dismiss_from_root(model: &mut ComposerModel, target: NodeId) -> Option<Cmd> {
    if model.registry.contains_target(&model.dom, target) {
        return None;
    }
    let hidden = model.registry.deactivate_all();
    if hidden == 0 && model.actively_editing.is_none() {
        return None;
    }
    set_actively_editing(model, None);
    Some(Cmd::Redraw)
}

/// Replace a container's working values and re-render its content
fn update_element(
    model: &mut ComposerModel,
    container: ContainerId,
    vals: BTreeMap<String, String>,
) -> Option<Cmd> {
    if !model.working.replace_vals(container, vals) {
        tracing::warn!(%container, "update for an element that does not exist");
        return None;
    }
    let element = model.working.element(container)?.clone();
    let nodes = model.layout.containers.get_mut(container.0)?;

    if let Some(old) = nodes.content.take() {
        model.dom.detach(old);
    }
    nodes.content = render_content(&mut model.dom, &model.renderers, nodes.host, &element);

    tracing::debug!(%container, kind = %element.kind, "re-rendered element");
    Some(Cmd::batch(vec![Cmd::Rescan(container), Cmd::Redraw]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComposerConfig;
    use crate::model::{Composition, Element};
    use crate::update::toolbelt::activate_region;

    fn model() -> ComposerModel {
        ComposerModel::new(
            Composition::new(vec![
                Element::new("profile_header"),
                Element::new("profile_header"),
            ]),
            ComposerConfig::default(),
        )
    }

    #[test]
    fn test_toolbelt_shown_moves_highlight() {
        let mut model = model();
        update_composer(
            &mut model,
            ComposerMsg::ToolbeltShown {
                toolbelt_id: "1_DIV".to_string(),
                container_id: "1".to_string(),
            },
        );
        let nodes = &model.layout.containers;
        assert!(model.dom.has_class(nodes[1].container, ACTIVELY_EDITING_CLASS));
        assert!(!model.dom.has_class(nodes[0].container, ACTIVELY_EDITING_CLASS));
        assert_eq!(model.actively_editing, Some(ContainerId(1)));
    }

    #[test]
    fn test_root_click_outside_hides_all() {
        let mut model = model();
        activate_region(&mut model, ContainerId(0), 1);
        let root = model.layout.root;
        update_composer(&mut model, ComposerMsg::RootClick { target: root });
        assert_eq!(model.registry.active_count(), 0);
    }

    #[test]
    fn test_root_click_inside_popup_is_ignored() {
        let mut model = model();
        activate_region(&mut model, ContainerId(0), 1);
        let option = model.active_toolbelt().unwrap().options[0].node;
        let cmd = update_composer(&mut model, ComposerMsg::RootClick { target: option });
        assert_eq!(cmd, None);
        assert_eq!(model.registry.active_count(), 1);
    }

    #[test]
    fn test_update_element_replaces_content() {
        let mut model = model();
        let old = model.layout.containers[0].content.unwrap();
        let vals = BTreeMap::from([("text".to_string(), "Such Edit".to_string())]);

        let cmd = update_composer(
            &mut model,
            ComposerMsg::UpdateElement {
                container: ContainerId(0),
                vals,
            },
        );

        let new = model.layout.containers[0].content.unwrap();
        assert_ne!(old, new);
        assert!(!model.is_attached(old));
        assert!(model.dom.text_content(new).contains("Such Edit"));
        assert_eq!(
            cmd,
            Some(Cmd::batch(vec![Cmd::Rescan(ContainerId(0)), Cmd::Redraw]))
        );
    }

    #[test]
    fn test_update_missing_element() {
        let mut model = model();
        let cmd = update_composer(
            &mut model,
            ComposerMsg::UpdateElement {
                container: ContainerId(7),
                vals: BTreeMap::new(),
            },
        );
        assert_eq!(cmd, None);
    }
}
