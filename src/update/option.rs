//! Option invocation and rich control input

use crate::commands::Cmd;
use crate::messages::OptionMsg;
use crate::model::{ComposerModel, Composition, ContainerId, Invocation, ToolbeltKey};
use crate::notifications::Notification;
use crate::options::handlers::{self, HandlerContext, HandlerOutcome};
use crate::options::{OptionKey, OptionRef};
use crate::render::{ElementRenderer, RendererSet};

pub fn update_option(model: &mut ComposerModel, msg: OptionMsg) -> Option<Cmd> {
    match msg {
        OptionMsg::Invoke { toolbelt, option } => invoke_option(model, &toolbelt, &option),
        OptionMsg::Input {
            toolbelt,
            option,
            value,
        } => control_input(model, &toolbelt, option, &value),
    }
}

/// Run an option's handler against its toolbelt's target region
pub fn invoke_option(model: &mut ComposerModel, key: &ToolbeltKey, option: &OptionRef) -> Option<Cmd> {
    let Some(toolbelt) = model.registry.get(key) else {
        tracing::warn!(toolbelt = %key.toolbelt_id(), %option, "option clicked on an evicted toolbelt");
        return None;
    };
    let target = toolbelt.target();
    let edit_name = toolbelt.edit_name().to_string();
    let container = key.container;

    let renderer = renderer_of(&model.working, &model.renderers, container);
    let mut ctx = HandlerContext {
        dom: &mut model.dom,
        working: &mut model.working,
        rotation: &mut model.rotation,
        config: &model.config,
        renderer,
        container,
        edit_name: &edit_name,
    };
    let outcome = handlers::invoke(&mut ctx, option, target);

    if let Some(option) = option.key() {
        model.last_invocation = Some(Invocation { option, target });
    }

    match outcome {
        HandlerOutcome::NoOp => None,
        HandlerOutcome::Applied { .. } | HandlerOutcome::EditingToggled { .. } => Some(Cmd::Redraw),
    }
}

/// Feed a value into a rich control and publish the change
pub fn control_input(model: &mut ComposerModel, key: &ToolbeltKey, option: OptionKey, value: &str) -> Option<Cmd> {
    let container = key.container;
    let renderer = renderer_of(&model.working, &model.renderers, container);

    let Some(toolbelt) = model.registry.get_mut(key) else {
        tracing::warn!(toolbelt = %key.toolbelt_id(), %option, "input for an evicted toolbelt");
        return None;
    };
    let target = toolbelt.target();
    let edit_name = toolbelt.for_region.edit_name.clone();
    let Some(control) = toolbelt.controls.get_mut(&option) else {
        tracing::warn!(toolbelt = %key.toolbelt_id(), %option, "option has no rich control");
        return None;
    };

    let mut ctx = HandlerContext {
        dom: &mut model.dom,
        working: &mut model.working,
        rotation: &mut model.rotation,
        config: &model.config,
        renderer,
        container,
        edit_name: &edit_name,
    };
    control.input(&mut ctx, target, value);

    Some(Cmd::Notify(Notification::ValueChange {
        for_element: target,
        edit_name,
    }))
}

/// Renderer of the element in `container`, for value bindings
fn renderer_of<'r>(
    working: &Composition,
    renderers: &'r RendererSet,
    container: ContainerId,
) -> Option<&'r dyn ElementRenderer> {
    let kind = &working.element(container)?.kind;
    renderers.get(kind)
}
