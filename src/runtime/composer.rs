//! The composer runtime
//!
//! Owns one [`ComposerModel`] and its [`NotificationBus`]. Every event goes
//! through [`update`]; the returned commands are executed here. Notifications
//! reach the composer's own handler first (active container highlight), then
//! external subscribers.

use crate::commands::Cmd;
use crate::config::ComposerConfig;
use crate::dom::NodeId;
use crate::messages::{ComposerMsg, Msg};
use crate::model::{ComposerModel, Composition, Toolbelt};
use crate::notifications::{Notification, NotificationBus, SubscriptionId, Topic};
use crate::render::RendererSet;
use crate::update::update;

use super::dispatch::click_messages;

#[derive(Debug)]
pub struct Composer {
    model: ComposerModel,
    bus: NotificationBus,
}

impl Composer {
    pub fn new(composition: Composition) -> Self {
        Self::with_config(composition, ComposerConfig::default())
    }

    pub fn with_config(composition: Composition, config: ComposerConfig) -> Self {
        Self::from_model(ComposerModel::new(composition, config))
    }

    pub fn with_renderers(composition: Composition, config: ComposerConfig, renderers: RendererSet) -> Self {
        Self::from_model(ComposerModel::with_renderers(composition, config, renderers))
    }

    pub fn from_model(model: ComposerModel) -> Self {
        Self {
            model,
            bus: NotificationBus::new(),
        }
    }

    pub fn model(&self) -> &ComposerModel {
        &self.model
    }

    pub fn into_model(self) -> ComposerModel {
        self.model
    }

    pub fn working(&self) -> &Composition {
        &self.model.working
    }

    pub fn active_toolbelt(&self) -> Option<&Toolbelt> {
        self.model.active_toolbelt()
    }

    pub fn subscribe(&mut self, topic: Topic, callback: impl FnMut(&Notification) + 'static) -> SubscriptionId {
        self.bus.subscribe(topic, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Run one message through update and execute its commands
    ///
    /// Returns whether a redraw is needed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => self.process_cmd(cmd),
            None => false,
        }
    }

    /// Deliver a click on `target`: root capture, then bubbling listeners
    pub fn click(&mut self, target: NodeId) -> bool {
        let msgs = click_messages(&self.model.dom, self.model.layout.root, target);
        let mut redraw = false;
        for msg in msgs {
            redraw |= self.dispatch(msg);
        }
        redraw
    }

    /// Feed `value` into the rich control rendered at `node`
    pub fn input(&mut self, node: NodeId, value: &str) -> bool {
        let found = self
            .model
            .registry
            .find_by_node(&self.model.dom, node)
            .and_then(|toolbelt| {
                let option = toolbelt.option_at(node)?.option.key()?;
                Some((toolbelt.key.clone(), option))
            });
        let Some((toolbelt, option)) = found else {
            tracing::warn!(node = %node, "input on a node that is not an option control");
            return false;
        };
        self.dispatch(Msg::input(toolbelt, option, value))
    }

    /// Owner node of the first region named `edit_name`
    pub fn region_node(&self, edit_name: &str) -> Option<NodeId> {
        self.model.find_region(edit_name).map(|r| r.owner)
    }

    /// Control node of `option` in the active toolbelt
    pub fn option_node(&self, option: &str) -> Option<NodeId> {
        self.model
            .active_toolbelt()?
            .options
            .iter()
            .find(|view| view.option.as_str() == option)
            .map(|view| view.node)
    }

    fn process_cmd(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Notify(notification) => {
                self.deliver(notification);
                true
            }
            Cmd::Rescan(container) => self.dispatch(Msg::Composer(ComposerMsg::SlotChanged { container })),
            Cmd::Batch(cmds) => {
                let mut redraw = false;
                for cmd in cmds {
                    redraw |= self.process_cmd(cmd);
                }
                redraw
            }
        }
    }

    fn deliver(&mut self, notification: Notification) {
        if let Notification::ToolbeltShown {
            toolbelt_id,
            container_id,
        } = &notification
        {
            self.dispatch(Msg::Composer(ComposerMsg::ToolbeltShown {
                toolbelt_id: toolbelt_id.clone(),
                container_id: container_id.clone(),
            }));
        }
        self.bus.publish(&notification);
    }
}
