//! Toolbelt instances: the floating option popup bound to one region

use std::collections::BTreeMap;

use crate::dom::NodeId;
use crate::options::controls::RichControl;
use crate::options::resolver::OptionView;
use crate::options::OptionKey;

use super::{ContainerId, EditableRegion};

/// Identity of a toolbelt instance
///
/// Assigned once at construction; a reused toolbelt keeps its id, which is
/// what "the same instance" means across hide/show cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Cache key of a toolbelt: region position and tag, scoped by container
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolbeltKey {
    pub container: ContainerId,
    pub position: usize,
    pub tag: String,
}

impl ToolbeltKey {
    pub fn for_region(region: &EditableRegion) -> Self {
        Self {
            container: region.container,
            position: region.position,
            tag: region.tag.clone(),
        }
    }

    /// Public toolbelt id, `{position}_{TAG}`
    pub fn toolbelt_id(&self) -> String {
        format!("{}_{}", self.position, self.tag)
    }
}

/// A toolbelt popup
///
/// Only `active` changes on show/hide; the option controls and whatever
/// state they hold survive every toggle.
#[derive(Debug, Clone)]
pub struct Toolbelt {
    pub instance: InstanceId,
    pub key: ToolbeltKey,
    pub for_region: EditableRegion,
    /// Popup node, a child of the element's editable host
    pub popup: NodeId,
    /// Rendered options, in resolution order
    pub options: Vec<OptionView>,
    /// State of the rich controls among `options`
    pub controls: BTreeMap<OptionKey, RichControl>,
    active: bool,
}

impl Toolbelt {
    pub fn new(
        instance: InstanceId,
        region: EditableRegion,
        popup: NodeId,
        options: Vec<OptionView>,
    ) -> Self {
        let controls = options
            .iter()
            .filter_map(|view| view.option.key())
            .filter_map(|key| RichControl::for_option(key).map(|control| (key, control)))
            .collect();
        Self {
            instance,
            key: ToolbeltKey::for_region(&region),
            for_region: region,
            popup,
            options,
            controls,
            active: false,
        }
    }

    pub fn id(&self) -> String {
        self.key.toolbelt_id()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn show(&mut self) {
        self.active = true;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }

    /// The region node the toolbelt edits
    pub fn target(&self) -> NodeId {
        self.for_region.owner
    }

    pub fn edit_name(&self) -> &str {
        &self.for_region.edit_name
    }

    pub fn container(&self) -> ContainerId {
        self.key.container
    }

    pub fn control(&self, key: OptionKey) -> Option<&RichControl> {
        self.controls.get(&key)
    }

    pub fn control_mut(&mut self, key: OptionKey) -> Option<&mut RichControl> {
        self.controls.get_mut(&key)
    }

    /// The option whose control node is `node`
    pub fn option_at(&self, node: NodeId) -> Option<&OptionView> {
        self.options.iter().find(|view| view.node == node)
    }

    /// Point the toolbelt at a re-rendered region node, keeping all state
    pub fn retarget(&mut self, region: EditableRegion) {
        self.for_region = region;
    }
}
