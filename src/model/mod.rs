//! Composer model - the complete state of one composer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod element;
pub mod region;
pub mod registry;
pub mod toolbelt;

pub use element::{Composition, ContainerId, Element, FieldChange};
pub use region::{EditType, EditableRegion, EDIT_NAME_ATTR, EDIT_TYPE_ATTR};
pub use registry::{Activation, ToolbeltRegistry};
pub use toolbelt::{InstanceId, Toolbelt, ToolbeltKey};

use std::collections::BTreeMap;

use crate::config::ComposerConfig;
use crate::dom::{Dom, NodeId};
use crate::options::catalog::RotationState;
use crate::options::OptionKey;
use crate::render::{render_composition, ComposerLayout, RendererSet};
use crate::scanner;

/// The last option handler that ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub option: OptionKey,
    pub target: NodeId,
}

/// The complete composer model
#[derive(Debug)]
pub struct ComposerModel {
    pub dom: Dom,
    pub layout: ComposerLayout,
    pub renderers: RendererSet,
    /// Live snapshot, mutated by option handlers
    pub working: Composition,
    /// Snapshot taken at construction
    pub committed: Composition,
    /// Regions from the latest scan of each container
    pub regions: BTreeMap<ContainerId, Vec<EditableRegion>>,
    pub registry: ToolbeltRegistry,
    /// Palette and cycling positions for this composer only
    pub rotation: RotationState,
    pub config: ComposerConfig,
    /// Container currently being edited, for visual emphasis only
    pub actively_editing: Option<ContainerId>,
    pub last_invocation: Option<Invocation>,
}

impl ComposerModel {
    /// Render `composition` and scan every container
    pub fn new(composition: Composition, config: ComposerConfig) -> Self {
        Self::with_renderers(composition, config, RendererSet::default())
    }

    pub fn with_renderers(composition: Composition, config: ComposerConfig, renderers: RendererSet) -> Self {
        let mut dom = Dom::new();
        let layout = render_composition(&mut dom, &renderers, &composition);
        let registry = ToolbeltRegistry::with_capacity(config.toolbelt_cache_capacity);

        let mut model = Self {
            dom,
            layout,
            renderers,
            committed: composition.clone(),
            working: composition,
            regions: BTreeMap::new(),
            registry,
            rotation: RotationState::new(),
            config,
            actively_editing: None,
            last_invocation: None,
        };
        for container in model.working.containers().collect::<Vec<_>>() {
            model.rescan(container);
        }
        tracing::info!(
            elements = model.working.len(),
            regions = model.region_count(),
            "composer model ready"
        );
        model
    }

    /// Re-run the scanner over a container's slotted content
    pub fn rescan(&mut self, container: ContainerId) {
        let Some(content) = self.layout.nodes(container).and_then(|n| n.content) else {
            self.regions.insert(container, Vec::new());
            return;
        };
        let report = scanner::scan(&mut self.dom, container, content, self.config.region_policy);
        self.regions.insert(container, report.regions);
    }

    pub fn region(&self, container: ContainerId, position: usize) -> Option<&EditableRegion> {
        self.regions.get(&container).and_then(|r| r.get(position))
    }

    /// First region with the given edit name, in container order
    pub fn find_region(&self, edit_name: &str) -> Option<&EditableRegion> {
        self.regions
            .values()
            .flatten()
            .find(|r| r.edit_name == edit_name)
    }

    pub fn region_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Whether `node` is part of the live composer tree
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.dom.is_attached(node, self.layout.root)
    }

    pub fn active_toolbelt(&self) -> Option<&Toolbelt> {
        self.registry.active()
    }

    /// Working values that differ from the committed snapshot
    pub fn pending_changes(&self) -> Vec<FieldChange> {
        self.working.changes_since(&self.committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ComposerModel {
        let composition = Composition::new(vec![Element::new("profile_header")]);
        ComposerModel::new(composition, ComposerConfig::default())
    }

    #[test]
    fn test_new_scans_every_container() {
        let model = model();
        assert_eq!(model.region_count(), 4);
        let avatar = model.find_region("avatarImage").unwrap();
        assert_eq!(avatar.position, 1);
        assert_eq!(avatar.edit_type, Some(EditType::Image));
    }

    #[test]
    fn test_snapshots_start_equal() {
        let model = model();
        assert_eq!(model.working, model.committed);
        assert!(model.pending_changes().is_empty());
    }

    #[test]
    fn test_registry_starts_empty() {
        let model = model();
        assert!(model.registry.is_empty());
        assert!(model.active_toolbelt().is_none());
    }
}
