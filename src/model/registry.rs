//! Toolbelt registry: one cache per composer
//!
//! Guarantees two things:
//! - identity: a region key always resolves to the toolbelt first built for it
//! - exclusivity: after any activation exactly one cached toolbelt is active
//!
//! The cache is unbounded unless a capacity is configured, in which case the
//! least recently activated inactive toolbelt is evicted.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};

use super::{InstanceId, Toolbelt, ToolbeltKey};

/// Result of a successful activation
#[derive(Debug)]
pub struct Activation {
    pub key: ToolbeltKey,
    pub toolbelt_id: String,
    pub instance: InstanceId,
    /// Toolbelts dropped to honour the capacity; their popups need detaching
    pub evicted: Vec<Toolbelt>,
}

#[derive(Debug, Default)]
pub struct ToolbeltRegistry {
    toolbelts: HashMap<ToolbeltKey, Toolbelt>,
    /// Least recently activated first
    recency: Vec<ToolbeltKey>,
    capacity: Option<usize>,
    next_instance: u64,
}

impl ToolbeltRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.filter(|c| *c > 0),
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.toolbelts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolbelts.is_empty()
    }

    pub fn contains_key(&self, key: &ToolbeltKey) -> bool {
        self.toolbelts.contains_key(key)
    }

    pub fn get(&self, key: &ToolbeltKey) -> Option<&Toolbelt> {
        self.toolbelts.get(key)
    }

    pub fn get_mut(&mut self, key: &ToolbeltKey) -> Option<&mut Toolbelt> {
        self.toolbelts.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toolbelt> {
        self.toolbelts.values()
    }

    /// Allocate the identity for a toolbelt about to be built
    pub fn next_instance_id(&mut self) -> InstanceId {
        self.next_instance += 1;
        InstanceId(self.next_instance)
    }

    /// Cache a freshly built toolbelt
    ///
    /// An existing entry under the same key wins: identity is never replaced.
    pub fn insert(&mut self, toolbelt: Toolbelt) -> bool {
        if self.toolbelts.contains_key(&toolbelt.key) {
            tracing::warn!(
                toolbelt = %toolbelt.id(),
                "toolbelt already cached for this region, keeping the existing instance"
            );
            return false;
        }
        self.recency.push(toolbelt.key.clone());
        self.toolbelts.insert(toolbelt.key.clone(), toolbelt);
        true
    }

    /// Drop the toolbelt under `key`; its popup is the caller's to detach
    pub fn remove(&mut self, key: &ToolbeltKey) -> Option<Toolbelt> {
        self.recency.retain(|k| k != key);
        self.toolbelts.remove(key)
    }

    /// Hide every cached toolbelt, then show the one under `key`
    ///
    /// Returns `None` if nothing is cached under `key`.
    pub fn activate(&mut self, key: &ToolbeltKey) -> Option<Activation> {
        if !self.toolbelts.contains_key(key) {
            return None;
        }

        for toolbelt in self.toolbelts.values_mut() {
            toolbelt.hide();
        }
        let toolbelt = self.toolbelts.get_mut(key)?;
        toolbelt.show();
        let instance = toolbelt.instance;
        let toolbelt_id = toolbelt.id();

        self.touch(key);
        let evicted = self.evict_over_capacity();

        Some(Activation {
            key: key.clone(),
            toolbelt_id,
            instance,
            evicted,
        })
    }

    /// Hide every cached toolbelt. Returns how many were active.
    pub fn deactivate_all(&mut self) -> usize {
        let mut hidden = 0;
        for toolbelt in self.toolbelts.values_mut() {
            if toolbelt.is_active() {
                hidden += 1;
            }
            toolbelt.hide();
        }
        hidden
    }

    pub fn active(&self) -> Option<&Toolbelt> {
        self.toolbelts.values().find(|t| t.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.toolbelts.values().filter(|t| t.is_active()).count()
    }

    /// Whether `target` is inside any cached toolbelt popup
    pub fn contains_target(&self, dom: &Dom, target: NodeId) -> bool {
        self.toolbelts
            .values()
            .any(|t| dom.contains(t.popup, target))
    }

    /// The toolbelt whose popup contains `node`
    pub fn find_by_node(&self, dom: &Dom, node: NodeId) -> Option<&Toolbelt> {
        self.toolbelts.values().find(|t| dom.contains(t.popup, node))
    }

    fn touch(&mut self, key: &ToolbeltKey) {
        self.recency.retain(|k| k != key);
        self.recency.push(key.clone());
    }

    fn evict_over_capacity(&mut self) -> Vec<Toolbelt> {
        let mut evicted = Vec::new();
        let Some(capacity) = self.capacity else {
            return evicted;
        };
        while self.toolbelts.len() > capacity {
            let victim = self
                .recency
                .iter()
                .position(|k| self.toolbelts.get(k).is_some_and(|t| !t.is_active()));
            let Some(index) = victim else {
                break;
            };
            let key = self.recency.remove(index);
            if let Some(toolbelt) = self.toolbelts.remove(&key) {
                tracing::debug!(toolbelt = %toolbelt.id(), container = %key.container, "evicted toolbelt");
                evicted.push(toolbelt);
            }
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContainerId, EditType, EditableRegion};

    fn toolbelt(registry: &mut ToolbeltRegistry, dom: &mut Dom, position: usize) -> ToolbeltKey {
        let owner = dom.create_element("div");
        let popup = dom.create_element("sl-popup");
        let region = EditableRegion {
            edit_type: Some(EditType::Text),
            edit_name: format!("region{}", position),
            owner,
            tag: "DIV".to_string(),
            position,
            container: ContainerId(0),
        };
        let instance = registry.next_instance_id();
        let toolbelt = Toolbelt::new(instance, region, popup, Vec::new());
        let key = toolbelt.key.clone();
        registry.insert(toolbelt);
        key
    }

    #[test]
    fn test_activate_unknown_key() {
        let mut registry = ToolbeltRegistry::new();
        let key = ToolbeltKey {
            container: ContainerId(0),
            position: 0,
            tag: "DIV".to_string(),
        };
        assert!(registry.activate(&key).is_none());
    }

    #[test]
    fn test_activate_is_exclusive() {
        let mut dom = Dom::new();
        let mut registry = ToolbeltRegistry::new();
        let a = toolbelt(&mut registry, &mut dom, 0);
        let b = toolbelt(&mut registry, &mut dom, 1);

        registry.activate(&a);
        registry.activate(&b);
        assert_eq!(registry.active_count(), 1);
        assert_eq!(registry.active().map(|t| t.key.clone()), Some(b));
    }

    #[test]
    fn test_toolbelt_id_format() {
        let mut dom = Dom::new();
        let mut registry = ToolbeltRegistry::new();
        let key = toolbelt(&mut registry, &mut dom, 2);
        let activation = registry.activate(&key).unwrap();
        assert_eq!(activation.toolbelt_id, "2_DIV");
    }

    #[test]
    fn test_insert_keeps_existing_instance() {
        let mut dom = Dom::new();
        let mut registry = ToolbeltRegistry::new();
        let key = toolbelt(&mut registry, &mut dom, 0);
        let first = registry.get(&key).unwrap().instance;
        toolbelt(&mut registry, &mut dom, 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&key).unwrap().instance, first);
    }

    #[test]
    fn test_eviction_skips_active_toolbelt() {
        let mut dom = Dom::new();
        let mut registry = ToolbeltRegistry::with_capacity(Some(2));
        let a = toolbelt(&mut registry, &mut dom, 0);
        registry.activate(&a);
        let b = toolbelt(&mut registry, &mut dom, 1);
        registry.activate(&b);
        let c = toolbelt(&mut registry, &mut dom, 2);
        let activation = registry.activate(&c).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(activation.evicted.len(), 1);
        assert_eq!(activation.evicted[0].key, a);
        assert!(registry.contains_key(&c));
    }

    #[test]
    fn test_deactivate_all_counts_active() {
        let mut dom = Dom::new();
        let mut registry = ToolbeltRegistry::new();
        let a = toolbelt(&mut registry, &mut dom, 0);
        toolbelt(&mut registry, &mut dom, 1);
        registry.activate(&a);
        assert_eq!(registry.deactivate_all(), 1);
        assert_eq!(registry.active_count(), 0);
    }
}
