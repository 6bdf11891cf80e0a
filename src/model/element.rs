//! Composition data: elements, container ids and the working/committed snapshots

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Position of an element in the composition, also its container id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContainerId(pub usize);

impl ContainerId {
    /// Parse the `container_id` attribute form (`"0"`, `"1"`, ...)
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(ContainerId)
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One typed, parameterized unit of the composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Renderer kind, e.g. `profile_header`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub vals: BTreeMap<String, String>,
}

impl Element {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            vals: BTreeMap::new(),
        }
    }

    /// Set a value (builder pattern)
    pub fn with_val(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vals.insert(key.into(), value.into());
        self
    }
}

/// A single value that differs between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub container: ContainerId,
    pub key: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Ordered sequence of elements
///
/// Used both as the working snapshot (mutated in place by option handlers)
/// and the committed snapshot (taken once at construction).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition {
    pub elements: Vec<Element>,
}

impl Composition {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse composition JSON")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read composition {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid composition in {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize composition")
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, container: ContainerId) -> Option<&Element> {
        self.elements.get(container.0)
    }

    pub fn containers(&self) -> impl Iterator<Item = ContainerId> {
        (0..self.elements.len()).map(ContainerId)
    }

    pub fn get(&self, container: ContainerId, key: &str) -> Option<&str> {
        self.element(container)
            .and_then(|el| el.vals.get(key))
            .map(String::as_str)
    }

    /// Write a single value. Returns `false` if the container does not exist.
    pub fn set(&mut self, container: ContainerId, key: &str, value: impl Into<String>) -> bool {
        match self.elements.get_mut(container.0) {
            Some(el) => {
                el.vals.insert(key.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Replace all values of one element
    pub fn replace_vals(&mut self, container: ContainerId, vals: BTreeMap<String, String>) -> bool {
        match self.elements.get_mut(container.0) {
            Some(el) => {
                el.vals = vals;
                true
            }
            None => false,
        }
    }

    /// Values in `self` that differ from `base`, in container then key order
    pub fn changes_since(&self, base: &Composition) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        let count = self.elements.len().max(base.elements.len());
        for index in 0..count {
            let container = ContainerId(index);
            let empty = BTreeMap::new();
            let now = self.element(container).map(|e| &e.vals).unwrap_or(&empty);
            let then = base.element(container).map(|e| &e.vals).unwrap_or(&empty);
            let mut keys: Vec<&String> = now.keys().chain(then.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let before = then.get(key);
                let after = now.get(key);
                if before != after {
                    changes.push(FieldChange {
                        container,
                        key: key.clone(),
                        before: before.cloned(),
                        after: after.cloned(),
                    });
                }
            }
        }
        changes
    }
}
