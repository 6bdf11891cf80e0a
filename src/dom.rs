//! Headless node tree
//!
//! A small arena-backed stand-in for the browser DOM. Element renderers build
//! their output here, the scanner reads marker attributes from it, and click
//! dispatch walks it to find listeners.
//!
//! Nodes are never freed: detaching a node only unlinks it from its parent,
//! so stale `NodeId`s stay valid and can be checked with [`Dom::is_attached`].

use std::collections::BTreeMap;

use crate::model::{ContainerId, ToolbeltKey};
use crate::options::OptionRef;

/// Handle to a node in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Click handling attached to a node
///
/// Listeners are plain data: dispatch turns them into messages, so attaching
/// the same listener twice can be detected by equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Editable region: activates the toolbelt for the region at `position`
    ActivateRegion {
        container: ContainerId,
        position: usize,
    },
    /// Toolbelt popup: swallows clicks so they never reach dismissal
    StopPropagation,
    /// A toolbelt option control
    OptionClick {
        toolbelt: ToolbeltKey,
        option: OptionRef,
    },
}

/// A single element node
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Upper-cased tag name (`DIV`, `PROFILE-HEADER`, ...)
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Inline style, written by option handlers
    pub style: BTreeMap<String, String>,
    /// Stylesheet values, used when no inline style is set
    pub sheet: BTreeMap<String, String>,
    pub classes: Vec<String>,
    /// Own text (children's text is not included)
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub listeners: Vec<Listener>,
}

/// Arena of nodes
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            ..Node::default()
        });
        id
    }

    /// Number of nodes ever created (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append `child` to `parent`, moving it if it already has a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child);
    }

    /// Insert `child` at `index` among `parent`'s children (clamped)
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            tracing::warn!(%parent, %child, "refusing to create a cycle in the node tree");
            return;
        }
        if self.node(parent).is_none() || self.node(child).is_none() {
            tracing::warn!(%parent, %child, "insert_child on unknown node");
            return;
        }
        self.detach(child);
        if let Some(p) = self.node_mut(parent) {
            let index = index.min(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Unlink a node from its parent. The subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    /// Whether `id` is reachable from `root` by following children
    pub fn is_attached(&self, id: NodeId, root: NodeId) -> bool {
        self.contains(root, id)
    }

    /// Inclusive containment: a node contains itself
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// `id` followed by each ancestor up to the topmost node
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.node(id).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// All descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    // === Attributes ===

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.attributes.insert(name.to_string(), value.into());
        }
    }

    // === Style ===

    /// Inline style only
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.style.insert(property.to_string(), value.into());
        }
    }

    /// Set a stylesheet value (the layer underneath inline style)
    pub fn set_sheet_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.sheet.insert(property.to_string(), value.into());
        }
    }

    /// Effective value: inline style, falling back to the stylesheet
    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<&str> {
        let node = self.node(id)?;
        node.style
            .get(property)
            .or_else(|| node.sheet.get(property))
            .map(String::as_str)
    }

    // === Classes ===

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(n) = self.node_mut(id) {
            n.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            n.classes.retain(|c| c != class);
        }
    }

    // === Text ===

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(n) = self.node_mut(id) {
            n.text = text.into();
        }
    }

    /// Concatenated text of the node and its descendants, like `textContent`
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = self.node(id).map(|n| n.text.clone()).unwrap_or_default();
        for child in self.descendants(id) {
            if let Some(n) = self.node(child) {
                text.push_str(&n.text);
            }
        }
        text
    }

    // === Listeners ===

    /// Attach a listener. Returns `false` if an equal listener was already there.
    pub fn add_listener(&mut self, id: NodeId, listener: Listener) -> bool {
        let Some(n) = self.node_mut(id) else {
            tracing::warn!(node = %id, "add_listener on unknown node");
            return false;
        };
        if n.listeners.contains(&listener) {
            return false;
        }
        n.listeners.push(listener);
        true
    }

    /// Drop listeners failing `keep`. Returns how many were removed.
    pub fn retain_listeners(&mut self, id: NodeId, keep: impl Fn(&Listener) -> bool) -> usize {
        let Some(n) = self.node_mut(id) else {
            return 0;
        };
        let before = n.listeners.len();
        n.listeners.retain(|l| keep(l));
        before - n.listeners.len()
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] {
        self.node(id).map(|n| n.listeners.as_slice()).unwrap_or(&[])
    }

    /// Render a readable outline of the subtree rooted at `id`
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.outline_into(id, 0, &mut out);
        out
    }

    fn outline_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.tag.to_ascii_lowercase());
        if !node.classes.is_empty() {
            out.push('.');
            out.push_str(&node.classes.join("."));
        }
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            out.push_str(&format!(" style=\"{}\"", style.join("; ")));
        }
        if !node.text.is_empty() {
            out.push_str(&format!(" {:?}", node.text));
        }
        out.push('\n');
        for child in &node.children {
            self.outline_into(*child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Dom, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let a = dom.create_element("span");
        let b = dom.create_element("p");
        dom.append_child(root, a);
        dom.append_child(a, b);
        (dom, root, a, b)
    }

    #[test]
    fn test_tag_names_are_uppercased() {
        let mut dom = Dom::new();
        let n = dom.create_element("profile-header");
        assert_eq!(dom.tag_name(n), Some("PROFILE-HEADER"));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let (dom, root, a, b) = tree();
        assert!(dom.contains(root, b));
        assert!(dom.contains(a, a));
        assert!(!dom.contains(b, a));
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let (mut dom, root, a, b) = tree();
        dom.detach(a);
        assert!(!dom.is_attached(b, root));
        assert!(dom.contains(a, b));
        assert!(dom.children(root).is_empty());
    }

    #[test]
    fn test_insert_child_refuses_cycles() {
        let (mut dom, root, _a, b) = tree();
        dom.append_child(b, root);
        assert_eq!(dom.parent(root), None);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let a = dom.create_element("a");
        let a1 = dom.create_element("a1");
        let b = dom.create_element("b");
        dom.append_child(root, a);
        dom.append_child(a, a1);
        dom.append_child(root, b);
        assert_eq!(dom.descendants(root), vec![a, a1, b]);
    }

    #[test]
    fn test_computed_style_prefers_inline() {
        let (mut dom, _root, a, _b) = tree();
        dom.set_sheet_style(a, "color", "white");
        assert_eq!(dom.computed_style(a, "color"), Some("white"));
        dom.set_style(a, "color", "red");
        assert_eq!(dom.computed_style(a, "color"), Some("red"));
    }

    #[test]
    fn test_text_content_concatenates() {
        let (mut dom, _root, a, b) = tree();
        dom.set_text(a, "Hello ");
        dom.set_text(b, "Shibe");
        assert_eq!(dom.text_content(a), "Hello Shibe");
    }

    #[test]
    fn test_add_listener_is_idempotent() {
        let (mut dom, _root, a, _b) = tree();
        assert!(dom.add_listener(a, Listener::StopPropagation));
        assert!(!dom.add_listener(a, Listener::StopPropagation));
        assert_eq!(dom.listeners(a).len(), 1);
    }

    #[test]
    fn test_retain_listeners_removes_matching() {
        let (mut dom, _root, a, _b) = tree();
        dom.add_listener(a, Listener::StopPropagation);
        dom.add_listener(
            a,
            Listener::ActivateRegion {
                container: ContainerId(0),
                position: 3,
            },
        );
        let removed = dom.retain_listeners(a, |l| !matches!(l, Listener::ActivateRegion { .. }));
        assert_eq!(removed, 1);
        assert_eq!(dom.listeners(a), [Listener::StopPropagation]);
    }
}
