//! Element rendering and composer layout
//!
//! Renderers are collaborators: they build an element's content and mark
//! editable regions with attributes, nothing more. The composer layout wraps
//! each element in a container and an editable host, and separates elements
//! with dividers:
//!
//! ```text
//! div.elements-container
//!   div.element-container[container_id=N]
//!     make-editable[container_id=N]      <- toolbelt popups are appended here
//!       <content from the renderer>
//!   element-divider
//! ```

mod profile_header;

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};
use crate::model::{Composition, ContainerId, Element};
use crate::options::Property;

pub use profile_header::{ProfileHeader, DEFAULT_SUBTEXT, DEFAULT_TEXT};

/// Class marking the container whose region is being edited
pub const ACTIVELY_EDITING_CLASS: &str = "actively-editing";
/// Attribute carrying the container id on containers and hosts
pub const CONTAINER_ID_ATTR: &str = "container_id";

/// Builds the content of one element type
pub trait ElementRenderer: std::fmt::Debug {
    /// Element `type` this renderer handles
    fn kind(&self) -> &'static str;

    /// Build the content subtree; returns its detached root
    fn render(&self, dom: &mut Dom, vals: &BTreeMap<String, String>) -> NodeId;

    /// Working data key a region property is persisted under
    fn binding(&self, _edit_name: &str, _property: Property) -> Option<&'static str> {
        None
    }
}

/// Renderers by element type
#[derive(Debug)]
pub struct RendererSet {
    renderers: Vec<Box<dyn ElementRenderer>>,
}

impl Default for RendererSet {
    fn default() -> Self {
        Self {
            renderers: vec![Box::new(ProfileHeader)],
        }
    }
}

impl RendererSet {
    /// A set with no renderers at all
    pub fn empty() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Add a renderer, replacing any with the same kind
    pub fn register(&mut self, renderer: Box<dyn ElementRenderer>) {
        self.renderers.retain(|r| r.kind() != renderer.kind());
        self.renderers.push(renderer);
    }

    pub fn get(&self, kind: &str) -> Option<&dyn ElementRenderer> {
        self.renderers
            .iter()
            .find(|r| r.kind() == kind)
            .map(|r| r.as_ref())
    }
}

/// Nodes belonging to one element container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNodes {
    pub container: NodeId,
    /// Editable host: content and toolbelt popups live under it
    pub host: NodeId,
    /// Renderer output, `None` for unknown element types
    pub content: Option<NodeId>,
    pub divider: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerLayout {
    pub root: NodeId,
    pub containers: Vec<ContainerNodes>,
}

impl ComposerLayout {
    pub fn nodes(&self, container: ContainerId) -> Option<&ContainerNodes> {
        self.containers.get(container.0)
    }

    /// Container whose editable host contains `node`
    pub fn container_of(&self, dom: &Dom, node: NodeId) -> Option<ContainerId> {
        self.containers
            .iter()
            .position(|c| dom.contains(c.host, node))
            .map(ContainerId)
    }
}

/// Build the whole composer tree for `composition`
pub fn render_composition(dom: &mut Dom, renderers: &RendererSet, composition: &Composition) -> ComposerLayout {
    let root = dom.create_element("div");
    dom.add_class(root, "elements-container");

    let containers = composition
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let id = ContainerId(index);

            let container = dom.create_element("div");
            dom.add_class(container, "element-container");
            dom.set_attribute(container, CONTAINER_ID_ATTR, id.to_string());
            dom.append_child(root, container);

            let host = dom.create_element("make-editable");
            dom.set_attribute(host, CONTAINER_ID_ATTR, id.to_string());
            dom.append_child(container, host);

            let content = render_content(dom, renderers, host, element);

            let divider = dom.create_element("element-divider");
            let icon = dom.create_element("sl-icon");
            dom.set_attribute(icon, "name", "plus-square-fill");
            dom.set_attribute(icon, "label", "Add Element");
            dom.append_child(divider, icon);
            dom.append_child(root, divider);

            ContainerNodes {
                container,
                host,
                content,
                divider,
            }
        })
        .collect();

    ComposerLayout { root, containers }
}

/// Render `element` and slot it as the first child of `host`
pub fn render_content(dom: &mut Dom, renderers: &RendererSet, host: NodeId, element: &Element) -> Option<NodeId> {
    let Some(renderer) = renderers.get(&element.kind) else {
        tracing::warn!(kind = %element.kind, "no renderer for element type, leaving container empty");
        return None;
    };
    let content = renderer.render(dom, &element.vals);
    dom.insert_child(host, 0, content);
    Some(content)
}
