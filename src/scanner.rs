//! Editable region scanner
//!
//! Walks an element's rendered content, turns every marked node into an
//! [`EditableRegion`] and attaches the click listener that activates its
//! toolbelt. Runs when a container's slotted content changes, not on every
//! render. A node carries at most one activation listener per container:
//! rescanning unchanged content attaches nothing new, and a node whose
//! position shifted has its listener replaced.

use crate::config::RegionPolicy;
use crate::dom::{Dom, Listener, NodeId};
use crate::model::{ContainerId, EditType, EditableRegion, EDIT_NAME_ATTR, EDIT_TYPE_ATTR};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub regions: Vec<EditableRegion>,
    /// Listeners newly attached by this scan
    pub attached: usize,
    /// Marked nodes dropped by [`RegionPolicy::Reject`]
    pub rejected: usize,
}

/// A node is marked if it carries either marker attribute
pub fn is_marked(dom: &Dom, node: NodeId) -> bool {
    dom.has_attribute(node, EDIT_TYPE_ATTR) || dom.has_attribute(node, EDIT_NAME_ATTR)
}

/// Read the region identity off a marked node
pub fn region_for(dom: &Dom, container: ContainerId, node: NodeId, position: usize) -> EditableRegion {
    let edit_type = dom
        .attribute(node, EDIT_TYPE_ATTR)
        .filter(|raw| !raw.trim().is_empty())
        .map(EditType::parse);
    let edit_name = dom.attribute(node, EDIT_NAME_ATTR).unwrap_or_default().to_string();
    EditableRegion {
        edit_type,
        edit_name,
        owner: node,
        tag: dom.tag_name(node).unwrap_or_default().to_string(),
        position,
        container,
    }
}

/// Discover the regions under `content` and wire their click listeners
pub fn scan(dom: &mut Dom, container: ContainerId, content: NodeId, policy: RegionPolicy) -> ScanReport {
    let mut report = ScanReport::default();

    let marked: Vec<NodeId> = dom
        .descendants(content)
        .into_iter()
        .filter(|node| is_marked(dom, *node))
        .collect();

    for node in marked {
        let position = report.regions.len();
        let region = region_for(dom, container, node, position);

        if !region.is_well_formed() {
            match policy {
                RegionPolicy::Reject if region.edit_type.is_none() => {
                    tracing::warn!(
                        %container,
                        node = %node,
                        edit_name = %region.edit_name,
                        "rejecting marked node without an edit type"
                    );
                    report.rejected += 1;
                    continue;
                }
                _ => {
                    tracing::warn!(
                        %container,
                        node = %node,
                        edit_type = ?region.edit_type,
                        edit_name = %region.edit_name,
                        "marked node is missing edit-type or edit-name"
                    );
                }
            }
        }

        let listener = Listener::ActivateRegion { container, position };
        let stale = dom.retain_listeners(node, |l| {
            !matches!(l, Listener::ActivateRegion { container: c, .. } if *c == container) || *l == listener
        });
        if stale > 0 {
            tracing::debug!(%container, node = %node, position, "region moved; replaced its listener");
        }
        if dom.add_listener(node, listener) {
            report.attached += 1;
        }
        report.regions.push(region);
    }

    tracing::debug!(
        %container,
        regions = report.regions.len(),
        attached = report.attached,
        rejected = report.rejected,
        "scanned editable regions"
    );
    report
}
