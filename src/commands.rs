//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::ContainerId;
use crate::notifications::Notification;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Presentation changed
    Redraw,
    /// Publish a notification (composer first, then subscribers)
    Notify(Notification),
    /// Rescan a container's content for editable regions
    Rescan(ContainerId),
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // The composer's own handler repaints the highlight
            Cmd::Notify(_) => true,
            Cmd::Rescan(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Notifications carried by this command, in execution order
    pub fn notifications(&self) -> Vec<&Notification> {
        match self {
            Cmd::Notify(n) => vec![n],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.notifications()).collect(),
            Cmd::None | Cmd::Redraw | Cmd::Rescan(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeId;

    #[test]
    fn test_batch_needs_redraw_if_any_does() {
        let cmd = Cmd::batch(vec![Cmd::Rescan(ContainerId(0)), Cmd::Redraw]);
        assert!(cmd.needs_redraw());
        assert!(!Cmd::Rescan(ContainerId(0)).needs_redraw());
    }

    #[test]
    fn test_notifications_flatten_batches() {
        let change = Notification::ValueChange {
            for_element: NodeId(3),
            edit_name: "displayName".to_string(),
        };
        let cmd = Cmd::batch(vec![Cmd::Redraw, Cmd::batch(vec![Cmd::Notify(change.clone())])]);
        assert_eq!(cmd.notifications(), vec![&change]);
    }
}
