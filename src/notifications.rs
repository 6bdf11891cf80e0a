//! Typed notification channel
//!
//! Replaces bubbling custom events: a descendant publishes, an ancestor (the
//! composer) or any outside subscriber observes, and nobody needs a direct
//! reference to the other side.

use crate::dom::NodeId;

/// Topic a subscriber listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ToolbeltShown,
    ValueChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A toolbelt became the single active one
    ToolbeltShown {
        toolbelt_id: String,
        container_id: String,
    },
    /// A rich control wrote a new value onto a region
    ValueChange { for_element: NodeId, edit_name: String },
}

impl Notification {
    pub fn topic(&self) -> Topic {
        match self {
            Notification::ToolbeltShown { .. } => Topic::ToolbeltShown,
            Notification::ValueChange { .. } => Topic::ValueChange,
        }
    }
}

/// Handle returned by [`NotificationBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Notification)>;

/// Subscribers by topic, called in subscription order
#[derive(Default)]
pub struct NotificationBus {
    subscribers: Vec<(SubscriptionId, Topic, Subscriber)>,
    next_id: u64,
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic, callback: impl FnMut(&Notification) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, topic, Box::new(callback)));
        id
    }

    /// Returns `false` if the subscription was not found
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver to every subscriber of the notification's topic
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&mut self, notification: &Notification) -> usize {
        let topic = notification.topic();
        let mut delivered = 0;
        for (_, t, callback) in self.subscribers.iter_mut() {
            if *t == topic {
                callback(notification);
                delivered += 1;
            }
        }
        tracing::trace!(?topic, delivered, "published notification");
        delivered
    }
}
