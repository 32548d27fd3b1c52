//! Explicit subscription bus for catalog events.
//!
//! Views register interest in a [`Topic`] and receive [`Delivery`] values in
//! registration order. Publishing only enqueues; the owner of the bus drains
//! the queue with [`EventBus::next_delivery`] and routes each delivery to the
//! subscriber it names. Events published while draining are appended to the
//! same queue, so handlers never re-enter each other.

use std::collections::{BTreeMap, VecDeque};

use super::item::ItemId;

pub type SubscriptionId = u64;

/// What a subscriber listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Store-wide events, including item events that bubble up from items.
    Catalog,
    /// Events about a single item.
    Item(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// An item entered the store (or was put back after a failed delete).
    Added(ItemId),
    /// An item's fields changed.
    Changed(ItemId),
    /// An item left the store.
    Removed(ItemId),
    /// The whole store was (re)loaded.
    Reset,
    /// The filter state was replaced.
    FilterChanged,
    /// Re-evaluate visibility of one item against the current filter.
    Visible(ItemId),
    /// Open the detail view for an item.
    Details(ItemId),
    /// Force-close the detail view.
    Close,
}

impl CatalogEvent {
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Added(id)
            | Self::Changed(id)
            | Self::Removed(id)
            | Self::Visible(id)
            | Self::Details(id) => Some(*id),
            Self::Reset | Self::FilterChanged | Self::Close => None,
        }
    }
}

impl Topic {
    fn receives(&self, event: &CatalogEvent) -> bool {
        match self {
            // Per-item visibility passes are only interesting to the item itself
            Topic::Catalog => !matches!(event, CatalogEvent::Visible(_)),
            Topic::Item(id) => match event {
                CatalogEvent::Changed(x) | CatalogEvent::Removed(x) | CatalogEvent::Visible(x) => {
                    x == id
                }
                _ => false,
            },
        }
    }
}

/// A single event addressed to a single subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub subscriber: SubscriptionId,
    pub event: CatalogEvent,
}

#[derive(Debug, Default)]
pub struct EventBus {
    next_id: SubscriptionId,
    /// BTreeMap keeps iteration in registration order (ids are monotonic).
    subscriptions: BTreeMap<SubscriptionId, Topic>,
    queue: VecDeque<Delivery>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic) -> SubscriptionId {
        self.next_id += 1;
        let id = self.next_id;
        self.subscriptions.insert(id, topic);
        id
    }

    /// Remove a subscription. Deliveries already queued for it are dropped.
    ///
    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Enqueue `event` for every subscriber whose topic receives it.
    pub fn publish(&mut self, event: CatalogEvent) {
        for (&subscriber, topic) in &self.subscriptions {
            if topic.receives(&event) {
                self.queue.push_back(Delivery {
                    subscriber,
                    event: event.clone(),
                });
            }
        }
    }

    /// Pop the next delivery whose subscriber is still registered.
    pub fn next_delivery(&mut self) -> Option<Delivery> {
        while let Some(delivery) = self.queue.pop_front() {
            if self.subscriptions.contains_key(&delivery.subscriber) {
                return Some(delivery);
            }
        }
        None
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    /// Number of live subscriptions on `topic`.
    pub fn subscribers(&self, topic: Topic) -> usize {
        self.subscriptions.values().filter(|t| **t == topic).count()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn drain(bus: &mut EventBus) -> Vec<Delivery> {
        std::iter::from_fn(|| bus.next_delivery()).collect()
    }

    #[test]
    fn test_item_events_bubble_to_catalog() {
        let mut bus = EventBus::new();
        let catalog = bus.subscribe(Topic::Catalog);
        let item = bus.subscribe(Topic::Item(7));

        bus.publish(CatalogEvent::Changed(7));

        assert_eq!(
            drain(&mut bus),
            vec![
                Delivery {
                    subscriber: catalog,
                    event: CatalogEvent::Changed(7)
                },
                Delivery {
                    subscriber: item,
                    event: CatalogEvent::Changed(7)
                },
            ]
        );
    }

    #[test]
    fn test_item_topic_ignores_other_items() {
        let mut bus = EventBus::new();
        bus.subscribe(Topic::Item(1));
        bus.publish(CatalogEvent::Changed(2));
        bus.publish(CatalogEvent::FilterChanged);
        assert!(drain(&mut bus).is_empty());
    }

    #[test]
    fn test_visible_only_reaches_item() {
        let mut bus = EventBus::new();
        bus.subscribe(Topic::Catalog);
        let item = bus.subscribe(Topic::Item(3));

        bus.publish(CatalogEvent::Visible(3));

        let deliveries = drain(&mut bus);
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].subscriber, item);
    }

    #[test]
    fn test_unsubscribe_drops_queued_deliveries() {
        let mut bus = EventBus::new();
        let item = bus.subscribe(Topic::Item(4));
        bus.publish(CatalogEvent::Changed(4));

        assert!(bus.unsubscribe(item));
        assert!(!bus.unsubscribe(item));
        assert_eq!(bus.next_delivery(), None);
        assert_eq!(bus.subscribers(Topic::Item(4)), 0);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_registration_order_is_delivery_order() {
        let mut bus = EventBus::new();
        let first = bus.subscribe(Topic::Catalog);
        let second = bus.subscribe(Topic::Catalog);
        bus.publish(CatalogEvent::Reset);

        let order: Vec<_> = drain(&mut bus).into_iter().map(|d| d.subscriber).collect();
        assert_eq!(order, vec![first, second]);
    }
}
