use crate::catalog::{CatalogEvent, EventBus, Filter, Item, ItemId, SubscriptionId, Topic};

/// Rendered snapshot of one catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub volume: String,
    pub title: String,
    pub year: String,
    pub collected: bool,
}

impl ItemCard {
    fn from_item(item: &Item) -> Self {
        Self {
            volume: item.volume.clone(),
            title: item.title.clone(),
            year: item.year.clone(),
            collected: item.collected,
        }
    }
}

/// What the owner should do after an item view handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemViewUpdate {
    Rendered,
    VisibilityChanged,
    Detached,
    Ignored,
}

/// The view of a single catalog item.
///
/// Listens on its own item's topic. Once detached it never renders again.
#[derive(Debug)]
pub struct ItemView {
    item_id: ItemId,
    subscription: SubscriptionId,
    card: ItemCard,
    hidden: bool,
    hovered: bool,
    detached: bool,
    render_count: usize,
}

impl ItemView {
    /// Subscribe to `item`'s topic and render it once.
    pub fn attach(bus: &mut EventBus, item: &Item, filter: &Filter) -> Self {
        let subscription = bus.subscribe(Topic::Item(item.id));
        let mut view = Self {
            item_id: item.id,
            subscription,
            card: ItemCard::from_item(item),
            hidden: false,
            hovered: false,
            detached: false,
            render_count: 0,
        };
        view.render(item, filter);
        view
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    pub fn card(&self) -> &ItemCard {
        &self.card
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Refresh the snapshot from the item's current fields.
    pub fn render(&mut self, item: &Item, filter: &Filter) {
        if self.detached {
            return;
        }
        self.card = ItemCard::from_item(item);
        self.hidden = filter.hides(item.collected);
        self.render_count += 1;
    }

    /// Recompute visibility only. Returns true if it changed.
    pub fn toggle_visible(&mut self, item: &Item, filter: &Filter) -> bool {
        if self.detached {
            return false;
        }
        let hidden = filter.hides(item.collected);
        let changed = hidden != self.hidden;
        self.hidden = hidden;
        changed
    }

    pub fn hover_on(&mut self) {
        if !self.detached {
            self.hovered = true;
        }
    }

    pub fn hover_out(&mut self) {
        self.hovered = false;
    }

    /// Unsubscribe and enter the terminal detached state. Idempotent.
    pub fn detach(&mut self, bus: &mut EventBus) {
        if self.detached {
            return;
        }
        bus.unsubscribe(self.subscription);
        self.detached = true;
        self.hovered = false;
        tracing::debug!(item_id = self.item_id, "Item view detached");
    }

    /// React to an event delivered on this view's subscription.
    ///
    /// `item` is the item's current state, or `None` if it has left the store.
    pub fn handle(
        &mut self,
        event: &CatalogEvent,
        item: Option<&Item>,
        filter: &Filter,
        bus: &mut EventBus,
    ) -> ItemViewUpdate {
        if self.detached {
            return ItemViewUpdate::Ignored;
        }
        match (event, item) {
            (CatalogEvent::Removed(_), _) | (_, None) => {
                self.detach(bus);
                ItemViewUpdate::Detached
            }
            (CatalogEvent::Changed(_), Some(item)) => {
                self.render(item, filter);
                ItemViewUpdate::Rendered
            }
            (CatalogEvent::Visible(_), Some(item)) => {
                if self.toggle_visible(item, filter) {
                    ItemViewUpdate::VisibilityChanged
                } else {
                    ItemViewUpdate::Ignored
                }
            }
            _ => ItemViewUpdate::Ignored,
        }
    }
}
