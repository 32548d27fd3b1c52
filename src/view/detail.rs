use crate::catalog::{CatalogEvent, EventBus, Item, ItemId, SubscriptionId, Topic};

/// Every field of the item shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailContent {
    pub volume: String,
    pub title: String,
    pub year: String,
    pub description: String,
    pub image: String,
    pub collected: bool,
}

impl From<&Item> for DetailContent {
    fn from(item: &Item) -> Self {
        Self {
            volume: item.volume.clone(),
            title: item.title.clone(),
            year: item.year.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            collected: item.collected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailUpdate {
    Rendered,
    /// The view wants to close (its item left the store, or a close signal arrived).
    Close,
    Ignored,
}

/// Overlay showing one item in full.
///
/// Listens on the catalog topic so it sees toggles of its item and the
/// global close signal.
#[derive(Debug)]
pub struct DetailView {
    item_id: ItemId,
    subscription: SubscriptionId,
    content: DetailContent,
    scroll: u16,
}

impl DetailView {
    pub fn open(bus: &mut EventBus, item: &Item) -> Self {
        Self {
            item_id: item.id,
            subscription: bus.subscribe(Topic::Catalog),
            content: DetailContent::from(item),
            scroll: 0,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    pub fn content(&self) -> &DetailContent {
        &self.content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }

    pub fn render(&mut self, item: &Item) {
        self.content = DetailContent::from(item);
    }

    pub fn handle(&mut self, event: &CatalogEvent, item: Option<&Item>) -> DetailUpdate {
        match event {
            CatalogEvent::Close => DetailUpdate::Close,
            CatalogEvent::Removed(id) if *id == self.item_id => DetailUpdate::Close,
            CatalogEvent::Changed(id) | CatalogEvent::Added(id) if *id == self.item_id => {
                match item {
                    Some(item) => {
                        self.render(item);
                        DetailUpdate::Rendered
                    }
                    None => DetailUpdate::Close,
                }
            }
            CatalogEvent::Reset => match item {
                Some(item) => {
                    self.render(item);
                    DetailUpdate::Rendered
                }
                None => DetailUpdate::Close,
            },
            _ => DetailUpdate::Ignored,
        }
    }

    /// Stop listening. The owner drops the view afterwards.
    pub fn close(self, bus: &mut EventBus) {
        bus.unsubscribe(self.subscription);
        tracing::debug!(item_id = self.item_id, "Detail view closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemFields, NewItem};

    fn album(id: ItemId) -> Item {
        NewItem::create(ItemFields {
            volume: Some(id.to_string()),
            title: Some("Asterix and Cleopatra".to_string()),
            year: Some("1965".to_string()),
            ..Default::default()
        })
        .persisted(id)
    }

    #[test]
    fn test_open_copies_all_fields() {
        let mut bus = EventBus::new();
        let view = DetailView::open(&mut bus, &album(6));
        let content = view.content();
        assert_eq!(content.volume, "6");
        assert_eq!(content.title, "Asterix and Cleopatra");
        assert_eq!(content.description, "None");
        assert_eq!(content.image, "img/placeholder.png");
        assert_eq!(bus.subscribers(Topic::Catalog), 1);
    }

    #[test]
    fn test_rerenders_on_own_item_change() {
        let mut bus = EventBus::new();
        let mut item = album(6);
        let mut view = DetailView::open(&mut bus, &item);

        item.toggle();
        assert_eq!(
            view.handle(&CatalogEvent::Changed(6), Some(&item)),
            DetailUpdate::Rendered
        );
        assert!(view.content().collected);
        assert_eq!(
            view.handle(&CatalogEvent::Changed(7), None),
            DetailUpdate::Ignored
        );
    }

    #[test]
    fn test_close_signals() {
        let mut bus = EventBus::new();
        let item = album(6);
        let mut view = DetailView::open(&mut bus, &item);

        assert_eq!(view.handle(&CatalogEvent::Close, None), DetailUpdate::Close);
        assert_eq!(
            view.handle(&CatalogEvent::Removed(6), None),
            DetailUpdate::Close
        );
        assert_eq!(
            view.handle(&CatalogEvent::Removed(2), None),
            DetailUpdate::Ignored
        );

        view.close(&mut bus);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_scroll_saturates() {
        let mut bus = EventBus::new();
        let mut view = DetailView::open(&mut bus, &album(1));
        view.scroll_by(-3);
        assert_eq!(view.scroll(), 0);
        view.scroll_by(4);
        assert_eq!(view.scroll(), 4);
    }
}
