use crate::catalog::{
    CatalogEvent, Delivery, EventBus, Filter, Item, ItemFields, ItemId, ItemStore,
    SubscriptionId, Topic,
};
use crate::keybindings::KeybindingRegistry;
use crate::router::{Route, Router};
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};
use crate::view::{DetailUpdate, DetailView, ItemView};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Instant;

/// Rows moved by PageUp/PageDown when the list height is not known yet.
const DEFAULT_PAGE: usize = 10;

// ============================================================================
// Load State
// ============================================================================

/// Where the initial fetch stands. Nothing is rendered as a list until `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Result of the startup fetch (and seed, if the store was empty).
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub items: Vec<Item>,
    /// Number of items written by seeding; 0 when the store already had items.
    pub seeded: usize,
}

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Result<LoadedCatalog, String>),
    ItemSaved {
        item_id: ItemId,
        collected: bool,
    },
    ItemSaveFailed {
        item_id: ItemId,
        /// The flag value that failed to persist.
        attempted: bool,
        error: String,
    },
    ItemRemoved {
        item_id: ItemId,
    },
    ItemRemoveFailed {
        /// Former store position, used to put the item back where it was.
        index: usize,
        item: Item,
        error: String,
    },
    /// A background task panicked.
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Confirmation Dialog
// ============================================================================

/// Pending confirmation action for destructive operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    RemoveItem { item_id: ItemId, title: String },
}

/// Filter navigation summary, recomputed on every store-wide event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub visible: bool,
    pub collected: usize,
    pub remaining: usize,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state: the catalog view.
///
/// Owns the store, every item view, the detail view and the shared mask.
/// All mutations publish on `bus`; `pump_events` routes deliveries to the
/// subscriber they name until the queue is empty.
pub struct App {
    pub db: Database,
    /// Persistence namespace.
    pub collection: String,
    /// Initial data, used only when the persisted collection is empty.
    pub seed: Arc<Vec<ItemFields>>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // Catalog
    pub store: ItemStore,
    pub bus: EventBus,
    catalog_subscription: SubscriptionId,
    /// One view per item, in store order.
    pub views: Vec<ItemView>,
    pub detail: Option<DetailView>,
    /// Dimmed backdrop behind the detail overlay.
    pub mask_visible: bool,
    /// Written only by route dispatch.
    pub filter: Filter,
    pub nav: NavState,
    pub router: Router,
    /// Fragment dispatched when routing starts.
    pub initial_route: String,
    pub load_state: LoadState,
    /// Items with a write in flight. Toggle and remove are refused for them.
    pub pending: HashSet<ItemId>,
    /// Number of full (unfiltered) list renders, for diagnostics.
    pub full_renders: usize,

    // UI State
    /// Index into the visible rows.
    pub selected: usize,
    /// First visible row of the list viewport.
    pub scroll_offset: usize,
    /// Rows available to the list, updated on render.
    pub list_height: usize,
    /// Last rendered detail overlay area, for mouse hit-testing.
    pub detail_area: Option<Rect>,

    // Status message with expiry
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
    /// Scroll offset in the help screen for long keybinding lists.
    pub help_scroll_offset: usize,

    /// Pending confirmation dialog for destructive operations.
    pub pending_confirm: Option<ConfirmAction>,
    pub confirm_remove: bool,

    /// Location being typed after `:`; `None` when the prompt is closed.
    pub route_input: Option<String>,
}

impl App {
    pub fn new(db: Database, collection: impl Into<String>, seed: Vec<ItemFields>) -> Self {
        let mut bus = EventBus::new();
        // Registered first, so store-wide events reach the catalog before any item view
        let catalog_subscription = bus.subscribe(Topic::Catalog);

        Self {
            db,
            collection: collection.into(),
            seed: Arc::new(seed),
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            store: ItemStore::new(),
            bus,
            catalog_subscription,
            views: Vec::new(),
            detail: None,
            mask_visible: false,
            filter: Filter::All,
            nav: NavState::default(),
            router: Router::new(),
            initial_route: String::new(),
            load_state: LoadState::Loading,
            pending: HashSet::new(),
            full_renders: 0,
            selected: 0,
            scroll_offset: 0,
            list_height: 0,
            detail_area: None,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            pending_confirm: None,
            confirm_remove: true,
            route_input: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Enter the loading state before (re)spawning the fetch.
    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
        self.needs_redraw = true;
    }

    /// Apply the fetch result. On success, start routing and render everything.
    pub fn finish_load(&mut self, result: Result<LoadedCatalog, String>) {
        let loaded = match result {
            Ok(loaded) => loaded,
            Err(error) => {
                tracing::error!(error = %error, collection = %self.collection, "Failed to load catalog");
                self.load_state = LoadState::Failed(error);
                self.needs_redraw = true;
                return;
            }
        };

        if let Err(e) = self.store.replace_all(loaded.items) {
            tracing::error!(error = %e, "Persisted catalog is inconsistent");
            self.load_state = LoadState::Failed(e.to_string());
            self.needs_redraw = true;
            return;
        }
        self.load_state = LoadState::Ready;
        tracing::info!(
            items = self.store.len(),
            seeded = loaded.seeded,
            collection = %self.collection,
            "Catalog loaded"
        );
        if loaded.seeded > 0 {
            self.set_status(format!("Seeded {} albums", loaded.seeded));
        }

        self.render_all();
        if !self.router.is_started() {
            let initial = std::mem::take(&mut self.initial_route);
            let route = self.router.start(&initial);
            self.dispatch(route);
        }
        self.bus.publish(CatalogEvent::Reset);
        self.pump_events();
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Act on a parsed route.
    ///
    /// Filter State is written before the change is published.
    pub fn dispatch(&mut self, route: Route) {
        match route {
            Route::Filter(filter) => {
                tracing::debug!(filter = %filter, "Filter route");
                self.filter = filter;
                self.bus.publish(CatalogEvent::FilterChanged);
            }
            Route::Details { volume } => match self.store.find_by_volume(&volume) {
                Some(item) => {
                    tracing::debug!(volume = %volume, item_id = item.id, "Details route");
                    self.bus.publish(CatalogEvent::Details(item.id));
                }
                None => tracing::debug!(volume = %volume, "No album for volume"),
            },
        }
    }

    /// Change the location. With `trigger` the new route is dispatched.
    ///
    /// Moving to a different fragment scrolls the list back to the top.
    pub fn navigate(&mut self, fragment: &str, trigger: bool) {
        let before = self.router.fragment().to_string();
        let route = self.router.navigate(fragment, trigger);
        if self.router.fragment() != before {
            self.scroll_offset = 0;
        }
        if let Some(route) = route {
            self.dispatch(route);
            self.pump_events();
        }
        self.needs_redraw = true;
    }

    /// Shareable form of the current location.
    pub fn location(&self) -> String {
        self.router.location()
    }

    /// Filter that actually applies: everything shows while nothing is collected.
    pub fn effective_filter(&self) -> Filter {
        if self.store.counts().0 == 0 {
            Filter::All
        } else {
            self.filter.clone()
        }
    }

    // ========================================================================
    // Event Delivery
    // ========================================================================

    /// Deliver queued events until the bus is drained.
    pub fn pump_events(&mut self) {
        while let Some(Delivery { subscriber, event }) = self.bus.next_delivery() {
            if subscriber == self.catalog_subscription {
                self.on_catalog_event(event);
            } else if self.detail.as_ref().map(DetailView::subscription) == Some(subscriber) {
                self.on_detail_event(event);
            } else if let Some(index) = self
                .views
                .iter()
                .position(|v| v.subscription() == subscriber)
            {
                let filter = self.effective_filter();
                let view = &mut self.views[index];
                let item = self.store.get(view.item_id());
                view.handle(&event, item, &filter, &mut self.bus);
            } else {
                tracing::warn!(subscriber, ?event, "Delivery for unknown subscriber");
            }
        }

        self.views.retain(|v| !v.is_detached());
        self.clamp_selection();
        self.sync_hover();
        self.needs_redraw = true;
    }

    fn on_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Added(id) => {
                self.attach_view(id);
                self.render_summary();
            }
            CatalogEvent::Changed(_) | CatalogEvent::Removed(_) | CatalogEvent::Reset => {
                self.render_summary();
            }
            CatalogEvent::FilterChanged => {
                self.render_summary();
                self.filter_all();
            }
            CatalogEvent::Details(id) => self.open_details(id),
            CatalogEvent::Close | CatalogEvent::Visible(_) => {}
        }
    }

    fn on_detail_event(&mut self, event: CatalogEvent) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let item = self.store.get(detail.item_id());
        if detail.handle(&event, item) == DetailUpdate::Close {
            self.close_details();
        }
    }

    /// Recompute counts and the nav indicator.
    ///
    /// With nothing collected the nav hides, the list is fully re-rendered
    /// unfiltered, and the fragment is cleared without routing.
    fn render_summary(&mut self) {
        let (collected, remaining) = self.store.counts();
        let was_visible = self.nav.visible;
        self.nav = NavState {
            visible: collected > 0,
            collected,
            remaining,
        };

        if collected == 0 {
            self.render_all();
            self.router.navigate("", false);
        } else if !was_visible {
            self.filter_all();
        }
    }

    /// Tear down every item view and build fresh ones from the store.
    fn render_all(&mut self) {
        for view in &mut self.views {
            view.detach(&mut self.bus);
        }
        let filter = self.effective_filter();
        let bus = &mut self.bus;
        self.views = self
            .store
            .iter()
            .map(|item| ItemView::attach(bus, item, &filter))
            .collect();
        self.full_renders += 1;
    }

    /// Ask every item view to re-evaluate its visibility.
    fn filter_all(&mut self) {
        let ids: Vec<ItemId> = self.store.iter().map(|item| item.id).collect();
        for id in ids {
            self.bus.publish(CatalogEvent::Visible(id));
        }
    }

    fn attach_view(&mut self, id: ItemId) {
        if self.views.iter().any(|v| v.item_id() == id && !v.is_detached()) {
            return;
        }
        let (Some(item), Some(position)) = (self.store.get(id), self.store.position(id)) else {
            return;
        };
        let filter = self.effective_filter();
        let view = ItemView::attach(&mut self.bus, item, &filter);
        // Views mirror store order; count views whose item comes before this one
        let index = self
            .views
            .iter()
            .filter(|v| self.store.position(v.item_id()).is_some_and(|p| p < position))
            .count();
        self.views.insert(index, view);
    }

    // ========================================================================
    // Detail View
    // ========================================================================

    /// Open the detail view for an item, replacing any open one.
    fn open_details(&mut self, id: ItemId) {
        let Some(item) = self.store.get(id) else {
            return;
        };
        if let Some(previous) = self.detail.take() {
            previous.close(&mut self.bus);
        }
        self.detail = Some(DetailView::open(&mut self.bus, item));
        self.mask_visible = true;
        self.needs_redraw = true;
    }

    /// Close the detail view, hide the mask and clear the fragment.
    ///
    /// The list scroll position survives the close.
    pub fn close_details(&mut self) {
        let Some(detail) = self.detail.take() else {
            return;
        };
        detail.close(&mut self.bus);
        self.mask_visible = false;
        self.detail_area = None;

        let saved = self.scroll_offset;
        self.navigate("", false);
        self.scroll_offset = saved;
    }

    /// Broadcast the global close signal (e.g. a click on the mask).
    pub fn request_close(&mut self) {
        self.bus.publish(CatalogEvent::Close);
        self.pump_events();
    }

    /// Open the detail view for the selected row through its location.
    pub fn open_selected_details(&mut self) {
        let Some(volume) = self.selected_item().map(|item| item.volume.clone()) else {
            return;
        };
        self.navigate(&Route::details_fragment(&volume), true);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Flip an item's collected flag locally and mark it pending.
    ///
    /// Returns the new flag, which the caller must persist. Refused (None)
    /// while a previous write for the item is in flight.
    pub fn toggle_item(&mut self, id: ItemId) -> Option<bool> {
        if self.load_state != LoadState::Ready {
            return None;
        }
        if self.pending.contains(&id) {
            self.set_status("Still saving that album");
            return None;
        }
        let collected = match self.store.toggle(id) {
            Ok(collected) => collected,
            Err(e) => {
                tracing::warn!(item_id = id, error = %e, "Toggle on missing item");
                return None;
            }
        };
        self.pending.insert(id);
        tracing::debug!(item_id = id, collected, "Toggled collected");
        self.bus.publish(CatalogEvent::Changed(id));
        self.pump_events();
        Some(collected)
    }

    pub fn confirm_saved(&mut self, id: ItemId, collected: bool) {
        self.pending.remove(&id);
        tracing::debug!(item_id = id, collected, "Collected flag persisted");
    }

    /// Undo a toggle whose write failed.
    pub fn rollback_toggle(&mut self, id: ItemId, attempted: bool, error: &str) {
        self.pending.remove(&id);
        tracing::error!(item_id = id, attempted, error = %error, "Failed to save collected flag");
        if self.store.set_collected(id, !attempted).is_ok() {
            self.bus.publish(CatalogEvent::Changed(id));
            self.pump_events();
        }
        self.set_status(format!("Could not save: {}", error));
    }

    /// Take an item out of the store and detach its view.
    ///
    /// Returns its former position and the item so the caller can persist the
    /// delete and restore it on failure.
    pub fn remove_item(&mut self, id: ItemId) -> Option<(usize, Item)> {
        if self.load_state != LoadState::Ready {
            return None;
        }
        if self.pending.contains(&id) {
            self.set_status("Still saving that album");
            return None;
        }
        let (index, item) = match self.store.remove(id) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!(item_id = id, error = %e, "Remove of missing item");
                return None;
            }
        };
        self.pending.insert(id);
        tracing::debug!(item_id = id, index, "Removed item");
        self.bus.publish(CatalogEvent::Removed(id));
        self.pump_events();
        Some((index, item))
    }

    pub fn confirm_removed(&mut self, id: ItemId) {
        self.pending.remove(&id);
        tracing::debug!(item_id = id, "Item delete persisted");
    }

    /// Put back an item whose delete failed, at its original position.
    pub fn restore_removed(&mut self, index: usize, item: Item, error: &str) {
        let id = item.id;
        self.pending.remove(&id);
        tracing::error!(item_id = id, error = %error, "Failed to delete item");
        match self.store.insert(index, item) {
            Ok(()) => {
                self.bus.publish(CatalogEvent::Added(id));
                self.pump_events();
            }
            Err(e) => tracing::warn!(item_id = id, error = %e, "Could not restore item"),
        }
        self.set_status(format!("Could not remove: {}", error));
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Indices into `views` of rows that are currently shown.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.views
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_hidden())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_view(&self) -> Option<&ItemView> {
        let rows = self.visible_rows();
        rows.get(self.selected).map(|&i| &self.views[i])
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_view()
            .and_then(|view| self.store.get(view.item_id()))
    }

    pub fn nav_down(&mut self) {
        self.move_selection(1);
    }

    pub fn nav_up(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        let page = self.page_size() as isize;
        self.move_selection(page);
    }

    pub fn page_up(&mut self) {
        let page = self.page_size() as isize;
        self.move_selection(-page);
    }

    fn page_size(&self) -> usize {
        if self.list_height == 0 {
            DEFAULT_PAGE
        } else {
            self.list_height
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible_rows().len();
        if count == 0 {
            return;
        }
        let max = count - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
        self.ensure_selected_visible();
        self.sync_hover();
        self.needs_redraw = true;
    }

    /// Keep the selection inside the visible rows.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Scroll just enough to bring the selected row into the viewport.
    pub fn ensure_selected_visible(&mut self) {
        if self.list_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.list_height {
            self.scroll_offset = self.selected + 1 - self.list_height;
        }
    }

    /// Hover follows the selected row.
    fn sync_hover(&mut self) {
        let selected = self.visible_rows().get(self.selected).copied();
        for (i, view) in self.views.iter_mut().enumerate() {
            if Some(i) == selected {
                view.hover_on();
            } else {
                view.hover_out();
            }
        }
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewItem;
    use pretty_assertions::assert_eq;
    use tokio::time::{self, Duration};

    fn album(id: ItemId, volume: &str, collected: bool) -> Item {
        NewItem::create(ItemFields {
            volume: Some(volume.to_string()),
            title: Some(format!("Album {}", volume)),
            collected: Some(collected),
            ..Default::default()
        })
        .persisted(id)
    }

    async fn test_app(items: Vec<Item>) -> App {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, "test", Vec::new());
        app.finish_load(Ok(LoadedCatalog { items, seeded: 0 }));
        app
    }

    fn hidden(app: &App) -> Vec<ItemId> {
        app.views
            .iter()
            .filter(|v| v.is_hidden())
            .map(|v| v.item_id())
            .collect()
    }

    #[tokio::test]
    async fn test_load_failure_enters_failed_state() {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, "test", Vec::new());
        app.finish_load(Err("disk on fire".to_string()));

        assert_eq!(app.load_state, LoadState::Failed("disk on fire".to_string()));
        assert!(app.views.is_empty());
        assert!(!app.router.is_started());
        assert_eq!(app.toggle_item(1), None);
    }

    #[tokio::test]
    async fn test_load_renders_one_view_per_item() {
        let app = test_app(vec![album(1, "1", false), album(2, "2", true)]).await;
        assert_eq!(app.load_state, LoadState::Ready);
        assert_eq!(app.views.len(), 2);
        assert_eq!(app.bus.subscribers(Topic::Item(1)), 1);
        assert_eq!(app.nav, NavState { visible: true, collected: 1, remaining: 1 });
    }

    #[tokio::test]
    async fn test_initial_route_is_dispatched_after_load() {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, "test", Vec::new());
        app.initial_route = "#/albums/2".to_string();
        app.finish_load(Ok(LoadedCatalog {
            items: vec![album(1, "1", true), album(2, "2", false)],
            seeded: 0,
        }));

        assert_eq!(app.detail.as_ref().map(DetailView::item_id), Some(2));
        assert!(app.mask_visible);
    }

    #[tokio::test]
    async fn test_nothing_collected_hides_nav_and_ignores_filter() {
        let mut app = test_app(vec![album(1, "1", false), album(2, "2", false)]).await;
        app.navigate("remaining", true);
        app.navigate("collected", true);

        assert_eq!(app.filter, Filter::Collected);
        assert!(!app.nav.visible);
        assert!(hidden(&app).is_empty());
        assert_eq!(app.router.fragment(), "");
    }

    #[tokio::test]
    async fn test_first_collected_item_reapplies_filter() {
        let mut app = test_app(vec![album(1, "1", false), album(2, "2", false)]).await;
        app.navigate("remaining", true);
        assert!(hidden(&app).is_empty());

        app.toggle_item(1);
        assert!(app.nav.visible);
        assert_eq!(hidden(&app), vec![1]);
    }

    #[tokio::test]
    async fn test_unknown_filter_hides_nothing() {
        let mut app = test_app(vec![album(1, "1", true), album(2, "2", false)]).await;
        app.navigate("wishlist", true);
        assert_eq!(app.filter, Filter::Other("wishlist".to_string()));
        assert!(hidden(&app).is_empty());
    }

    #[tokio::test]
    async fn test_toggle_is_refused_while_pending() {
        let mut app = test_app(vec![album(1, "1", false)]).await;
        assert_eq!(app.toggle_item(1), Some(true));
        assert_eq!(app.toggle_item(1), None);
        assert!(app.store.get(1).unwrap().collected);

        app.confirm_saved(1, true);
        assert_eq!(app.toggle_item(1), Some(false));
    }

    #[tokio::test]
    async fn test_rollback_restores_flag() {
        let mut app = test_app(vec![album(1, "1", false), album(2, "2", true)]).await;
        app.toggle_item(1);
        app.rollback_toggle(1, true, "disk full");

        assert!(!app.store.get(1).unwrap().collected);
        assert!(app.pending.is_empty());
        assert!(!app.views[0].card().collected);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_remove_detaches_view_and_restore_reinserts() {
        let mut app = test_app(vec![
            album(1, "1", false),
            album(2, "2", true),
            album(3, "3", false),
        ])
        .await;

        let (index, item) = app.remove_item(2).unwrap();
        assert_eq!(index, 1);
        assert_eq!(app.views.len(), 2);
        assert_eq!(app.bus.subscribers(Topic::Item(2)), 0);
        assert!(!app.nav.visible);

        app.restore_removed(index, item, "locked");
        let order: Vec<_> = app.views.iter().map(|v| v.item_id()).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(app.store.position(2), Some(1));
        assert!(app.nav.visible);
    }

    #[tokio::test]
    async fn test_removing_detail_item_closes_detail() {
        let mut app = test_app(vec![album(1, "1", true), album(2, "2", false)]).await;
        app.navigate("albums/2", true);
        assert!(app.detail.is_some());

        app.remove_item(2);
        assert!(app.detail.is_none());
        assert!(!app.mask_visible);
        assert_eq!(app.router.fragment(), "");
    }

    #[tokio::test]
    async fn test_opening_second_detail_replaces_first() {
        let mut app = test_app(vec![album(1, "1", true), album(2, "2", false)]).await;
        app.navigate("albums/1", true);
        app.navigate("albums/2", true);

        assert_eq!(app.detail.as_ref().map(DetailView::item_id), Some(2));
        // Catalog plus exactly one detail on the store-wide topic
        assert_eq!(app.bus.subscribers(Topic::Catalog), 2);
    }

    #[tokio::test]
    async fn test_request_close_closes_detail() {
        let mut app = test_app(vec![album(1, "1", true)]).await;
        app.navigate("albums/1", true);
        app.request_close();
        assert!(app.detail.is_none());
        assert_eq!(app.bus.subscribers(Topic::Catalog), 1);
    }

    #[tokio::test]
    async fn test_selection_skips_hidden_rows() {
        let mut app = test_app(vec![
            album(1, "1", true),
            album(2, "2", false),
            album(3, "3", true),
        ])
        .await;
        app.navigate("collected", true);

        assert_eq!(app.selected_item().map(|i| i.id), Some(1));
        app.nav_down();
        assert_eq!(app.selected_item().map(|i| i.id), Some(3));
        app.nav_down();
        assert_eq!(app.selected_item().map(|i| i.id), Some(3));
        assert!(app.views[2].is_hovered());
        assert!(!app.views[0].is_hovered());
    }

    #[tokio::test]
    async fn test_open_selected_details_sets_location() {
        let mut app = test_app(vec![album(1, "1", true), album(2, "2", false)]).await;
        app.nav_down();
        app.open_selected_details();
        assert_eq!(app.location(), "#/albums/2");
        assert_eq!(app.detail.as_ref().map(DetailView::item_id), Some(2));
    }

    #[tokio::test]
    async fn test_status_message_expires() {
        let mut app = test_app(Vec::new()).await;
        time::pause();
        app.set_status("hello");
        assert!(!app.clear_expired_status());
        time::advance(Duration::from_secs(4)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_cycle_theme() {
        let mut app = test_app(Vec::new()).await;
        assert_eq!(app.cycle_theme(), "Light");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
    }
}
