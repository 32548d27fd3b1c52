//! Catalog domain: items, the ordered store, filter state and the event bus
//! that keeps views in step with them.

mod events;
mod filter;
mod item;
pub mod seed;
mod store;

pub use events::{CatalogEvent, Delivery, EventBus, SubscriptionId, Topic};
pub use filter::Filter;
pub use item::{Item, ItemFields, ItemId, NewItem, DEFAULT_IMAGE};
pub use seed::SeedError;
pub use store::{ItemStore, StoreError};
