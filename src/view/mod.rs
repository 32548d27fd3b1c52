//! Per-item and detail views.
//!
//! Views hold rendered snapshots plus presentation state and react to
//! deliveries from the catalog [`EventBus`](crate::catalog::EventBus). Drawing
//! them is left to `ui`.

mod detail;
mod item;

pub use detail::{DetailContent, DetailUpdate, DetailView};
pub use item::{ItemCard, ItemView, ItemViewUpdate};
