//! Terminal catalog of a comic album series.
//!
//! Albums live in a per-collection SQLite store and are shown as a filterable
//! list with a detail overlay. Every change flows through the catalog event
//! bus; the location fragment (`#/remaining`, `#/albums/12`) drives filtering
//! and the detail view.

pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod router;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
pub mod view;
