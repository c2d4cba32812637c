//! Inventory: the sweet catalog and its stock arithmetic.

pub mod models;
pub mod service;

pub use service::InventoryService;
