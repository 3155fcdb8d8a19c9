//! Shared cart persistence (`cart.json`).

pub mod repository;
pub mod store;
pub mod service;

pub use repository::CartRepository;
pub use service::add_from_catalog;
pub use store::CartStore;
