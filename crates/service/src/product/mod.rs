//! Catalog persistence (`products.json`).

pub mod repository;
pub mod store;

pub use repository::ProductRepository;
pub use store::ProductStore;
