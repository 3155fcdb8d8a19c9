//! Catalog and cart records shared by the storage and HTTP layers.

pub mod errors;
pub mod keys;
pub mod product;
pub mod cart;

pub use cart::Cart;
pub use product::{Product, ProductPatch};
