//! Storage abstractions for service layer
//!
//! File-backed document stores shared by the catalog and cart.

pub mod json_file_store;

pub use json_file_store::{JsonFileStore, Mutation};
