//! # shoprank Core
//!
//! Core library for the shoprank catalog ranking engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Product`] - A catalog entry with category, interest score and traits
//! - [`TraitSet`] - Case-insensitive set of personality traits
//! - [`CatalogProvider`] - Read interface handing out immutable catalog snapshots
//! - [`InMemoryCatalog`] - Catalog with an idempotent seeding step
//! - [`paginate`] - Fixed-size listing pages
//!
//! ## Example
//!
//! ```rust
//! use shoprank_core::{CatalogProvider, Category, InMemoryCatalog, Product, TraitSet, paginate};
//!
//! let catalog = InMemoryCatalog::new();
//! let product = Product::new(1, "Decor LMN", Category::Home, 0.82, TraitSet::parse("Creative, Relaxed")).unwrap();
//! catalog.seed(vec![product]).unwrap();
//!
//! let snapshot = catalog.products();
//! let page = paginate(&snapshot, 1, 10);
//! assert_eq!(page.items.len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod page;
pub mod product;
pub mod synth;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use error::{Error, Result};
pub use page::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use product::{Category, Product, ProductId, TraitSet};
pub use synth::{generate_catalog, PERSONALITY_TRAITS};
