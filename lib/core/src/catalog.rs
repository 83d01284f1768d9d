use crate::{Error, Product, ProductId, Result};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Read access to the product catalog.
///
/// Implementations hand out an immutable snapshot; ranking runs against the
/// snapshot without holding any lock.
pub trait CatalogProvider {
    fn products(&self) -> Arc<[Product]>;

    fn count(&self) -> usize {
        self.products().len()
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn products(&self) -> Arc<[Product]> {
        (**self).products()
    }
}

/// Catalog held entirely in memory
pub struct InMemoryCatalog {
    products: RwLock<Arc<[Product]>>,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Build a catalog from an already materialized product list
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        check_products(&products)?;
        Ok(Self {
            products: RwLock::new(Arc::from(products)),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    /// Seed the catalog if it is empty.
    ///
    /// Returns `Ok(true)` when the products were inserted and `Ok(false)` when
    /// the catalog already held data, in which case `products` is discarded.
    pub fn seed(&self, products: Vec<Product>) -> Result<bool> {
        let mut guard = self.products.write();
        if !guard.is_empty() {
            debug!("Catalog already holds {} products, skipping seed", guard.len());
            return Ok(false);
        }
        check_products(&products)?;
        info!("Seeding catalog with {} products", products.len());
        *guard = Arc::from(products);
        Ok(true)
    }

    /// Rewrite Windows-style separators in image paths.
    /// Returns the number of products whose path changed.
    pub fn normalize_image_paths(&self) -> usize {
        let mut guard = self.products.write();
        if !guard.iter().any(|p| p.image_path.as_deref().is_some_and(|s| s.contains('\\'))) {
            return 0;
        }

        let mut products = guard.to_vec();
        let mut changed = 0;
        for product in &mut products {
            if product.normalize_image_path() {
                debug!("Normalized image path for {}", product.name);
                changed += 1;
            }
        }
        *guard = Arc::from(products);
        info!("Normalized {} image paths", changed);
        changed
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn products(&self) -> Arc<[Product]> {
        self.products.read().clone()
    }
}

fn check_products(products: &[Product]) -> Result<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        product.validate()?;
        if !seen.insert(product.id) {
            return Err(Error::DuplicateProduct(product.id.0));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, TraitSet};

    fn product(id: u64, score: f64) -> Product {
        Product::new(id, format!("Smart {id}"), Category::Electronics, score, TraitSet::new()).unwrap()
    }

    #[test]
    fn test_seed_is_idempotent() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.seed(vec![product(1, 0.5), product(2, 0.6)]).unwrap());
        assert_eq!(catalog.count(), 2);

        assert!(!catalog.seed(vec![product(3, 0.9)]).unwrap());
        assert_eq!(catalog.count(), 2);
        assert!(catalog.get(ProductId(3)).is_none());
    }

    #[test]
    fn test_seed_rejects_duplicates() {
        let catalog = InMemoryCatalog::new();
        let result = catalog.seed(vec![product(1, 0.5), product(1, 0.6)]);
        assert!(matches!(result, Err(Error::DuplicateProduct(1))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_snapshot_survives_updates() {
        let catalog = InMemoryCatalog::from_products(vec![
            product(1, 0.5).with_image("images\\a.png"),
            product(2, 0.6),
        ])
        .unwrap();

        let before = catalog.products();
        assert_eq!(catalog.normalize_image_paths(), 1);
        assert_eq!(catalog.normalize_image_paths(), 0);

        // Old snapshot is untouched
        assert_eq!(before[0].image_path.as_deref(), Some("images\\a.png"));
        assert_eq!(
            catalog.get(ProductId(1)).unwrap().image_path.as_deref(),
            Some("images/a.png")
        );
    }
}
