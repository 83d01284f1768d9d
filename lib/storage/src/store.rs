use crate::record::read_seed_file;
use crate::snapshot::SnapshotManager;
use serde::Serialize;
use shoprank_core::{CatalogProvider, InMemoryCatalog, Product, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// What the startup step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartupReport {
    pub seeded: bool,
    pub normalized_paths: usize,
    pub product_count: usize,
}

/// Catalog backed by a data directory.
///
/// Holds the catalog in memory and mirrors every change to a JSON snapshot.
pub struct CatalogStore {
    catalog: Arc<InMemoryCatalog>,
    snapshots: SnapshotManager,
    data_dir: PathBuf,
}

impl CatalogStore {
    /// Open `data_dir`, creating it if needed and restoring any saved catalog
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let snapshots = SnapshotManager::new(&data_dir);
        let catalog = match snapshots.load()? {
            Some(snapshot) => {
                info!(
                    "Loaded catalog snapshot with {} products (saved {})",
                    snapshot.products.len(),
                    snapshot.saved_at
                );
                InMemoryCatalog::from_products(snapshot.products)?
            }
            None => {
                debug!("No catalog snapshot in {:?}", data_dir);
                InMemoryCatalog::new()
            }
        };

        Ok(Self {
            catalog: Arc::new(catalog),
            snapshots,
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Shared handle to the in-memory catalog
    pub fn catalog(&self) -> Arc<InMemoryCatalog> {
        self.catalog.clone()
    }

    /// Seed an empty store and persist it. Returns false if the store
    /// already held products.
    pub fn seed(&self, products: Vec<Product>) -> Result<bool> {
        let seeded = self.catalog.seed(products)?;
        if seeded {
            self.save()?;
        }
        Ok(seeded)
    }

    /// Seed from a seed file. The file is not read when the store already
    /// holds products.
    pub fn seed_from_file<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        if !self.catalog.is_empty() {
            debug!("Store not empty, ignoring seed file {:?}", path.as_ref());
            return Ok(false);
        }
        let products = read_seed_file(path)?;
        self.seed(products)
    }

    /// Rewrite backslashes in image paths and persist if anything changed
    pub fn normalize_image_paths(&self) -> Result<usize> {
        let changed = self.catalog.normalize_image_paths();
        if changed > 0 {
            self.save()?;
        }
        Ok(changed)
    }

    /// One-time startup step: seed if empty, then migrate image paths.
    /// Safe to run on every start.
    pub fn startup(&self, seed_file: Option<&Path>) -> Result<StartupReport> {
        let seeded = match seed_file {
            Some(path) => self.seed_from_file(path)?,
            None => false,
        };
        let normalized_paths = self.normalize_image_paths()?;
        let report = StartupReport {
            seeded,
            normalized_paths,
            product_count: self.catalog.count(),
        };
        info!(?report, "Catalog ready");
        Ok(report)
    }

    pub fn save(&self) -> Result<()> {
        let products = self.catalog.products();
        self.snapshots.save(&products)?;
        debug!("Saved {} products to {:?}", products.len(), self.snapshots.path());
        Ok(())
    }
}

impl CatalogProvider for CatalogStore {
    fn products(&self) -> Arc<[Product]> {
        self.catalog.products()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::write_seed_file;
    use shoprank_core::{Category, TraitSet};

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Kitchen AAA", Category::Home, 0.52, TraitSet::parse("Organized")).unwrap(),
            Product::new(2, "Makeup BBB", Category::Beauty, 0.93, TraitSet::parse("Creative, Social"))
                .unwrap()
                .with_image("static\\images\\bbb.png"),
        ]
    }

    #[test]
    fn test_open_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.data_dir().exists());
    }

    #[test]
    fn test_startup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        write_seed_file(&seed, &products()).unwrap();

        let store = CatalogStore::open(dir.path()).unwrap();
        let first = store.startup(Some(&seed)).unwrap();
        assert_eq!(
            first,
            StartupReport {
                seeded: true,
                normalized_paths: 1,
                product_count: 2
            }
        );

        let second = store.startup(Some(&seed)).unwrap();
        assert!(!second.seeded);
        assert_eq!(second.normalized_paths, 0);
        assert_eq!(second.product_count, 2);
    }

    #[test]
    fn test_reopen_restores_catalog() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = CatalogStore::open(dir.path()).unwrap();
            assert!(store.seed(products()).unwrap());
            store.normalize_image_paths().unwrap();
        }

        let reopened = CatalogStore::open(dir.path()).unwrap();
        let snapshot = reopened.products();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].image_path.as_deref(), Some("static/images/bbb.png"));

        // a seeded store ignores further seeds, even a missing file
        assert!(!reopened.seed_from_file(dir.path().join("missing.json")).unwrap());
    }

    #[test]
    fn test_startup_without_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let report = store.startup(None).unwrap();
        assert!(!report.seeded);
        assert_eq!(report.product_count, 0);
    }
}
