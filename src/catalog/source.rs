//! Product sources
//!
//! The simulation engine only needs random product ids. [`ProductSource`] is
//! the seam for whatever holds the products; [`ProductCatalog`] is the
//! in-memory implementation used by the binary.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info};

use crate::catalog::{Product, ProductEntry};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ProductId, SimulationConfig};

/// Built-in catalog used when no product file is given
const BUILTIN_PRODUCTS: &[(&str, f64)] = &[
    ("Wireless Mouse", 24.99),
    ("Mechanical Keyboard", 89.50),
    ("USB-C Hub", 39.00),
    ("27\" Monitor", 279.99),
    ("Laptop Stand", 45.25),
    ("Noise Cancelling Headphones", 199.00),
    ("Webcam", 64.90),
    ("Desk Lamp", 32.40),
    ("Ergonomic Chair", 349.00),
    ("Standing Desk Mat", 54.75),
    ("Portable SSD 1TB", 119.99),
    ("Bluetooth Speaker", 59.95),
    ("Smartwatch", 229.00),
    ("Phone Case", 14.99),
    ("Charging Cable", 9.99),
    ("Power Bank", 34.50),
    ("Coffee Mug", 12.00),
    ("Notebook", 6.49),
    ("Backpack", 74.99),
    ("Water Bottle", 19.90),
];

/// Source of product ids for cart events
pub trait ProductSource: fmt::Debug + Send + Sync {
    /// Return up to `count` distinct product ids chosen at random
    ///
    /// Fewer ids are returned when the source holds fewer products.
    fn fetch_random_product_ids(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<Vec<ProductId>>;
}

/// In-memory product catalog
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create a catalog holding the built-in products
    pub fn builtin<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SimulationResult<Self> {
        let entries = BUILTIN_PRODUCTS
            .iter()
            .map(|(name, price)| ProductEntry::new(*name, *price))
            .collect();
        let mut catalog = Self::new();
        catalog.seed_if_empty(entries, rng, now)?;
        Ok(catalog)
    }

    /// Create a catalog from a JSON file holding `[{"name": ..., "price": ...}]`
    pub fn from_file<P, R>(path: P, rng: &mut R, now: DateTime<Utc>) -> SimulationResult<Self>
    where
        P: AsRef<Path>,
        R: Rng + ?Sized,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SimulationError::dependency(format!(
                "failed to read product catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let entries: Vec<ProductEntry> = serde_json::from_str(&content).map_err(|e| {
            SimulationError::malformed_input(format!(
                "invalid product catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut catalog = Self::new();
        catalog.seed_if_empty(entries, rng, now)?;
        Ok(catalog)
    }

    /// Build the catalog a run of `config` uses
    ///
    /// Products come from `config.product_catalog` when set, the built-in list
    /// otherwise. Their ids are drawn from a stream seeded with
    /// [`SimulationConfig::catalog_seed`], never from the simulation stream.
    pub fn for_config(config: &SimulationConfig, now: DateTime<Utc>) -> SimulationResult<Self> {
        let mut rng = match config.catalog_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match &config.product_catalog {
            Some(path) => Self::from_file(path, &mut rng, now),
            None => Self::builtin(&mut rng, now),
        }
    }

    /// Load `entries` if the catalog holds no products yet
    ///
    /// Returns the number of products added; an already populated catalog is
    /// left untouched.
    pub fn seed_if_empty<R: Rng + ?Sized>(
        &mut self,
        entries: Vec<ProductEntry>,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> SimulationResult<usize> {
        if !self.products.is_empty() {
            info!("Product catalog already holds {} products", self.products.len());
            return Ok(0);
        }

        let products = entries
            .into_iter()
            .map(|entry| Product::new(ProductId::from_rng(rng), now, entry.name, entry.price))
            .collect::<SimulationResult<Vec<_>>>()?;

        info!("Seeded product catalog with {} products", products.len());
        self.products = products;
        Ok(self.products.len())
    }

    /// All products in insertion order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductSource for ProductCatalog {
    fn fetch_random_product_ids(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> SimulationResult<Vec<ProductId>> {
        let amount = count.min(self.products.len());
        let ids: Vec<ProductId> = index::sample(rng, self.products.len(), amount)
            .into_iter()
            .map(|i| self.products[i].id)
            .collect();

        debug!("Fetched {} of {} requested product ids", ids.len(), count);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog() -> ProductCatalog {
        ProductCatalog::builtin(&mut StdRng::seed_from_u64(5), Utc::now()).unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = catalog();
        assert_eq!(catalog.len(), BUILTIN_PRODUCTS.len());
        assert!(!catalog.is_empty());

        let first = &catalog.products()[0];
        assert_eq!(catalog.get(first.id), Some(first));
        assert!(catalog.get(ProductId::new()).is_none());
    }

    #[test]
    fn test_fetch_returns_distinct_catalog_ids() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let known: HashSet<ProductId> = catalog.products().iter().map(|p| p.id).collect();

        let ids = catalog.fetch_random_product_ids(12, &mut rng).unwrap();
        assert_eq!(ids.len(), 12);
        let distinct: HashSet<ProductId> = ids.iter().copied().collect();
        assert_eq!(distinct.len(), 12);
        assert!(ids.iter().all(|id| known.contains(id)));
    }

    #[test]
    fn test_fetch_is_capped_by_catalog_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let small = ProductCatalog::with_products(catalog().products()[..3].to_vec());
        assert_eq!(small.fetch_random_product_ids(10, &mut rng).unwrap().len(), 3);
        assert!(ProductCatalog::new().fetch_random_product_ids(4, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_seed_if_empty_leaves_populated_catalog_alone() {
        let mut catalog = catalog();
        let before = catalog.len();
        let added = catalog
            .seed_if_empty(
                vec![ProductEntry::new("Extra", 1.0)],
                &mut StdRng::seed_from_u64(2),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(added, 0);
        assert_eq!(catalog.len(), before);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Mug", "price": 8.5}}, {{"name": "Tea", "price": 4.25}}]"#)
            .unwrap();

        let catalog =
            ProductCatalog::from_file(file.path(), &mut StdRng::seed_from_u64(3), Utc::now())
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[1].name, "Tea");
    }

    #[test]
    fn test_for_config_is_reproducible_and_reads_files() {
        let now = Utc::now();
        let config = SimulationConfig { seed: Some(42), ..Default::default() };
        assert_eq!(
            ProductCatalog::for_config(&config, now).unwrap().products(),
            ProductCatalog::for_config(&config, now).unwrap().products()
        );

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Kettle", "price": 30.0}}]"#).unwrap();
        let config = SimulationConfig {
            product_catalog: Some(file.path().to_str().unwrap().to_string()),
            ..Default::default()
        };
        let catalog = ProductCatalog::for_config(&config, now).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].name, "Kettle");
    }

    #[test]
    fn test_from_file_errors() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(matches!(
            ProductCatalog::from_file("/nonexistent/products.json", &mut rng, Utc::now()),
            Err(SimulationError::Dependency(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ProductCatalog::from_file(file.path(), &mut rng, Utc::now()),
            Err(SimulationError::MalformedInput(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Bad", "price": -2.0}}]"#).unwrap();
        assert!(matches!(
            ProductCatalog::from_file(file.path(), &mut rng, Utc::now()),
            Err(SimulationError::InvalidEventData(_))
        ));
    }
}
