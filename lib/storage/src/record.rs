//! Seed file records
//!
//! Seed files hold flat records whose columns match the catalog export
//! format: `product_id`, `product_name`, `category`, `interest_score`,
//! `personality_traits` (comma-separated), and an optional `image_path`.
//! A `.csv` extension selects CSV with a header row; anything else is read
//! and written as a JSON array.

use serde::{Deserialize, Serialize};
use shoprank_core::{Error, Product, Result, TraitSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// On-disk layout of a seed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Csv,
}

impl SeedFormat {
    /// Pick the format from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SeedFormat::Csv,
            _ => SeedFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: u64,
    pub product_name: String,
    pub category: String,
    pub interest_score: f64,
    #[serde(default)]
    pub personality_traits: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = Error;

    fn try_from(record: ProductRecord) -> Result<Self> {
        let category = record.category.parse()?;
        let mut product = Product::new(
            record.product_id,
            record.product_name,
            category,
            record.interest_score,
            TraitSet::parse(&record.personality_traits),
        )?;
        product.image_path = record.image_path;
        Ok(product)
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.0,
            product_name: product.name.clone(),
            category: product.category.to_string(),
            interest_score: product.interest_score,
            personality_traits: product.traits.to_external(),
            image_path: product.image_path.clone(),
        }
    }
}

/// Read and validate every record in a seed file
pub fn read_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records = match SeedFormat::from_path(path) {
        SeedFormat::Json => serde_json::from_reader(reader)?,
        SeedFormat::Csv => read_csv_records(reader)?,
    };
    records.into_iter().map(Product::try_from).collect()
}

/// Write products in seed file format
pub fn write_seed_file<P: AsRef<Path>>(path: P, products: &[Product]) -> Result<()> {
    let path = path.as_ref();
    let records: Vec<ProductRecord> = products.iter().map(ProductRecord::from).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    match SeedFormat::from_path(path) {
        SeedFormat::Json => serde_json::to_writer_pretty(&mut writer, &records)?,
        SeedFormat::Csv => write_csv_records(&mut writer, &records)?,
    }
    writer.flush()?;
    Ok(())
}

fn read_csv_records<R: Read>(reader: R) -> Result<Vec<ProductRecord>> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<ProductRecord>, _>>()
        .map_err(csv_error)
}

fn write_csv_records<W: Write>(writer: W, records: &[ProductRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record).map_err(csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> Error {
    Error::Serialization(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoprank_core::Category;

    fn record(category: &str, score: f64) -> ProductRecord {
        ProductRecord {
            product_id: 12,
            product_name: "Garden PQR".to_string(),
            category: category.to_string(),
            interest_score: score,
            personality_traits: "Relaxed, Caring, Organized".to_string(),
            image_path: None,
        }
    }

    #[test]
    fn test_record_to_product() {
        let product = Product::try_from(record("Home", 0.74)).unwrap();
        assert_eq!(product.category, Category::Home);
        assert_eq!(product.traits.len(), 3);
        assert!(product.traits.contains("caring"));
        assert_eq!(ProductRecord::from(&product), record("Home", 0.74));
    }

    #[test]
    fn test_invalid_records() {
        assert!(matches!(
            Product::try_from(record("Garden", 0.74)),
            Err(Error::UnknownCategory(_))
        ));
        assert!(matches!(
            Product::try_from(record("Home", 1.74)),
            Err(Error::InvalidInterestScore { .. })
        ));
    }

    #[test]
    fn test_seed_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let products = vec![Product::try_from(record("Home", 0.74)).unwrap()];

        write_seed_file(&path, &products).unwrap();
        assert_eq!(read_seed_file(&path).unwrap(), products);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SeedFormat::from_path(Path::new("data/products.csv")), SeedFormat::Csv);
        assert_eq!(SeedFormat::from_path(Path::new("PRODUCTS.CSV")), SeedFormat::Csv);
        assert_eq!(SeedFormat::from_path(Path::new("products.json")), SeedFormat::Json);
        assert_eq!(SeedFormat::from_path(Path::new("products")), SeedFormat::Json);
    }

    #[test]
    fn test_read_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(
            &path,
            "product_id,product_name,category,interest_score,personality_traits\n\
             1,Smart ABC,Electronics,0.81,\"Curious, Active\"\n\
             2,Yoga DEF,Sports,0.64,Relaxed\n",
        )
        .unwrap();

        let products = read_seed_file(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].traits, TraitSet::parse("Curious, Active"));
        assert_eq!(products[0].image_path, None);
        assert_eq!(products[1].category, Category::Sports);
    }

    #[test]
    fn test_csv_roundtrip_quotes_traits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let products = vec![
            Product::new(1, "Smart ABC", Category::Electronics, 0.81, TraitSet::parse("Curious, Active")).unwrap(),
            Product::try_from(record("Home", 0.74))
                .unwrap()
                .with_image("static/images/pqr.png"),
        ];

        write_seed_file(&path, &products).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("product_id,product_name,category,interest_score,personality_traits,image_path"));
        assert!(raw.contains("\"Curious, Active\""));

        assert_eq!(read_seed_file(&path).unwrap(), products);
    }

    #[test]
    fn test_malformed_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(&path, "product_id,product_name\none,Smart ABC\n").unwrap();
        assert!(matches!(read_seed_file(&path), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_malformed_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[{\"product_id\": \"one\"}]").unwrap();
        assert!(matches!(read_seed_file(&path), Err(Error::Serialization(_))));
        assert!(matches!(read_seed_file(dir.path().join("missing.json")), Err(Error::Io(_))));
    }
}
