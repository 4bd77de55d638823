//! Dataset loading: flat CSV files into ordered rows of string-valued fields.
//!
//! All five datasets load synchronously at startup. A missing file or a file
//! without a header row is a fatal error; the service never starts partially
//! loaded.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

/// One row of a loaded dataset. Keys come from the header row verbatim.
/// Column names are intentionally NOT harmonized across datasets
/// (`product_name` vs `Product Name`, `Quantity_x`/`Quantity_y`); the join
/// and feature layers depend on the exact names.
pub type RawRecord = HashMap<String, String>;

pub const SALES_FILE: &str = "sales_data.csv";
pub const WASTE_FILE: &str = "waste_data.csv";
pub const RECYCLING_FILE: &str = "recycling_data.csv";
pub const INVENTORY_FILE: &str = "inventory_data.csv";
pub const PRODUCTS_FILE: &str = "sample_dataset.csv";

/// The five source datasets, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub sales: Vec<RawRecord>,
    pub waste: Vec<RawRecord>,
    pub recycling: Vec<RawRecord>,
    pub inventory: Vec<RawRecord>,
    pub products: Vec<RawRecord>,
}

impl Datasets {
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let sales = load_records(&dir.join(SALES_FILE))?;
        let waste = load_records(&dir.join(WASTE_FILE))?;
        let recycling = load_records(&dir.join(RECYCLING_FILE))?;
        let inventory = load_records(&dir.join(INVENTORY_FILE))?;
        let products = load_records(&dir.join(PRODUCTS_FILE))?;

        info!(
            sales = sales.len(),
            waste = waste.len(),
            recycling = recycling.len(),
            inventory = inventory.len(),
            products = products.len(),
            "datasets loaded"
        );

        Ok(Self {
            sales,
            waste,
            recycling,
            inventory,
            products,
        })
    }
}

/// Read one CSV file into rows, using the first row as the column header.
/// Row order is preserved; the joiner's first-match semantics rely on it.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file =
        File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .clone();
    if headers.is_empty() {
        bail!("dataset {} has no header row", path.display());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.with_context(|| format!("reading record from {}", path.display()))?;
        let mut row = RawRecord::with_capacity(headers.len());
        for (key, value) in headers.iter().zip(record.iter()) {
            row.insert(key.to_string(), value.to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_csv(dir: &Path, name: &str, content: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn rows_keep_file_order_and_header_keys() {
        let tmp = tempfile::tempdir().unwrap();
        write_csv(
            tmp.path(),
            "rows.csv",
            "product_name,Quantity Sold\nMilk,34\nBread,21\n",
        );

        let rows = load_records(&tmp.path().join("rows.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("product_name").unwrap(), "Milk");
        assert_eq!(rows[0].get("Quantity Sold").unwrap(), "34");
        assert_eq!(rows[1].get("product_name").unwrap(), "Bread");
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_records(&tmp.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn missing_dataset_aborts_the_whole_load() {
        let tmp = tempfile::tempdir().unwrap();
        // Only sales present; the loader must not fall back to a partial set.
        write_csv(tmp.path(), SALES_FILE, "product_name\nMilk\n");
        assert!(Datasets::load_from_dir(tmp.path()).is_err());
    }
}
