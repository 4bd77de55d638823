//! Record joining: each sales row left-joins the first matching row from the
//! product, inventory, waste, and recycling datasets.
//!
//! "First matching" scans the target dataset in file order and takes the
//! earliest row whose key field equals the sales row's value for the same key
//! name; later duplicates are silently ignored. Unmatched sources contribute
//! no fields at all. Merge order is fixed {sales, product, inventory, waste,
//! recycling} with last-write-wins on colliding names.

use crate::dataset::{Datasets, RawRecord};

pub type JoinedRecord = RawRecord;

/// Join every sales row, in sales order.
pub fn join_datasets(datasets: &Datasets) -> Vec<JoinedRecord> {
    datasets
        .sales
        .iter()
        .map(|sale| join_sale(sale, datasets))
        .collect()
}

fn join_sale(sale: &RawRecord, datasets: &Datasets) -> JoinedRecord {
    let mut merged = sale.clone();
    merge_into(&mut merged, first_match(&datasets.products, "product_name", sale));
    merge_into(&mut merged, first_match(&datasets.inventory, "product_name", sale));
    merge_into(&mut merged, first_match(&datasets.waste, "Product Name", sale));
    merge_into(&mut merged, first_match(&datasets.recycling, "Sale Date", sale));
    merged
}

/// Earliest row whose `key` equals the sales row's `key`. A sales row that
/// lacks the key matches nothing.
fn first_match<'a>(
    rows: &'a [RawRecord],
    key: &str,
    sale: &RawRecord,
) -> Option<&'a RawRecord> {
    let wanted = sale.get(key)?;
    rows.iter().find(|row| row.get(key) == Some(wanted))
}

fn merge_into(target: &mut JoinedRecord, source: Option<&RawRecord>) {
    if let Some(row) = source {
        for (key, value) in row {
            target.insert(key.clone(), value.clone());
        }
    }
}
