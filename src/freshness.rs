//! # Freshness Tagger
//! Classifies catalog items into shelf-life tiers from the whole-month delta
//! between manufacturing and expiry dates. Independent of the prediction
//! pipeline; reads only the product dataset and recomputes on every request.
//!
//! Day-of-month is ignored entirely: Jan 31 → Feb 1 counts as one month, the
//! same as Jan 1 → Feb 28.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dataset::RawRecord;

pub const MANUFACTURING_DATE_KEY: &str = "manufacturing_date";
pub const EXPIRY_DATE_KEY: &str = "expiry_date";

/// Accepted date spellings, tried in order: ISO first, two common regional
/// forms after.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Red,
    Yellow,
    Green,
}

/// A catalog row echoed verbatim plus its derived tag.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    #[serde(flatten)]
    pub fields: RawRecord,
    pub tag: Tag,
}

/// The three tag partitions, each in original catalog order. Any sorting by
/// expiry date is the consumer's concern.
#[derive(Debug, Default, Serialize)]
pub struct FreshnessBuckets {
    pub red: Vec<CatalogItem>,
    pub yellow: Vec<CatalogItem>,
    pub green: Vec<CatalogItem>,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Whole months from `mfg` to `expiry`; negative when expiry precedes
/// manufacturing.
pub fn months_between(mfg: NaiveDate, expiry: NaiveDate) -> i32 {
    (expiry.year() - mfg.year()) * 12 + (expiry.month() as i32 - mfg.month() as i32)
}

/// Tier for one catalog row. Missing or unparsable dates never satisfy the
/// red or yellow cutoffs; green is their explicit landing branch.
pub fn shelf_tag(record: &RawRecord) -> Tag {
    let mfg = record.get(MANUFACTURING_DATE_KEY).and_then(|v| parse_date(v));
    let expiry = record.get(EXPIRY_DATE_KEY).and_then(|v| parse_date(v));

    match (mfg, expiry) {
        (Some(mfg), Some(expiry)) => {
            let months = months_between(mfg, expiry);
            if months <= 1 {
                Tag::Red
            } else if months <= 3 {
                Tag::Yellow
            } else {
                Tag::Green
            }
        }
        _ => Tag::Green,
    }
}

/// Partition the whole catalog. Source records are read-only; the buckets own
/// fresh copies, so repeated calls over an unchanged catalog are identical.
pub fn classify_catalog(products: &[RawRecord]) -> FreshnessBuckets {
    let mut buckets = FreshnessBuckets::default();
    for record in products {
        let tag = shelf_tag(record);
        let item = CatalogItem {
            fields: record.clone(),
            tag,
        };
        match tag {
            Tag::Red => buckets.red.push(item),
            Tag::Yellow => buckets.yellow.push(item),
            Tag::Green => buckets.green.push(item),
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(mfg: &str, expiry: &str) -> RawRecord {
        let mut r = RawRecord::new();
        r.insert(MANUFACTURING_DATE_KEY.to_string(), mfg.to_string());
        r.insert(EXPIRY_DATE_KEY.to_string(), expiry.to_string());
        r
    }

    #[test]
    fn boundary_one_month_is_red() {
        assert_eq!(shelf_tag(&item("2024-01-01", "2024-02-01")), Tag::Red);
    }

    #[test]
    fn boundary_two_months_is_yellow() {
        // Day-of-month is ignored: Jan 1 -> Mar 15 is still two whole months.
        assert_eq!(shelf_tag(&item("2024-01-01", "2024-03-15")), Tag::Yellow);
    }

    #[test]
    fn boundary_three_months_is_yellow() {
        assert_eq!(shelf_tag(&item("2024-01-01", "2024-04-01")), Tag::Yellow);
    }

    #[test]
    fn boundary_four_months_is_green() {
        assert_eq!(shelf_tag(&item("2024-01-01", "2024-05-01")), Tag::Green);
    }

    #[test]
    fn unparsable_dates_fall_through_to_green() {
        assert_eq!(shelf_tag(&item("unknown", "2024-05-01")), Tag::Green);
        assert_eq!(shelf_tag(&item("2024-01-01", "soon")), Tag::Green);
        assert_eq!(shelf_tag(&RawRecord::new()), Tag::Green);
    }

    #[test]
    fn year_boundaries_count_across_december() {
        let mfg = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        assert_eq!(months_between(mfg, expiry), 3);
    }

    #[test]
    fn partitions_preserve_catalog_order() {
        let catalog = vec![
            item("2024-01-01", "2024-09-01"), // green
            item("2024-01-01", "2024-02-01"), // red
            item("2024-02-01", "2024-10-01"), // green
        ];
        let buckets = classify_catalog(&catalog);
        assert_eq!(buckets.red.len(), 1);
        assert_eq!(buckets.green.len(), 2);
        assert_eq!(
            buckets.green[0].fields[EXPIRY_DATE_KEY], "2024-09-01",
            "green bucket must keep catalog order"
        );
    }

    #[test]
    fn tagging_twice_yields_identical_partitions() {
        let catalog = vec![
            item("2024-01-01", "2024-02-01"),
            item("2024-01-10", "2024-03-28"),
            item("bad", "worse"),
        ];
        let first = classify_catalog(&catalog);
        let second = classify_catalog(&catalog);
        assert_eq!(first.red.len(), second.red.len());
        assert_eq!(first.yellow.len(), second.yellow.len());
        assert_eq!(first.green.len(), second.green.len());
        for (a, b) in first.red.iter().zip(&second.red) {
            assert_eq!(a.fields, b.fields);
        }
    }

    #[test]
    fn items_echo_their_original_fields_plus_tag() {
        let mut record = item("2024-01-01", "2024-02-01");
        record.insert("product_name".to_string(), "Milk".to_string());
        let buckets = classify_catalog(&[record]);
        let tagged = &buckets.red[0];
        assert_eq!(tagged.fields["product_name"], "Milk");
        let json = serde_json::to_value(tagged).unwrap();
        assert_eq!(json["tag"], "red");
        assert_eq!(json["product_name"], "Milk");
    }
}
