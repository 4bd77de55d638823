//! Chart-ready projections of the raw datasets, shaped for a Plotly consumer.
//! Pure field extraction; the learned pipeline is not involved. Numeric
//! coercion here is leading-prefix parsing (`"12 kg"` → 12.0, `"abc"` → 0.0),
//! not the stripping normalizer.

use serde::Serialize;

use crate::dataset::{Datasets, RawRecord};
use crate::normalize::parse_float_prefix;

#[derive(Debug, Serialize)]
pub struct Marker {
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: &'static str,
    pub template: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Serialize)]
pub struct Visualizations {
    #[serde(rename = "figSales")]
    pub sales: Figure,
    #[serde(rename = "figWaste")]
    pub waste: Figure,
    #[serde(rename = "figRecycling")]
    pub recycling: Figure,
    #[serde(rename = "figInventory")]
    pub inventory: Figure,
}

pub fn build_visualizations(datasets: &Datasets) -> Visualizations {
    Visualizations {
        sales: Figure {
            data: vec![Trace {
                x: Some(column(&datasets.sales, "Sale Date")),
                y: Some(numeric_column(&datasets.sales, "Quantity Sold")),
                labels: None,
                values: None,
                kind: "scatter",
                mode: Some("lines"),
                marker: Some(Marker { color: "blue" }),
                name: "Sales",
            }],
            layout: layout("Sales Over Time"),
        },
        waste: Figure {
            data: vec![Trace {
                x: Some(column(&datasets.waste, "Disposal Date")),
                y: Some(numeric_column(&datasets.waste, "Quantity")),
                labels: None,
                values: None,
                kind: "bar",
                mode: None,
                marker: Some(Marker { color: "red" }),
                name: "Waste",
            }],
            layout: layout("Waste Over Time"),
        },
        recycling: Figure {
            data: vec![Trace {
                x: None,
                y: None,
                labels: Some(column(&datasets.recycling, "Material")),
                values: Some(numeric_column(&datasets.recycling, "Quantity")),
                kind: "pie",
                mode: None,
                marker: None,
                name: "Recycling",
            }],
            layout: layout("Recycling Distribution"),
        },
        inventory: Figure {
            data: vec![Trace {
                x: Some(column(&datasets.inventory, "Product Name")),
                y: Some(numeric_column(&datasets.inventory, "Stock Level")),
                labels: None,
                values: None,
                kind: "bar",
                mode: None,
                marker: Some(Marker { color: "green" }),
                name: "Inventory",
            }],
            layout: layout("Current Inventory Levels"),
        },
    }
}

fn layout(title: &'static str) -> Layout {
    Layout {
        title,
        template: "plotly_dark",
    }
}

fn column(rows: &[RawRecord], key: &str) -> Vec<String> {
    rows.iter()
        .map(|row| row.get(key).cloned().unwrap_or_default())
        .collect()
}

fn numeric_column(rows: &[RawRecord], key: &str) -> Vec<f64> {
    rows.iter()
        .map(|row| {
            row.get(key)
                .and_then(|raw| parse_float_prefix(raw))
                .unwrap_or(0.0)
        })
        .collect()
}
