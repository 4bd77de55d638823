use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::dataset::Datasets;
use crate::predict::PredictionReport;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and describe the service's series.
    /// Binary-only; the library and its tests never install a recorder, so
    /// their `counter!`/`gauge!` calls are no-ops.
    pub fn init() -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("prometheus: install recorder");

        describe_gauge!("dataset_rows", "Rows loaded per dataset at startup.");
        describe_gauge!(
            "model_training_mse",
            "Mean squared error of the trained model over its own training set."
        );
        describe_counter!("api_requests_total", "API requests served, by endpoint.");

        Self { handle }
    }

    /// Record the one-time startup facts: dataset sizes and final model error.
    pub fn record_startup(&self, datasets: &Datasets, report: &PredictionReport) {
        let sizes = [
            ("sales", datasets.sales.len()),
            ("waste", datasets.waste.len()),
            ("recycling", datasets.recycling.len()),
            ("inventory", datasets.inventory.len()),
            ("products", datasets.products.len()),
        ];
        for (name, rows) in sizes {
            gauge!("dataset_rows", "dataset" => name).set(rows as f64);
        }
        gauge!("model_training_mse").set(report.mse);
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
