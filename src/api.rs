use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use metrics::counter;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::engine::Engine;
use crate::freshness::{self, FreshnessBuckets};
use crate::predict::PredictionReport;
use crate::viz::{self, Visualizations};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "ok" }))
        .route("/api/products", get(products))
        .route("/api/waste-predictions", get(waste_predictions))
        .route("/api/visualizations", get(visualizations))
        .route("/api/data", get(sample_data))
        .route("/data", get(sales_data))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Serve the dashboard build for any unmatched path, with `index.html` as the
/// client-side-routing fallback.
pub fn with_static_fallback(router: Router, dir: &Path) -> Router {
    let index = ServeFile::new(dir.join("index.html"));
    router.fallback_service(ServeDir::new(dir).not_found_service(index))
}

async fn root() -> &'static str {
    "Server is up and running!"
}

/// Freshness tiers are recomputed from the immutable catalog on every call;
/// nothing is cached.
async fn products(State(state): State<AppState>) -> Json<FreshnessBuckets> {
    counter!("api_requests_total", "endpoint" => "products").increment(1);
    Json(freshness::classify_catalog(&state.engine.datasets.products))
}

/// Predictions and MSE were computed once at startup; every call serves the
/// same report.
async fn waste_predictions(State(state): State<AppState>) -> Json<PredictionReport> {
    counter!("api_requests_total", "endpoint" => "waste-predictions").increment(1);
    Json(state.engine.report.clone())
}

async fn visualizations(State(state): State<AppState>) -> Json<Visualizations> {
    counter!("api_requests_total", "endpoint" => "visualizations").increment(1);
    Json(viz::build_visualizations(&state.engine.datasets))
}

// Static demo payloads, kept because they are part of the consumed surface.

static SAMPLE_PRODUCTS: Lazy<Value> = Lazy::new(|| {
    json!([
        { "price": 10.5, "weight": 500, "manufacturing_date": "2024-01-01", "expiry_date": "2024-04-01" },
        { "price": 20.0, "weight": 1000, "manufacturing_date": "2024-02-10", "expiry_date": "2024-05-15" },
        { "price": 15.5, "weight": 750, "manufacturing_date": "2024-03-05", "expiry_date": "2024-06-10" }
    ])
});

static SAMPLE_SALES: Lazy<Value> = Lazy::new(|| {
    json!([
        { "product": "Product A", "sold": 100, "waste": 10 },
        { "product": "Product B", "sold": 200, "waste": 30 }
    ])
});

async fn sample_data() -> Json<Value> {
    counter!("api_requests_total", "endpoint" => "data").increment(1);
    Json(SAMPLE_PRODUCTS.clone())
}

async fn sales_data() -> Json<Value> {
    counter!("api_requests_total", "endpoint" => "sales-data").increment(1);
    Json(SAMPLE_SALES.clone())
}
