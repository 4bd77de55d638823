// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod features;
pub mod freshness;
pub mod join;
pub mod metrics;
pub mod network;
pub mod normalize;
pub mod predict;
pub mod viz;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::dataset::{Datasets, RawRecord};
pub use crate::engine::Engine;
pub use crate::network::TrainOptions;
