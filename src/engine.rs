//! # Startup Engine
//! Runs the whole derivation chain once (join → normalize → features →
//! train → evaluate) and owns the resulting artifacts for the process
//! lifetime. Constructed exactly once in `main` and handed to the API by
//! reference; there is no global model.

use tracing::info;

use crate::dataset::Datasets;
use crate::features::{self, TrainingExample};
use crate::join;
use crate::network::{Network, TrainOptions};
use crate::normalize;
use crate::predict::{self, PredictionReport};

pub struct Engine {
    pub datasets: Datasets,
    pub examples: Vec<TrainingExample>,
    pub network: Network,
    pub report: PredictionReport,
}

impl Engine {
    /// Blocking by design: no request is served against a half-built model.
    /// Interrupting this means restarting from scratch; there is no
    /// checkpoint to resume from.
    pub fn bootstrap(datasets: Datasets, options: &TrainOptions) -> Self {
        let joined = join::join_datasets(&datasets);
        let normalized = normalize::normalize_all(&joined);
        let examples = features::build_examples(&normalized);
        info!(examples = examples.len(), "training set assembled");

        let mut network = Network::new(options.hidden_units, options.seed);
        info!(
            iterations = options.iterations,
            learning_rate = options.learning_rate,
            hidden_units = options.hidden_units,
            "training started"
        );
        network.train(&examples, options);

        let report = predict::evaluate(&network, &examples);
        info!(mse = report.mse, "model trained and evaluated");

        Self {
            datasets,
            examples,
            network,
            report,
        }
    }
}
