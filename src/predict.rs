//! Prediction report: one forward pass per training example, paired with the
//! actual target, plus aggregate mean squared error. Computed once at startup
//! and reused for every request.

use serde::Serialize;

use crate::features::TrainingExample;
use crate::network::Network;

#[derive(Debug, Clone, Serialize)]
pub struct PredictionPair {
    pub actual: f64,
    pub predicted: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub predictions: Vec<PredictionPair>,
    pub mse: f64,
}

/// Run the trained network over every example, in original sales order.
pub fn evaluate(network: &Network, examples: &[TrainingExample]) -> PredictionReport {
    let predictions: Vec<PredictionPair> = examples
        .iter()
        .map(|example| PredictionPair {
            actual: example.target,
            predicted: network.run(&example.input),
        })
        .collect();
    let mse = mean_squared_error(&predictions);
    PredictionReport { predictions, mse }
}

/// `mean((predicted - actual)^2)`. An empty set reports 0.0 through the
/// explicit no-data branch, not a division by zero.
pub fn mean_squared_error(pairs: &[PredictionPair]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    pairs
        .iter()
        .map(|p| (p.predicted - p.actual).powi(2))
        .sum::<f64>()
        / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TrainingExample;

    fn pairs(values: &[(f64, f64)]) -> Vec<PredictionPair> {
        values
            .iter()
            .map(|&(actual, predicted)| PredictionPair { actual, predicted })
            .collect()
    }

    #[test]
    fn mse_matches_the_hand_computed_value() {
        // predictions [1,2,3] vs actuals [1,1,3] -> (0 + 1 + 0) / 3
        let p = pairs(&[(1.0, 1.0), (1.0, 2.0), (3.0, 3.0)]);
        let mse = mean_squared_error(&p);
        assert!((mse - 1.0 / 3.0).abs() < 1e-12, "got {mse}");
    }

    #[test]
    fn empty_set_reports_zero_error() {
        assert_eq!(mean_squared_error(&[]), 0.0);
    }

    #[test]
    fn report_length_and_order_match_the_examples() {
        let examples: Vec<TrainingExample> = (0..5)
            .map(|i| TrainingExample {
                input: [i as f64, 0.0, 0.0, 0.0],
                target: i as f64,
            })
            .collect();
        let net = Network::new(10, Some(11));
        let report = evaluate(&net, &examples);

        assert_eq!(report.predictions.len(), examples.len());
        for (pair, example) in report.predictions.iter().zip(&examples) {
            assert_eq!(pair.actual, example.target);
        }
    }

    #[test]
    fn evaluation_is_read_only_and_repeatable() {
        let examples = vec![TrainingExample {
            input: [0.1, 0.2, 0.3, 0.4],
            target: 0.3,
        }];
        let net = Network::new(10, Some(5));
        let first = evaluate(&net, &examples);
        let second = evaluate(&net, &examples);
        assert_eq!(first.predictions[0].predicted, second.predictions[0].predicted);
        assert_eq!(first.mse, second.mse);
    }
}
