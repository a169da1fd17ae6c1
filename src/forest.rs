//! Random forest over the seven-column feature row.
//!
//! Training delegates to smartcore's [`RandomForestClassifier`]: bootstrap
//! resampling per tree, Gini splits over `max_features` randomly chosen
//! columns, all driven by one seeded generator. Fitting the same data with the
//! same [`ForestConfig`] therefore always yields the same forest. Prediction is
//! a plurality vote; ties go to the smallest label.

use crate::config::ForestConfig;
use crate::error::{Error, Result};
use crate::sample::Sample;
use linfa::prelude::*;
use ndarray::{Array1, Array2, Ix1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::SplitCriterion;
use tracing::{debug, info};

/// Anything that maps an encoded sample to a class label.
pub trait Classifier {
    fn predict(&self, sample: &Sample) -> Result<usize>;
}

/// Trained ensemble plus the rows it was fitted on.
pub struct RandomForest {
    model: RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>,
    training: Dataset<f64, usize, Ix1>,
    n_trees: usize,
    seed: u64,
}

fn to_dense(x: &Array2<f64>) -> DenseMatrix<f64> {
    let data: Vec<f64> = x.iter().copied().collect();
    DenseMatrix::new(x.nrows(), x.ncols(), data, false)
}

fn u16_param(name: &str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::Config(format!("{name} must be at most {}", u16::MAX)))
}

impl RandomForest {
    /// Fits `config.n_trees` trees on bootstrap resamples of `records`.
    pub fn fit(records: &Array2<f64>, targets: &Array1<usize>, config: &ForestConfig) -> Result<Self> {
        config.validate()?;

        let n_rows = records.nrows();
        if n_rows == 0 || n_rows != targets.len() {
            return Err(Error::Training(format!(
                "{} feature rows for {} labels",
                n_rows,
                targets.len()
            )));
        }
        let n_features = records.ncols();
        let max_features = config.max_features.unwrap_or(n_features);
        if max_features > n_features {
            return Err(Error::Config(format!(
                "max_features {max_features} exceeds the {n_features} available features"
            )));
        }

        info!(
            n_trees = config.n_trees,
            seed = config.seed,
            max_features,
            rows = n_rows,
            "fitting random forest"
        );

        let mut params = RandomForestClassifierParameters::default()
            .with_criterion(SplitCriterion::Gini)
            .with_n_trees(u16_param("n_trees", config.n_trees)?)
            .with_m(max_features)
            .with_seed(config.seed);
        if let Some(depth) = config.max_depth {
            params = params.with_max_depth(u16_param("max_depth", depth)?);
        }

        let y: Vec<i32> = targets.iter().map(|&l| l as i32).collect();
        let model = RandomForestClassifier::fit(&to_dense(records), &y, params)
            .map_err(|e| Error::Training(e.to_string()))?;

        debug!(trees = config.n_trees, "forest ready");

        Ok(RandomForest {
            model,
            training: Dataset::new(records.clone(), targets.clone()),
            n_trees: config.n_trees,
            seed: config.seed,
        })
    }

    /// Number of trees in the ensemble.
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Votes for every row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let labels = self
            .model
            .predict(&to_dense(x))
            .map_err(|e| Error::Prediction(e.to_string()))?;

        labels
            .into_iter()
            .map(|l| usize::try_from(l).map_err(|_| Error::Prediction(format!("negative label {l}"))))
            .collect()
    }

    /// Votes for a single feature row.
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        let x = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| Error::Prediction(e.to_string()))?;
        Ok(self.predict(&x)?[0])
    }

    /// Share of the training rows the forest labels correctly.
    pub fn training_accuracy(&self) -> Result<f64> {
        self.accuracy_on(self.training.records())
    }

    fn accuracy_on(&self, records: &Array2<f64>) -> Result<f64> {
        let cm = self
            .predict(records)?
            .confusion_matrix(&self.training)
            .map_err(|e| Error::Prediction(e.to_string()))?;
        Ok(f64::from(cm.accuracy()))
    }

    /// Permutation importance on the training rows, normalised to sum to 1.
    ///
    /// Each column is shuffled in turn and the drop in accuracy is recorded;
    /// shuffling uses the forest's seed, so repeated calls agree. All zeros
    /// when no shuffle changes the accuracy.
    pub fn feature_importance(&self) -> Result<Vec<f64>> {
        let baseline = self.training_accuracy()?;
        let records = self.training.records();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut importance = Vec::with_capacity(records.ncols());
        for column in 0..records.ncols() {
            let mut values = records.column(column).to_vec();
            values.shuffle(&mut rng);

            let mut permuted = records.clone();
            permuted
                .column_mut(column)
                .assign(&Array1::from_vec(values));
            importance.push((baseline - self.accuracy_on(&permuted)?).max(0.0));
        }

        let sum: f64 = importance.iter().sum();
        if sum > 0.0 {
            importance.iter_mut().for_each(|v| *v /= sum);
        }
        Ok(importance)
    }

    /// Rows the forest was fitted on.
    pub fn training_rows(&self) -> usize {
        self.training.records().nrows()
    }
}

impl Classifier for RandomForest {
    fn predict(&self, sample: &Sample) -> Result<usize> {
        self.predict_one(&sample.features())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use ndarray::array;

    fn fitted(config: &ForestConfig) -> (RandomForest, Array2<f64>, Array1<usize>) {
        let (x, y) = Corpus::embedded().unwrap().to_arrays();
        let forest = RandomForest::fit(&x, &y, config).unwrap();
        (forest, x, y)
    }

    /// Every combination of a coarse grid over the valid input ranges.
    fn grid() -> Array2<f64> {
        let mut rows = Vec::new();
        for age in [10.0, 30.0, 60.0, 100.0] {
            for hair in [1.0, 2.0, 3.0, 4.0] {
                for tool in [1.0, 2.0, 3.0] {
                    for temp in [100.0, 160.0, 200.0, 225.0, 250.0] {
                        for duration in [5.0, 20.0, 45.0, 90.0] {
                            for freq in [1.0, 2.0, 3.0] {
                                for months in [1.0, 10.0, 30.0, 60.0] {
                                    rows.extend([age, hair, tool, temp, duration, freq, months]);
                                }
                            }
                        }
                    }
                }
            }
        }
        let n = rows.len() / 7;
        Array2::from_shape_vec((n, 7), rows).unwrap()
    }

    #[test]
    fn reproduces_training_labels() {
        let (forest, x, y) = fitted(&ForestConfig::default());
        assert_eq!(forest.n_trees(), 100);
        assert_eq!(forest.training_rows(), 25);
        assert_eq!(forest.predict(&x).unwrap(), y);
        assert_eq!(forest.training_accuracy().unwrap(), 1.0);
    }

    #[test]
    fn same_seed_same_forest() {
        let config = ForestConfig::default();
        let grid = grid();
        let (first, _, _) = fitted(&config);
        let expected = first.predict(&grid).unwrap();
        let importance = first.feature_importance().unwrap();

        for _ in 0..3 {
            let (again, _, _) = fitted(&config);
            assert_eq!(again.predict(&grid).unwrap(), expected);
            assert_eq!(again.feature_importance().unwrap(), importance);
        }
    }

    #[test]
    fn per_split_feature_sampling_is_deterministic() {
        let config = ForestConfig {
            max_features: Some(2),
            ..ForestConfig::default()
        };
        let grid = grid();
        let (a, _, _) = fitted(&config);
        let (b, _, _) = fitted(&config);
        assert_eq!(a.predict(&grid).unwrap(), b.predict(&grid).unwrap());
        assert!(a.predict(&grid).unwrap().iter().all(|&l| l <= 5));
    }

    #[test]
    fn importance_is_normalised() {
        let (forest, _, _) = fitted(&ForestConfig::default());
        let importance = forest.feature_importance().unwrap();
        assert_eq!(importance.len(), 7);
        assert!((importance.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importance.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn rejects_mismatched_shapes_and_oversized_settings() {
        let x = Array2::<f64>::zeros((3, 7));
        let y = array![0usize, 1];
        assert!(matches!(
            RandomForest::fit(&x, &y, &ForestConfig::default()),
            Err(Error::Training(_))
        ));

        let (x, y) = Corpus::embedded().unwrap().to_arrays();
        let too_many_features = ForestConfig {
            max_features: Some(8),
            ..ForestConfig::default()
        };
        assert!(matches!(
            RandomForest::fit(&x, &y, &too_many_features),
            Err(Error::Config(_))
        ));
        let too_many_trees = ForestConfig {
            n_trees: 70_000,
            ..ForestConfig::default()
        };
        assert!(matches!(
            RandomForest::fit(&x, &y, &too_many_trees),
            Err(Error::Config(_))
        ));
    }
}
