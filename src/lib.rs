//! # heat_hurt 🔥💇
//!
//! Predict hair damage risk from heat-styling habits using a small random forest.
//!
//! Seven attributes (age, hair type, heat tool, temperature, session length,
//! usage frequency and months of use) are encoded into a feature row and fed
//! to a [`smartcore`](https://crates.io/crates/smartcore) random forest fitted
//! once on an embedded 25-row dataset. The predicted
//! damage score (0–5) selects a risk message, a severity colour and a set of
//! hair care tips.
//!
//! ## Features
//! - Typed, range-checked input records with closed categorical encoders
//! - Seeded bootstrap resampling and split sampling, so every run trains the same forest
//! - Plurality vote with deterministic tie-breaking
//! - Permutation feature importances scored with linfa's confusion matrix
//! - Swappable presentation adapters (interactive terminal, batch CSV)
//! - Benchmarkable with [Criterion](https://crates.io/crates/criterion)
//!
//! ## Example
//! ```rust
//! use heat_hurt::{ForestConfig, HeatHurt, SampleInput};
//! let model = HeatHurt::train(&ForestConfig::default()).unwrap();
//! let assessment = model
//!     .assess(&SampleInput {
//!         age: 24,
//!         hair_type: "Straight".into(),
//!         tool_type: "Straightener".into(),
//!         temperature: 230.0,
//!         duration_min: 45,
//!         usage_freq: "Daily".into(),
//!         total_usage_months: 18,
//!     })
//!     .unwrap();
//! println!("{assessment}");
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod forest;
pub mod pipeline;
pub mod policy;
pub mod sample;
pub mod ui;

pub use config::ForestConfig;
pub use corpus::Corpus;
pub use error::{Error, Result, ValidationError};
pub use forest::{Classifier, RandomForest};
pub use pipeline::{Assessment, assess_sample, predict_risk};
pub use policy::{AdvisoryTier, RISK_TABLE, RiskEntry};
pub use sample::{Category, HairType, Sample, SampleInput, ToolType, UsageFrequency};

use sample::FEATURE_NAMES;
use tracing::info;

/// Trained damage classifier together with the data it was fitted on.
///
/// Never mutated after [`HeatHurt::train`]; share it by reference (or `Arc`)
/// across threads.
pub struct HeatHurt {
    forest: RandomForest,
    corpus: Corpus,
}

impl HeatHurt {
    /// Fits the forest on the embedded training corpus.
    pub fn train(config: &ForestConfig) -> Result<Self> {
        let corpus = Corpus::embedded()?;
        Self::train_on(corpus, config)
    }

    /// Fits the forest on an arbitrary labelled corpus.
    pub fn train_on(corpus: Corpus, config: &ForestConfig) -> Result<Self> {
        let (x, y) = corpus.to_arrays();
        let forest = RandomForest::fit(&x, &y, config)?;
        info!(rows = corpus.len(), trees = forest.n_trees(), "model trained");
        Ok(HeatHurt { forest, corpus })
    }

    /// Full pipeline on raw form input.
    pub fn assess(&self, input: &SampleInput) -> Result<Assessment> {
        predict_risk(self, input)
    }

    /// The labelled rows the forest was fitted on.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The underlying ensemble.
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Fraction of training rows whose label the forest reproduces.
    pub fn training_accuracy(&self) -> Result<f64> {
        self.forest.training_accuracy()
    }

    /// The `n` features with the highest importance, most important first.
    pub fn top_features(&self, n: usize) -> Result<Vec<(&'static str, f64)>> {
        let mut features: Vec<_> = FEATURE_NAMES
            .iter()
            .copied()
            .zip(self.forest.feature_importance()?)
            .collect();
        features.sort_by(|a, b| b.1.total_cmp(&a.1));
        features.truncate(n);
        Ok(features)
    }
}

impl Classifier for HeatHurt {
    fn predict(&self, sample: &Sample) -> Result<usize> {
        self.forest.predict_one(&sample.features())
    }
}
