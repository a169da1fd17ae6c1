//! The labelled training rows the classifier is fitted on.

use crate::error::{Error, Result};
use crate::sample::{Category, HairType, Sample, ToolType, UsageFrequency};
use ndarray::{Array1, Array2};
use serde::Deserialize;

/// Highest damage score a row may carry.
pub const MAX_DAMAGE_SCORE: u8 = 5;

static TRAINING_CSV: &str = include_str!("../data/training.csv");

/// A single CSV row, categorical fields already in their integer codes.
#[derive(Debug, Deserialize, Clone)]
struct TrainingRecord {
    age: u32,
    hair_type: u8,
    tool_type: u8,
    temperature_range: f64,
    duration_min: u32,
    usage_freq: u8,
    total_usage_months: u32,
    damage_score: u8,
}

impl TrainingRecord {
    fn into_labelled(self) -> std::result::Result<(Sample, u8), String> {
        let sample = Sample {
            age: self.age,
            hair_type: HairType::from_code(self.hair_type).map_err(|e| e.to_string())?,
            tool_type: ToolType::from_code(self.tool_type).map_err(|e| e.to_string())?,
            temperature: self.temperature_range,
            duration_min: self.duration_min,
            usage_freq: UsageFrequency::from_code(self.usage_freq).map_err(|e| e.to_string())?,
            total_usage_months: self.total_usage_months,
        };
        sample.validate().map_err(|e| e.to_string())?;
        if self.damage_score > MAX_DAMAGE_SCORE {
            return Err(format!("damage score {} out of range", self.damage_score));
        }
        Ok((sample, self.damage_score))
    }
}

/// Immutable, ordered set of labelled samples.
#[derive(Debug, Clone)]
pub struct Corpus {
    samples: Vec<Sample>,
    labels: Vec<u8>,
}

impl Corpus {
    /// Parses the dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_csv_str(TRAINING_CSV)
    }

    /// Parses labelled rows from CSV text with the `data/training.csv` header.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(text.as_bytes());

        let mut samples = vec![];
        let mut labels = vec![];

        for (i, result) in rdr.deserialize().enumerate() {
            let row = i + 1;
            let record: TrainingRecord = result.map_err(|e| Error::Corpus {
                row,
                reason: e.to_string(),
            })?;
            let (sample, label) = record
                .into_labelled()
                .map_err(|reason| Error::Corpus { row, reason })?;
            samples.push(sample);
            labels.push(label);
        }

        if samples.is_empty() {
            return Err(Error::Corpus {
                row: 0,
                reason: "no rows".to_string(),
            });
        }

        Ok(Corpus { samples, labels })
    }

    /// Samples in file order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Damage scores, aligned with [`Corpus::samples`].
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Number of labelled rows.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a parsed corpus.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over `(sample, damage_score)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sample, u8)> {
        self.samples.iter().zip(self.labels.iter().copied())
    }

    /// Feature matrix and label vector ready for fitting.
    pub fn to_arrays(&self) -> (Array2<f64>, Array1<usize>) {
        let rows: Vec<f64> = self.samples.iter().flat_map(|s| s.features()).collect();
        let x = Array2::from_shape_vec((self.samples.len(), 7), rows)
            .expect("feature rows always have seven columns");
        let y = self.labels.iter().map(|&l| usize::from(l)).collect();
        (x, y)
    }
}
