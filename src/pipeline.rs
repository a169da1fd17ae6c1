//! Encode, validate, classify and look up: the full assessment of one sample.

use crate::error::{Error, Result};
use crate::forest::Classifier;
use crate::policy::{self, AdvisoryTier};
use crate::sample::{Sample, SampleInput};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error};

/// Everything the presentation layer needs to show a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// Damage score, 0 to 5.
    pub score: u8,
    pub message: &'static str,
    pub severity_color: &'static str,
    pub tier: AdvisoryTier,
    pub headline: &'static str,
    pub advisory: &'static [&'static str],
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Damage Score: {}/5 - {}", self.score, self.message)
    }
}

/// Runs the pipeline on raw form input.
pub fn predict_risk<C: Classifier + ?Sized>(classifier: &C, input: &SampleInput) -> Result<Assessment> {
    let sample = input.encode()?;
    assess_sample(classifier, &sample)
}

/// Runs the pipeline on an already encoded sample, re-checking its ranges.
pub fn assess_sample<C: Classifier + ?Sized>(classifier: &C, sample: &Sample) -> Result<Assessment> {
    sample.validate()?;

    let label = classifier.predict(sample)?;
    let (score, entry) = policy::lookup(label).inspect_err(|e| {
        if let Error::ClassifierOutOfDomain { label } = e {
            error!(label = *label, ?sample, "classifier produced a label outside the risk table");
        }
    })?;
    let tier = AdvisoryTier::for_score(score);

    debug!(score, %tier, "assessed sample");

    Ok(Assessment {
        score,
        message: entry.message,
        severity_color: entry.color,
        tier,
        headline: tier.headline(),
        advisory: tier.tips(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RISK_TABLE;

    struct Fixed(usize);

    impl Classifier for Fixed {
        fn predict(&self, _: &Sample) -> Result<usize> {
            Ok(self.0)
        }
    }

    fn input() -> SampleInput {
        SampleInput::from(&Sample::default())
    }

    #[test]
    fn result_matches_table_entry() {
        for label in 0..6 {
            let a = predict_risk(&Fixed(label), &input()).unwrap();
            assert_eq!(usize::from(a.score), label);
            assert_eq!(a.message, RISK_TABLE[label].message);
            assert_eq!(a.severity_color, RISK_TABLE[label].color);
            assert_eq!(a.tier, AdvisoryTier::for_score(a.score));
            assert_eq!(a.advisory, a.tier.tips());
        }
    }

    #[test]
    fn out_of_domain_is_an_error() {
        assert!(matches!(
            predict_risk(&Fixed(9), &input()),
            Err(Error::ClassifierOutOfDomain { label: 9 })
        ));
    }

    #[test]
    fn validation_happens_before_classification() {
        let bad = SampleInput {
            tool_type: "Blowtorch".to_string(),
            ..input()
        };
        // Fixed(9) would fail with a different error if it were reached.
        assert!(predict_risk(&Fixed(9), &bad).unwrap_err().is_validation());

        let mut sample = Sample::default();
        sample.temperature = 300.0;
        assert!(assess_sample(&Fixed(0), &sample).unwrap_err().is_validation());
    }

    #[test]
    fn display_shows_score_out_of_five() {
        let a = predict_risk(&Fixed(3), &input()).unwrap();
        assert_eq!(
            a.to_string(),
            "Damage Score: 3/5 - Moderate risk, reduce heat styling frequency!"
        );
    }
}
