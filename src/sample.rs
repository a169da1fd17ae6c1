//! Input records and the categorical encoders behind them.
//!
//! The presentation layer hands over a [`SampleInput`] carrying display labels
//! ("Straight", "Hair Dryer", "Daily", ...). [`SampleInput::encode`] turns it
//! into a typed, range-checked [`Sample`] whose [`Sample::features`] row is
//! what the classifier sees.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Inclusive ranges accepted for the numeric fields.
pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 100.0..=250.0;
pub const DURATION_RANGE: RangeInclusive<u32> = 5..=90;
pub const MONTHS_RANGE: RangeInclusive<u32> = 1..=60;

/// Column names of the feature row, in [`Sample::features`] order.
pub const FEATURE_NAMES: [&str; 7] = [
    "age",
    "hair_type",
    "tool_type",
    "temperature_range",
    "duration_min",
    "usage_freq",
    "total_usage_months",
];

/// A closed enumeration encoded as consecutive integers starting at 1.
pub trait Category: Copy + Sized + 'static {
    /// Field name used in error messages.
    const FIELD: &'static str;
    /// Every variant, in form order.
    const ALL: &'static [Self];

    /// Integer code fed to the classifier.
    fn code(self) -> u8;
    /// Display string used by the form.
    fn label(self) -> &'static str;

    /// Variant for an integer code.
    fn from_code(code: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or(ValidationError::UnknownCode {
                field: Self::FIELD,
                code,
            })
    }

    /// Variant for a display label, ignoring case and surrounding whitespace.
    fn from_label(label: &str) -> Result<Self, ValidationError> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownCategory {
                field: Self::FIELD,
                value: label.to_string(),
            })
    }
}

/// Hair texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HairType {
    Straight = 1,
    Wavy = 2,
    Curly = 3,
    Coily = 4,
}

impl Category for HairType {
    const FIELD: &'static str = "hair type";
    const ALL: &'static [Self] = &[Self::Straight, Self::Wavy, Self::Curly, Self::Coily];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::Straight => "Straight",
            Self::Wavy => "Wavy",
            Self::Curly => "Curly",
            Self::Coily => "Coily",
        }
    }
}

/// Heat styling tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToolType {
    HairDryer = 1,
    Curler = 2,
    Straightener = 3,
}

impl Category for ToolType {
    const FIELD: &'static str = "tool type";
    const ALL: &'static [Self] = &[Self::HairDryer, Self::Curler, Self::Straightener];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::HairDryer => "Hair Dryer",
            Self::Curler => "Curler",
            Self::Straightener => "Straightener",
        }
    }
}

/// How often heat is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UsageFrequency {
    Monthly = 1,
    Weekly = 2,
    Daily = 3,
}

impl Category for UsageFrequency {
    const FIELD: &'static str = "usage frequency";
    const ALL: &'static [Self] = &[Self::Monthly, Self::Weekly, Self::Daily];

    fn code(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
        }
    }
}

macro_rules! category_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<u8> for $ty {
            type Error = ValidationError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                <$ty as Category>::from_code(code)
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Category>::from_label(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    )*};
}

category_conversions!(HairType, ToolType, UsageFrequency);

/// Raw record as supplied by a presentation adapter or a batch CSV row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleInput {
    pub age: u32,
    pub hair_type: String,
    pub tool_type: String,
    #[serde(alias = "temperature_range")]
    pub temperature: f64,
    pub duration_min: u32,
    pub usage_freq: String,
    pub total_usage_months: u32,
}

impl SampleInput {
    /// Encodes the categorical labels and checks every numeric range.
    pub fn encode(&self) -> Result<Sample, ValidationError> {
        let sample = Sample {
            age: self.age,
            hair_type: self.hair_type.parse()?,
            tool_type: self.tool_type.parse()?,
            temperature: self.temperature,
            duration_min: self.duration_min,
            usage_freq: self.usage_freq.parse()?,
            total_usage_months: self.total_usage_months,
        };
        sample.validate()?;
        Ok(sample)
    }
}

impl From<&Sample> for SampleInput {
    fn from(s: &Sample) -> Self {
        SampleInput {
            age: s.age,
            hair_type: s.hair_type.label().to_string(),
            tool_type: s.tool_type.label().to_string(),
            temperature: s.temperature,
            duration_min: s.duration_min,
            usage_freq: s.usage_freq.label().to_string(),
            total_usage_months: s.total_usage_months,
        }
    }
}

/// One encoded observation of styling habits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub age: u32,
    pub hair_type: HairType,
    pub tool_type: ToolType,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Minutes per session.
    pub duration_min: u32,
    pub usage_freq: UsageFrequency,
    pub total_usage_months: u32,
}

impl Default for Sample {
    /// The initial values of the input form.
    fn default() -> Self {
        Sample {
            age: 25,
            hair_type: HairType::Straight,
            tool_type: ToolType::HairDryer,
            temperature: 180.0,
            duration_min: 30,
            usage_freq: UsageFrequency::Monthly,
            total_usage_months: 12,
        }
    }
}

fn check<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> Result<(), ValidationError>
where
    T: PartialOrd + Copy + Into<f64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}

impl Sample {
    /// Rejects any numeric field outside its declared range. NaN never passes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check("age", self.age, &AGE_RANGE)?;
        check("temperature", self.temperature, &TEMPERATURE_RANGE)?;
        check("duration", self.duration_min, &DURATION_RANGE)?;
        check("total usage months", self.total_usage_months, &MONTHS_RANGE)?;
        Ok(())
    }

    /// Feature row in [`FEATURE_NAMES`] order.
    pub fn features(&self) -> [f64; 7] {
        [
            f64::from(self.age),
            f64::from(self.hair_type.code()),
            f64::from(self.tool_type.code()),
            self.temperature,
            f64::from(self.duration_min),
            f64::from(self.usage_freq.code()),
            f64::from(self.total_usage_months),
        ]
    }
}
