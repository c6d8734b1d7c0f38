//! Randomized payload generation for benchmark writes
//!
//! The sequencer only cares about "a string payload and its byte length";
//! how the payload is produced is behind the [`ValueGenerator`] trait. Size
//! class 0 produces a small random integer, the larger classes produce a
//! structured measurement report whose size scales with the class.

use crate::error::{AppError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Discrete payload size classes offered by the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    /// Small random integer payload
    Zero,
    /// Structured report, smallest size
    One,
    /// Structured report, medium size
    Five,
    /// Structured report, largest size
    Ten,
}

impl SizeClass {
    /// Numeric value of the size class as exposed on the CLI.
    pub fn as_u32(&self) -> u32 {
        match self {
            SizeClass::Zero => 0,
            SizeClass::One => 1,
            SizeClass::Five => 5,
            SizeClass::Ten => 10,
        }
    }

    /// All admissible size classes, in ascending order.
    pub fn all() -> [SizeClass; 4] {
        [SizeClass::Zero, SizeClass::One, SizeClass::Five, SizeClass::Ten]
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

impl FromStr for SizeClass {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(SizeClass::Zero),
            "1" => Ok(SizeClass::One),
            "5" => Ok(SizeClass::Five),
            "10" => Ok(SizeClass::Ten),
            other => Err(AppError::parse(format!(
                "Invalid size class '{}': expected one of 0, 1, 5, 10",
                other
            ))),
        }
    }
}

/// A generated payload together with its UTF-8 byte length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedValue {
    /// Serialized payload written to the map
    pub payload: String,
    /// UTF-8 encoded length of `payload`, recorded as a payload sample
    pub byte_len: usize,
}

impl GeneratedValue {
    fn new(payload: String) -> Self {
        let byte_len = payload.len();
        Self { payload, byte_len }
    }
}

/// Produces string payloads for the sequencer to write.
pub trait ValueGenerator: Send {
    /// Generate the next payload.
    fn generate(&mut self) -> GeneratedValue;

    /// Size class this generator was configured with.
    fn size_class(&self) -> SizeClass;
}

/// Default generator implementing the size-class policy.
///
/// Class 0 rolls an integer in [1, 1024]; the other classes build a
/// measurement report with `class * SECTIONS_PER_CLASS` sections and
/// serialize it to JSON.
pub struct PayloadGenerator {
    size_class: SizeClass,
}

/// Sections per unit of size class in structured reports.
const SECTIONS_PER_CLASS: u32 = 25;

impl PayloadGenerator {
    pub fn new(size_class: SizeClass) -> Self {
        Self { size_class }
    }

    fn roll_dice(&self) -> GeneratedValue {
        let value: u32 = rand::thread_rng().gen_range(1..=1024);
        GeneratedValue::new(value.to_string())
    }

    fn build_report(&self) -> GeneratedValue {
        let section_count = self.size_class.as_u32() * SECTIONS_PER_CLASS;
        let mut rng = rand::thread_rng();

        let sections: Vec<ReportSection> = (0..section_count)
            .map(|index| ReportSection {
                name: format!("characteristic-{}", index),
                nominal: rng.gen_range(0.0..100.0),
                measured: rng.gen_range(0.0..100.0),
                tolerance: rng.gen_range(0.01..1.0),
                in_spec: rng.gen_bool(0.9),
            })
            .collect();

        let report = MeasurementReport {
            report_id: Uuid::new_v4(),
            part_number: format!("part-{}", rng.gen_range(1000..10_000)),
            size_class: self.size_class.as_u32(),
            sections,
        };

        // Serialization of a plain data struct cannot fail
        let payload = serde_json::to_string(&report).unwrap_or_default();
        GeneratedValue::new(payload)
    }
}

impl ValueGenerator for PayloadGenerator {
    fn generate(&mut self) -> GeneratedValue {
        match self.size_class {
            SizeClass::Zero => self.roll_dice(),
            _ => self.build_report(),
        }
    }

    fn size_class(&self) -> SizeClass {
        self.size_class
    }
}

/// Synthetic part-measurement report used as the structured payload body.
#[derive(Debug, Serialize, Deserialize)]
struct MeasurementReport {
    report_id: Uuid,
    part_number: String,
    size_class: u32,
    sections: Vec<ReportSection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReportSection {
    name: String,
    nominal: f64,
    measured: f64,
    tolerance: f64,
    in_spec: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_size_class_parsing() {
        assert_eq!("0".parse::<SizeClass>().unwrap(), SizeClass::Zero);
        assert_eq!("1".parse::<SizeClass>().unwrap(), SizeClass::One);
        assert_eq!("5".parse::<SizeClass>().unwrap(), SizeClass::Five);
        assert_eq!("10".parse::<SizeClass>().unwrap(), SizeClass::Ten);
        assert!("2".parse::<SizeClass>().is_err());
        assert!("".parse::<SizeClass>().is_err());
        assert!("abc".parse::<SizeClass>().is_err());
    }

    #[test]
    fn test_all_classes_round_trip_through_display() {
        for class in SizeClass::all() {
            assert_eq!(class.to_string().parse::<SizeClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_dice_payload_range_and_length() {
        let mut generator = PayloadGenerator::new(SizeClass::Zero);
        for _ in 0..200 {
            let value = generator.generate();
            let parsed: u32 = value.payload.parse().expect("integer payload");
            assert!((1..=1024).contains(&parsed));
            assert_eq!(value.byte_len, value.payload.len());
        }
    }

    #[test]
    fn test_report_payload_is_json() {
        let mut generator = PayloadGenerator::new(SizeClass::One);
        let value = generator.generate();
        let parsed: serde_json::Value = serde_json::from_str(&value.payload).unwrap();
        assert_eq!(parsed["size_class"], 1);
        assert_eq!(parsed["sections"].as_array().unwrap().len(), 25);
        assert_eq!(value.byte_len, value.payload.len());
    }

    #[test]
    fn test_payload_grows_with_size_class() {
        let small = PayloadGenerator::new(SizeClass::One).generate();
        let medium = PayloadGenerator::new(SizeClass::Five).generate();
        let large = PayloadGenerator::new(SizeClass::Ten).generate();
        assert!(small.byte_len < medium.byte_len);
        assert!(medium.byte_len < large.byte_len);
    }

    proptest! {
        #[test]
        fn prop_dice_always_in_range(_seed in 0u32..50) {
            let mut generator = PayloadGenerator::new(SizeClass::Zero);
            let value = generator.generate();
            let parsed: u32 = value.payload.parse().unwrap();
            prop_assert!((1..=1024).contains(&parsed));
        }
    }
}
