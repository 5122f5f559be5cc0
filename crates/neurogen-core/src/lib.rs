#![deny(warnings)]

//! Core domain models and invariants for the NEUROGEN-X simulation.
//!
//! This crate defines the serializable types shared by the efficacy and
//! STEAM contribution models, with validation helpers to guarantee basic
//! invariants. Model logic lives in the sibling crates; everything here is
//! plain data plus checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Lower bound of the declared nanorobot dose range, in millions.
pub const DOSE_MIN: u32 = 10;
/// Upper bound of the declared nanorobot dose range, in millions.
pub const DOSE_MAX: u32 = 300;

/// Lower bound of a single STEAM contribution weight.
pub const WEIGHT_MIN: u32 = 1;
/// Upper bound of a single STEAM contribution weight.
pub const WEIGHT_MAX: u32 = 10;

/// AI optimization level applied during treatment simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AiLevel {
    /// No AI bonus.
    Low,
    /// Mid-tier optimization.
    Medium,
    /// Full real-time regulation.
    High,
}

impl AiLevel {
    /// All levels, weakest first.
    pub const ALL: [AiLevel; 3] = [AiLevel::Low, AiLevel::Medium, AiLevel::High];

    /// Canonical name as shown in the dashboard selector.
    pub fn name(&self) -> &'static str {
        match self {
            AiLevel::Low => "Low",
            AiLevel::Medium => "Medium",
            AiLevel::High => "High",
        }
    }
}

impl fmt::Display for AiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AiLevel {
    type Err = ValidationError;

    /// Accepts exactly the three canonical names. Anything else is rejected
    /// rather than silently mapped to `Low`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(AiLevel::Low),
            "Medium" => Ok(AiLevel::Medium),
            "High" => Ok(AiLevel::High),
            other => Err(ValidationError::InvalidAiLevel(other.to_string())),
        }
    }
}

/// Raw slider values supplied by the presentation layer for one simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Nanorobot dose in millions. Declared range [`DOSE_MIN`]..=[`DOSE_MAX`];
    /// out-of-range values are clamped by the model, never rejected.
    pub dose: u32,
    /// AI optimization level.
    pub ai_level: AiLevel,
    /// Whether the neuron regeneration module is active.
    pub neuro_regen_active: bool,
}

/// One row of the treatment comparison table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    /// Treatment name as rendered by the dashboard.
    pub name: String,
    /// Simulated efficacy in [0, 100].
    pub efficacy_percent: f64,
    /// Cost per patient in USD (> 0).
    pub cost_usd: Decimal,
}

/// Ordered treatment comparison: comparator rows first, the derived row last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Rows in display order.
    pub rows: Vec<TreatmentRecord>,
}

impl ComparisonTable {
    /// The dynamically computed row, if the table is non-empty.
    pub fn derived(&self) -> Option<&TreatmentRecord> {
        self.rows.last()
    }

    /// The fixed comparator rows (everything but the derived row).
    pub fn comparators(&self) -> &[TreatmentRecord] {
        match self.rows.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// STEAM categories in the fixed order the dashboard declares them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SteamCategory {
    Biology,
    Ai,
    Engineering,
    Art,
    Mathematics,
}

impl SteamCategory {
    /// All categories in declaration order. This order breaks dominance ties.
    pub const ALL: [SteamCategory; 5] = [
        SteamCategory::Biology,
        SteamCategory::Ai,
        SteamCategory::Engineering,
        SteamCategory::Art,
        SteamCategory::Mathematics,
    ];

    /// Display label used by the dashboard charts.
    pub fn label(&self) -> &'static str {
        match self {
            SteamCategory::Biology => "Science (Biology)",
            SteamCategory::Ai => "Technology (AI)",
            SteamCategory::Engineering => "Engineering (Nanotech)",
            SteamCategory::Art => "Art (3D Visualization)",
            SteamCategory::Mathematics => "Mathematics (Simulation)",
        }
    }
}

impl fmt::Display for SteamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SteamCategory::Biology => "Biology",
            SteamCategory::Ai => "AI",
            SteamCategory::Engineering => "Engineering",
            SteamCategory::Art => "Art",
            SteamCategory::Mathematics => "Mathematics",
        };
        f.write_str(name)
    }
}

/// The five contribution weights, one per STEAM category.
///
/// Declared per-weight range is [`WEIGHT_MIN`]..=[`WEIGHT_MAX`]. The struct
/// itself does not enforce it; use [`ContributionWeights::clamped`] when the
/// values come from an unchecked source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWeights {
    pub biology: u32,
    pub ai: u32,
    pub engineering: u32,
    pub art: u32,
    pub mathematics: u32,
}

impl ContributionWeights {
    /// Build a weight vector, clamping each component into the declared range.
    pub fn clamped(biology: u32, ai: u32, engineering: u32, art: u32, mathematics: u32) -> Self {
        Self {
            biology: clamp_with_warn(biology, WEIGHT_MIN, WEIGHT_MAX, "biology"),
            ai: clamp_with_warn(ai, WEIGHT_MIN, WEIGHT_MAX, "ai"),
            engineering: clamp_with_warn(engineering, WEIGHT_MIN, WEIGHT_MAX, "engineering"),
            art: clamp_with_warn(art, WEIGHT_MIN, WEIGHT_MAX, "art"),
            mathematics: clamp_with_warn(mathematics, WEIGHT_MIN, WEIGHT_MAX, "mathematics"),
        }
    }

    /// Weight for a single category.
    pub fn weight(&self, category: SteamCategory) -> u32 {
        match category {
            SteamCategory::Biology => self.biology,
            SteamCategory::Ai => self.ai,
            SteamCategory::Engineering => self.engineering,
            SteamCategory::Art => self.art,
            SteamCategory::Mathematics => self.mathematics,
        }
    }

    /// Sum of all five weights.
    pub fn total(&self) -> u64 {
        u64::from(self.biology)
            + u64::from(self.ai)
            + u64::from(self.engineering)
            + u64::from(self.art)
            + u64::from(self.mathematics)
    }
}

/// Normalized contribution of one category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Category this row describes.
    pub category: SteamCategory,
    /// Input weight, echoed back untouched.
    pub weight: u32,
    /// Share of the total in percent, rounded to one decimal place.
    pub percent: f64,
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// AI level string outside the three recognized values.
    #[error("unrecognized AI optimization level: {0:?}")]
    InvalidAiLevel(String),
    /// Efficacy must be finite and within [0, 100].
    #[error("efficacy must be within [0, 100]")]
    InvalidEfficacy,
    /// Cost per patient must be strictly positive.
    #[error("treatment cost must be positive")]
    NonPositiveCost,
    /// Treatment name must not be empty.
    #[error("treatment name must not be empty")]
    EmptyName,
}

/// Clamp `value` into `[min, max]`, logging when the input was out of range.
///
/// This is the recovery path for out-of-range numeric input: the nearest
/// bound is used and the event is visible in the logs, but the caller never
/// sees an error.
pub fn clamp_with_warn(value: u32, min: u32, max: u32, field: &'static str) -> u32 {
    if value < min || value > max {
        warn!(field, value, min, max, "input outside declared range, clamping");
        value.clamp(min, max)
    } else {
        value
    }
}

/// Validate a single treatment record.
pub fn validate_treatment_record(record: &TreatmentRecord) -> Result<(), ValidationError> {
    if record.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !record.efficacy_percent.is_finite()
        || !(0.0..=100.0).contains(&record.efficacy_percent)
    {
        return Err(ValidationError::InvalidEfficacy);
    }
    if record.cost_usd <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveCost);
    }
    Ok(())
}

/// Validate every row of a comparison table.
pub fn validate_comparison_table(table: &ComparisonTable) -> Result<(), ValidationError> {
    for row in &table.rows {
        validate_treatment_record(row)?;
    }
    Ok(())
}
