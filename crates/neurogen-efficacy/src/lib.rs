#![deny(warnings)]

//! Efficacy and cost model for the simulated NEUROGEN-X treatment.
//!
//! This crate provides the dose-response computation behind the dashboard's
//! comparison chart: one row computed from the simulation input, merged with
//! three fixed comparator treatments. All functions are pure and
//! deterministic; every coefficient of the response curve lives in
//! [`EfficacyParams`] rather than in hidden defaults.

use neurogen_core::{
    clamp_with_warn, AiLevel, ComparisonTable, SimulationInput, TreatmentRecord, DOSE_MAX,
    DOSE_MIN,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors produced when constructing a model from invalid parameters.
///
/// A constructed model never fails: dose is clamped, the AI level enum and
/// the regeneration flag are total.
#[derive(Debug, Error, PartialEq)]
pub enum EfficacyError {
    /// Coefficients must be finite.
    #[error("non-finite model coefficient")]
    NonFinite,
    /// Additive bonuses and the base response must be non-negative.
    #[error("negative model coefficient")]
    NegativeCoefficient,
    /// The dose divisor scales the linear response and must be > 0.
    #[error("dose divisor must be > 0")]
    NonPositiveDivisor,
    /// The efficacy cap must be within (0, 100].
    #[error("efficacy cap must be within (0, 100]")]
    InvalidCap,
    /// Dose bounds must satisfy min <= max.
    #[error("dose bounds are inverted: {0} > {1}")]
    InvertedDoseBounds(u32, u32),
    /// The derived treatment needs a display name.
    #[error("treatment name must not be empty")]
    EmptyName,
    /// Cost per patient must be strictly positive.
    #[error("treatment cost must be positive")]
    NonPositiveCost,
}

/// Response-curve coefficients and derived-row constants.
///
/// The defaults reproduce the dashboard simulation exactly; a variant may
/// override any field, but every built-in preset uses the same curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EfficacyParams {
    /// Efficacy in percent at zero dose with all modifiers off.
    pub base_percent: f64,
    /// Dose is divided by this before being added to the base.
    pub dose_divisor: f64,
    /// Additive bonus for [`AiLevel::Medium`]. `Low` adds nothing.
    pub ai_bonus_medium: f64,
    /// Additive bonus for [`AiLevel::High`].
    pub ai_bonus_high: f64,
    /// Additive bonus when the neuron regeneration module is active.
    pub regen_bonus: f64,
    /// Hard cap on the computed efficacy.
    pub max_percent: f64,
    /// Smallest accepted dose; lower inputs are clamped up.
    pub dose_min: u32,
    /// Largest accepted dose; higher inputs are clamped down.
    pub dose_max: u32,
    /// Name of the derived treatment row.
    pub treatment_name: String,
    /// Projected cost per patient in USD. Fixed: the source model never
    /// varies cost with dose or AI level.
    pub treatment_cost_usd: Decimal,
}

impl Default for EfficacyParams {
    fn default() -> Self {
        Self {
            base_percent: 60.0,
            dose_divisor: 4.0,
            ai_bonus_medium: 10.0,
            ai_bonus_high: 20.0,
            regen_bonus: 5.0,
            max_percent: 100.0,
            dose_min: DOSE_MIN,
            dose_max: DOSE_MAX,
            treatment_name: "NEUROGEN-X".to_string(),
            treatment_cost_usd: Decimal::new(8_000, 0),
        }
    }
}

impl EfficacyParams {
    /// Check every coefficient against its declared constraint.
    pub fn validate(&self) -> Result<(), EfficacyError> {
        let coefficients = [
            self.base_percent,
            self.dose_divisor,
            self.ai_bonus_medium,
            self.ai_bonus_high,
            self.regen_bonus,
            self.max_percent,
        ];
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(EfficacyError::NonFinite);
        }
        if self.base_percent < 0.0
            || self.ai_bonus_medium < 0.0
            || self.ai_bonus_high < 0.0
            || self.regen_bonus < 0.0
        {
            return Err(EfficacyError::NegativeCoefficient);
        }
        if self.dose_divisor <= 0.0 {
            return Err(EfficacyError::NonPositiveDivisor);
        }
        if self.max_percent <= 0.0 || self.max_percent > 100.0 {
            return Err(EfficacyError::InvalidCap);
        }
        if self.dose_min > self.dose_max {
            return Err(EfficacyError::InvertedDoseBounds(self.dose_min, self.dose_max));
        }
        if self.treatment_name.trim().is_empty() {
            return Err(EfficacyError::EmptyName);
        }
        if self.treatment_cost_usd <= Decimal::ZERO {
            return Err(EfficacyError::NonPositiveCost);
        }
        Ok(())
    }
}

/// The three fixed comparator treatments, identical in every returned table.
pub fn comparator_records() -> Vec<TreatmentRecord> {
    vec![
        TreatmentRecord {
            name: "Quinacrine".to_string(),
            efficacy_percent: 0.0,
            cost_usd: Decimal::new(500, 0),
        },
        TreatmentRecord {
            name: "Gold Nanoparticles (MIT, 2024)".to_string(),
            efficacy_percent: 48.0,
            cost_usd: Decimal::new(35_000, 0),
        },
        TreatmentRecord {
            name: "ASO Therapy (NIH, 2023)".to_string(),
            efficacy_percent: 70.0,
            cost_usd: Decimal::new(300_000, 0),
        },
    ]
}

/// Efficacy/cost model with validated parameters.
#[derive(Clone, Debug)]
pub struct EfficacyModel {
    params: EfficacyParams,
}

impl EfficacyModel {
    /// Build a model, rejecting invalid parameters up front.
    pub fn new(params: EfficacyParams) -> Result<Self, EfficacyError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Model with the dashboard's own coefficients.
    pub fn with_defaults() -> Self {
        Self {
            params: EfficacyParams::default(),
        }
    }

    /// The validated parameter set.
    pub fn params(&self) -> &EfficacyParams {
        &self.params
    }

    /// Simulated efficacy for the derived treatment, in percent.
    ///
    /// Linear in dose, plus the AI-level and regeneration bonuses, capped at
    /// `max_percent`. There is no floor clamp: the minimum reachable value
    /// (62.5 at dose 10 with all modifiers off) is already above zero.
    pub fn efficacy_percent(&self, input: &SimulationInput) -> f64 {
        let dose = clamp_with_warn(input.dose, self.params.dose_min, self.params.dose_max, "dose");
        let mut value = self.params.base_percent + f64::from(dose) / self.params.dose_divisor;
        value += match input.ai_level {
            AiLevel::Low => 0.0,
            AiLevel::Medium => self.params.ai_bonus_medium,
            AiLevel::High => self.params.ai_bonus_high,
        };
        if input.neuro_regen_active {
            value += self.params.regen_bonus;
        }
        value.min(self.params.max_percent)
    }

    /// Full comparison table: comparator rows in fixed order, then the
    /// derived row computed from `input`.
    pub fn comparison_table(&self, input: &SimulationInput) -> ComparisonTable {
        let mut rows = comparator_records();
        rows.push(TreatmentRecord {
            name: self.params.treatment_name.clone(),
            efficacy_percent: self.efficacy_percent(input),
            cost_usd: self.params.treatment_cost_usd,
        });
        debug!(rows = rows.len(), "assembled comparison table");
        ComparisonTable { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurogen_core::validate_comparison_table;
    use proptest::prelude::*;

    fn input(dose: u32, ai_level: AiLevel, regen: bool) -> SimulationInput {
        SimulationInput {
            dose,
            ai_level,
            neuro_regen_active: regen,
        }
    }

    #[test]
    fn minimum_configuration_yields_62_5() {
        let model = EfficacyModel::with_defaults();
        let e = model.efficacy_percent(&input(10, AiLevel::Low, false));
        assert!((e - 62.5).abs() < 1e-12);
    }

    #[test]
    fn reference_configuration_caps_at_100() {
        // 60 + 100/4 + 10 + 5 = 100, exactly at the cap.
        let model = EfficacyModel::with_defaults();
        let e = model.efficacy_percent(&input(100, AiLevel::Medium, true));
        assert!((e - 100.0).abs() < 1e-12);
    }

    #[test]
    fn cap_applies_above_100() {
        let model = EfficacyModel::with_defaults();
        // 60 + 75 + 20 + 5 would be 160 uncapped.
        let e = model.efficacy_percent(&input(300, AiLevel::High, true));
        assert!((e - 100.0).abs() < 1e-12);
    }

    #[test]
    fn mid_range_value_is_uncapped() {
        let model = EfficacyModel::with_defaults();
        let e = model.efficacy_percent(&input(20, AiLevel::Low, false));
        assert!((e - 65.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_dose_is_clamped_to_bounds() {
        let model = EfficacyModel::with_defaults();
        assert_eq!(
            model.efficacy_percent(&input(5, AiLevel::Low, false)),
            model.efficacy_percent(&input(10, AiLevel::Low, false)),
        );
        assert_eq!(
            model.efficacy_percent(&input(1000, AiLevel::Low, false)),
            model.efficacy_percent(&input(300, AiLevel::Low, false)),
        );
    }

    #[test]
    fn comparators_are_present_and_unmodified() {
        let model = EfficacyModel::with_defaults();
        let table = model.comparison_table(&input(150, AiLevel::High, true));
        assert_eq!(table.comparators(), comparator_records().as_slice());
        let derived = table.derived().unwrap();
        assert_eq!(derived.name, "NEUROGEN-X");
        assert_eq!(derived.cost_usd, Decimal::new(8_000, 0));
        validate_comparison_table(&table).unwrap();
    }

    #[test]
    fn identical_input_yields_identical_table() {
        let model = EfficacyModel::with_defaults();
        let a = model.comparison_table(&input(42, AiLevel::Medium, false));
        let b = model.comparison_table(&input(42, AiLevel::Medium, false));
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let base = EfficacyParams::default();
        assert!(EfficacyModel::new(base.clone()).is_ok());

        let mut p = base.clone();
        p.regen_bonus = -1.0;
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::NegativeCoefficient);

        let mut p = base.clone();
        p.dose_divisor = 0.0;
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::NonPositiveDivisor);

        let mut p = base.clone();
        p.max_percent = 150.0;
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::InvalidCap);

        let mut p = base.clone();
        p.base_percent = f64::NAN;
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::NonFinite);

        let mut p = base.clone();
        p.dose_min = 200;
        p.dose_max = 100;
        assert_eq!(
            EfficacyModel::new(p).unwrap_err(),
            EfficacyError::InvertedDoseBounds(200, 100)
        );

        let mut p = base.clone();
        p.treatment_name = "  ".to_string();
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::EmptyName);

        let mut p = base;
        p.treatment_cost_usd = Decimal::ZERO;
        assert_eq!(EfficacyModel::new(p).unwrap_err(), EfficacyError::NonPositiveCost);
    }

    #[test]
    fn params_serde_roundtrip() {
        let p = EfficacyParams::default();
        let s = serde_json::to_string(&p).unwrap();
        let back: EfficacyParams = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    proptest! {
        #[test]
        fn efficacy_stays_within_bounds(
            dose in 0u32..2000,
            level in prop::sample::select(AiLevel::ALL.to_vec()),
            regen in any::<bool>(),
        ) {
            let model = EfficacyModel::with_defaults();
            let e = model.efficacy_percent(&input(dose, level, regen));
            prop_assert!((0.0..=100.0).contains(&e));
        }

        #[test]
        fn efficacy_monotonic_in_dose(dose in 10u32..300) {
            let model = EfficacyModel::with_defaults();
            let lo = model.efficacy_percent(&input(dose, AiLevel::Low, false));
            let hi = model.efficacy_percent(&input(dose + 1, AiLevel::Low, false));
            prop_assert!(lo <= hi);
        }

        #[test]
        fn efficacy_monotonic_in_ai_level(dose in 10u32..=300, regen in any::<bool>()) {
            let model = EfficacyModel::with_defaults();
            let low = model.efficacy_percent(&input(dose, AiLevel::Low, regen));
            let medium = model.efficacy_percent(&input(dose, AiLevel::Medium, regen));
            let high = model.efficacy_percent(&input(dose, AiLevel::High, regen));
            prop_assert!(low <= medium);
            prop_assert!(medium <= high);
        }

        #[test]
        fn regen_never_lowers_efficacy(
            dose in 10u32..=300,
            level in prop::sample::select(AiLevel::ALL.to_vec()),
        ) {
            let model = EfficacyModel::with_defaults();
            let off = model.efficacy_percent(&input(dose, level, false));
            let on = model.efficacy_percent(&input(dose, level, true));
            prop_assert!(off <= on);
        }

        #[test]
        fn every_table_validates(
            dose in 0u32..2000,
            level in prop::sample::select(AiLevel::ALL.to_vec()),
            regen in any::<bool>(),
        ) {
            let model = EfficacyModel::with_defaults();
            let table = model.comparison_table(&input(dose, level, regen));
            prop_assert_eq!(table.rows.len(), 4);
            prop_assert!(validate_comparison_table(&table).is_ok());
        }
    }
}
