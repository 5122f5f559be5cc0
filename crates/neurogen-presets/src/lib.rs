#![deny(warnings)]

//! Dashboard variant configuration.
//!
//! The three near-duplicate dashboards differ only in their control
//! defaults, so each variant is a [`DashboardPreset`]: an explicit record of
//! every slider default and bound, consumed by a presentation layer and
//! convertible into model inputs. Presets ship as YAML files under
//! `assets/presets/` and are also available as built-ins.

use neurogen_core::{
    AiLevel, ContributionWeights, SimulationInput, DOSE_MAX, DOSE_MIN, WEIGHT_MAX, WEIGHT_MIN,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors produced while validating or loading presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// A slider spec or cross-field constraint is violated.
    #[error("invalid preset: {0}")]
    Invalid(String),
    /// Filesystem failure while reading a preset file or directory.
    #[error("io error: {0}")]
    Io(String),
    /// A preset file is not well-formed YAML for [`DashboardPreset`].
    #[error("yaml error: {0}")]
    Yaml(String),
    /// Two loaded presets share an id.
    #[error("duplicate preset id: {0}")]
    DuplicateId(String),
    /// No preset with the requested id.
    #[error("unknown preset id: {0}")]
    UnknownId(String),
}

impl From<std::io::Error> for PresetError {
    fn from(e: std::io::Error) -> Self {
        PresetError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for PresetError {
    fn from(e: serde_yaml::Error) -> Self {
        PresetError::Yaml(e.to_string())
    }
}

/// Bounds and default of one interactive control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SliderSpec {
    /// Require `min <= default <= max`.
    pub fn validate(&self, name: &str) -> Result<(), PresetError> {
        if self.min > self.max {
            return Err(PresetError::Invalid(format!(
                "{name}: min {} > max {}",
                self.min, self.max
            )));
        }
        if self.default < self.min || self.default > self.max {
            return Err(PresetError::Invalid(format!(
                "{name}: default {} outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One dashboard variant: every control default and bound, spelled out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardPreset {
    /// Stable identifier used for selection.
    pub id: String,
    /// Page title the variant displays.
    pub title: String,
    /// Nanorobot dose slider.
    pub dose: SliderSpec,
    /// Default AI optimization level.
    pub ai_level_default: AiLevel,
    /// Default state of the neuron regeneration checkbox.
    pub neuro_regen_default: bool,
    /// Biological complexity slider.
    pub biology: SliderSpec,
    /// AI modeling demand slider.
    pub ai: SliderSpec,
    /// Nanotech engineering difficulty slider.
    pub engineering: SliderSpec,
    /// Visualization needs slider.
    pub art: SliderSpec,
    /// Mathematical modeling complexity slider.
    pub mathematics: SliderSpec,
}

impl DashboardPreset {
    /// Validate every slider and keep the bounds inside the model's declared
    /// ranges.
    pub fn validate(&self) -> Result<(), PresetError> {
        if self.id.trim().is_empty() {
            return Err(PresetError::Invalid("empty preset id".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(PresetError::Invalid(format!("{}: empty title", self.id)));
        }
        self.dose.validate("dose")?;
        if self.dose.min < DOSE_MIN || self.dose.max > DOSE_MAX {
            return Err(PresetError::Invalid(format!(
                "{}: dose bounds [{}, {}] outside declared [{DOSE_MIN}, {DOSE_MAX}]",
                self.id, self.dose.min, self.dose.max
            )));
        }
        for (name, spec) in self.weight_sliders() {
            spec.validate(name)?;
            if spec.min < WEIGHT_MIN || spec.max > WEIGHT_MAX {
                return Err(PresetError::Invalid(format!(
                    "{}: {name} bounds [{}, {}] outside declared [{WEIGHT_MIN}, {WEIGHT_MAX}]",
                    self.id, spec.min, spec.max
                )));
            }
        }
        Ok(())
    }

    fn weight_sliders(&self) -> [(&'static str, &SliderSpec); 5] {
        [
            ("biology", &self.biology),
            ("ai", &self.ai),
            ("engineering", &self.engineering),
            ("art", &self.art),
            ("mathematics", &self.mathematics),
        ]
    }

    /// Simulation input built from this variant's defaults.
    pub fn simulation_input(&self) -> SimulationInput {
        SimulationInput {
            dose: self.dose.default,
            ai_level: self.ai_level_default,
            neuro_regen_active: self.neuro_regen_default,
        }
    }

    /// Contribution weights built from this variant's defaults.
    pub fn contribution_weights(&self) -> ContributionWeights {
        ContributionWeights::clamped(
            self.biology.default,
            self.ai.default,
            self.engineering.default,
            self.art.default,
            self.mathematics.default,
        )
    }
}

fn weight_slider(default: u32) -> SliderSpec {
    SliderSpec {
        min: WEIGHT_MIN,
        max: WEIGHT_MAX,
        default,
    }
}

fn dose_slider(default: u32) -> SliderSpec {
    SliderSpec {
        min: DOSE_MIN,
        max: DOSE_MAX,
        default,
    }
}

/// The three built-in dashboard variants.
///
/// Bounds and model coefficients are identical across all of them; only the
/// defaults drift, which is the entire difference between the original
/// near-duplicate dashboards.
pub fn builtin_presets() -> Vec<DashboardPreset> {
    vec![
        DashboardPreset {
            id: "baseline".to_string(),
            title: "NEUROGEN-X Interactive Dashboard".to_string(),
            dose: dose_slider(100),
            ai_level_default: AiLevel::Medium,
            neuro_regen_default: true,
            biology: weight_slider(8),
            ai: weight_slider(7),
            engineering: weight_slider(7),
            art: weight_slider(4),
            mathematics: weight_slider(4),
        },
        DashboardPreset {
            id: "clinical".to_string(),
            title: "NEUROGEN-X Clinical Review Dashboard".to_string(),
            dose: dose_slider(150),
            ai_level_default: AiLevel::High,
            neuro_regen_default: true,
            biology: weight_slider(9),
            ai: weight_slider(8),
            engineering: weight_slider(7),
            art: weight_slider(3),
            mathematics: weight_slider(5),
        },
        DashboardPreset {
            id: "outreach".to_string(),
            title: "NEUROGEN-X Outreach Dashboard".to_string(),
            dose: dose_slider(80),
            ai_level_default: AiLevel::Low,
            neuro_regen_default: false,
            biology: weight_slider(7),
            ai: weight_slider(6),
            engineering: weight_slider(6),
            art: weight_slider(6),
            mathematics: weight_slider(4),
        },
    ]
}

/// Find a preset by id.
pub fn find_preset<'a>(
    presets: &'a [DashboardPreset],
    id: &str,
) -> Result<&'a DashboardPreset, PresetError> {
    presets
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PresetError::UnknownId(id.to_string()))
}

/// Load and validate a single preset file.
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<DashboardPreset, PresetError> {
    let text = fs::read_to_string(path.as_ref())?;
    let preset: DashboardPreset = serde_yaml::from_str(&text)?;
    preset.validate()?;
    Ok(preset)
}

/// Load every `*.yaml`/`*.yml` preset in a directory, sorted by id.
pub fn load_preset_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<DashboardPreset>, PresetError> {
    let mut by_id: BTreeMap<String, DashboardPreset> = BTreeMap::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {}
            _ => continue,
        }
        let preset = load_preset(&path)?;
        if by_id.contains_key(&preset.id) {
            return Err(PresetError::DuplicateId(preset.id));
        }
        by_id.insert(preset.id.clone(), preset);
    }
    info!(count = by_id.len(), dir = %dir.as_ref().display(), "loaded dashboard presets");
    Ok(by_id.into_values().collect())
}
