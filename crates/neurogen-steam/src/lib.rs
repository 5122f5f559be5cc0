#![deny(warnings)]

//! STEAM contribution allocator.
//!
//! Normalizes the five dashboard weights into percentage contributions and
//! names the dominant category. Output rows keep the fixed category order of
//! the dashboard sliders; they are never sorted by value.

use neurogen_core::{ContributionResult, ContributionWeights, SteamCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors produced by the allocator.
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    /// All five weights are zero; there is nothing to normalize. Guarded
    /// explicitly so a caller outside the declared 1..=10 range never sees a
    /// silent division by zero.
    #[error("all contribution weights are zero")]
    DegenerateWeights,
}

/// Normalized contribution breakdown plus the dominant category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// One row per category, in fixed category order.
    pub results: Vec<ContributionResult>,
    /// First category (in declaration order) whose rounded percent equals
    /// the maximum.
    pub dominant: SteamCategory,
}

/// Round half away from zero to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Normalize the weights into percentages and rank the dominant category.
///
/// Percentages are rounded independently per category, so their sum may land
/// slightly off 100 (99.8..=100.2 over the full weight grid). No remainder
/// redistribution is performed; the dashboard displays the rounded values
/// as-is.
pub fn allocate(weights: &ContributionWeights) -> Result<Allocation, AllocationError> {
    let total = weights.total();
    if total == 0 {
        return Err(AllocationError::DegenerateWeights);
    }

    let mut results = Vec::with_capacity(SteamCategory::ALL.len());
    for category in SteamCategory::ALL {
        let weight = weights.weight(category);
        let percent = round1(f64::from(weight) / total as f64 * 100.0);
        results.push(ContributionResult {
            category,
            weight,
            percent,
        });
    }

    // First maximum wins: ties resolve to the earliest category.
    let mut dominant = results[0].category;
    let mut best = results[0].percent;
    for row in &results[1..] {
        if row.percent > best {
            best = row.percent;
            dominant = row.category;
        }
    }

    debug!(%dominant, total, "allocated contribution percentages");
    Ok(Allocation { results, dominant })
}
