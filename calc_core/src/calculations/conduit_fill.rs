//! # Conduit Fill Calculation
//!
//! Percent of raceway cross-section occupied by conductors, checked against
//! NEC Chapter 9 Table 1 (53% for one conductor, 31% for two, 40% for more).
//!
//! When all conductors are the same size, the maximum count follows
//! Chapter 9 Note 7: a fractional result of 0.8 or more rounds up.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::conduit::{conductor_area_in2, fill_limit_pct, internal_area_in2};
use crate::tables::{ConduitType, Insulation, TradeSize, WireGauge};

use super::{format_conductor_list, ConductorGroup, SummaryRow, MAX_GROUP_COUNT};

/// Input parameters for conduit fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConduitFillInput {
    /// User label
    pub label: String,

    /// Raceway type
    pub conduit_type: ConduitType,

    /// Raceway trade size
    pub trade_size: TradeSize,

    /// Conductor insulation
    pub insulation: Insulation,

    /// Conductors in the raceway
    pub conductors: Vec<ConductorGroup>,
}

impl Default for ConduitFillInput {
    fn default() -> Self {
        ConduitFillInput {
            label: String::new(),
            conduit_type: ConduitType::Emt,
            trade_size: TradeSize::Half,
            insulation: Insulation::Thhn,
            conductors: vec![ConductorGroup::new(3, WireGauge::Awg12), ConductorGroup::new(1, WireGauge::Awg12)],
        }
    }
}

impl ConduitFillInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.conductor_count()? == 0 {
            return Err(CalcError::invalid_input("conductors", "none", "Enter at least one conductor"));
        }
        Ok(())
    }

    /// Total number of conductors
    pub fn conductor_count(&self) -> CalcResult<u32> {
        self.conductors
            .iter()
            .try_fold(0u32, |total, g| total.checked_add(g.count))
            .ok_or_else(|| {
                CalcError::invalid_input("conductors", format_conductor_list(&self.conductors), "Too many conductors")
            })
    }

    /// Total conductor area (in²)
    pub fn conductor_area_in2(&self) -> CalcResult<f64> {
        self.conductors
            .iter()
            .filter(|g| g.count > 0)
            .map(|g| {
                conductor_area_in2(g.gauge, self.insulation)
                    .map(|a| a * f64::from(g.count))
                    .ok_or_else(|| {
                        CalcError::table_lookup(
                            "NEC Chapter 9 Table 5",
                            format!("{} {}", g.gauge.display_name(), self.insulation.display_name()),
                        )
                    })
            })
            .sum()
    }
}

/// Results from conduit fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillResult {
    /// Number of conductors
    pub conductor_count: u32,

    /// Total conductor area (in²)
    pub conductor_area_in2: f64,

    /// Raceway internal area (in²)
    pub conduit_area_in2: f64,

    /// Permitted fill (%)
    pub fill_limit_pct: f64,

    /// Permitted conductor area (in²)
    pub allowable_area_in2: f64,

    /// Actual fill (%)
    pub fill_pct: f64,

    /// Whether the fill is within the limit
    pub passes: bool,

    /// Smallest trade size of the same raceway type that passes
    pub smallest_trade_size: Option<TradeSize>,

    /// Maximum conductors of this size when all conductors are the same size
    pub max_same_conductors: Option<u32>,
}

impl ConduitFillResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::new("Conductors", self.conductor_count.to_string(), ""),
            SummaryRow::new("Conductor area", format!("{:.4}", self.conductor_area_in2), "in²"),
            SummaryRow::new("Conduit area", format!("{:.3}", self.conduit_area_in2), "in²"),
            SummaryRow::new("Fill", format!("{:.1} (max {:.0})", self.fill_pct, self.fill_limit_pct), "%"),
            SummaryRow::new("Result", if self.passes { "OK" } else { "OVERFILLED" }, ""),
        ];
        if let Some(size) = self.smallest_trade_size {
            rows.push(SummaryRow::new("Minimum trade size", size.display_name(), ""));
        }
        if let Some(max) = self.max_same_conductors {
            rows.push(SummaryRow::new("Maximum conductors", max.to_string(), ""));
        }
        rows
    }
}

/// Maximum number of identical conductors per Note 7
fn max_identical(conduit_area: f64, conductor_area: f64) -> u32 {
    // With three or more conductors the 40% column governs
    let n = conduit_area * fill_limit_pct(3) / 100.0 / conductor_area;
    let whole = n.floor();
    let count = if n - whole >= 0.8 { whole + 1.0 } else { whole };
    count as u32
}

/// Calculate conduit fill.
pub fn calculate(input: &ConduitFillInput) -> CalcResult<ConduitFillResult> {
    input.validate()?;

    let count = input.conductor_count()?;
    let area = input.conductor_area_in2()?;
    let limit = fill_limit_pct(count);
    let conduit_area = internal_area_in2(input.conduit_type, input.trade_size);
    let allowable = conduit_area * limit / 100.0;

    let smallest_trade_size = TradeSize::ALL
        .into_iter()
        .find(|size| area <= internal_area_in2(input.conduit_type, *size) * limit / 100.0);

    let mut sizes = input.conductors.iter().filter(|g| g.count > 0).map(|g| g.gauge);
    let first = sizes.next();
    let max_same_conductors = match first {
        Some(gauge) if sizes.all(|g| g == gauge) => {
            conductor_area_in2(gauge, input.insulation).map(|a| max_identical(conduit_area, a))
        }
        _ => None,
    };

    Ok(ConduitFillResult {
        conductor_count: count,
        conductor_area_in2: area,
        conduit_area_in2: conduit_area,
        fill_limit_pct: limit,
        allowable_area_in2: allowable,
        fill_pct: area / conduit_area * 100.0,
        passes: area <= allowable,
        smallest_trade_size,
        max_same_conductors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_circuit_in_half_inch_emt() {
        let result = calculate(&ConduitFillInput::default()).unwrap();
        assert_eq!(result.conductor_count, 4);
        assert!((result.conductor_area_in2 - 0.0532).abs() < 1e-9);
        assert!((result.fill_pct - 17.5).abs() < 0.01);
        assert!(result.passes);
        // Annex C: nine 12 AWG THHN in 1/2" EMT
        assert_eq!(result.max_same_conductors, Some(9));
    }

    #[test]
    fn test_note_7_rounding() {
        // 14 AWG THHN: 0.1216 / 0.0097 = 12.54 → 12
        assert_eq!(max_identical(0.304, 0.0097), 12);
        // 0.0133 × 9.85 = 0.1310: fraction ≥ 0.8 rounds up
        assert_eq!(max_identical(0.1310 / 0.4, 0.0133), 10);
    }

    #[test]
    fn test_feeder_needs_two_inch() {
        let input = ConduitFillInput {
            trade_size: TradeSize::OneAndHalf,
            conductors: vec![ConductorGroup::new(3, WireGauge::Awg4_0), ConductorGroup::new(1, WireGauge::Awg2)],
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert!(!result.passes);
        assert_eq!(result.smallest_trade_size, Some(TradeSize::Two));
        assert_eq!(result.max_same_conductors, None);
    }

    #[test]
    fn test_two_conductor_limit() {
        let input = ConduitFillInput {
            conductors: vec![ConductorGroup::new(2, WireGauge::Awg6)],
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.fill_limit_pct, 31.0);
    }

    #[test]
    fn test_huge_counts_are_rejected() {
        let input = ConduitFillInput {
            conductors: vec![ConductorGroup::new(u32::MAX, WireGauge::Awg12), ConductorGroup::new(1, WireGauge::Awg12)],
            ..Default::default()
        };
        match calculate(&input) {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "conductors"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }

        assert!("4294967295x12".parse::<ConductorGroup>().is_err());
        assert!("1001x12".parse::<ConductorGroup>().is_err());
        assert_eq!("1000x12".parse::<ConductorGroup>().unwrap().count, MAX_GROUP_COUNT);
    }

    #[test]
    fn test_missing_table_entry() {
        let input = ConduitFillInput {
            insulation: Insulation::Xhhw,
            conductors: vec![ConductorGroup::new(3, WireGauge::Awg18)],
            ..Default::default()
        };
        assert!(matches!(calculate(&input), Err(CalcError::TableLookup { .. })));
    }
}
