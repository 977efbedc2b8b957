//! # Electrical Calculations
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, `Default` gives the form defaults)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`voltage_drop`] - Conductor voltage drop
//! - [`wire_size`] - Conductor selection for ampacity and voltage drop
//! - [`wire_resistance`] - Resistance at temperature
//! - [`box_fill`] - Outlet and junction box volume (314.16)
//! - [`conduit_fill`] - Raceway fill (Chapter 9)
//! - [`three_phase`] - Three-phase power and current
//! - [`welder`] - Welder supply conductors and OCPD (Article 630)
//! - [`power_conversion`] - kVA, kW, BTU/hr, HP, and amps
//! - [`ohms_law`] - V, I, R, P from any two
//! - [`grounding`] - EGC (250.122) and GEC (250.66)

pub mod box_fill;
pub mod conduit_fill;
pub mod grounding;
pub mod ohms_law;
pub mod power_conversion;
pub mod three_phase;
pub mod voltage_drop;
pub mod welder;
pub mod wire_resistance;
pub mod wire_size;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::routes::CalculatorKind;
use crate::tables::WireGauge;
use crate::units::{Feet, Meters};

// Re-export commonly used types
pub use box_fill::{BoxFillInput, BoxFillResult};
pub use conduit_fill::{ConduitFillInput, ConduitFillResult};
pub use grounding::{GroundingInput, GroundingResult};
pub use ohms_law::{OhmsLawInput, OhmsLawResult};
pub use power_conversion::{PowerConversionInput, PowerConversionResult};
pub use three_phase::{ThreePhaseInput, ThreePhaseResult};
pub use voltage_drop::{VoltageDropInput, VoltageDropResult};
pub use welder::{WelderInput, WelderResult};
pub use wire_resistance::{WireResistanceInput, WireResistanceResult};
pub use wire_size::{WireSizeInput, WireSizeResult};

pub(crate) const SQRT_3: f64 = 1.732_050_807_568_877_2;

pub(crate) fn validate_power_factor(pf: f64) -> CalcResult<()> {
    if pf <= 0.0 || pf > 1.0 {
        return Err(CalcError::invalid_input(
            "power_factor",
            pf.to_string(),
            "Power factor must be greater than 0 and at most 1",
        ));
    }
    Ok(())
}

// ============================================================================
// Shared input types
// ============================================================================

/// Circuit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    /// Single-phase AC (two-wire)
    #[default]
    #[serde(rename = "single")]
    SinglePhase,
    /// Balanced three-phase AC
    #[serde(rename = "three")]
    ThreePhase,
    /// Direct current (two-wire)
    #[serde(rename = "dc")]
    Dc,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::SinglePhase, Phase::ThreePhase, Phase::Dc];

    /// Multiplier on one-way length × current × resistance
    pub fn drop_multiplier(&self) -> f64 {
        match self {
            Phase::SinglePhase | Phase::Dc => 2.0,
            Phase::ThreePhase => SQRT_3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Phase::SinglePhase => "single",
            Phase::ThreePhase => "three",
            Phase::Dc => "dc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::SinglePhase => "Single-phase",
            Phase::ThreePhase => "Three-phase",
            Phase::Dc => "DC",
        }
    }
}

/// Unit for entered lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Meters,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 2] = [LengthUnit::Feet, LengthUnit::Meters];

    pub fn to_feet(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Feet => value,
            LengthUnit::Meters => Feet::from(Meters(value)).0,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "Feet",
            LengthUnit::Meters => "Meters",
        }
    }
}

/// Largest count accepted for one conductor group
pub const MAX_GROUP_COUNT: u32 = 1000;

/// A number of identical conductors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConductorGroup {
    pub count: u32,
    pub gauge: WireGauge,
}

impl ConductorGroup {
    pub fn new(count: u32, gauge: WireGauge) -> Self {
        ConductorGroup { count, gauge }
    }
}

impl fmt::Display for ConductorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.count, self.gauge.key())
    }
}

impl FromStr for ConductorGroup {
    type Err = CalcError;

    /// Accepts "4x12", "3 × 1/0", "2*250", or a bare gauge for one conductor
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .split_once(['x', 'X', '×', '*'])
            .map(|(n, g)| (n.trim(), g.trim()));
        match split {
            Some((count, gauge)) => {
                let count = count
                    .parse::<u32>()
                    .map_err(|_| CalcError::invalid_input("conductors", s, "Expected count x gauge, e.g. 4x12"))?;
                if count > MAX_GROUP_COUNT {
                    return Err(CalcError::invalid_input(
                        "conductors",
                        s,
                        format!("At most {MAX_GROUP_COUNT} conductors per group"),
                    ));
                }
                Ok(ConductorGroup::new(count, gauge.parse()?))
            }
            None => Ok(ConductorGroup::new(1, s.parse()?)),
        }
    }
}

/// Parse a conductor list such as `4x12,2x14`.
pub fn parse_conductor_list(s: &str) -> CalcResult<Vec<ConductorGroup>> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Format a conductor list in the form accepted by [`parse_conductor_list`].
pub fn format_conductor_list(groups: &[ConductorGroup]) -> String {
    groups.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// One labelled line of a printable summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
    pub unit: String,
}

impl SummaryRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        SummaryRow {
            label: label.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }
}

// ============================================================================
// Calculation dispatch
// ============================================================================

/// Enum wrapper for all calculation types.
///
/// Serializes with a `type` tag so a single JSON document can carry any
/// calculator's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    VoltageDrop(VoltageDropInput),
    WireSize(WireSizeInput),
    WireResistance(WireResistanceInput),
    BoxFill(BoxFillInput),
    ConduitFill(ConduitFillInput),
    ThreePhase(ThreePhaseInput),
    Welder(WelderInput),
    PowerConversion(PowerConversionInput),
    OhmsLaw(OhmsLawInput),
    Grounding(GroundingInput),
}

impl CalculationItem {
    /// Default input for a calculator
    pub fn default_for(kind: CalculatorKind) -> Self {
        match kind {
            CalculatorKind::VoltageDrop => CalculationItem::VoltageDrop(Default::default()),
            CalculatorKind::WireSize => CalculationItem::WireSize(Default::default()),
            CalculatorKind::WireResistance => CalculationItem::WireResistance(Default::default()),
            CalculatorKind::BoxFill => CalculationItem::BoxFill(Default::default()),
            CalculatorKind::ConduitFill => CalculationItem::ConduitFill(Default::default()),
            CalculatorKind::ThreePhase => CalculationItem::ThreePhase(Default::default()),
            CalculatorKind::Welder => CalculationItem::Welder(Default::default()),
            CalculatorKind::PowerConversion => CalculationItem::PowerConversion(Default::default()),
            CalculatorKind::OhmsLaw => CalculationItem::OhmsLaw(Default::default()),
            CalculatorKind::Grounding => CalculationItem::Grounding(Default::default()),
        }
    }

    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::VoltageDrop(i) => &i.label,
            CalculationItem::WireSize(i) => &i.label,
            CalculationItem::WireResistance(i) => &i.label,
            CalculationItem::BoxFill(i) => &i.label,
            CalculationItem::ConduitFill(i) => &i.label,
            CalculationItem::ThreePhase(i) => &i.label,
            CalculationItem::Welder(i) => &i.label,
            CalculationItem::PowerConversion(i) => &i.label,
            CalculationItem::OhmsLaw(i) => &i.label,
            CalculationItem::Grounding(i) => &i.label,
        }
    }

    /// Which calculator this input belongs to
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::VoltageDrop(_) => CalculatorKind::VoltageDrop,
            CalculationItem::WireSize(_) => CalculatorKind::WireSize,
            CalculationItem::WireResistance(_) => CalculatorKind::WireResistance,
            CalculationItem::BoxFill(_) => CalculatorKind::BoxFill,
            CalculationItem::ConduitFill(_) => CalculatorKind::ConduitFill,
            CalculationItem::ThreePhase(_) => CalculatorKind::ThreePhase,
            CalculationItem::Welder(_) => CalculatorKind::Welder,
            CalculationItem::PowerConversion(_) => CalculatorKind::PowerConversion,
            CalculationItem::OhmsLaw(_) => CalculatorKind::OhmsLaw,
            CalculationItem::Grounding(_) => CalculatorKind::Grounding,
        }
    }

    /// Run the calculation
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        tracing::debug!(calculator = self.kind().slug(), label = self.label(), "running calculation");
        let output = match self {
            CalculationItem::VoltageDrop(i) => CalculationOutput::VoltageDrop(voltage_drop::calculate(i)?),
            CalculationItem::WireSize(i) => CalculationOutput::WireSize(wire_size::calculate(i)?),
            CalculationItem::WireResistance(i) => CalculationOutput::WireResistance(wire_resistance::calculate(i)?),
            CalculationItem::BoxFill(i) => CalculationOutput::BoxFill(box_fill::calculate(i)?),
            CalculationItem::ConduitFill(i) => CalculationOutput::ConduitFill(conduit_fill::calculate(i)?),
            CalculationItem::ThreePhase(i) => CalculationOutput::ThreePhase(three_phase::calculate(i)?),
            CalculationItem::Welder(i) => CalculationOutput::Welder(welder::calculate(i)?),
            CalculationItem::PowerConversion(i) => {
                CalculationOutput::PowerConversion(power_conversion::calculate(i)?)
            }
            CalculationItem::OhmsLaw(i) => CalculationOutput::OhmsLaw(ohms_law::calculate(i)?),
            CalculationItem::Grounding(i) => CalculationOutput::Grounding(grounding::calculate(i)?),
        };
        Ok(output)
    }
}

/// Result of any calculator, tagged like [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    VoltageDrop(VoltageDropResult),
    WireSize(WireSizeResult),
    WireResistance(WireResistanceResult),
    BoxFill(BoxFillResult),
    ConduitFill(ConduitFillResult),
    ThreePhase(ThreePhaseResult),
    Welder(WelderResult),
    PowerConversion(PowerConversionResult),
    OhmsLaw(OhmsLawResult),
    Grounding(GroundingResult),
}

impl CalculationOutput {
    /// Labelled result lines for display and print
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        match self {
            CalculationOutput::VoltageDrop(r) => r.summary_rows(),
            CalculationOutput::WireSize(r) => r.summary_rows(),
            CalculationOutput::WireResistance(r) => r.summary_rows(),
            CalculationOutput::BoxFill(r) => r.summary_rows(),
            CalculationOutput::ConduitFill(r) => r.summary_rows(),
            CalculationOutput::ThreePhase(r) => r.summary_rows(),
            CalculationOutput::Welder(r) => r.summary_rows(),
            CalculationOutput::PowerConversion(r) => r.summary_rows(),
            CalculationOutput::OhmsLaw(r) => r.summary_rows(),
            CalculationOutput::Grounding(r) => r.summary_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_item_serialization() {
        let item = CalculationItem::VoltageDrop(VoltageDropInput::default());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"VoltageDrop\""));
        assert!(json.contains("\"phase\":\"single\""));

        let parsed: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_partial_item_uses_defaults() {
        let item: CalculationItem = serde_json::from_str(r#"{"type": "Welder", "rated_primary_a": 80}"#).unwrap();
        match item {
            CalculationItem::Welder(w) => {
                assert_eq!(w.rated_primary_a, 80.0);
                assert_eq!(w.duty_cycle_pct, 60.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_every_default_calculates() {
        for kind in CalculatorKind::ALL {
            let item = CalculationItem::default_for(kind);
            assert_eq!(item.kind(), kind);
            if kind == CalculatorKind::OhmsLaw {
                // No quantities entered yet
                assert!(item.calculate().is_err());
            } else {
                let output = item.calculate().unwrap();
                assert!(!output.summary_rows().is_empty(), "{kind:?}");
            }
        }
    }

    #[test]
    fn test_conductor_list_text() {
        let groups = parse_conductor_list("4x12, 2 × 14,1/0").unwrap();
        assert_eq!(
            groups,
            vec![
                ConductorGroup::new(4, WireGauge::Awg12),
                ConductorGroup::new(2, WireGauge::Awg14),
                ConductorGroup::new(1, WireGauge::Awg1_0),
            ]
        );
        assert_eq!(format_conductor_list(&groups), "4x12,2x14,1x1/0");
        assert!(parse_conductor_list("fourx12").is_err());
        assert!(parse_conductor_list("").unwrap().is_empty());
    }

    #[test]
    fn test_phase_multiplier() {
        assert_eq!(Phase::SinglePhase.drop_multiplier(), 2.0);
        assert!((Phase::ThreePhase.drop_multiplier() - 3f64.sqrt()).abs() < 1e-12);
        assert!((LengthUnit::Meters.to_feet(30.48) - 100.0).abs() < 1e-9);
    }
}
