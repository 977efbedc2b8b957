//! # Box Fill Calculation
//!
//! Required free space inside an outlet, device, or junction box per
//! NEC 314.16(B):
//!
//! | Item                           | Allowance                               |
//! |--------------------------------|-----------------------------------------|
//! | Each conductor                 | 1 × its own size                        |
//! | Internal cable clamps (any)    | 1 × largest conductor                   |
//! | Each support fitting           | 1 × largest conductor                   |
//! | Each device yoke               | 2 × largest conductor                   |
//! | Equipment grounding conductors | 1 × largest EGC, + 1/4 for each over 4  |
//!
//! Per-conductor volumes come from Table 314.16(B), so only 18-6 AWG
//! conductors can be counted.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::box_fill::volume_allowance_in3;
use crate::tables::{StandardBox, WireGauge};

use super::{ConductorGroup, SummaryRow};

/// Input parameters for box fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxFillInput {
    /// User label
    pub label: String,

    /// Insulated conductors entering the box (not counting grounds)
    pub conductors: Vec<ConductorGroup>,

    /// Box contains one or more internal cable clamps
    pub clamps: bool,

    /// Luminaire studs and hickeys
    pub support_fittings: u32,

    /// Devices (receptacles, switches) on separate yokes
    pub devices: u32,

    /// Number of equipment grounding conductors
    pub equipment_grounds: u32,

    /// Size of the largest equipment grounding conductor
    pub ground_gauge: WireGauge,

    /// Standard box, or `Custom` to use `custom_volume_in3`
    pub box_size: StandardBox,

    /// Marked volume of a non-standard box (in³)
    pub custom_volume_in3: f64,
}

impl Default for BoxFillInput {
    fn default() -> Self {
        BoxFillInput {
            label: String::new(),
            conductors: vec![ConductorGroup::new(4, WireGauge::Awg12)],
            clamps: false,
            support_fittings: 0,
            devices: 1,
            equipment_grounds: 2,
            ground_gauge: WireGauge::Awg12,
            box_size: StandardBox::Device3x2x3_1_2,
            custom_volume_in3: 0.0,
        }
    }
}

impl BoxFillInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.conductors.iter().all(|g| g.count == 0) {
            return Err(CalcError::invalid_input("conductors", "none", "Enter at least one conductor"));
        }
        if self.box_size == StandardBox::Custom && self.custom_volume_in3 <= 0.0 {
            return Err(CalcError::invalid_input(
                "custom_volume_in3",
                self.custom_volume_in3.to_string(),
                "Enter the marked box volume",
            ));
        }
        Ok(())
    }

    /// Available box volume (in³)
    pub fn box_volume_in3(&self) -> f64 {
        self.box_size.volume_in3().unwrap_or(self.custom_volume_in3)
    }
}

/// One line of the fill breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillItem {
    /// What is counted
    pub description: String,
    /// Number of volume allowances
    pub allowances: f64,
    /// Volume per allowance (in³)
    pub unit_volume_in3: f64,
    /// Volume required (in³)
    pub volume_in3: f64,
}

/// Results from box fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillResult {
    /// Itemized allowances
    pub items: Vec<FillItem>,

    /// Total volume required (in³)
    pub required_volume_in3: f64,

    /// Box volume (in³)
    pub box_volume_in3: f64,

    /// Remaining volume, negative when overfilled (in³)
    pub remaining_in3: f64,

    /// Fill as a percent of box volume
    pub fill_pct: f64,

    /// Whether the box is large enough
    pub passes: bool,

    /// Smallest standard box that would pass
    pub smallest_standard_box: Option<StandardBox>,
}

impl BoxFillResult {
    /// Rows for printable summaries
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = self
            .items
            .iter()
            .map(|i| SummaryRow::new(&i.description, format!("{:.2}", i.volume_in3), "in³"))
            .collect();
        rows.push(SummaryRow::new("Required volume", format!("{:.2}", self.required_volume_in3), "in³"));
        rows.push(SummaryRow::new("Box volume", format!("{:.2}", self.box_volume_in3), "in³"));
        rows.push(SummaryRow::new("Remaining", format!("{:.2}", self.remaining_in3), "in³"));
        rows.push(SummaryRow::new("Result", if self.passes { "OK" } else { "OVERFILLED" }, ""));
        if let Some(b) = self.smallest_standard_box {
            rows.push(SummaryRow::new("Smallest standard box", b.display_name(), ""));
        }
        rows
    }
}

fn allowance(gauge: WireGauge) -> CalcResult<f64> {
    volume_allowance_in3(gauge).ok_or_else(|| CalcError::table_lookup("NEC Table 314.16(B)", gauge.display_name()))
}

/// Calculate box fill.
pub fn calculate(input: &BoxFillInput) -> CalcResult<BoxFillResult> {
    input.validate()?;

    let mut items = Vec::new();
    for group in input.conductors.iter().filter(|g| g.count > 0) {
        let unit = allowance(group.gauge)?;
        items.push(FillItem {
            description: format!("{} × {} conductors", group.count, group.gauge.display_name()),
            allowances: f64::from(group.count),
            unit_volume_in3: unit,
            volume_in3: f64::from(group.count) * unit,
        });
    }

    let largest = input
        .conductors
        .iter()
        .filter(|g| g.count > 0)
        .map(|g| g.gauge)
        .max()
        .ok_or_else(|| CalcError::missing_field("conductors"))?;
    let largest_unit = allowance(largest)?;

    if input.clamps {
        items.push(FillItem {
            description: "Internal cable clamps".to_string(),
            allowances: 1.0,
            unit_volume_in3: largest_unit,
            volume_in3: largest_unit,
        });
    }
    if input.support_fittings > 0 {
        let n = f64::from(input.support_fittings);
        items.push(FillItem {
            description: format!("{} support fitting(s)", input.support_fittings),
            allowances: n,
            unit_volume_in3: largest_unit,
            volume_in3: n * largest_unit,
        });
    }
    if input.devices > 0 {
        let n = 2.0 * f64::from(input.devices);
        items.push(FillItem {
            description: format!("{} device yoke(s)", input.devices),
            allowances: n,
            unit_volume_in3: largest_unit,
            volume_in3: n * largest_unit,
        });
    }
    if input.equipment_grounds > 0 {
        let unit = allowance(input.ground_gauge)?;
        let n = 1.0 + 0.25 * f64::from(input.equipment_grounds.saturating_sub(4));
        items.push(FillItem {
            description: format!("{} equipment grounding conductor(s)", input.equipment_grounds),
            allowances: n,
            unit_volume_in3: unit,
            volume_in3: n * unit,
        });
    }

    let required: f64 = items.iter().map(|i| i.volume_in3).sum();
    let available = input.box_volume_in3();

    let smallest_standard_box = StandardBox::ALL
        .into_iter()
        .filter_map(|b| b.volume_in3().map(|v| (b, v)))
        .filter(|(_, v)| *v >= required)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(b, _)| b);

    Ok(BoxFillResult {
        items,
        required_volume_in3: required,
        box_volume_in3: available,
        remaining_in3: available - required,
        fill_pct: required / available * 100.0,
        passes: required <= available,
        smallest_standard_box,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_box_passes() {
        // 4 × 2.25 + 2 × 2.25 (device) + 2.25 (grounds) = 15.75 in³ in an 18 in³ box
        let result = calculate(&BoxFillInput::default()).unwrap();
        assert!((result.required_volume_in3 - 15.75).abs() < 1e-9);
        assert!((result.remaining_in3 - 2.25).abs() < 1e-9);
        assert!(result.passes);
    }

    #[test]
    fn test_overfilled_square_box() {
        let input = BoxFillInput {
            conductors: vec![ConductorGroup::new(4, WireGauge::Awg14), ConductorGroup::new(2, WireGauge::Awg12)],
            clamps: true,
            devices: 1,
            equipment_grounds: 2,
            ground_gauge: WireGauge::Awg12,
            box_size: StandardBox::Square4x1_1_2,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        // 8 + 4.5 + 2.25 (clamps) + 4.5 (device) + 2.25 (grounds) = 21.5
        assert!((result.required_volume_in3 - 21.5).abs() < 1e-9);
        assert!(!result.passes);
        assert_eq!(result.smallest_standard_box, Some(StandardBox::Round4x2_1_8));
    }

    #[test]
    fn test_extra_grounds_add_quarter_allowance() {
        let input = BoxFillInput {
            conductors: vec![ConductorGroup::new(2, WireGauge::Awg12)],
            devices: 0,
            equipment_grounds: 6,
            box_size: StandardBox::Custom,
            custom_volume_in3: 20.0,
            ..Default::default()
        };
        let result = calculate(&input).unwrap();
        let grounds = result.items.last().unwrap();
        assert!((grounds.allowances - 1.5).abs() < 1e-9);
        assert!((grounds.volume_in3 - 3.375).abs() < 1e-9);
    }

    #[test]
    fn test_large_conductor_rejected() {
        let input = BoxFillInput {
            conductors: vec![ConductorGroup::new(3, WireGauge::Awg4)],
            ..Default::default()
        };
        assert!(matches!(calculate(&input), Err(CalcError::TableLookup { .. })));
    }

    #[test]
    fn test_custom_box_requires_volume() {
        let input = BoxFillInput {
            box_size: StandardBox::Custom,
            custom_volume_in3: 0.0,
            ..Default::default()
        };
        assert!(calculate(&input).is_err());
    }
}
