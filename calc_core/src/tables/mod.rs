//! # NEC Reference Tables
//!
//! Static reference data used by the calculators. All tables are hard-coded
//! constants keyed by conductor size, raceway size, rating, etc.
//!
//! ## Tables
//!
//! - [`awg`] - Conductor sizes, area and resistance (Chapter 9, Table 8)
//! - [`ampacity`] - Allowable ampacities (Table 310.16) and standard OCPD ratings
//! - [`correction`] - Ambient and bundling factors (310.15)
//! - [`conduit`] - Raceway and conductor areas (Chapter 9, Tables 1, 4, 5)
//! - [`box_fill`] - Box volumes and per-conductor allowances (314.16)
//! - [`grounding`] - EGC and GEC sizing (Tables 250.122, 250.66)
//!
//! Each table can also be rendered as a [`TableView`] for the reference
//! guide pages.

pub mod ampacity;
pub mod awg;
pub mod box_fill;
pub mod conduit;
pub mod correction;
pub mod grounding;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

pub use ampacity::{ampacity, TemperatureRating};
pub use awg::{ConductorMaterial, WireGauge};
pub use box_fill::StandardBox;
pub use conduit::{ConduitType, Insulation, TradeSize};

/// Reference tables published as guide pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceTable {
    AwgWireChart,
    AmpacityChart,
    TemperatureCorrection,
    ConduitFill,
    BoxFill,
    GroundingConductors,
}

impl ReferenceTable {
    pub const ALL: [ReferenceTable; 6] = [
        ReferenceTable::AwgWireChart,
        ReferenceTable::AmpacityChart,
        ReferenceTable::TemperatureCorrection,
        ReferenceTable::ConduitFill,
        ReferenceTable::BoxFill,
        ReferenceTable::GroundingConductors,
    ];

    /// URL slug
    pub fn slug(&self) -> &'static str {
        match self {
            ReferenceTable::AwgWireChart => "awg-wire-chart",
            ReferenceTable::AmpacityChart => "wire-ampacity-chart",
            ReferenceTable::TemperatureCorrection => "temperature-correction-factors",
            ReferenceTable::ConduitFill => "conduit-fill-table",
            ReferenceTable::BoxFill => "box-fill-table",
            ReferenceTable::GroundingConductors => "grounding-conductor-sizing",
        }
    }

    /// Page title
    pub fn title(&self) -> &'static str {
        match self {
            ReferenceTable::AwgWireChart => "AWG Wire Size Chart",
            ReferenceTable::AmpacityChart => "Wire Ampacity Chart",
            ReferenceTable::TemperatureCorrection => "Ambient Temperature Correction Factors",
            ReferenceTable::ConduitFill => "Conduit Internal Areas",
            ReferenceTable::BoxFill => "Box Fill Volume Allowances",
            ReferenceTable::GroundingConductors => "Equipment Grounding Conductor Sizing",
        }
    }

    /// Code reference shown under the title
    pub fn code_reference(&self) -> &'static str {
        match self {
            ReferenceTable::AwgWireChart => "NEC Chapter 9, Table 8",
            ReferenceTable::AmpacityChart => "NEC Table 310.16",
            ReferenceTable::TemperatureCorrection => "NEC Table 310.15(B)(1)",
            ReferenceTable::ConduitFill => "NEC Chapter 9, Table 4",
            ReferenceTable::BoxFill => "NEC Table 314.16(B)",
            ReferenceTable::GroundingConductors => "NEC Table 250.122",
        }
    }

    /// Build the table contents
    pub fn render(&self) -> TableView {
        let (headers, rows): (Vec<&str>, Vec<Vec<String>>) = match self {
            ReferenceTable::AwgWireChart => (
                vec!["Size", "Area (cmil)", "Diameter (in)", "Cu Ω/kft", "Al Ω/kft"],
                WireGauge::ALL
                    .iter()
                    .map(|g| {
                        vec![
                            g.display_name(),
                            format!("{:.0}", g.circular_mils().0),
                            format!("{:.4}", g.diameter_in()),
                            format!("{}", g.resistance_ohms_per_kft(ConductorMaterial::Copper)),
                            format!("{}", g.resistance_ohms_per_kft(ConductorMaterial::Aluminum)),
                        ]
                    })
                    .collect(),
            ),
            ReferenceTable::AmpacityChart => (
                vec!["Size", "Cu 60°C", "Cu 75°C", "Cu 90°C", "Al 60°C", "Al 75°C", "Al 90°C"],
                WireGauge::ALL
                    .iter()
                    .map(|g| {
                        let mut row = vec![g.display_name()];
                        for material in ConductorMaterial::ALL {
                            for rating in TemperatureRating::ALL {
                                row.push(
                                    ampacity(*g, material, rating)
                                        .map(|a| format!("{a:.0}"))
                                        .unwrap_or_else(|| "-".to_string()),
                                );
                            }
                        }
                        row
                    })
                    .collect(),
            ),
            ReferenceTable::TemperatureCorrection => (
                vec!["Ambient (°C)", "60°C", "75°C", "90°C"],
                correction::ambient_rows()
                    .into_iter()
                    .map(|(label, factors)| {
                        let mut row = vec![label];
                        row.extend(
                            factors
                                .iter()
                                .map(|f| f.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())),
                        );
                        row
                    })
                    .collect(),
            ),
            ReferenceTable::ConduitFill => (
                vec!["Trade size", "EMT (in²)", "PVC 40 (in²)", "RMC (in²)"],
                TradeSize::ALL
                    .iter()
                    .map(|size| {
                        let mut row = vec![size.display_name()];
                        row.extend(
                            ConduitType::ALL
                                .iter()
                                .map(|t| format!("{:.3}", conduit::internal_area_in2(*t, *size))),
                        );
                        row
                    })
                    .collect(),
            ),
            ReferenceTable::BoxFill => (
                vec!["Size", "Free space per conductor (in³)"],
                WireGauge::ALL
                    .iter()
                    .filter_map(|g| box_fill::volume_allowance_in3(*g).map(|v| vec![g.display_name(), format!("{v:.2}")]))
                    .collect(),
            ),
            ReferenceTable::GroundingConductors => (
                vec!["OCPD rating (A)", "Copper", "Aluminum"],
                grounding::table_250_122_rows()
                    .map(|(rating, cu, al)| vec![rating.to_string(), cu.display_name(), al.display_name()])
                    .collect(),
            ),
        };

        TableView {
            title: self.title().to_string(),
            reference: self.code_reference().to_string(),
            headers: headers.into_iter().map(str::to_string).collect(),
            rows,
        }
    }
}

impl std::str::FromStr for ReferenceTable {
    type Err = CalcError;

    /// Accepts the slug or any unambiguous prefix of it ("awg", "ampacity")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        if let Some(exact) = ReferenceTable::ALL.into_iter().find(|t| t.slug() == wanted) {
            return Ok(exact);
        }
        let mut matches = ReferenceTable::ALL
            .into_iter()
            .filter(|t| !wanted.is_empty() && t.slug().contains(wanted.as_str()));
        match (matches.next(), matches.next()) {
            (Some(table), None) => Ok(table),
            _ => Err(CalcError::table_lookup("reference tables", s)),
        }
    }
}

/// A reference table laid out for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    pub title: String,
    pub reference: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Render as fixed-width text with right-aligned columns
    pub fn to_text(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|i| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .chain(std::iter::once(&self.headers[i]))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let fmt_row = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:>w$}", w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = format!("{}\n{}\n\n", self.title, self.reference);
        out.push_str(&fmt_row(&self.headers));
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&fmt_row(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_renders() {
        for table in ReferenceTable::ALL {
            let view = table.render();
            assert!(!view.rows.is_empty(), "{} has no rows", table.slug());
            for row in &view.rows {
                assert_eq!(row.len(), view.headers.len());
            }
        }
    }

    #[test]
    fn test_ampacity_chart_contents() {
        let view = ReferenceTable::AmpacityChart.render();
        let row_12 = view.rows.iter().find(|r| r[0] == "12 AWG").unwrap();
        assert_eq!(row_12[1..4], ["20", "25", "30"]);
        let row_14 = view.rows.iter().find(|r| r[0] == "14 AWG").unwrap();
        assert_eq!(row_14[4], "-");
    }

    #[test]
    fn test_table_from_str() {
        assert_eq!("awg-wire-chart".parse::<ReferenceTable>().unwrap(), ReferenceTable::AwgWireChart);
        assert_eq!("ampacity".parse::<ReferenceTable>().unwrap(), ReferenceTable::AmpacityChart);
        assert!("table".parse::<ReferenceTable>().is_err());
        assert!("".parse::<ReferenceTable>().is_err());
    }

    #[test]
    fn test_text_rendering() {
        let text = ReferenceTable::BoxFill.render().to_text();
        assert!(text.starts_with("Box Fill Volume Allowances"));
        assert!(text.contains("2.25"));
        assert_eq!(ReferenceTable::BoxFill.render().rows.len(), 7);
    }
}
