//! # Site Routes
//!
//! One static page per calculator (`/calculators/<slug>`) and per reference
//! table guide (`/guides/<slug>`).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::tables::ReferenceTable;

/// Calculator pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    VoltageDrop,
    WireSize,
    WireResistance,
    BoxFill,
    ConduitFill,
    ThreePhase,
    Welder,
    PowerConversion,
    OhmsLaw,
    Grounding,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::VoltageDrop,
        CalculatorKind::WireSize,
        CalculatorKind::WireResistance,
        CalculatorKind::BoxFill,
        CalculatorKind::ConduitFill,
        CalculatorKind::ThreePhase,
        CalculatorKind::Welder,
        CalculatorKind::PowerConversion,
        CalculatorKind::OhmsLaw,
        CalculatorKind::Grounding,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::VoltageDrop => "voltage-drop",
            CalculatorKind::WireSize => "wire-size",
            CalculatorKind::WireResistance => "wire-resistance",
            CalculatorKind::BoxFill => "box-fill",
            CalculatorKind::ConduitFill => "conduit-fill",
            CalculatorKind::ThreePhase => "three-phase",
            CalculatorKind::Welder => "welder",
            CalculatorKind::PowerConversion => "power-conversion",
            CalculatorKind::OhmsLaw => "ohms-law",
            CalculatorKind::Grounding => "grounding",
        }
    }

    /// `type` tag of the matching [`CalculationItem`](crate::calculations::CalculationItem) variant
    pub fn type_tag(&self) -> &'static str {
        match self {
            CalculatorKind::VoltageDrop => "VoltageDrop",
            CalculatorKind::WireSize => "WireSize",
            CalculatorKind::WireResistance => "WireResistance",
            CalculatorKind::BoxFill => "BoxFill",
            CalculatorKind::ConduitFill => "ConduitFill",
            CalculatorKind::ThreePhase => "ThreePhase",
            CalculatorKind::Welder => "Welder",
            CalculatorKind::PowerConversion => "PowerConversion",
            CalculatorKind::OhmsLaw => "OhmsLaw",
            CalculatorKind::Grounding => "Grounding",
        }
    }

    pub fn path(&self) -> String {
        format!("/calculators/{}", self.slug())
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::VoltageDrop => "Voltage Drop Calculator",
            CalculatorKind::WireSize => "Wire Size Calculator",
            CalculatorKind::WireResistance => "Wire Resistance Calculator",
            CalculatorKind::BoxFill => "Box Fill Calculator",
            CalculatorKind::ConduitFill => "Conduit Fill Calculator",
            CalculatorKind::ThreePhase => "Three-Phase Power Calculator",
            CalculatorKind::Welder => "Welder Circuit Calculator",
            CalculatorKind::PowerConversion => "kVA / kW / BTU Converter",
            CalculatorKind::OhmsLaw => "Ohm's Law Calculator",
            CalculatorKind::Grounding => "Grounding Conductor Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::VoltageDrop => "Voltage drop and percent drop for copper or aluminum conductors.",
            CalculatorKind::WireSize => "Smallest conductor meeting ampacity, derating, and voltage drop limits.",
            CalculatorKind::WireResistance => "Conductor resistance at temperature and I²R loss.",
            CalculatorKind::BoxFill => "Required box volume per NEC 314.16.",
            CalculatorKind::ConduitFill => "Raceway fill per NEC Chapter 9 Tables 1, 4, and 5.",
            CalculatorKind::ThreePhase => "Current, kW, kVA, and kVAR for balanced three-phase loads.",
            CalculatorKind::Welder => "Supply conductors and overcurrent protection for welders (Article 630).",
            CalculatorKind::PowerConversion => "Convert between kVA, kW, BTU/hr, horsepower, and amps.",
            CalculatorKind::OhmsLaw => "Voltage, current, resistance, and power from any two.",
            CalculatorKind::Grounding => "Equipment grounding and grounding electrode conductor sizes.",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    /// Accepts the slug, the type tag, or snake_case ("voltage_drop")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        CalculatorKind::ALL
            .into_iter()
            .find(|k| k.slug() == wanted || k.type_tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::invalid_input("calculator", s, "Unknown calculator"))
    }
}

/// A resolvable page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Calculator(CalculatorKind),
    Guide(ReferenceTable),
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Calculator(kind) => kind.path(),
            Page::Guide(table) => guide_path(*table),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Electrical Calculators",
            Page::Calculator(kind) => kind.title(),
            Page::Guide(table) => table.title(),
        }
    }
}

/// Route path for a reference table guide
pub fn guide_path(table: ReferenceTable) -> String {
    format!("/guides/{}", table.slug())
}

static ROUTES: Lazy<HashMap<String, Page>> = Lazy::new(|| {
    std::iter::once(Page::Home)
        .chain(CalculatorKind::ALL.into_iter().map(Page::Calculator))
        .chain(ReferenceTable::ALL.into_iter().map(Page::Guide))
        .map(|page| (page.path(), page))
        .collect()
});

/// Every page, for sitemaps and listings
pub fn all_pages() -> Vec<Page> {
    let mut pages: Vec<Page> = ROUTES.values().copied().collect();
    pages.sort_by_key(|p| p.path());
    pages
}

/// Resolve a URL path to a page. Trailing slashes are ignored.
pub fn find_route(path: &str) -> Option<Page> {
    let trimmed = path.trim_end_matches('/');
    let key = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_calculator_routes() {
        assert_eq!(find_route("/calculators/voltage-drop"), Some(Page::Calculator(CalculatorKind::VoltageDrop)));
        assert_eq!(find_route("/calculators/box-fill/"), Some(Page::Calculator(CalculatorKind::BoxFill)));
        assert_eq!(find_route("/"), Some(Page::Home));
        assert_eq!(find_route("/calculators/nope"), None);
    }

    #[test]
    fn test_guide_routes() {
        for table in ReferenceTable::ALL {
            assert_eq!(find_route(&guide_path(table)), Some(Page::Guide(table)));
        }
    }

    #[test]
    fn test_slugs_unique() {
        let pages = all_pages();
        assert_eq!(pages.len(), 1 + CalculatorKind::ALL.len() + ReferenceTable::ALL.len());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("voltage-drop".parse::<CalculatorKind>().unwrap(), CalculatorKind::VoltageDrop);
        assert_eq!("ohms_law".parse::<CalculatorKind>().unwrap(), CalculatorKind::OhmsLaw);
        assert_eq!("ThreePhase".parse::<CalculatorKind>().unwrap(), CalculatorKind::ThreePhase);
        assert!("load-calc".parse::<CalculatorKind>().is_err());
    }
}
