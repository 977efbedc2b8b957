//! # Calculator Form State
//!
//! A UI-agnostic controlled form for each calculator. Field values are held
//! as the text the user typed; [`FormState::to_item`] turns them into a typed
//! [`CalculationItem`] through `serde_json`, so the input structs stay the
//! single source of truth for defaults and field names.
//!
//! ```rust
//! use calc_core::form::FormState;
//! use calc_core::routes::CalculatorKind;
//!
//! let mut form = FormState::new(CalculatorKind::VoltageDrop);
//! form.set("length", "150").unwrap();
//! assert!(form.result().is_some());
//!
//! // Invalid input hides the result
//! assert!(form.set("voltage_v", "-5").is_err());
//! assert!(form.result().is_none());
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::calculations::grounding::{ElectrodeType, GroundingKind};
use crate::calculations::power_conversion::Conversion;
use crate::calculations::three_phase::ThreePhaseMode;
use crate::calculations::welder::WelderType;
use crate::calculations::wire_size::TerminalRating;
use crate::calculations::{
    format_conductor_list, parse_conductor_list, CalculationItem, CalculationOutput, ConductorGroup, LengthUnit,
    Phase,
};
use crate::errors::{CalcError, CalcResult};
use crate::routes::CalculatorKind;
use crate::settings::Settings;
use crate::tables::box_fill::volume_allowance_in3;
use crate::tables::{
    ConductorMaterial, ConduitType, Insulation, StandardBox, TemperatureRating, TradeSize, WireGauge,
};

/// How a field is entered and validated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Decimal number. `nonzero` fields fall back to their default when left empty or zero.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
        nonzero: bool,
    },
    /// Whole number
    Integer { min: u32, max: u32 },
    /// One of a fixed set of `(key, label)` options
    Choice { options: Vec<(String, String)> },
    /// On/off
    Toggle,
    /// Conductor groups as text, e.g. `4x12,2x14`
    ConductorList,
    /// Free text
    Text,
}

/// One input on a calculator form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Input struct field name, also the share-link query key
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn new(key: &'static str, label: &'static str, unit: &'static str, kind: FieldKind) -> Self {
        FieldSpec { key, label, unit, kind }
    }

    /// Text describing acceptable values, for prompts and help output
    pub fn hint(&self) -> String {
        match &self.kind {
            FieldKind::Number { min, max, .. } => match (min, max) {
                (Some(lo), Some(hi)) => format!("{lo} to {hi}"),
                (Some(lo), None) => format!(">= {lo}"),
                (None, Some(hi)) => format!("<= {hi}"),
                (None, None) => "number".to_string(),
            },
            FieldKind::Integer { min, max } => format!("{min} to {max}"),
            FieldKind::Choice { options } => {
                options.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>().join(" | ")
            }
            FieldKind::Toggle => "yes | no".to_string(),
            FieldKind::ConductorList => "count x gauge, comma separated (4x12,2x14)".to_string(),
            FieldKind::Text => "text".to_string(),
        }
    }
}

// ============================================================================
// Field tables
// ============================================================================

fn number(min: f64, max: Option<f64>, step: f64) -> FieldKind {
    FieldKind::Number {
        min: Some(min),
        max,
        step,
        nonzero: false,
    }
}

fn positive(max: Option<f64>, step: f64) -> FieldKind {
    FieldKind::Number {
        min: Some(0.0),
        max,
        step,
        nonzero: true,
    }
}

fn choice<'a>(options: impl IntoIterator<Item = (&'a str, String)>) -> FieldKind {
    FieldKind::Choice {
        options: options.into_iter().map(|(k, l)| (k.to_string(), l)).collect(),
    }
}

fn phases() -> FieldKind {
    choice(Phase::ALL.iter().map(|p| (p.key(), p.display_name().to_string())))
}

fn materials() -> FieldKind {
    choice(ConductorMaterial::ALL.iter().map(|m| (m.key(), m.display_name().to_string())))
}

fn gauges(filter: impl Fn(&WireGauge) -> bool) -> FieldKind {
    choice(WireGauge::ALL.iter().filter(|g| filter(g)).map(|g| (g.key(), g.display_name())))
}

fn length_units() -> FieldKind {
    choice(LengthUnit::ALL.iter().map(|u| (u.key(), u.display_name().to_string())))
}

fn ratings() -> FieldKind {
    choice(TemperatureRating::ALL.iter().map(|r| (r.key(), r.display_name().to_string())))
}

fn label_field() -> FieldSpec {
    FieldSpec::new("label", "Label", "", FieldKind::Text)
}

/// Fields shown on a calculator's form, in display order.
pub fn fields(kind: CalculatorKind) -> Vec<FieldSpec> {
    use FieldSpec as F;

    let mut fields = match kind {
        CalculatorKind::VoltageDrop => vec![
            F::new("phase", "System", "", phases()),
            F::new("material", "Conductor material", "", materials()),
            F::new("gauge", "Conductor size", "", gauges(|_| true)),
            F::new("length", "One-way length", "", positive(None, 1.0)),
            F::new("length_unit", "Length unit", "", length_units()),
            F::new("current_a", "Load current", "A", positive(None, 0.1)),
            F::new("voltage_v", "Source voltage", "V", positive(None, 1.0)),
            F::new("parallel_sets", "Parallel sets", "", FieldKind::Integer { min: 1, max: 10 }),
            F::new("max_drop_pct", "Drop limit", "%", positive(Some(100.0), 0.5)),
        ],
        CalculatorKind::WireSize => vec![
            F::new("load_current_a", "Load current", "A", positive(None, 0.1)),
            F::new("continuous", "Continuous load", "", FieldKind::Toggle),
            F::new("phase", "System", "", phases()),
            F::new("voltage_v", "Voltage", "V", positive(None, 1.0)),
            F::new("length", "One-way length", "", positive(None, 1.0)),
            F::new("length_unit", "Length unit", "", length_units()),
            F::new("material", "Conductor material", "", materials()),
            F::new("insulation_rating", "Insulation rating", "", ratings()),
            F::new(
                "terminal_rating",
                "Terminal rating",
                "",
                choice(TerminalRating::ALL.iter().map(|t| (t.key(), t.display_name().to_string()))),
            ),
            F::new("ambient_temp_c", "Ambient temperature", "°C", number(-40.0, Some(85.0), 1.0)),
            F::new(
                "current_carrying_conductors",
                "Current-carrying conductors",
                "",
                FieldKind::Integer { min: 1, max: 100 },
            ),
            F::new("max_drop_pct", "Drop limit", "%", positive(Some(100.0), 0.5)),
        ],
        CalculatorKind::WireResistance => vec![
            F::new("gauge", "Conductor size", "", gauges(|_| true)),
            F::new("material", "Conductor material", "", materials()),
            F::new("length", "Length", "", positive(None, 1.0)),
            F::new("length_unit", "Length unit", "", length_units()),
            F::new("temperature_c", "Conductor temperature", "°C", number(-50.0, Some(250.0), 1.0)),
            F::new("round_trip", "Round trip", "", FieldKind::Toggle),
            F::new("current_a", "Current (optional)", "A", number(0.0, None, 0.1)),
        ],
        CalculatorKind::BoxFill => vec![
            F::new("conductors", "Conductors", "", FieldKind::ConductorList),
            F::new("clamps", "Internal clamps", "", FieldKind::Toggle),
            F::new("support_fittings", "Support fittings", "", FieldKind::Integer { min: 0, max: 20 }),
            F::new("devices", "Devices (yokes)", "", FieldKind::Integer { min: 0, max: 10 }),
            F::new("equipment_grounds", "Equipment grounds", "", FieldKind::Integer { min: 0, max: 20 }),
            F::new(
                "ground_gauge",
                "Largest ground size",
                "",
                gauges(|g| volume_allowance_in3(*g).is_some()),
            ),
            F::new(
                "box_size",
                "Box",
                "",
                choice(StandardBox::ALL.iter().map(|b| (b.key(), b.display_name().to_string()))),
            ),
            F::new("custom_volume_in3", "Custom box volume", "in³", number(0.0, None, 0.25)),
        ],
        CalculatorKind::ConduitFill => vec![
            F::new(
                "conduit_type",
                "Conduit type",
                "",
                choice(ConduitType::ALL.iter().map(|c| (c.key(), c.display_name().to_string()))),
            ),
            F::new("trade_size", "Trade size", "", choice(TradeSize::ALL.iter().map(|t| (t.key(), t.display_name())))),
            F::new(
                "insulation",
                "Insulation",
                "",
                choice(Insulation::ALL.iter().map(|i| (i.key(), i.display_name().to_string()))),
            ),
            F::new("conductors", "Conductors", "", FieldKind::ConductorList),
        ],
        CalculatorKind::ThreePhase => vec![
            F::new(
                "mode",
                "Solve for",
                "",
                choice(ThreePhaseMode::ALL.iter().map(|m| (m.key(), m.display_name().to_string()))),
            ),
            F::new("voltage_v", "Line-to-line voltage", "V", positive(None, 1.0)),
            F::new("power_factor", "Power factor", "", positive(Some(1.0), 0.01)),
            F::new("power_kw", "Real power", "kW", number(0.0, None, 0.1)),
            F::new("current_a", "Line current", "A", number(0.0, None, 0.1)),
        ],
        CalculatorKind::Welder => vec![
            F::new(
                "welder_type",
                "Welder type",
                "",
                choice(WelderType::ALL.iter().map(|w| (w.key(), w.display_name().to_string()))),
            ),
            F::new("rated_primary_a", "Rated primary current", "A", positive(None, 0.1)),
            F::new("duty_cycle_pct", "Duty cycle", "%", positive(Some(100.0), 5.0)),
            F::new("i1eff_a", "I1eff (optional)", "A", number(0.0, None, 0.1)),
        ],
        CalculatorKind::PowerConversion => vec![
            F::new(
                "conversion",
                "Conversion",
                "",
                choice(Conversion::ALL.iter().map(|c| (c.key(), c.display_name().to_string()))),
            ),
            F::new("value", "Value", "", positive(None, 0.1)),
            F::new("phase", "System", "", phases()),
            F::new("voltage_v", "Voltage", "V", positive(None, 1.0)),
            F::new("power_factor", "Power factor", "", positive(Some(1.0), 0.01)),
        ],
        CalculatorKind::OhmsLaw => vec![
            F::new("voltage_v", "Voltage", "V", number(0.0, None, 0.1)),
            F::new("current_a", "Current", "A", number(0.0, None, 0.01)),
            F::new("resistance_ohms", "Resistance", "Ω", number(0.0, None, 0.01)),
            F::new("power_w", "Power", "W", number(0.0, None, 1.0)),
        ],
        CalculatorKind::Grounding => vec![
            F::new(
                "kind",
                "Conductor",
                "",
                choice(GroundingKind::ALL.iter().map(|k| (k.key(), k.display_name().to_string()))),
            ),
            F::new("material", "Grounding conductor material", "", materials()),
            F::new("ocpd_rating_a", "Overcurrent device rating", "A", positive(None, 1.0)),
            F::new("ungrounded_minimum", "Ungrounded size for ampacity", "", gauges(|_| true)),
            F::new("ungrounded_actual", "Ungrounded size installed", "", gauges(|_| true)),
            F::new("service_conductor", "Largest service conductor", "", gauges(|_| true)),
            F::new("service_material", "Service conductor material", "", materials()),
            F::new(
                "electrode",
                "Electrode",
                "",
                choice(ElectrodeType::ALL.iter().map(|e| (e.key(), e.display_name().to_string()))),
            ),
        ],
    };
    fields.push(label_field());
    fields
}

// ============================================================================
// Value conversion
// ============================================================================

fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{x:.0}")
    } else {
        x.to_string()
    }
}

/// Render a JSON value from a default input as form text
fn value_to_text(kind: &FieldKind, value: &Value) -> String {
    match (kind, value) {
        (FieldKind::ConductorList, v) => serde_json::from_value::<Vec<ConductorGroup>>(v.clone())
            .map(|groups| format_conductor_list(&groups))
            .unwrap_or_default(),
        (FieldKind::Toggle, Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        (_, Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_default(),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Null) => String::new(),
        (_, other) => other.to_string(),
    }
}

fn parse_toggle(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Outcome of normalizing typed text
enum Normalized {
    Value(String),
    UseDefault,
}

fn normalize(spec: &FieldSpec, raw: &str) -> CalcResult<Normalized> {
    let trimmed = raw.trim();
    let invalid = |reason: String| CalcError::invalid_input(spec.key, raw, reason);

    match &spec.kind {
        FieldKind::Number { min, max, nonzero, .. } => {
            if trimmed.is_empty() {
                return Ok(Normalized::UseDefault);
            }
            let x: f64 = trimmed.parse().map_err(|_| invalid("Enter a number".to_string()))?;
            if !x.is_finite() {
                return Err(invalid("Enter a finite number".to_string()));
            }
            if *nonzero && x == 0.0 {
                return Ok(Normalized::UseDefault);
            }
            if let Some(lo) = min {
                if x < *lo {
                    return Err(invalid(format!("Must be at least {lo}")));
                }
            }
            if let Some(hi) = max {
                if x > *hi {
                    return Err(invalid(format!("Must be at most {hi}")));
                }
            }
            Ok(Normalized::Value(format_number(x)))
        }
        FieldKind::Integer { min, max } => {
            if trimmed.is_empty() {
                return Ok(Normalized::UseDefault);
            }
            let n: u32 = trimmed.parse().map_err(|_| invalid("Enter a whole number".to_string()))?;
            if n == 0 && *min > 0 {
                return Ok(Normalized::UseDefault);
            }
            if n < *min || n > *max {
                return Err(invalid(format!("Must be between {min} and {max}")));
            }
            Ok(Normalized::Value(n.to_string()))
        }
        FieldKind::Choice { options } => options
            .iter()
            .find(|(k, l)| k == trimmed || k.eq_ignore_ascii_case(trimmed) || l.eq_ignore_ascii_case(trimmed))
            .map(|(k, _)| Normalized::Value(k.clone()))
            .ok_or_else(|| invalid("Not one of the available options".to_string())),
        FieldKind::Toggle => parse_toggle(trimmed)
            .map(|b| Normalized::Value((if b { "yes" } else { "no" }).to_string()))
            .ok_or_else(|| invalid("Enter yes or no".to_string())),
        FieldKind::ConductorList => {
            let groups = parse_conductor_list(trimmed)?;
            if groups.is_empty() {
                Ok(Normalized::UseDefault)
            } else {
                Ok(Normalized::Value(format_conductor_list(&groups)))
            }
        }
        FieldKind::Text => Ok(Normalized::Value(raw.to_string())),
    }
}

/// Convert stored form text to the JSON value the input struct expects
fn text_to_value(spec: &FieldSpec, text: &str) -> CalcResult<Value> {
    let invalid = |reason: &str| CalcError::invalid_input(spec.key, text, reason);
    match &spec.kind {
        FieldKind::Number { .. } => {
            let x: f64 = text.parse().map_err(|_| invalid("Enter a number"))?;
            serde_json::Number::from_f64(x).map(Value::Number).ok_or_else(|| invalid("Enter a finite number"))
        }
        FieldKind::Integer { .. } => text
            .parse::<u32>()
            .map(Value::from)
            .map_err(|_| invalid("Enter a whole number")),
        FieldKind::Toggle => parse_toggle(text).map(Value::Bool).ok_or_else(|| invalid("Enter yes or no")),
        FieldKind::ConductorList => serde_json::to_value(parse_conductor_list(text)?)
            .map_err(|e| CalcError::malformed(e.to_string())),
        FieldKind::Choice { .. } | FieldKind::Text => Ok(Value::String(text.to_string())),
    }
}

// ============================================================================
// Form state
// ============================================================================

/// Current values of one calculator's form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    kind: CalculatorKind,
    fields: Vec<FieldSpec>,
    defaults: Vec<String>,
    values: Vec<String>,
    errors: BTreeMap<String, String>,
}

impl FormState {
    /// A form populated with the calculator's defaults
    pub fn new(kind: CalculatorKind) -> Self {
        let fields = fields(kind);
        let defaults_json = serde_json::to_value(CalculationItem::default_for(kind)).unwrap_or(Value::Null);
        let defaults: Vec<String> = fields
            .iter()
            .map(|f| value_to_text(&f.kind, defaults_json.get(f.key).unwrap_or(&Value::Null)))
            .collect();
        FormState {
            kind,
            fields,
            values: defaults.clone(),
            defaults,
            errors: BTreeMap::new(),
        }
    }

    /// A form with configured defaults applied
    pub fn with_settings(kind: CalculatorKind, settings: &Settings) -> Self {
        let mut form = FormState::new(kind);
        form.apply_settings(settings);
        form
    }

    pub fn kind(&self) -> CalculatorKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Current text of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index_of(key).map(|i| self.values[i].as_str())
    }

    /// Default text of a field
    pub fn default_of(&self, key: &str) -> Option<&str> {
        self.index_of(key).map(|i| self.defaults[i].as_str())
    }

    /// `(key, value)` pairs in field order
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().zip(&self.values).map(|(f, v)| (f.key, v.as_str()))
    }

    /// Per-field validation messages
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Set a field from user text.
    ///
    /// Invalid text is kept (so the user can correct it) and the field is
    /// flagged, which suppresses the result until it is fixed. Unknown keys
    /// are rejected without changing anything.
    pub fn set(&mut self, key: &str, raw: &str) -> CalcResult<()> {
        let index = self
            .index_of(key)
            .ok_or_else(|| CalcError::invalid_input(key, raw, format!("Unknown field for {}", self.kind.slug())))?;

        match normalize(&self.fields[index], raw) {
            Ok(Normalized::Value(v)) => {
                self.values[index] = v;
                self.errors.remove(key);
                Ok(())
            }
            Ok(Normalized::UseDefault) => {
                tracing::debug!(field = key, raw, "empty or zero value, using default");
                self.values[index] = self.defaults[index].clone();
                self.errors.remove(key);
                Ok(())
            }
            Err(e) => {
                self.values[index] = raw.to_string();
                self.errors.insert(key.to_string(), e.to_string());
                Err(e)
            }
        }
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
    }

    /// Use configured defaults for the fields this form has.
    pub fn apply_settings(&mut self, settings: &Settings) {
        let d = &settings.defaults;
        let overrides = [
            ("material", d.material.key().to_string()),
            ("max_drop_pct", format_number(d.max_drop_pct)),
            ("ambient_temp_c", format_number(d.ambient_temp_c)),
            ("insulation_rating", d.insulation_rating.key().to_string()),
        ];
        for (key, value) in overrides {
            if let Some(i) = self.index_of(key) {
                let unchanged = self.values[i] == self.defaults[i];
                self.defaults[i] = value.clone();
                if unchanged {
                    self.values[i] = value;
                }
            }
        }
    }

    /// Build the typed calculation input.
    pub fn to_item(&self) -> CalcResult<CalculationItem> {
        if let Some((key, message)) = self.errors.iter().next() {
            let value = self.get(key).unwrap_or_default();
            return Err(CalcError::invalid_input(key.clone(), value, message.clone()));
        }

        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.kind.type_tag().to_string()));
        for (spec, text) in self.fields.iter().zip(&self.values) {
            map.insert(spec.key.to_string(), text_to_value(spec, text)?);
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| CalcError::malformed(e.to_string()))
    }

    /// Run the calculation for the current values.
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        self.to_item()?.calculate()
    }

    /// Result to display, or `None` while any input is invalid.
    pub fn result(&self) -> Option<CalculationOutput> {
        self.calculate().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_to_item() {
        for kind in CalculatorKind::ALL {
            let form = FormState::new(kind);
            let item = form.to_item().unwrap();
            assert_eq!(item, CalculationItem::default_for(kind), "{kind:?}");
        }
    }

    #[test]
    fn test_default_text() {
        let form = FormState::new(CalculatorKind::VoltageDrop);
        assert_eq!(form.get("gauge"), Some("12"));
        assert_eq!(form.get("length"), Some("100"));
        assert_eq!(form.get("phase"), Some("single"));

        let form = FormState::new(CalculatorKind::BoxFill);
        assert_eq!(form.get("conductors"), Some("4x12"));
        assert_eq!(form.get("clamps"), Some("no"));
    }

    #[test]
    fn test_set_and_calculate() {
        let mut form = FormState::new(CalculatorKind::VoltageDrop);
        form.set("phase", "Three-phase").unwrap();
        form.set("gauge", "10 AWG").unwrap();
        assert_eq!(form.get("phase"), Some("three"));
        assert_eq!(form.get("gauge"), Some("10"));
        match form.result() {
            Some(CalculationOutput::VoltageDrop(r)) => assert!(r.voltage_drop_v > 0.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut form = FormState::new(CalculatorKind::OhmsLaw);
        assert!(form.set("gauge", "12").is_err());
        assert!(form.is_valid());
    }

    #[test]
    fn test_invalid_value_suppresses_result() {
        let mut form = FormState::new(CalculatorKind::VoltageDrop);
        assert!(form.set("current_a", "abc").is_err());
        assert_eq!(form.get("current_a"), Some("abc"));
        assert!(form.result().is_none());
        assert!(form.errors().contains_key("current_a"));

        form.set("current_a", "15").unwrap();
        assert!(form.result().is_some());
    }

    #[test]
    fn test_zero_falls_back_to_default() {
        let mut form = FormState::new(CalculatorKind::VoltageDrop);
        form.set("voltage_v", "0").unwrap();
        assert_eq!(form.get("voltage_v"), Some("120"));
        form.set("parallel_sets", "").unwrap();
        assert_eq!(form.get("parallel_sets"), Some("1"));

        // Zero is a real value for Ohm's law
        let mut form = FormState::new(CalculatorKind::OhmsLaw);
        form.set("voltage_v", "120").unwrap();
        form.set("current_a", "10").unwrap();
        form.set("voltage_v", "0").unwrap();
        assert_eq!(form.get("voltage_v"), Some("0"));
    }

    #[test]
    fn test_range_checks() {
        let mut form = FormState::new(CalculatorKind::ThreePhase);
        assert!(form.set("power_factor", "1.5").is_err());
        let mut form = FormState::new(CalculatorKind::WireSize);
        assert!(form.set("current_carrying_conductors", "500").is_err());
    }

    #[test]
    fn test_conductor_list_field() {
        let mut form = FormState::new(CalculatorKind::ConduitFill);
        form.set("conductors", "3 x 4/0, 1x2").unwrap();
        assert_eq!(form.get("conductors"), Some("3x4/0,1x2"));
        assert!(form.set("conductors", "3x99").is_err());

        assert!(form.set("conductors", "4294967295x12,1x12").is_err());
        assert!(form.errors().contains_key("conductors"));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_reset() {
        let mut form = FormState::new(CalculatorKind::Welder);
        form.set("rated_primary_a", "80").unwrap();
        let _ = form.set("duty_cycle_pct", "x");
        form.reset();
        assert_eq!(form, FormState::new(CalculatorKind::Welder));
    }

    #[test]
    fn test_apply_settings() {
        let mut settings = Settings::default();
        settings.defaults.material = ConductorMaterial::Aluminum;
        settings.defaults.max_drop_pct = 5.0;

        let form = FormState::with_settings(CalculatorKind::VoltageDrop, &settings);
        assert_eq!(form.get("material"), Some("aluminum"));
        assert_eq!(form.get("max_drop_pct"), Some("5"));

        // Fields the form lacks are ignored
        let form = FormState::with_settings(CalculatorKind::OhmsLaw, &settings);
        assert_eq!(form.get("material"), None);
    }

    #[test]
    fn test_every_field_has_a_default() {
        for kind in CalculatorKind::ALL {
            let form = FormState::new(kind);
            for (key, value) in form.values() {
                if key != "label" {
                    assert!(!value.is_empty(), "{kind:?}.{key}");
                }
            }
        }
    }
}
