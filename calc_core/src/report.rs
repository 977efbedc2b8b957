//! # Print Summary
//!
//! The printable page behind each calculator's "Print" button: inputs as
//! entered, results, and code notes. Rendered as fixed-width text here and as
//! PDF in [`crate::pdf`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{CalculationOutput, SummaryRow};
use crate::errors::CalcResult;
use crate::form::{FieldKind, FormState};
use crate::routes::CalculatorKind;
use crate::settings::Settings;

const PAGE_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 32;

/// Everything printed for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSummary {
    pub title: String,
    pub route: String,
    pub label: Option<String>,
    pub code_edition: String,
    pub generated_at: DateTime<Utc>,
    pub inputs: Vec<SummaryRow>,
    pub results: Vec<SummaryRow>,
    pub notes: Vec<String>,
    pub prepared_by: Option<String>,
}

/// Code notes printed under each calculator's results
fn notes(kind: CalculatorKind) -> Vec<&'static str> {
    let specific: &[&str] = match kind {
        CalculatorKind::VoltageDrop => &[
            "Resistance from NEC Chapter 9 Table 8 (uncoated stranded conductors, 75°C).",
            "NEC 210.19(A) Informational Note No. 4 recommends at most 3% drop on branch circuits.",
        ],
        CalculatorKind::WireSize => &[
            "Ampacity from NEC Table 310.16 with 310.15(B)(1) and 310.15(C)(1) corrections.",
            "Terminations per 110.14(C); small conductors limited per 240.4(D).",
        ],
        CalculatorKind::WireResistance => &["Table 8 values corrected with R2 = R1 [1 + α (T2 − 75)]."],
        CalculatorKind::BoxFill => &["Volume allowances per NEC 314.16(B); box volumes per Table 314.16(A)."],
        CalculatorKind::ConduitFill => &[
            "Fill limits per NEC Chapter 9 Table 1; areas per Tables 4 and 5.",
            "Equipment grounding conductors count toward fill.",
        ],
        CalculatorKind::ThreePhase => &["Balanced load, line-to-line voltage."],
        CalculatorKind::Welder => &["Supply conductors and OCPD per NEC Article 630."],
        CalculatorKind::PowerConversion => &["1 kW = 3412.142 BTU/hr; 1 HP = 0.746 kW."],
        CalculatorKind::OhmsLaw => &[],
        CalculatorKind::Grounding => &["EGC per NEC 250.122; GEC per NEC 250.66."],
    };
    let mut notes = specific.to_vec();
    notes.push("For reference only. Verify with the authority having jurisdiction.");
    notes
}

/// Input rows as printed, with choice keys shown by their labels
fn input_rows(form: &FormState) -> Vec<SummaryRow> {
    form.fields()
        .iter()
        .zip(form.values().map(|(_, v)| v))
        .filter(|(field, _)| field.key != "label")
        .map(|(field, value)| {
            let shown = match &field.kind {
                FieldKind::Choice { options } => options
                    .iter()
                    .find(|(k, _)| k == value)
                    .map(|(_, l)| l.clone())
                    .unwrap_or_else(|| value.to_string()),
                _ => value.to_string(),
            };
            SummaryRow::new(field.label, shown, field.unit)
        })
        .collect()
}

impl PrintSummary {
    /// Calculate the form and build its summary.
    pub fn build(form: &FormState, settings: &Settings) -> CalcResult<Self> {
        let output = form.calculate()?;
        Ok(Self::from_output(form, &output, settings))
    }

    /// Build a summary from an already computed result.
    pub fn from_output(form: &FormState, output: &CalculationOutput, settings: &Settings) -> Self {
        let kind = form.kind();
        let label = form.get("label").map(str::trim).filter(|l| !l.is_empty()).map(String::from);
        PrintSummary {
            title: kind.title().to_string(),
            route: kind.path(),
            label,
            code_edition: settings.code_edition.clone(),
            generated_at: Utc::now(),
            inputs: input_rows(form),
            results: output.summary_rows(),
            notes: notes(kind).into_iter().map(String::from).collect(),
            prepared_by: settings.prepared_by(),
        }
    }

    /// Fixed-width printable page.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(PAGE_WIDTH);

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{:^width$}\n", self.title, width = PAGE_WIDTH));
        if let Some(label) = &self.label {
            out.push_str(&format!("{:^width$}\n", label, width = PAGE_WIDTH));
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Page:      {}\n", self.route));
        out.push_str(&format!("Code:      {}\n", self.code_edition));
        out.push_str(&format!("Generated: {}\n", self.generated_at.format("%Y-%m-%d %H:%M UTC")));
        if let Some(by) = &self.prepared_by {
            out.push_str(&format!("Prepared:  {by}\n"));
        }

        section(&mut out, "INPUTS", &self.inputs);
        section(&mut out, "RESULTS", &self.results);

        if !self.notes.is_empty() {
            out.push_str("\nNOTES\n");
            for note in &self.notes {
                out.push_str(&format!("  - {note}\n"));
            }
        }
        out.push_str(&"-".repeat(PAGE_WIDTH));
        out.push('\n');
        out
    }
}

fn section(out: &mut String, heading: &str, rows: &[SummaryRow]) {
    out.push('\n');
    out.push_str(heading);
    out.push('\n');
    for row in rows {
        let value = if row.unit.is_empty() {
            row.value.clone()
        } else {
            format!("{} {}", row.value, row.unit)
        };
        out.push_str(&format!("  {:<width$} {}\n", row.label, value, width = LABEL_WIDTH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_drop_summary() {
        let mut form = FormState::new(CalculatorKind::VoltageDrop);
        form.set("label", "Kitchen counter").unwrap();
        let settings = Settings::default();

        let summary = PrintSummary::build(&form, &settings).unwrap();
        assert_eq!(summary.route, "/calculators/voltage-drop");
        assert_eq!(summary.label.as_deref(), Some("Kitchen counter"));
        assert!(summary.inputs.iter().any(|r| r.label == "System" && r.value == "Single-phase"));
        assert!(summary.inputs.iter().all(|r| r.label != "Label"));

        let text = summary.render_text();
        assert!(text.contains("Voltage Drop Calculator"));
        assert!(text.contains("Kitchen counter"));
        assert!(text.contains("7.92 V"));
        assert!(text.contains("NEC 2023"));
        assert!(text.contains("authority having jurisdiction"));
    }

    #[test]
    fn test_prepared_by_from_settings() {
        let form = FormState::new(CalculatorKind::Welder);
        let mut settings = Settings::default();
        settings.report.prepared_by = Some("A. Sparks".to_string());

        let text = PrintSummary::build(&form, &settings).unwrap().render_text();
        assert!(text.contains("Prepared:  A. Sparks"));
    }

    #[test]
    fn test_invalid_form_has_no_summary() {
        let mut form = FormState::new(CalculatorKind::ThreePhase);
        let _ = form.set("voltage_v", "lots");
        assert!(PrintSummary::build(&form, &Settings::default()).is_err());
    }
}
