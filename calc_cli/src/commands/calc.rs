//! `calc` and `open`: run a calculator and report the result.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use calc_core::form::FormState;
use calc_core::pdf::render_summary_pdf;
use calc_core::report::PrintSummary;
use calc_core::{
    parse_share_url, share_url, CalcError, CalculationItem, CalculationOutput, CalculatorKind, Settings,
};
use clap::Args;
use serde_json::{json, Value};
use tracing::info;

/// How to report a result
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Print input and result as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a share link for the inputs
    #[arg(long)]
    pub share: bool,

    /// Print the full printable summary
    #[arg(long)]
    pub print: bool,

    /// Write the printable summary as PDF
    #[arg(long, value_name = "FILE")]
    pub pdf: Option<PathBuf>,
}

/// Arguments for `calc`
#[derive(Args)]
pub struct CalcArgs {
    /// Calculator slug (see `voltwise list`)
    pub calculator: CalculatorKind,

    /// Set a field (repeatable)
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `open`
#[derive(Args)]
pub struct OpenArgs {
    /// Share link, e.g. https://example.com/calculators/voltage-drop?gauge=10
    pub url: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn split_assignment(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{pair}'"))
}

/// Apply `KEY=VALUE` assignments to a form.
pub fn apply_assignments(form: &mut FormState, assignments: &[String]) -> Result<()> {
    for pair in assignments {
        let (key, value) = split_assignment(pair)?;
        form.set(key, value).with_context(|| format!("Invalid value for {key}"))?;
    }
    Ok(())
}

/// Run `calc`.
pub fn execute(args: CalcArgs, settings: &Settings) -> Result<()> {
    let mut form = FormState::with_settings(args.calculator, settings);
    apply_assignments(&mut form, &args.set)?;
    report(&form, &args.output, settings)
}

/// Run `open`.
pub fn open(args: OpenArgs, settings: &Settings) -> Result<()> {
    let form = parse_share_url(&args.url).context("Could not open share link")?;
    info!(calculator = form.kind().slug(), "opened share link");
    report(&form, &args.output, settings)
}

/// Single JSON document for `--json`; the share link rides along when asked for.
fn json_body(item: &CalculationItem, result: &CalculationOutput, link: Option<&str>) -> Value {
    let mut body = json!({ "input": item, "result": result });
    if let Some(link) = link {
        body["share_url"] = Value::from(link);
    }
    body
}

fn print_error_json(error: &CalcError) {
    let body = json!({ "error": error, "code": error.error_code() });
    if let Ok(text) = serde_json::to_string_pretty(&body) {
        println!("{text}");
    }
}

/// Calculate and emit the requested outputs.
pub fn report(form: &FormState, output: &OutputArgs, settings: &Settings) -> Result<()> {
    let kind = form.kind();
    let calculated = form.to_item().and_then(|item| item.calculate().map(|result| (item, result)));

    let (item, result) = match calculated {
        Ok(pair) => pair,
        Err(e) => {
            if output.json {
                print_error_json(&e);
            }
            return Err(e).with_context(|| format!("{} could not calculate", kind.title()));
        }
    };

    let link = if output.share {
        Some(share_url(&settings.site.base_url, form)?)
    } else {
        None
    };

    if output.json {
        println!("{}", serde_json::to_string_pretty(&json_body(&item, &result, link.as_deref()))?);
    } else {
        if output.print {
            let summary = PrintSummary::from_output(form, &result, settings);
            print!("{}", summary.render_text());
        } else {
            print_rows(kind, &result.summary_rows());
        }
        if let Some(link) = &link {
            println!("{link}");
        }
    }

    if let Some(path) = &output.pdf {
        let summary = PrintSummary::from_output(form, &result, settings);
        let bytes = render_summary_pdf(&summary)?;
        std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote pdf");
        if !output.json {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn print_rows(kind: CalculatorKind, rows: &[calc_core::calculations::SummaryRow]) {
    println!("{}", kind.title());
    for row in rows {
        if row.unit.is_empty() {
            println!("  {:<28} {}", row.label, row.value);
        } else {
            println!("  {:<28} {} {}", row.label, row.value, row.unit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("gauge=1/0").unwrap(), ("gauge", "1/0"));
        assert_eq!(split_assignment("label=a=b").unwrap(), ("label", "a=b"));
        assert!(split_assignment("gauge").is_err());
    }

    #[test]
    fn test_apply_assignments() {
        let mut form = FormState::new(CalculatorKind::VoltageDrop);
        apply_assignments(&mut form, &["gauge=10".to_string(), "phase=three".to_string()]).unwrap();
        assert_eq!(form.get("gauge"), Some("10"));
        assert_eq!(form.get("phase"), Some("three"));

        assert!(apply_assignments(&mut form, &["nope=1".to_string()]).is_err());
        assert!(apply_assignments(&mut form, &["current_a=lots".to_string()]).is_err());
    }

    #[test]
    fn test_json_body_carries_share_link() {
        let form = FormState::new(CalculatorKind::ThreePhase);
        let item = form.to_item().unwrap();
        let result = item.calculate().unwrap();
        let link = share_url("https://example.com", &form).unwrap();

        let body = json_body(&item, &result, Some(&link));
        let text = serde_json::to_string_pretty(&body).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["share_url"], Value::from(link.as_str()));
        assert_eq!(parsed["input"]["type"], "ThreePhase");

        assert!(json_body(&item, &result, None).get("share_url").is_none());
    }

    #[test]
    fn test_report_invalid_form_errors() {
        let mut form = FormState::new(CalculatorKind::OhmsLaw);
        form.set("voltage_v", "120").unwrap();
        let output = OutputArgs::default();
        assert!(report(&form, &output, &Settings::default()).is_err());
    }
}
