//! `prompt`: fill in a calculator one field at a time.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use calc_core::form::FormState;
use calc_core::{CalculatorKind, Settings};
use clap::Args;

use super::calc::{report, OutputArgs};

/// Arguments for `prompt`
#[derive(Args)]
pub struct PromptArgs {
    /// Calculator slug (see `voltwise list`)
    pub calculator: CalculatorKind,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Ask for every field; Enter keeps the shown value. Invalid entries are
/// reported and asked again. Returns at end of input.
pub fn fill_form<R: BufRead, W: Write>(form: &mut FormState, mut input: R, mut out: W) -> io::Result<()> {
    let fields = form.fields().to_vec();
    for field in fields {
        loop {
            let current = form.get(field.key).unwrap_or_default().to_string();
            let unit = if field.unit.is_empty() {
                String::new()
            } else {
                format!(" ({})", field.unit)
            };
            write!(out, "{}{} [{}]: ", field.label, unit, current)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            let entry = line.trim_end_matches(['\r', '\n']);
            if entry.trim().is_empty() {
                break;
            }
            match form.set(field.key, entry) {
                Ok(()) => break,
                Err(e) => {
                    writeln!(out, "  {e}")?;
                    writeln!(out, "  expected: {}", field.hint())?;
                    // Put the previous value back before asking again
                    let _ = form.set(field.key, &current);
                }
            }
        }
    }
    Ok(())
}

/// Run `prompt`.
pub fn execute(args: PromptArgs, settings: &Settings) -> Result<()> {
    let mut form = FormState::with_settings(args.calculator, settings);
    println!("{}", args.calculator.title());
    println!("{}", args.calculator.description());
    println!();

    let stdin = io::stdin();
    fill_form(&mut form, stdin.lock(), io::stdout())?;
    println!();
    report(&form, &args.output, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_enter_keeps_defaults() {
        let mut form = FormState::new(CalculatorKind::Welder);
        let input = Cursor::new("\n\n\n\n\n");
        let mut out = Vec::new();
        fill_form(&mut form, input, &mut out).unwrap();
        assert_eq!(form, FormState::new(CalculatorKind::Welder));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Rated primary current (A) [50]: "));
    }

    #[test]
    fn test_invalid_entry_is_asked_again() {
        let mut form = FormState::new(CalculatorKind::Welder);
        // welder_type, rated_primary_a (bad then good), then defaults
        let input = Cursor::new("resistance\nlots\n100\n15\n\nlabel\n");
        let mut out = Vec::new();
        fill_form(&mut form, input, &mut out).unwrap();

        assert_eq!(form.get("welder_type"), Some("resistance"));
        assert_eq!(form.get("rated_primary_a"), Some("100"));
        assert_eq!(form.get("duty_cycle_pct"), Some("15"));
        assert_eq!(form.get("label"), Some("label"));
        assert!(form.is_valid());
        assert!(String::from_utf8(out).unwrap().contains("expected: >= 0"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut form = FormState::new(CalculatorKind::OhmsLaw);
        fill_form(&mut form, Cursor::new("12\n"), Vec::new()).unwrap();
        assert_eq!(form.get("voltage_v"), Some("12"));
        assert_eq!(form.get("current_a"), Some("0"));
    }
}
