//! Listing commands: calculators, fields, and reference tables.

use anyhow::Result;
use calc_core::form::FormState;
use calc_core::routes::all_pages;
use calc_core::tables::ReferenceTable;
use calc_core::{CalculatorKind, Page, Settings};
use clap::Args;

/// Arguments for `fields`
#[derive(Args)]
pub struct FieldsArgs {
    /// Calculator slug (e.g. voltage-drop)
    pub calculator: CalculatorKind,
}

/// Arguments for `table`
#[derive(Args)]
pub struct TableArgs {
    /// Table slug or part of it (e.g. awg, ampacity, box-fill)
    pub name: ReferenceTable,
}

/// Print every page: home, calculators, then reference guides.
pub fn list() -> Result<()> {
    for page in all_pages() {
        let blurb = match page {
            Page::Calculator(kind) => kind.description(),
            _ => page.title(),
        };
        println!("  {:<36} {}", page.path(), blurb);
    }
    Ok(())
}

/// Print a calculator's fields with their defaults.
pub fn fields(args: FieldsArgs, settings: &Settings) -> Result<()> {
    let form = FormState::with_settings(args.calculator, settings);
    println!("{} ({})", args.calculator.title(), args.calculator.path());
    println!();
    for field in form.fields() {
        let default = form.default_of(field.key).unwrap_or_default();
        let unit = if field.unit.is_empty() {
            String::new()
        } else {
            format!(" [{}]", field.unit)
        };
        println!("  {:<28} {}{}", field.key, field.label, unit);
        println!("  {:<28} default: {:?}  values: {}", "", default, field.hint());
    }
    Ok(())
}

/// Print a reference table.
pub fn table(args: TableArgs) -> Result<()> {
    print!("{}", args.name.render().to_text());
    Ok(())
}
