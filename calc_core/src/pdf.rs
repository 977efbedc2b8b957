//! # PDF Export
//!
//! Renders a [`PrintSummary`] to PDF using Typst, compiled in-process.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected with `{{PLACEHOLDER}}` replacement before compilation
//! - Fonts come from `typst-assets`, so no system fonts are needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::form::FormState;
//! use calc_core::pdf::render_summary_pdf;
//! use calc_core::report::PrintSummary;
//! use calc_core::routes::CalculatorKind;
//! use calc_core::settings::Settings;
//!
//! let form = FormState::new(CalculatorKind::VoltageDrop);
//! let summary = PrintSummary::build(&form, &Settings::default()).unwrap();
//! let pdf_bytes = render_summary_pdf(&summary).unwrap();
//! std::fs::write("voltage_drop.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::SummaryRow;
use crate::errors::{CalcError, CalcResult};
use crate::report::PrintSummary;

/// Bundled fonts, parsed once per process
static FONTS: Lazy<(Vec<Font>, LazyHash<FontBook>)> = Lazy::new(|| {
    let fonts: Vec<Font> = typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect();
    let book = LazyHash::new(FontBook::from_fonts(&fonts));
    (fonts, book)
});

// ============================================================================
// Typst World
// ============================================================================

/// Compiles a single detached summary source; there are no other files.
struct SummaryWorld {
    main: Source,
    library: LazyHash<Library>,
}

impl SummaryWorld {
    fn new(source: String) -> Self {
        SummaryWorld {
            main: Source::detached(source),
            library: LazyHash::new(Library::default()),
        }
    }

    fn not_found(id: FileId) -> FileError {
        FileError::NotFound(id.vpath().as_rootless_path().into())
    }
}

impl World for SummaryWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONTS.1
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(Self::not_found(id))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(Self::not_found(id))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.0.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Local::now();
        Datetime::from_ymd(now.year(), u8::try_from(now.month()).ok()?, u8::try_from(now.day()).ok()?)
    }
}

// ============================================================================
// Template
// ============================================================================

const SUMMARY_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 0.9in, bottom: 0.9in, left: 0.9in, right: 0.9in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Voltwise Electrical Calculators]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{CODE_EDITION}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "DejaVu Sans Mono", size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[{{TITLE}}]
    {{LABEL_BLOCK}}
  ]
]

#v(8pt)

#grid(
  columns: (auto, 1fr),
  gutter: 6pt,
  [*Page:*], [{{ROUTE}}],
  [*Prepared by:*], [{{PREPARED_BY}}],
)

#v(12pt)

== Inputs

#table(
  columns: (1fr, auto, auto),
  stroke: 0.5pt + gray,
  inset: 6pt,
  [*Input*], [*Value*], [*Unit*],
{{INPUT_ROWS}}
)

#v(12pt)

== Results

#table(
  columns: (1fr, auto, auto),
  stroke: 0.5pt + gray,
  inset: 6pt,
  fill: (_, row) => if row == 0 { rgb("#e8f0e8") },
  [*Result*], [*Value*], [*Unit*],
{{RESULT_ROWS}}
)

#v(12pt)

== Notes

{{NOTES}}
"##;

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '~' => format!("\\{c}"),
            _ => c.to_string(),
        })
        .collect()
}

fn table_rows(rows: &[SummaryRow]) -> String {
    rows.iter()
        .map(|r| {
            format!(
                "  [{}], [{}], [{}],",
                escape_typst(&r.label),
                escape_typst(&r.value),
                escape_typst(&r.unit)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace every `{{NAME}}` in one pass. Substituted text is never
/// rescanned, and unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find("}}")
            .and_then(|end| values.iter().find(|(name, _)| *name == &after[..end]).map(|(_, v)| (end, v)));
        match value {
            Some((end, v)) => {
                out.push_str(v);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn join_messages(diags: &[typst::diag::SourceDiagnostic]) -> String {
    diags.iter().map(|d| d.message.as_str()).collect::<Vec<_>>().join("; ")
}

/// Typst source for a summary
fn summary_source(summary: &PrintSummary) -> String {
    let label_block = summary
        .label
        .as_ref()
        .map(|l| format!("#v(4pt)\n    #text(size: 13pt)[{}]", escape_typst(l)))
        .unwrap_or_default();
    let notes = summary
        .notes
        .iter()
        .map(|n| format!("- {}", escape_typst(n)))
        .collect::<Vec<_>>()
        .join("\n");

    let date = summary.generated_at.format("%Y-%m-%d").to_string();
    fill_template(
        SUMMARY_TEMPLATE,
        &[
            ("TITLE", escape_typst(&summary.title)),
            ("LABEL_BLOCK", label_block),
            ("ROUTE", escape_typst(&summary.route)),
            ("CODE_EDITION", escape_typst(&summary.code_edition)),
            ("DATE", date),
            ("PREPARED_BY", escape_typst(summary.prepared_by.as_deref().unwrap_or("-"))),
            ("INPUT_ROWS", table_rows(&summary.inputs)),
            ("RESULT_ROWS", table_rows(&summary.results)),
            ("NOTES", notes),
        ],
    )
}

/// Render a print summary to PDF bytes.
///
/// # Errors
///
/// `CalcError::Render` if Typst compilation or PDF export fails.
pub fn render_summary_pdf(summary: &PrintSummary) -> CalcResult<Vec<u8>> {
    let world = SummaryWorld::new(summary_source(summary));
    let document = typst::compile(&world)
        .output
        .map_err(|diags| CalcError::render("Typst compilation", join_messages(&diags)))?;
    let bytes = typst_pdf::pdf(&document, &PdfOptions::default())
        .map_err(|diags| CalcError::render("PDF export", join_messages(&diags)))?;

    tracing::debug!(title = %summary.title, bytes = bytes.len(), "rendered summary pdf");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::routes::CalculatorKind;
    use crate::settings::Settings;

    #[test]
    fn test_fill_template_single_pass() {
        let values = [("LABEL", "{{ROWS}}".to_string()), ("ROWS", "rows".to_string())];
        assert_eq!(fill_template("{{LABEL}} / {{ROWS}}", &values), "{{ROWS}} / rows");
        assert_eq!(fill_template("{{OTHER}} {{ROWS", &values), "{{OTHER}} {{ROWS");
    }

    #[test]
    fn test_label_placeholder_not_expanded() {
        let mut form = FormState::new(CalculatorKind::OhmsLaw);
        form.set("voltage_v", "120").unwrap();
        form.set("current_a", "10").unwrap();
        form.set("label", "{{INPUT_ROWS}}").unwrap();
        let summary = PrintSummary::build(&form, &Settings::default()).unwrap();

        let source = summary_source(&summary);
        assert!(source.contains("#text(size: 13pt)[{{INPUT_ROWS}}]"));
        assert_eq!(source.matches(table_rows(&summary.inputs).as_str()).count(), 1);

        let pdf = render_summary_pdf(&summary).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("1/0 #2 [x]"), "1\\/0 \\#2 \\[x\\]");
        assert_eq!(escape_typst("plain text"), "plain text");
    }

    #[test]
    fn test_pdf_generation() {
        let mut form = FormState::new(CalculatorKind::ConduitFill);
        form.set("label", "Feeder *A* <main>").unwrap();
        let summary = PrintSummary::build(&form, &Settings::default()).unwrap();

        let pdf = render_summary_pdf(&summary);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
