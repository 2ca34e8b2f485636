//! Step-wise report assembly

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

use serf_core::ReportKind;

use crate::error::{DocumentError, DocumentResult};
use crate::node::DocumentNode;
use crate::report::Report;

/// Accumulates report fields and validates them on [`build`](Self::build).
///
/// Setters chain on `&mut self`, so a builder can be filled across several
/// statements or in a single expression:
///
/// ```
/// use serf_document::{ReportBuilder, Section};
///
/// let report = ReportBuilder::new()
///     .title("Sales Report - PERU")
///     .country("PERU")
///     .add_section(Section::new("SUMMARY").with_content("Total: 0"))
///     .build()
///     .unwrap();
/// assert!(report.render_content().contains("Sales Report - PERU"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    date: Option<NaiveDate>,
    country: Option<String>,
    kind: Option<ReportKind>,
    sections: Vec<DocumentNode>,
    footer: Option<String>,
    author: Option<String>,
    company: Option<String>,
    signing_authority: Option<String>,
    data: BTreeMap<String, Value>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_report(report: Report) -> Self {
        Self {
            title: Some(report.title),
            date: Some(report.date),
            country: Some(report.country),
            kind: report.kind,
            sections: report.sections,
            footer: report.footer,
            author: report.author,
            company: report.company,
            signing_authority: report.signing_authority,
            data: report.data,
        }
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Report date; today (UTC) when never set
    pub fn date(&mut self, date: NaiveDate) -> &mut Self {
        self.date = Some(date);
        self
    }

    pub fn country(&mut self, country: impl Into<String>) -> &mut Self {
        self.country = Some(country.into());
        self
    }

    pub fn kind(&mut self, kind: ReportKind) -> &mut Self {
        self.kind = Some(kind);
        self
    }

    /// Append a section; sections render in insertion order
    pub fn add_section(&mut self, section: impl Into<DocumentNode>) -> &mut Self {
        self.sections.push(section.into());
        self
    }

    /// Replace all sections
    pub fn sections(&mut self, sections: Vec<DocumentNode>) -> &mut Self {
        self.sections = sections;
        self
    }

    pub fn footer(&mut self, footer: impl Into<String>) -> &mut Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn author(&mut self, author: impl Into<String>) -> &mut Self {
        self.author = Some(author.into());
        self
    }

    pub fn company(&mut self, company: impl Into<String>) -> &mut Self {
        self.company = Some(company.into());
        self
    }

    pub fn signing_authority(&mut self, authority: impl Into<String>) -> &mut Self {
        self.signing_authority = Some(authority.into());
        self
    }

    /// Insert a data entry; a repeated key replaces the earlier value
    pub fn data(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Discard everything set so far
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Validate and produce the report.
    ///
    /// On success the builder is left empty and can start a new report. On
    /// failure nothing is consumed, so the caller can fix the missing field
    /// and build again.
    pub fn build(&mut self) -> DocumentResult<Report> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(DocumentError::validation("title required")),
        };
        let country = match self.country.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(DocumentError::validation("country required")),
        };

        let state = std::mem::take(self);
        let report = Report {
            title,
            date: state.date.unwrap_or_else(|| Utc::now().date_naive()),
            country,
            kind: state.kind,
            sections: state.sections,
            footer: state.footer,
            author: state.author,
            company: state.company,
            signing_authority: state.signing_authority,
            data: state.data,
        };

        tracing::debug!(
            title = %report.title,
            country = %report.country,
            kind = ?report.kind,
            sections = report.sections.len(),
            "Report built"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Leaf, Section};

    #[test]
    fn test_minimal_build() {
        let report = ReportBuilder::new().title("X").country("PERU").build().unwrap();
        assert_eq!(report.title(), "X");
        assert_eq!(report.country(), "PERU");
        assert!(report.render_content().contains("X"));
    }

    #[test]
    fn test_missing_title() {
        let err = ReportBuilder::new().country("PERU").build().unwrap_err();
        assert_eq!(err, DocumentError::validation("title required"));

        let err = ReportBuilder::new().title("   ").country("PERU").build().unwrap_err();
        assert_eq!(err, DocumentError::validation("title required"));
    }

    #[test]
    fn test_missing_country() {
        let err = ReportBuilder::new().title("X").build().unwrap_err();
        assert_eq!(err, DocumentError::validation("country required"));
    }

    #[test]
    fn test_failed_build_keeps_state() {
        let mut builder = ReportBuilder::new();
        builder.title("Inventory").add_section(Section::new("STOCK"));
        assert!(builder.build().is_err());

        let report = builder.country("MEXICO").build().unwrap();
        assert_eq!(report.title(), "Inventory");
        assert_eq!(report.sections().len(), 1);
    }

    #[test]
    fn test_successful_build_resets() {
        let mut builder = ReportBuilder::new();
        builder.title("A").country("SPAIN").footer("f");
        builder.build().unwrap();

        assert!(builder.build().is_err());
        let report = builder.title("B").country("PERU").build().unwrap();
        assert_eq!(report.footer(), None);
    }

    #[test]
    fn test_reset() {
        let mut builder = ReportBuilder::new();
        builder.title("A").country("SPAIN").reset();
        assert_eq!(
            builder.build().unwrap_err(),
            DocumentError::validation("title required")
        );
    }

    #[test]
    fn test_sections_keep_insertion_order() {
        let report = ReportBuilder::new()
            .title("Order")
            .country("PERU")
            .add_section(Section::new("FIRST"))
            .add_section(Leaf::new("note", "between"))
            .add_section(Section::new("SECOND"))
            .build()
            .unwrap();

        let names: Vec<&str> = report.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["FIRST", "note", "SECOND"]);
    }

    #[test]
    fn test_optional_fields() {
        let report = ReportBuilder::new()
            .title("Annual")
            .country("CORPORATE")
            .kind(ReportKind::Annual)
            .author("SERF System")
            .company("FinanCorp S.A.")
            .signing_authority("Gerencia General")
            .data("total", "100.00")
            .data("total", "200.00")
            .build()
            .unwrap();

        assert_eq!(report.kind(), Some(ReportKind::Annual));
        assert_eq!(report.author(), Some("SERF System"));
        assert_eq!(report.company(), Some("FinanCorp S.A."));
        assert_eq!(report.signing_authority(), Some("Gerencia General"));
        assert_eq!(report.data_value("total"), Some(&Value::from("200.00")));
    }
}
