//! Finalized report value

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use serf_core::ReportKind;

use crate::builder::ReportBuilder;
use crate::node::DocumentNode;

const FRAME: &str = "===========================================";

/// A finalized report.
///
/// Only [`ReportBuilder`] creates reports, and a finished report exposes
/// read-only accessors. Use [`Report::to_builder`] to derive a modified copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub(crate) title: String,
    pub(crate) date: NaiveDate,
    pub(crate) country: String,
    pub(crate) kind: Option<ReportKind>,
    pub(crate) sections: Vec<DocumentNode>,
    pub(crate) footer: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) company: Option<String>,
    pub(crate) signing_authority: Option<String>,
    pub(crate) data: BTreeMap<String, Value>,
}

impl Report {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn kind(&self) -> Option<ReportKind> {
        self.kind
    }

    pub fn sections(&self) -> &[DocumentNode] {
        &self.sections
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn signing_authority(&self) -> Option<&str> {
        self.signing_authority.as_deref()
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    pub fn data_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Builder pre-loaded with a copy of this report
    pub fn to_builder(&self) -> ReportBuilder {
        ReportBuilder::from_report(self.clone())
    }

    /// Render the whole report as plain text
    pub fn render_content(&self) -> String {
        let mut out = String::new();

        out.push_str(FRAME);
        out.push('\n');
        out.push_str(&format!("REPORT: {}\n", self.title));
        out.push_str(&format!("Date: {} | Country: {}", self.date, self.country));
        if let Some(kind) = self.kind {
            out.push_str(&format!(" | Kind: {}", kind));
        }
        out.push('\n');
        out.push_str(FRAME);
        out.push_str("\n\n");

        for section in &self.sections {
            out.push_str(&section.render());
            out.push('\n');
        }

        if !self.data.is_empty() {
            out.push_str("--- DATA ---\n");
            for (key, value) in &self.data {
                match value {
                    Value::String(s) => out.push_str(&format!("{}: {}\n", key, s)),
                    other => out.push_str(&format!("{}: {}\n", key, other)),
                }
            }
        }

        if let Some(footer) = self.footer.as_deref().filter(|f| !f.is_empty()) {
            out.push_str("\n---\n");
            out.push_str(footer);
        }

        out
    }
}
