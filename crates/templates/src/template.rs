//! Report template value

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

use serf_core::ReportKind;

/// Output format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OutputFormat {
    Pdf,
    Excel,
}

/// Reusable report skeleton.
///
/// Every field is owned, so `clone()` yields an instance that shares no
/// mutable state with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub kind: ReportKind,
    /// Outline tokens, e.g. `HEADER`, `SALES_SUMMARY`, `FOOTER`
    pub structure: Vec<String>,
    pub format: OutputFormat,
    pub styles: BTreeMap<String, String>,
    pub locale: String,
    pub currency: Option<String>,
    pub flags: BTreeMap<String, bool>,
    pub company: Option<String>,
    pub signing_authority: Option<String>,
}

impl Template {
    pub fn new(kind: ReportKind, format: OutputFormat) -> Self {
        Self {
            kind,
            structure: Vec::new(),
            format,
            styles: BTreeMap::new(),
            locale: "es".to_string(),
            currency: None,
            flags: BTreeMap::new(),
            company: None,
            signing_authority: None,
        }
    }

    pub fn with_structure<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.structure = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: bool) -> Self {
        self.flags.insert(key.into(), value);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_company(
        mut self,
        company: impl Into<String>,
        signing_authority: impl Into<String>,
    ) -> Self {
        self.company = Some(company.into());
        self.signing_authority = Some(signing_authority.into());
        self
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Unset flags read as false
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    /// `HEADER|SALES_SUMMARY|...`
    pub fn outline(&self) -> String {
        self.structure.join("|")
    }

    /// One-line summary
    pub fn describe(&self) -> String {
        let mut out = format!("Template {} [{}] - Locale: {}", self.kind, self.format, self.locale);
        if let Some(currency) = &self.currency {
            out.push_str(&format!(" - Currency: {}", currency));
        }
        if !self.flags.is_empty() {
            let flags: Vec<String> = self
                .flags
                .iter()
                .map(|(k, v)| format!("{}={}", k, if *v { "on" } else { "off" }))
                .collect();
            out.push_str(&format!(" - Flags: {}", flags.join(", ")));
        }
        out
    }
}
