//! Document component capability and the undecorated base

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use serf_core::ReportKind;
use serf_document::Report;

/// Metadata map exposed by every component
pub type Metadata = BTreeMap<String, Value>;

/// A renderable document that may carry security layers.
///
/// Implemented by [`BaseComponent`] and by every decorator. Decorators own
/// the component they wrap, so a chain is a single owned value.
pub trait DocumentComponent: Send + Sync {
    /// Final text of this layer
    fn generate_content(&self) -> String;

    /// Metadata of this layer merged over the wrapped layer's
    fn metadata(&self) -> Metadata;

    fn kind(&self) -> Option<ReportKind>;

    fn has_security(&self) -> bool;
}

impl DocumentComponent for Box<dyn DocumentComponent> {
    fn generate_content(&self) -> String {
        (**self).generate_content()
    }

    fn metadata(&self) -> Metadata {
        (**self).metadata()
    }

    fn kind(&self) -> Option<ReportKind> {
        (**self).kind()
    }

    fn has_security(&self) -> bool {
        (**self).has_security()
    }
}

/// Undecorated report
#[derive(Debug, Clone)]
pub struct BaseComponent {
    report: Arc<Report>,
}

impl BaseComponent {
    pub fn new(report: impl Into<Arc<Report>>) -> Self {
        Self {
            report: report.into(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }
}

/// Format a timestamp, falling back to RFC 3339 when the pattern is invalid
pub(crate) fn format_timestamp(at: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        return at.to_rfc3339();
    }
    out
}

fn optional(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

impl DocumentComponent for BaseComponent {
    fn generate_content(&self) -> String {
        self.report.render_content()
    }

    fn metadata(&self) -> Metadata {
        let report = &self.report;
        let mut metadata = Metadata::new();
        metadata.insert("title".into(), Value::from(report.title()));
        metadata.insert("country".into(), Value::from(report.country()));
        metadata.insert("date".into(), Value::from(report.date().to_string()));
        metadata.insert(
            "kind".into(),
            report
                .kind()
                .map(|k| Value::from(k.to_string()))
                .unwrap_or(Value::Null),
        );
        metadata.insert("author".into(), optional(report.author()));
        metadata.insert("company".into(), optional(report.company()));
        metadata.insert(
            "signingAuthority".into(),
            optional(report.signing_authority()),
        );
        metadata.insert("security".into(), Value::Bool(false));
        metadata.insert("watermark".into(), Value::Bool(false));
        metadata.insert("signature".into(), Value::Bool(false));
        metadata.insert("encryption".into(), Value::Bool(false));
        metadata
    }

    fn kind(&self) -> Option<ReportKind> {
        self.report.kind()
    }

    fn has_security(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serf_document::ReportBuilder;

    fn sample_report() -> Report {
        ReportBuilder::new()
            .title("Sales Report - PERU")
            .country("PERU")
            .kind(ReportKind::Sales)
            .author("SERF System")
            .company("FinanCorp S.A.")
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_delegates_to_report() {
        let report = sample_report();
        let base = BaseComponent::new(report.clone());
        assert_eq!(base.generate_content(), report.render_content());
        assert_eq!(base.kind(), Some(ReportKind::Sales));
        assert!(!base.has_security());
    }

    #[test]
    fn test_base_metadata() {
        let metadata = BaseComponent::new(sample_report()).metadata();
        assert_eq!(metadata["kind"], "SALES");
        assert_eq!(metadata["author"], "SERF System");
        assert_eq!(metadata["company"], "FinanCorp S.A.");
        assert_eq!(metadata["signingAuthority"], Value::Null);
        assert_eq!(metadata["security"], false);
        assert_eq!(metadata["watermark"], false);
        assert_eq!(metadata["signature"], false);
    }

    #[test]
    fn test_format_timestamp() {
        let at = DateTime::parse_from_rfc3339("2025-10-14T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&at, "%d/%m/%Y %H:%M:%S"), "14/10/2025 09:30:00");
        assert_eq!(format_timestamp(&at, "%Q"), at.to_rfc3339());
    }

    #[test]
    fn test_boxed_component() {
        let boxed: Box<dyn DocumentComponent> = Box::new(BaseComponent::new(sample_report()));
        assert_eq!(boxed.kind(), Some(ReportKind::Sales));
        assert!(!DocumentComponent::has_security(&boxed));
    }
}
