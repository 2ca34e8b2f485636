//! Watermark layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use serf_core::ReportKind;

use crate::component::{format_timestamp, DocumentComponent, Metadata};

pub const DEFAULT_WATERMARK_TEXT: &str = "CONFIDENTIAL - {company} - {timestamp}";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Where the watermark block is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WatermarkPosition {
    #[default]
    Header,
    Footer,
    Both,
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkPosition::Header => write!(f, "HEADER"),
            WatermarkPosition::Footer => write!(f, "FOOTER"),
            WatermarkPosition::Both => write!(f, "BOTH"),
        }
    }
}

/// Watermark settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkOptions {
    /// Text with optional `{company}` and `{timestamp}` placeholders
    pub text: String,
    pub position: WatermarkPosition,
    /// chrono pattern for `{timestamp}`
    pub timestamp_format: String,
    /// Value for `{company}`; the wrapped component's `company` metadata when unset
    pub company: Option<String>,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            text: DEFAULT_WATERMARK_TEXT.to_string(),
            position: WatermarkPosition::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            company: None,
        }
    }
}

impl WatermarkOptions {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn position(mut self, position: WatermarkPosition) -> Self {
        self.position = position;
        self
    }

    pub fn timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp_format = pattern.into();
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

/// Inserts a watermark block around the wrapped content
#[derive(Debug, Clone)]
pub struct Watermark<C> {
    inner: C,
    position: WatermarkPosition,
    text: String,
    applied_at: DateTime<Utc>,
}

impl<C: DocumentComponent> Watermark<C> {
    /// Default text at the header
    pub fn new(inner: C) -> Self {
        Self::with_options(inner, WatermarkOptions::default())
    }

    /// Placeholders are resolved here, so every later render is identical
    pub fn with_options(inner: C, options: WatermarkOptions) -> Self {
        let applied_at = Utc::now();
        let company = options.company.unwrap_or_else(|| {
            match inner.metadata().get("company") {
                Some(Value::String(company)) => company.clone(),
                _ => String::new(),
            }
        });
        let timestamp = format_timestamp(&applied_at, &options.timestamp_format);
        let text = options
            .text
            .replace("{company}", &company)
            .replace("{timestamp}", &timestamp);

        tracing::debug!(position = %options.position, kind = ?inner.kind(), "Watermark applied");

        Self {
            inner,
            position: options.position,
            text,
            applied_at,
        }
    }

    pub fn position(&self) -> WatermarkPosition {
        self.position
    }

    /// Resolved watermark text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn header_block(&self) -> String {
        format!("*** {} ***\n\n", self.text)
    }

    fn footer_block(&self) -> String {
        format!("\n\n*** {} ***", self.text)
    }
}

impl<C: DocumentComponent> DocumentComponent for Watermark<C> {
    fn generate_content(&self) -> String {
        let content = self.inner.generate_content();
        match self.position {
            WatermarkPosition::Header => self.header_block() + &content,
            WatermarkPosition::Footer => content + &self.footer_block(),
            WatermarkPosition::Both => self.header_block() + &content + &self.footer_block(),
        }
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.inner.metadata();
        metadata.insert("watermark".into(), Value::Bool(true));
        metadata.insert(
            "watermarkPosition".into(),
            Value::from(self.position.to_string()),
        );
        metadata.insert("watermarkText".into(), Value::from(self.text.as_str()));
        metadata.insert("appliedAt".into(), Value::from(self.applied_at.to_rfc3339()));
        metadata.insert("security".into(), Value::Bool(true));
        metadata
    }

    fn kind(&self) -> Option<ReportKind> {
        self.inner.kind()
    }

    fn has_security(&self) -> bool {
        true
    }
}
