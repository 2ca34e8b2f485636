//! Template registry
//!
//! Holds one canonical [`Template`] per [`ReportKind`] and hands out deep
//! copies. Canonical instances are never lent out mutably, so cloning only
//! needs a shared reference to the registry.

use std::collections::HashMap;

use serf_core::{EngineConfig, ReportKind};

use crate::error::{TemplateError, TemplateResult};
use crate::region;
use crate::template::{OutputFormat, Template};

/// Style key overwritten by a region's accent colour
pub const ACCENT_STYLE: &str = "primary_color";

/// Flag consulted by the inventory report
pub const INCLUDE_ALERTS: &str = "include_alerts";

#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<ReportKind, Template>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the canonical template for every kind
    pub fn with_defaults(config: &EngineConfig) -> Self {
        let company = &config.company;
        let mut registry = Self::new();

        registry.register(
            ReportKind::Sales,
            Template::new(ReportKind::Sales, OutputFormat::Pdf)
                .with_structure(["HEADER", "SALES_SUMMARY", "PRODUCT_DETAIL", "CHARTS", "FOOTER"])
                .with_style(ACCENT_STYLE, "#2563EB")
                .with_style("font", "Arial")
                .with_style("font_size", "12")
                .with_currency("USD"),
        );

        registry.register(
            ReportKind::Inventory,
            Template::new(ReportKind::Inventory, OutputFormat::Excel)
                .with_structure(["HEADER", "STOCK_SUMMARY", "LOW_STOCK", "DISTRIBUTION", "FOOTER"])
                .with_style("alert_color", "#DC2626")
                .with_style("ok_color", "#16A34A")
                .with_flag(INCLUDE_ALERTS, true),
        );

        registry.register(
            ReportKind::Consolidated,
            Template::new(ReportKind::Consolidated, OutputFormat::Pdf)
                .with_structure(["HEADER", "CORPORATE_SUMMARY", "SUBSIDIARIES", "FOOTER"])
                .with_currency(config.base_currency.clone())
                .with_company(&company.company_name, &company.default_signing_authority),
        );

        for kind in [ReportKind::Monthly, ReportKind::Quarterly, ReportKind::Annual] {
            registry.register(
                kind,
                Template::new(kind, OutputFormat::Pdf)
                    .with_structure(["HEADER", "PERIOD_SUMMARY", "COUNTRY_BREAKDOWN", "FOOTER"])
                    .with_currency(config.base_currency.clone())
                    .with_company(&company.company_name, &company.default_signing_authority),
            );
        }

        registry
    }

    /// Register or replace the canonical template for a kind
    pub fn register(&mut self, kind: ReportKind, template: Template) {
        let replaced = self.templates.insert(kind, template).is_some();
        tracing::debug!(kind = %kind, replaced, "Template registered");
    }

    pub fn contains(&self, kind: ReportKind) -> bool {
        self.templates.contains_key(&kind)
    }

    /// Registered kinds in declaration order
    pub fn kinds(&self) -> Vec<ReportKind> {
        let mut kinds: Vec<ReportKind> = self.templates.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Independent deep copy of the canonical template
    pub fn clone_template(&self, kind: ReportKind) -> TemplateResult<Template> {
        let template = self
            .templates
            .get(&kind)
            .ok_or(TemplateError::UnknownTemplateKind(kind))?;

        tracing::debug!(kind = %kind, "Template cloned");
        Ok(template.clone())
    }

    /// Clone and apply the region preset in one step
    pub fn clone_for_region(&self, kind: ReportKind, region: &str) -> TemplateResult<Template> {
        let mut template = self.clone_template(kind)?;
        configure_for_region(&mut template, region);
        Ok(template)
    }
}

/// Apply a region's presentation preset to a template clone.
///
/// Every template takes the region's locale. The sales template also takes
/// the region's currency and accent colour. Unknown regions get the default
/// locale and currency and keep their accent.
pub fn configure_for_region(template: &mut Template, region: &str) {
    let preset = region::preset_for(region);
    template.locale = preset.locale.to_string();

    if template.kind == ReportKind::Sales {
        template.currency = Some(preset.currency.to_string());
        if let Some(accent) = preset.accent {
            template
                .styles
                .insert(ACCENT_STYLE.to_string(), accent.to_string());
        }
    }

    tracing::debug!(
        kind = %template.kind,
        region = %region::canonical_region(region),
        locale = %template.locale,
        "Template configured for region"
    );
}
