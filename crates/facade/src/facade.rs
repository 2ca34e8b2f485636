//! Report facade
//!
//! Single entry point over the engine: pulls data from the collaborators,
//! normalizes money into the base currency, assembles the section tree and
//! applies security layers on request.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use serf_core::{CoreError, CoreResult, CurrencyNormalizer, EngineConfig, Period, ReportKind};
use serf_document::{Leaf, Report, ReportBuilder, Section};
use serf_security::{DecoratorFactory, DocumentComponent, SecurityFlags};
use serf_templates::{Template, TemplateRegistry, INCLUDE_ALERTS};

use crate::error::{FacadeError, FacadeResult};
use crate::provider::{
    CompanySource, InMemoryInventory, InMemorySales, InventorySource, SalesSource, StaticCompany,
};
use crate::record::SaleRecord;

/// Money shown in reports: two decimals
fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

fn checked_sum(a: Decimal, b: Decimal) -> CoreResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| CoreError::overflow(format!("{} + {}", a, b)))
}

/// Normalized totals over a set of sales
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SalesTotals {
    total: Decimal,
    transactions: usize,
    units: u64,
}

pub struct ReportFacade {
    config: Arc<EngineConfig>,
    normalizer: CurrencyNormalizer,
    registry: TemplateRegistry,
    factory: DecoratorFactory,
    sales: Arc<dyn SalesSource>,
    inventory: Arc<dyn InventorySource>,
    company: Arc<dyn CompanySource>,
}

impl ReportFacade {
    pub fn new(
        config: Arc<EngineConfig>,
        sales: Arc<dyn SalesSource>,
        inventory: Arc<dyn InventorySource>,
        company: Arc<dyn CompanySource>,
    ) -> FacadeResult<Self> {
        config.validate()?;
        let normalizer = CurrencyNormalizer::from_config(&config)?;
        let registry = TemplateRegistry::with_defaults(&config);
        let factory = DecoratorFactory::new(Arc::clone(&config));

        tracing::info!(
            base_currency = %normalizer.base_currency(),
            templates = registry.kinds().len(),
            "Report facade initialized"
        );

        Ok(Self {
            config,
            normalizer,
            registry,
            factory,
            sales,
            inventory,
            company,
        })
    }

    /// Facade over the in-memory demo data set
    pub fn with_demo_data(config: Arc<EngineConfig>) -> FacadeResult<Self> {
        let company = StaticCompany::from_config(&config);
        Self::new(
            config,
            Arc::new(InMemorySales::with_demo_data()?),
            Arc::new(InMemoryInventory::with_demo_data()),
            Arc::new(company),
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &CurrencyNormalizer {
        &self.normalizer
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn factory(&self) -> &DecoratorFactory {
        &self.factory
    }

    pub fn convert_currency(&self, amount: Decimal, from_currency: &str) -> FacadeResult<Decimal> {
        Ok(self.normalizer.convert(amount, from_currency)?)
    }

    pub fn update_rate(&self, code: &str, rate: Decimal) -> FacadeResult<()> {
        Ok(self.normalizer.update_rate(code, rate)?)
    }

    /// Deep copy of the template for `kind`, tailored to `country`
    pub fn clone_template(&self, kind: ReportKind, country: &str) -> FacadeResult<Template> {
        Ok(self.registry.clone_for_region(kind, country)?)
    }

    /// Dispatch on report kind.
    ///
    /// Sales and inventory need a country; the periodic kinds need a period
    /// of the matching granularity.
    pub fn generate_report(
        &self,
        kind: ReportKind,
        country: Option<&str>,
        period: Option<Period>,
    ) -> FacadeResult<Report> {
        match kind {
            ReportKind::Sales => self.generate_sales_report(country.unwrap_or_default(), period),
            ReportKind::Inventory => self.generate_inventory_report(country.unwrap_or_default()),
            ReportKind::Consolidated => self.generate_consolidated_report(),
            ReportKind::Monthly | ReportKind::Quarterly | ReportKind::Annual => {
                let period = period.ok_or_else(|| {
                    FacadeError::InvalidRequest(format!("{} report requires a period", kind))
                })?;
                if period.kind() != kind {
                    return Err(FacadeError::InvalidRequest(format!(
                        "period {} does not match a {} report",
                        period, kind
                    )));
                }
                self.generate_period_report(period)
            }
        }
    }

    pub fn generate_sales_report(
        &self,
        country: &str,
        period: Option<Period>,
    ) -> FacadeResult<Report> {
        let template = self.registry.clone_for_region(ReportKind::Sales, country)?;
        let company = self.company.company_defaults()?;
        let sales = self.sales.list_sales(Some(country), period.as_ref())?;
        let base = self.normalizer.base_currency();

        let mut detail =
            Section::new("SALES DETAIL").with_content(format!("{} transactions", sales.len()));
        let mut totals = SalesTotals::default();
        for sale in &sales {
            let line = self.normalized_line(sale)?;
            totals.add(line, sale.quantity)?;
            detail.add_child(Leaf::new(
                &sale.product_name,
                format!(
                    "Quantity: {} | Unit: {} {} | Total: {} {}",
                    sale.quantity,
                    money(sale.amount),
                    sale.currency,
                    money(line),
                    base
                ),
            ));
        }

        let summary = Section::new("EXECUTIVE SUMMARY").with_content(format!(
            "Total sales: {} {} | Transactions: {}",
            money(totals.total),
            base,
            totals.transactions
        ));

        let mut builder = ReportBuilder::new();
        builder
            .title(format!("Sales Report - {}", country.trim()))
            .country(country)
            .kind(ReportKind::Sales)
            .author(&self.config.report_author)
            .company(&company.company_name)
            .add_section(summary)
            .add_section(detail)
            .footer(format!("Generated by SERF - {}", company.company_name));
        totals.write_data(&mut builder, base);
        Self::template_data(&mut builder, &template);
        if let Some(period) = period {
            builder.data("period", period.label());
        }

        let report = builder.build()?;
        Self::log_generated(&report);
        Ok(report)
    }

    pub fn generate_inventory_report(&self, country: &str) -> FacadeResult<Report> {
        let template = self.registry.clone_for_region(ReportKind::Inventory, country)?;
        let company = self.company.company_defaults()?;
        let rows = self.inventory.list_inventory(Some(country))?;

        let units: u64 = rows.iter().map(|r| u64::from(r.quantity)).sum();
        let stock = Section::new("STOCK TOTAL")
            .with_content(format!("Products: {} | Units: {}", rows.len(), units));

        let mut builder = ReportBuilder::new();
        builder
            .title(format!("Inventory Report - {}", country.trim()))
            .country(country)
            .kind(ReportKind::Inventory)
            .author(&self.config.report_author)
            .company(&company.company_name)
            .add_section(stock);

        let below: Vec<_> = rows.iter().filter(|r| r.is_below_minimum()).collect();
        if template.flag(INCLUDE_ALERTS) {
            let mut alerts = Section::new("LOW STOCK ALERTS");
            if below.is_empty() {
                alerts.set_content("All products above minimum stock");
            }
            for row in &below {
                alerts.add_child(Leaf::new(
                    format!("ALERT {}", row.product_name),
                    format!(
                        "Stock: {} | Minimum required: {}",
                        row.quantity, row.minimum_threshold
                    ),
                ));
            }
            builder.add_section(alerts);
        }

        let mut by_location: BTreeMap<&str, Vec<Leaf>> = BTreeMap::new();
        for row in &rows {
            by_location
                .entry(row.location.as_str())
                .or_default()
                .push(Leaf::new(&row.product_name, format!("{} units", row.quantity)));
        }
        let mut distribution = Section::new("DISTRIBUTION");
        for (location, leaves) in by_location {
            let mut site = Section::with_level(location, 2);
            for leaf in leaves {
                site.add_child(leaf);
            }
            distribution.add_child(site);
        }
        builder.add_section(distribution);

        builder
            .footer(format!("Generated by SERF - {}", company.company_name))
            .data("products", rows.len())
            .data("units", units)
            .data("alerts", below.len());
        Self::template_data(&mut builder, &template);

        let report = builder.build()?;
        Self::log_generated(&report);
        Ok(report)
    }

    /// Corporate report with one level-2 section per configured subsidiary
    pub fn generate_consolidated_report(&self) -> FacadeResult<Report> {
        let template = self.registry.clone_template(ReportKind::Consolidated)?;
        let company = self.company.company_defaults()?;
        let base = self.normalizer.base_currency();

        let mut grand = SalesTotals::default();
        let mut subsidiaries = Vec::with_capacity(self.config.subsidiaries.len());
        for subsidiary in &self.config.subsidiaries {
            let totals = self.totals(&self.sales.list_sales(Some(subsidiary), None)?)?;
            subsidiaries.push(
                Section::with_level(format!("Subsidiary: {}", subsidiary), 2).with_content(format!(
                    "Sales: {} {} | Transactions: {}",
                    money(totals.total),
                    base,
                    totals.transactions
                )),
            );
            grand.merge(&totals)?;
        }

        let summary = Section::new("CORPORATE SUMMARY").with_content(format!(
            "Consolidated operations of {} subsidiaries | Total: {} {}",
            self.config.subsidiaries.len(),
            money(grand.total),
            base
        ));

        let mut builder = ReportBuilder::new();
        builder
            .title("Corporate Consolidated Report")
            .country("GLOBAL")
            .kind(ReportKind::Consolidated)
            .author(&self.config.report_author)
            .add_section(summary);
        for section in subsidiaries {
            builder.add_section(section);
        }
        builder.footer(format!("Generated by SERF - {}", company.company_name));
        Self::prototype_company(&mut builder, &template, &company.company_name);
        grand.write_data(&mut builder, base);

        let report = builder.build()?;
        Self::log_generated(&report);
        Ok(report)
    }

    /// Monthly, quarterly or annual report over every country
    pub fn generate_period_report(&self, period: Period) -> FacadeResult<Report> {
        let kind = period.kind();
        let template = self.registry.clone_template(kind)?;
        let company = self.company.company_defaults()?;
        let sales = self.sales.list_sales(None, Some(&period))?;
        let base = self.normalizer.base_currency();

        let mut by_country: BTreeMap<String, SalesTotals> = BTreeMap::new();
        for sale in &sales {
            let line = self.normalized_line(sale)?;
            by_country
                .entry(sale.country.to_uppercase())
                .or_default()
                .add(line, sale.quantity)?;
        }
        let mut totals = SalesTotals::default();
        let mut breakdown = Section::new("COUNTRY BREAKDOWN");
        for (country, country_totals) in &by_country {
            breakdown.add_child(Leaf::new(
                country,
                format!(
                    "{} {} | Transactions: {} | Units: {}",
                    money(country_totals.total),
                    base,
                    country_totals.transactions,
                    country_totals.units
                ),
            ));
            totals.merge(country_totals)?;
        }

        let summary = Section::new("PERIOD SUMMARY").with_content(format!(
            "Total: {} {} | Transactions: {} | Units: {}",
            money(totals.total),
            base,
            totals.transactions,
            totals.units
        ));

        let title = match kind {
            ReportKind::Monthly => "Monthly Report",
            ReportKind::Quarterly => "Quarterly Report",
            _ => "Annual Report",
        };

        let mut builder = ReportBuilder::new();
        builder
            .title(format!("{} - {}", title, period.label()))
            .country("GLOBAL")
            .kind(kind)
            .author(&self.config.report_author)
            .add_section(summary)
            .add_section(breakdown)
            .footer(format!("Generated by SERF - {}", company.company_name))
            .data("period", period.label());
        Self::prototype_company(&mut builder, &template, &company.company_name);
        totals.write_data(&mut builder, base);

        let report = builder.build()?;
        Self::log_generated(&report);
        Ok(report)
    }

    /// Security chain over `report`: watermark, then signature, then encoding
    pub fn secure_component(
        &self,
        report: impl Into<Arc<Report>>,
        flags: SecurityFlags,
    ) -> Box<dyn DocumentComponent> {
        self.factory.secure(report, flags)
    }

    /// Final rendered content of the requested security chain
    pub fn generate_secure_report(
        &self,
        report: impl Into<Arc<Report>>,
        flags: SecurityFlags,
    ) -> String {
        let component = self.secure_component(report, flags);
        let content = component.generate_content();
        tracing::info!(
            kind = ?component.kind(),
            watermark = flags.watermark,
            signature = flags.signature,
            encryption = flags.encryption,
            length = content.len(),
            "Secure report generated"
        );
        content
    }

    fn normalized_line(&self, sale: &SaleRecord) -> FacadeResult<Decimal> {
        let unit = self.normalizer.convert(sale.amount, &sale.currency)?;
        let line = unit
            .checked_mul(Decimal::from(sale.quantity))
            .ok_or_else(|| CoreError::overflow(format!("{} x {}", unit, sale.quantity)))?;
        Ok(line)
    }

    fn totals(&self, sales: &[SaleRecord]) -> FacadeResult<SalesTotals> {
        let mut totals = SalesTotals::default();
        for sale in sales {
            totals.add(self.normalized_line(sale)?, sale.quantity)?;
        }
        Ok(totals)
    }

    fn template_data(builder: &mut ReportBuilder, template: &Template) {
        builder
            .data("template", template.describe())
            .data("locale", template.locale.clone());
        if let Some(currency) = &template.currency {
            builder.data("display_currency", currency.clone());
        }
    }

    /// Company and signing authority seeded by the kind's prototype
    fn prototype_company(builder: &mut ReportBuilder, template: &Template, fallback: &str) {
        builder.company(template.company.as_deref().unwrap_or(fallback));
        if let Some(authority) = &template.signing_authority {
            builder.signing_authority(authority);
        }
    }

    fn log_generated(report: &Report) {
        tracing::info!(
            kind = ?report.kind(),
            country = %report.country(),
            sections = report.sections().len(),
            "Report generated"
        );
    }
}

impl SalesTotals {
    fn add(&mut self, line: Decimal, quantity: u32) -> CoreResult<()> {
        self.total = checked_sum(self.total, line)?;
        self.transactions += 1;
        self.units += u64::from(quantity);
        Ok(())
    }

    fn merge(&mut self, other: &SalesTotals) -> CoreResult<()> {
        self.total = checked_sum(self.total, other.total)?;
        self.transactions += other.transactions;
        self.units += other.units;
        Ok(())
    }

    fn write_data(&self, builder: &mut ReportBuilder, base: &str) {
        builder
            .data("total", money(self.total))
            .data("transactions", self.transactions)
            .data("units", self.units)
            .data("base_currency", base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_format() {
        assert_eq!(money(dec!(2760)), "2760.00");
        assert_eq!(money(dec!(390.000)), "390.00");
        assert_eq!(money(dec!(0.125)), "0.12");
    }

    #[test]
    fn test_totals() {
        let mut totals = SalesTotals::default();
        totals.add(dec!(1020.00), 5).unwrap();
        totals.add(dec!(216.00), 20).unwrap();
        assert_eq!(totals.total, dec!(1236.00));
        assert_eq!(totals.transactions, 2);
        assert_eq!(totals.units, 25);

        let mut grand = SalesTotals::default();
        grand.merge(&totals).unwrap();
        grand.merge(&totals).unwrap();
        assert_eq!(grand.transactions, 4);
    }

    #[test]
    fn test_totals_overflow() {
        let mut totals = SalesTotals::default();
        totals.add(Decimal::MAX, 1).unwrap();
        assert!(matches!(totals.add(Decimal::ONE, 1), Err(CoreError::Overflow(_))));
        assert_eq!(totals.transactions, 1);

        let mut grand = SalesTotals::default();
        grand.merge(&totals).unwrap();
        assert!(grand.merge(&totals).is_err());
    }
}
