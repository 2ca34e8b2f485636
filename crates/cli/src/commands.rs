//! CLI commands
//!
//! Each command returns the text to print so it can be checked without a
//! terminal.

use rust_decimal::Decimal;

use serf_core::{Period, ReportKind};
use serf_facade::SecurityFlags;

use crate::context::AppContext;

fn period_from(
    year: Option<i32>,
    month: Option<u32>,
    quarter: Option<u32>,
) -> anyhow::Result<Option<Period>> {
    match (year, month, quarter) {
        (None, None, None) => Ok(None),
        (Some(_), Some(_), Some(_)) => anyhow::bail!("use either --month or --quarter, not both"),
        (Some(year), Some(month), None) => Ok(Some(Period::month(year, month)?)),
        (Some(year), None, Some(quarter)) => Ok(Some(Period::quarter(year, quarter)?)),
        (Some(year), None, None) => Ok(Some(Period::year(year))),
        (None, _, _) => anyhow::bail!("--year is required with --month or --quarter"),
    }
}

/// Sales report for one country, optionally limited to a month
pub fn sales(
    ctx: &AppContext,
    country: &str,
    year: Option<i32>,
    month: Option<u32>,
    flags: SecurityFlags,
) -> anyhow::Result<String> {
    let period = period_from(year, month, None)?;
    let report = ctx.facade().generate_sales_report(country, period)?;
    Ok(ctx.facade().generate_secure_report(report, flags))
}

pub fn inventory(ctx: &AppContext, country: &str, flags: SecurityFlags) -> anyhow::Result<String> {
    let report = ctx.facade().generate_inventory_report(country)?;
    Ok(ctx.facade().generate_secure_report(report, flags))
}

pub fn consolidated(ctx: &AppContext, flags: SecurityFlags) -> anyhow::Result<String> {
    let report = ctx.facade().generate_consolidated_report()?;
    Ok(ctx.facade().generate_secure_report(report, flags))
}

/// Monthly, quarterly or annual report depending on which options are given
pub fn periodic(
    ctx: &AppContext,
    year: i32,
    month: Option<u32>,
    quarter: Option<u32>,
    flags: SecurityFlags,
) -> anyhow::Result<String> {
    let period = period_from(Some(year), month, quarter)?
        .ok_or_else(|| anyhow::anyhow!("a period is required"))?;
    let report = ctx.facade().generate_period_report(period)?;
    Ok(ctx.facade().generate_secure_report(report, flags))
}

pub fn template(ctx: &AppContext, kind: &str, country: &str) -> anyhow::Result<String> {
    let kind: ReportKind = kind
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown report kind: {}", kind))?;
    let template = ctx.facade().clone_template(kind, country)?;

    let mut out = template.describe();
    out.push_str(&format!("\nStructure: {}", template.outline()));
    for (key, value) in &template.styles {
        out.push_str(&format!("\n  {} = {}", key, value));
    }
    Ok(out)
}

pub fn convert(ctx: &AppContext, amount: Decimal, currency: &str) -> anyhow::Result<String> {
    let converted = ctx.facade().convert_currency(amount, currency)?;
    Ok(format!(
        "{} {} = {} {}",
        amount,
        currency.to_uppercase(),
        converted,
        ctx.facade().normalizer().base_currency()
    ))
}

/// Rate table, one currency per line
pub fn rates(ctx: &AppContext) -> String {
    let normalizer = ctx.facade().normalizer();
    let mut out = format!("Base currency: {}", normalizer.base_currency());
    for (code, rate) in normalizer.rates() {
        out.push_str(&format!("\n  1 {} = {} {}", code, rate, normalizer.base_currency()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serf_core::EngineConfig;

    fn ctx() -> AppContext {
        AppContext::from_config(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_period_from() {
        assert_eq!(period_from(None, None, None).unwrap(), None);
        assert_eq!(
            period_from(Some(2025), Some(10), None).unwrap(),
            Some(Period::Month { year: 2025, month: 10 })
        );
        assert_eq!(
            period_from(Some(2025), None, Some(4)).unwrap(),
            Some(Period::Quarter { year: 2025, quarter: 4 })
        );
        assert_eq!(period_from(Some(2025), None, None).unwrap(), Some(Period::Year { year: 2025 }));
        assert!(period_from(None, Some(10), None).is_err());
        assert!(period_from(Some(2025), Some(1), Some(1)).is_err());
        assert!(period_from(Some(2025), Some(13), None).is_err());
    }

    #[test]
    fn test_sales_command() {
        let out = sales(&ctx(), "PERU", None, None, SecurityFlags::none()).unwrap();
        assert!(out.contains("REPORT: Sales Report - PERU"));
    }

    #[test]
    fn test_template_command() {
        let out = template(&ctx(), "sales", "mexico").unwrap();
        assert!(out.starts_with("Template SALES [PDF] - Locale: es - Currency: MXN"));
        assert!(out.contains("primary_color = #16A34A"));
        assert!(template(&ctx(), "weekly", "PERU").is_err());
    }

    #[test]
    fn test_convert_and_rates() {
        let out = convert(&ctx(), Decimal::from(1200), "cny").unwrap();
        assert_eq!(out, "1200 CNY = 156.00 EUR");
        assert!(convert(&ctx(), Decimal::ONE, "XYZ").is_err());

        let table = rates(&ctx());
        assert!(table.starts_with("Base currency: EUR"));
        assert!(table.contains("1 PEN = 0.24 EUR"));
    }
}
