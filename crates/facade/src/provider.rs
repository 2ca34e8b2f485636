//! Data collaborators
//!
//! The facade reads sales, inventory and company defaults through these
//! traits. The in-memory implementations carry the demo data set used by the
//! CLI and the tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{PoisonError, RwLock};

use serf_core::{CompanyDefaults, EngineConfig, Period};
use serf_templates::region::canonical_region;

use crate::error::{ProviderError, ProviderResult};
use crate::record::{InventoryRecord, SaleRecord};

/// Source of sale lines
pub trait SalesSource: Send + Sync {
    /// Sales filtered by country (aliases and case ignored) and period
    fn list_sales(
        &self,
        country: Option<&str>,
        period: Option<&Period>,
    ) -> ProviderResult<Vec<SaleRecord>>;
}

/// Source of stock rows
pub trait InventorySource: Send + Sync {
    fn list_inventory(&self, country: Option<&str>) -> ProviderResult<Vec<InventoryRecord>>;
}

/// Source of company presentation defaults
pub trait CompanySource: Send + Sync {
    fn company_defaults(&self) -> ProviderResult<CompanyDefaults>;
}

fn same_region(a: &str, b: &str) -> bool {
    canonical_region(a) == canonical_region(b)
}

fn demo_date(day: u32) -> ProviderResult<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 10, day)
        .ok_or_else(|| ProviderError::InvalidData(format!("invalid demo day {}", day)))
}

/// In-memory sales store
pub struct InMemorySales {
    records: RwLock<Vec<SaleRecord>>,
}

impl InMemorySales {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// PERU, MEXICO and SPAIN sales from October 2025
    pub fn with_demo_data() -> ProviderResult<Self> {
        let sale = |product: &str, amount: i64, currency: &str, quantity: u32, day: u32, country: &str| {
            Ok::<_, ProviderError>(SaleRecord {
                amount: Decimal::from(amount),
                currency: currency.to_string(),
                product_name: product.to_string(),
                quantity,
                date: demo_date(day)?,
                country: country.to_string(),
            })
        };

        Ok(Self::from_records(vec![
            sale("Laptop", 850, "PEN", 5, 3, "PERU")?,
            sale("Router", 45, "PEN", 20, 7, "PERU")?,
            sale("Smartphone", 280, "MXN", 15, 12, "MEXICO")?,
            sale("Smartphone Pro", 450, "MXN", 8, 15, "MEXICO")?,
            sale("Laptop Pro", 920, "EUR", 3, 20, "SPAIN")?,
        ]))
    }

    pub fn push(&self, record: SaleRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySales {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesSource for InMemorySales {
    fn list_sales(
        &self,
        country: Option<&str>,
        period: Option<&Period>,
    ) -> ProviderResult<Vec<SaleRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .iter()
            .filter(|r| country.map_or(true, |c| same_region(&r.country, c)))
            .filter(|r| period.map_or(true, |p| p.contains(r.date)))
            .cloned()
            .collect())
    }
}

/// In-memory inventory store
pub struct InMemoryInventory {
    records: RwLock<Vec<InventoryRecord>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Six stock rows, the two MEXICO rows below their minimum
    pub fn with_demo_data() -> Self {
        let row = |product: &str, quantity: u32, minimum: u32, location: &str, country: &str| {
            InventoryRecord {
                product_name: product.to_string(),
                quantity,
                minimum_threshold: minimum,
                location: location.to_string(),
                country: country.to_string(),
            }
        };

        Self::from_records(vec![
            row("Laptop", 25, 10, "Lima Central", "PERU"),
            row("Router", 18, 12, "Arequipa", "PERU"),
            row("Smartphone", 8, 15, "CDMX Norte", "MEXICO"),
            row("Smartphone Pro", 5, 10, "Guadalajara", "MEXICO"),
            row("Laptop Pro", 50, 20, "Madrid", "SPAIN"),
            row("Monitor", 30, 15, "Barcelona", "SPAIN"),
        ])
    }

    pub fn push(&self, record: InventoryRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventorySource for InMemoryInventory {
    fn list_inventory(&self, country: Option<&str>) -> ProviderResult<Vec<InventoryRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .iter()
            .filter(|r| country.map_or(true, |c| same_region(&r.country, c)))
            .cloned()
            .collect())
    }
}

/// Fixed company defaults
#[derive(Debug, Clone)]
pub struct StaticCompany {
    defaults: CompanyDefaults,
}

impl StaticCompany {
    pub fn new(defaults: CompanyDefaults) -> Self {
        Self { defaults }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.company.clone())
    }
}

impl CompanySource for StaticCompany {
    fn company_defaults(&self) -> ProviderResult<CompanyDefaults> {
        Ok(self.defaults.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_sales_filters() {
        let sales = InMemorySales::with_demo_data().unwrap();
        assert_eq!(sales.len(), 5);
        assert_eq!(sales.list_sales(None, None).unwrap().len(), 5);
        assert_eq!(sales.list_sales(Some("peru"), None).unwrap().len(), 2);
        assert_eq!(sales.list_sales(Some("ESPAÑA"), None).unwrap().len(), 1);
        assert!(sales.list_sales(Some("CHILE"), None).unwrap().is_empty());
    }

    #[test]
    fn test_demo_sales_period_filter() {
        let sales = InMemorySales::with_demo_data().unwrap();
        let october = Period::month(2025, 10).unwrap();
        let september = Period::month(2025, 9).unwrap();
        let q4 = Period::quarter(2025, 4).unwrap();

        assert_eq!(sales.list_sales(None, Some(&october)).unwrap().len(), 5);
        assert!(sales.list_sales(None, Some(&september)).unwrap().is_empty());
        assert_eq!(sales.list_sales(Some("MEXICO"), Some(&q4)).unwrap().len(), 2);
    }

    #[test]
    fn test_push() {
        let sales = InMemorySales::new();
        assert!(sales.is_empty());
        sales.push(SaleRecord {
            amount: Decimal::from(800),
            currency: "PEN".into(),
            product_name: "Tablet".into(),
            quantity: 100,
            date: demo_date(1).unwrap(),
            country: "PERU".into(),
        });
        assert_eq!(sales.list_sales(Some("PERU"), None).unwrap().len(), 1);
    }

    #[test]
    fn test_demo_inventory() {
        let inventory = InMemoryInventory::with_demo_data();
        let all = inventory.list_inventory(None).unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all.iter().filter(|r| r.is_below_minimum()).count(), 2);
        assert_eq!(inventory.list_inventory(Some("Mexico")).unwrap().len(), 2);
    }

    #[test]
    fn test_static_company() {
        let company = StaticCompany::from_config(&EngineConfig::default());
        assert_eq!(
            company.company_defaults().unwrap().company_name,
            "FinanCorp S.A."
        );
    }
}
