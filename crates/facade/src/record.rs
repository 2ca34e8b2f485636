//! Business records supplied by data collaborators

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use serf_core::{CoreError, CoreResult};

/// One sale line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Unit price in `currency`
    pub amount: Decimal,
    pub currency: String,
    pub product_name: String,
    pub quantity: u32,
    pub date: NaiveDate,
    pub country: String,
}

impl SaleRecord {
    /// Price of the whole line in its own currency
    pub fn line_amount(&self) -> CoreResult<Decimal> {
        self.amount
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CoreError::overflow(format!("{} x {}", self.amount, self.quantity)))
    }
}

/// Stock held for one product at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_name: String,
    pub quantity: u32,
    pub minimum_threshold: u32,
    pub location: String,
    pub country: String,
}

impl InventoryRecord {
    pub fn is_below_minimum(&self) -> bool {
        self.quantity < self.minimum_threshold
    }
}
