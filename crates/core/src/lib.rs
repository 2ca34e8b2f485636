//! SERF Core - shared types for the report engine
//!
//! # Key Types
//! - `ReportKind`: Sales, Inventory, Consolidated, Monthly, Quarterly, Annual
//! - `Period`: Month, Quarter or Year reporting window
//! - `CurrencyNormalizer`: converts amounts into the base currency
//! - `EngineConfig`: process-wide configuration, passed explicitly

pub mod config;
pub mod currency;
pub mod error;
pub mod kind;

pub use config::{CompanyDefaults, EngineConfig};
pub use currency::CurrencyNormalizer;
pub use error::{CoreError, CoreResult};
pub use kind::{Period, ReportKind};
