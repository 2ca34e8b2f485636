//! SERF Facade - report generation entry point
//!
//! [`ReportFacade`] ties the engine together: collaborators supply records,
//! the normalizer converts money, templates and the builder shape the report
//! and the decorator factory secures it.

pub mod error;
pub mod facade;
pub mod provider;
pub mod record;

pub use error::{FacadeError, FacadeResult, ProviderError, ProviderResult};
pub use facade::ReportFacade;
pub use provider::{
    CompanySource, InMemoryInventory, InMemorySales, InventorySource, SalesSource, StaticCompany,
};
pub use record::{InventoryRecord, SaleRecord};

pub use serf_security::SecurityFlags;
