//! SERF Templates - canonical report skeletons
//!
//! The registry owns one [`Template`] per report kind and only ever hands out
//! deep copies, which callers then tailor with [`configure_for_region`].

pub mod error;
pub mod region;
pub mod registry;
pub mod template;

pub use error::{TemplateError, TemplateResult};
pub use region::RegionPreset;
pub use registry::{configure_for_region, TemplateRegistry, ACCENT_STYLE, INCLUDE_ALERTS};
pub use template::{OutputFormat, Template};
