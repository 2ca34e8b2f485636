//! SERF Document - report tree and builder
//!
//! - [`DocumentNode`]: composite tree of sections and leaves
//! - [`ReportBuilder`]: validated, step-wise construction of a [`Report`]

pub mod builder;
pub mod error;
pub mod node;
pub mod report;

pub use builder::ReportBuilder;
pub use error::{DocumentError, DocumentResult};
pub use node::{DocumentNode, Leaf, Section};
pub use report::Report;
