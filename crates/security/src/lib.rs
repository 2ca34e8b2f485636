//! SERF Security - layered document decorators
//!
//! A chain starts at [`BaseComponent`] and adds [`Watermark`], [`Signature`]
//! and [`Encryption`] layers by wrapping. Every layer implements
//! [`DocumentComponent`], so any subset in any order composes.
//!
//! ```
//! use serf_document::ReportBuilder;
//! use serf_security::{BaseComponent, DocumentComponent, Signature, Watermark};
//!
//! let report = ReportBuilder::new().title("Audit").country("PERU").build().unwrap();
//! let signed = Signature::new(Watermark::new(BaseComponent::new(report)), "Gerencia General");
//! assert!(signed.has_security());
//! assert!(signed.verify_integrity(&signed.generate_content()));
//! ```

pub mod component;
pub mod encryption;
pub mod error;
pub mod factory;
pub mod signature;
pub mod watermark;

pub use component::{BaseComponent, DocumentComponent, Metadata};
pub use encryption::{decode_content, Encryption, ENCODING_ALGORITHM};
pub use error::{SecurityError, SecurityResult};
pub use factory::{CustomRecipe, DecoratorFactory, SecurityFlags};
pub use signature::{content_hash, Signature, HASH_ALGORITHM};
pub use watermark::{Watermark, WatermarkOptions, WatermarkPosition};
