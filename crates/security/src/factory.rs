//! Predefined security chains

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use serf_core::EngineConfig;
use serf_document::Report;

use crate::component::{BaseComponent, DocumentComponent};
use crate::encryption::Encryption;
use crate::signature::Signature;
use crate::watermark::{Watermark, WatermarkOptions, WatermarkPosition};

/// Which layers to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFlags {
    #[serde(default)]
    pub watermark: bool,
    #[serde(default)]
    pub signature: bool,
    #[serde(default)]
    pub encryption: bool,
}

impl SecurityFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            watermark: true,
            signature: true,
            encryption: true,
        }
    }

    pub fn any(&self) -> bool {
        self.watermark || self.signature || self.encryption
    }
}

/// Options for [`DecoratorFactory::custom`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomRecipe {
    pub flags: SecurityFlags,
    /// Watermark text; the default text when `None`
    pub watermark_text: Option<String>,
    pub watermark_position: WatermarkPosition,
    /// Signing authority; the configured default when `None`
    pub signing_authority: Option<String>,
}

/// Builds decorator chains from configuration defaults.
///
/// Layers are always stacked in the order watermark, signature, encryption,
/// so the signature covers the watermark and the encoding covers both.
#[derive(Debug, Clone)]
pub struct DecoratorFactory {
    config: Arc<EngineConfig>,
}

impl DecoratorFactory {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Pattern for timestamps shown in security blocks
    pub fn timestamp_format(&self) -> String {
        format!("{} %H:%M:%S", self.config.company.date_format)
    }

    pub fn default_authority(&self) -> &str {
        &self.config.company.default_signing_authority
    }

    pub fn basic(&self, report: impl Into<Arc<Report>>) -> Box<dyn DocumentComponent> {
        Box::new(BaseComponent::new(report))
    }

    pub fn with_watermark(&self, report: impl Into<Arc<Report>>) -> Box<dyn DocumentComponent> {
        self.custom(
            report,
            CustomRecipe {
                flags: SecurityFlags {
                    watermark: true,
                    ..SecurityFlags::none()
                },
                ..CustomRecipe::default()
            },
        )
    }

    pub fn with_signature(&self, report: impl Into<Arc<Report>>) -> Box<dyn DocumentComponent> {
        self.custom(
            report,
            CustomRecipe {
                flags: SecurityFlags {
                    signature: true,
                    ..SecurityFlags::none()
                },
                ..CustomRecipe::default()
            },
        )
    }

    /// Watermark, then signature over the watermarked content
    pub fn fully_secured(&self, report: impl Into<Arc<Report>>) -> Box<dyn DocumentComponent> {
        self.custom(
            report,
            CustomRecipe {
                flags: SecurityFlags {
                    watermark: true,
                    signature: true,
                    encryption: false,
                },
                ..CustomRecipe::default()
            },
        )
    }

    /// Chain for a set of flags with default text and authority
    pub fn secure(
        &self,
        report: impl Into<Arc<Report>>,
        flags: SecurityFlags,
    ) -> Box<dyn DocumentComponent> {
        self.custom(
            report,
            CustomRecipe {
                flags,
                ..CustomRecipe::default()
            },
        )
    }

    pub fn custom(
        &self,
        report: impl Into<Arc<Report>>,
        recipe: CustomRecipe,
    ) -> Box<dyn DocumentComponent> {
        let timestamp_format = self.timestamp_format();
        let mut component: Box<dyn DocumentComponent> = Box::new(BaseComponent::new(report));

        if recipe.flags.watermark {
            let mut options = WatermarkOptions::default()
                .position(recipe.watermark_position)
                .timestamp_format(timestamp_format.clone())
                .company(self.config.company.company_name.clone());
            if let Some(text) = recipe.watermark_text {
                options = options.text(text);
            }
            component = Box::new(Watermark::with_options(component, options));
        }

        if recipe.flags.signature {
            let authority = recipe
                .signing_authority
                .unwrap_or_else(|| self.default_authority().to_string());
            component = Box::new(Signature::with_timestamp_format(
                component,
                authority,
                timestamp_format,
            ));
        }

        if recipe.flags.encryption {
            component = Box::new(Encryption::new(component));
        }

        tracing::debug!(
            watermark = recipe.flags.watermark,
            signature = recipe.flags.signature,
            encryption = recipe.flags.encryption,
            "Security chain assembled"
        );
        component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::decode_content;
    use serf_core::ReportKind;
    use serf_document::ReportBuilder;

    fn factory() -> DecoratorFactory {
        DecoratorFactory::new(Arc::new(EngineConfig::default()))
    }

    fn report() -> Arc<Report> {
        Arc::new(
            ReportBuilder::new()
                .title("Consolidated Report")
                .country("CORPORATE")
                .kind(ReportKind::Consolidated)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_basic_has_no_security() {
        let report = report();
        let basic = factory().basic(report.clone());
        assert!(!basic.has_security());
        assert_eq!(basic.generate_content(), report.render_content());
    }

    #[test]
    fn test_with_watermark() {
        let component = factory().with_watermark(report());
        let metadata = component.metadata();
        assert_eq!(metadata["watermark"], true);
        assert_eq!(metadata["signature"], false);
        assert!(component.generate_content().starts_with("*** CONFIDENTIAL - FinanCorp S.A. - "));
    }

    #[test]
    fn test_with_signature_uses_default_authority() {
        let component = factory().with_signature(report());
        assert_eq!(component.metadata()["signingAuthority"], "Gerencia General");
        assert!(component.generate_content().contains("Signed by: Gerencia General"));
    }

    #[test]
    fn test_fully_secured_orders_watermark_below_signature() {
        let content = factory().fully_secured(report()).generate_content();
        let watermark = content.find("*** CONFIDENTIAL").unwrap();
        let signature = content.find("--- DIGITAL SIGNATURE ---").unwrap();
        assert!(watermark < signature);
    }

    #[test]
    fn test_custom_overrides() {
        let component = factory().custom(
            report(),
            CustomRecipe {
                flags: SecurityFlags {
                    watermark: true,
                    signature: true,
                    encryption: false,
                },
                watermark_text: Some("INTERNAL USE".to_string()),
                watermark_position: WatermarkPosition::Footer,
                signing_authority: Some("CFO".to_string()),
            },
        );

        let content = component.generate_content();
        assert!(content.contains("*** INTERNAL USE ***"));
        assert!(content.contains("Signed by: CFO"));
        assert_eq!(component.metadata()["watermarkPosition"], "FOOTER");
    }

    #[test]
    fn test_all_flags_encode_everything() {
        let component = factory().secure(report(), SecurityFlags::all());
        let decoded = decode_content(&component.generate_content()).unwrap();
        assert!(decoded.contains("*** CONFIDENTIAL"));
        assert!(decoded.contains("--- DIGITAL SIGNATURE ---"));

        let metadata = component.metadata();
        for key in ["watermark", "signature", "encryption", "security"] {
            assert_eq!(metadata[key], true, "{}", key);
        }
    }

    #[test]
    fn test_secure_without_flags_is_basic() {
        let report = report();
        let component = factory().secure(report.clone(), SecurityFlags::none());
        assert!(!component.has_security());
        assert_eq!(component.generate_content(), report.render_content());
    }

    #[test]
    fn test_timestamp_format_follows_config() {
        let mut config = EngineConfig::default();
        config.company.date_format = "%Y-%m-%d".to_string();
        let factory = DecoratorFactory::new(Arc::new(config));
        assert_eq!(factory.timestamp_format(), "%Y-%m-%d %H:%M:%S");
    }
}
