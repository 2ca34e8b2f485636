//! Encoding layer
//!
//! Placeholder only: the payload is plain base64 and anyone can reverse it.
//! It marks a document as "sealed" for display and offers no confidentiality.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use serf_core::ReportKind;

use crate::component::{DocumentComponent, Metadata};
use crate::error::{SecurityError, SecurityResult};

pub const ENCODING_ALGORITHM: &str = "BASE64";

const HEADER: &str = "=== ENCRYPTED REPORT ===";
const FOOTER: &str = "=== END ENCRYPTED REPORT ===";

/// Replaces the wrapped content with its encoded form
#[derive(Debug, Clone)]
pub struct Encryption<C> {
    inner: C,
}

impl<C: DocumentComponent> Encryption<C> {
    pub fn new(inner: C) -> Self {
        tracing::debug!(algorithm = ENCODING_ALGORITHM, kind = ?inner.kind(), "Encryption applied");
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Recover the wrapped content from this layer's output
    pub fn decode(&self, content: &str) -> SecurityResult<String> {
        decode_content(content)
    }
}

/// Reverse the encoding applied by [`Encryption`]
pub fn decode_content(content: &str) -> SecurityResult<String> {
    let mut lines = content.lines();
    if lines.next() != Some(HEADER) {
        return Err(SecurityError::decode("missing encrypted report header"));
    }

    let mut expected_len = None;
    let mut payload = None;
    for line in lines {
        if let Some(len) = line.strip_prefix("Length: ") {
            let len = len
                .trim_end_matches(" characters")
                .parse::<usize>()
                .map_err(|e| SecurityError::decode(format!("bad length: {}", e)))?;
            expected_len = Some(len);
        } else if line == FOOTER {
            break;
        } else if !line.is_empty() && !line.starts_with("Algorithm: ") {
            payload = Some(line);
        }
    }

    let payload = payload.ok_or_else(|| SecurityError::decode("missing payload"))?;
    if let Some(len) = expected_len {
        if len != payload.len() {
            return Err(SecurityError::decode(format!(
                "length mismatch: header says {}, payload has {}",
                len,
                payload.len()
            )));
        }
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| SecurityError::decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SecurityError::decode(e.to_string()))
}

impl<C: DocumentComponent> DocumentComponent for Encryption<C> {
    fn generate_content(&self) -> String {
        let encoded = STANDARD.encode(self.inner.generate_content());
        format!(
            "{}\nAlgorithm: {}\nLength: {} characters\n\n{}\n{}",
            HEADER,
            ENCODING_ALGORITHM,
            encoded.len(),
            encoded,
            FOOTER
        )
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.inner.metadata();
        metadata.insert("encryption".into(), Value::Bool(true));
        metadata.insert("encryptionAlgorithm".into(), Value::from(ENCODING_ALGORITHM));
        metadata.insert("security".into(), Value::Bool(true));
        metadata
    }

    fn kind(&self) -> Option<ReportKind> {
        self.inner.kind()
    }

    fn has_security(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::BaseComponent;
    use serf_document::{Leaf, ReportBuilder};

    fn base() -> BaseComponent {
        BaseComponent::new(
            ReportBuilder::new()
                .title("Ventas España")
                .country("SPAIN")
                .kind(ReportKind::Sales)
                .add_section(Leaf::new("Total", "2760.00 EUR"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_content_is_replaced() {
        let base = base();
        let plain = base.generate_content();
        let encrypted = Encryption::new(base).generate_content();

        assert!(encrypted.starts_with(HEADER));
        assert!(encrypted.contains("Algorithm: BASE64"));
        assert!(!encrypted.contains("2760.00"));
        assert!(encrypted.contains(&format!("Length: {} characters", STANDARD.encode(&plain).len())));
    }

    #[test]
    fn test_decode_reverses() {
        let base = base();
        let plain = base.generate_content();
        let layer = Encryption::new(base);
        let encrypted = layer.generate_content();
        assert_eq!(layer.decode(&encrypted).unwrap(), plain);
        assert_eq!(decode_content(&encrypted).unwrap(), plain);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_content("hello"),
            Err(SecurityError::Decode(_))
        ));

        let truncated = format!("{}\nAlgorithm: BASE64\nLength: 8 characters\n\nAAAA\n{}", HEADER, FOOTER);
        assert!(matches!(
            decode_content(&truncated),
            Err(SecurityError::Decode(_))
        ));
    }

    #[test]
    fn test_metadata() {
        let encrypted = Encryption::new(base());
        let metadata = encrypted.metadata();
        assert_eq!(metadata["encryption"], true);
        assert_eq!(metadata["encryptionAlgorithm"], "BASE64");
        assert_eq!(metadata["security"], true);
        assert!(encrypted.has_security());
    }
}
