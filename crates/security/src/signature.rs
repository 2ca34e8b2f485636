//! Integrity signature layer
//!
//! The hash covers the wrapped content as it was when the signature was
//! constructed. Layers added on top later are outside the signed payload, so
//! `Watermark(Signature(base))` renders a watermark the signature never saw.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};

use serf_core::ReportKind;

use crate::component::{format_timestamp, DocumentComponent, Metadata};
use crate::error::{SecurityError, SecurityResult};
use crate::watermark::DEFAULT_TIMESTAMP_FORMAT;

pub const HASH_ALGORITHM: &str = "SHA-256";

/// Hex-encoded SHA-256 of `content`
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Appends a signature block and remembers the hash of what it signed
#[derive(Debug, Clone)]
pub struct Signature<C> {
    inner: C,
    authority: String,
    signed_at: DateTime<Utc>,
    timestamp_format: String,
    document_hash: String,
}

impl<C: DocumentComponent> Signature<C> {
    pub fn new(inner: C, authority: impl Into<String>) -> Self {
        Self::with_timestamp_format(inner, authority, DEFAULT_TIMESTAMP_FORMAT)
    }

    pub fn with_timestamp_format(
        inner: C,
        authority: impl Into<String>,
        timestamp_format: impl Into<String>,
    ) -> Self {
        let document_hash = content_hash(&inner.generate_content());
        let authority = authority.into();

        tracing::debug!(
            authority = %authority,
            hash = %&document_hash[..16],
            kind = ?inner.kind(),
            "Signature applied"
        );

        Self {
            inner,
            authority,
            signed_at: Utc::now(),
            timestamp_format: timestamp_format.into(),
            document_hash,
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn signed_at(&self) -> DateTime<Utc> {
        self.signed_at
    }

    /// Full hex digest of the signed payload
    pub fn document_hash(&self) -> &str {
        &self.document_hash
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The block appended to the signed payload
    pub fn signature_block(&self) -> String {
        format!(
            "\n\n--- DIGITAL SIGNATURE ---\n\
             Signed by: {}\n\
             Date: {}\n\
             Hash ({}): {}...\n\
             -------------------------",
            self.authority,
            format_timestamp(&self.signed_at, &self.timestamp_format),
            HASH_ALGORITHM,
            &self.document_hash[..16]
        )
    }

    /// Check `content` against the stored hash.
    ///
    /// Accepts the signed payload or this layer's full output; a trailing
    /// signature block is removed before hashing.
    pub fn verify(&self, content: &str) -> SecurityResult<()> {
        let block = self.signature_block();
        let payload = content.strip_suffix(block.as_str()).unwrap_or(content);
        let actual = content_hash(payload);

        if actual != self.document_hash {
            tracing::warn!(
                expected = %&self.document_hash[..16],
                actual = %&actual[..16],
                "Signature verification failed"
            );
            return Err(SecurityError::Integrity {
                expected: self.document_hash.clone(),
                actual,
            });
        }
        Ok(())
    }

    pub fn verify_integrity(&self, content: &str) -> bool {
        self.verify(content).is_ok()
    }
}

impl<C: DocumentComponent> DocumentComponent for Signature<C> {
    fn generate_content(&self) -> String {
        self.inner.generate_content() + &self.signature_block()
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.inner.metadata();
        metadata.insert("signature".into(), Value::Bool(true));
        metadata.insert("signingAuthority".into(), Value::from(self.authority.as_str()));
        metadata.insert("signedAt".into(), Value::from(self.signed_at.to_rfc3339()));
        metadata.insert("documentHash".into(), Value::from(self.document_hash.as_str()));
        metadata.insert("hashAlgorithm".into(), Value::from(HASH_ALGORITHM));
        metadata.insert("signatureStatus".into(), Value::from("VALID"));
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
