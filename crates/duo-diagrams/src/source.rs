//! Extracted diagram source and its content hash.

use sha1::{Digest, Sha1};

use crate::extract::DiagramEnvironment;

/// Diagram markup extracted from a document.
///
/// The content hash is computed from the exact text, so two sources differing
/// by a single character never share cache files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    text: String,
    environment: DiagramEnvironment,
}

impl DiagramSource {
    /// Wrap extracted environment text.
    #[must_use]
    pub fn new(text: impl Into<String>, environment: DiagramEnvironment) -> Self {
        Self {
            text: text.into(),
            environment,
        }
    }

    /// The exact environment text, markers included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Which drawing environment this source uses.
    #[must_use]
    pub fn environment(&self) -> DiagramEnvironment {
        self.environment
    }

    /// SHA-1 of the UTF-8 text, hex-encoded (40 characters).
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.text.as_bytes());
        hex::encode(hasher.finalize())
    }
}
