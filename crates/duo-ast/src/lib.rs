//! Pandoc JSON document model for duo.
//!
//! Pandoc hands JSON filters the whole document on stdin and expects the
//! (possibly rewritten) document back on stdout. This crate models the parts
//! of that AST the diagram filter needs:
//!
//! - [`Block`]: every Pandoc block type, with nested block lists typed so they
//!   can be walked and rewritten
//! - [`Inline`]: kept as opaque JSON, round-tripped unchanged
//! - [`stringify`]: plain-text rendering of inline content (captions, alt text)
//!
//! # Example
//!
//! ```
//! use duo_ast::{Block, Document};
//!
//! let json = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[
//!     {"t":"RawBlock","c":["latex","\\begin{tikzpicture}\\end{tikzpicture}"]}
//! ]}"#;
//! let doc = Document::from_json(json).unwrap();
//! assert!(matches!(&doc.blocks[0], Block::RawBlock(format, _) if format.is_latex()));
//! ```

mod block;
mod stringify;

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

pub use block::{Attr, Block, Caption, Format, Inline};
pub use stringify::{stringify, stringify_blocks};

/// Oldest Pandoc API version with the `Figure` block (pandoc 3.0).
const MIN_API_VERSION: [u32; 2] = [1, 23];

/// A complete Pandoc document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pandoc API version triple (e.g., `[1, 23, 1]`).
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,
    /// Document metadata, passed through untouched.
    pub meta: serde_json::Map<String, serde_json::Value>,
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

/// Error reading or writing a Pandoc document.
#[derive(Debug, thiserror::Error)]
pub enum AstError {
    /// The input is not a Pandoc JSON document.
    #[error("invalid Pandoc JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The document was produced by a Pandoc too old to carry `Figure` blocks.
    #[error("unsupported pandoc-api-version {0}, need 1.23 or newer")]
    UnsupportedVersion(String),
}

impl Document {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AstError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.check_version()?;
        Ok(doc)
    }

    /// Parse a document from a reader (usually stdin).
    pub fn from_reader(reader: impl Read) -> Result<Self, AstError> {
        let doc: Self = serde_json::from_reader(reader)?;
        doc.check_version()?;
        Ok(doc)
    }

    /// Serialize the document to a JSON string.
    pub fn to_json(&self) -> Result<String, AstError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the document to a writer (usually stdout).
    pub fn to_writer(&self, mut writer: impl Write) -> Result<(), AstError> {
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    fn check_version(&self) -> Result<(), AstError> {
        let major_minor = [
            self.api_version.first().copied().unwrap_or(0),
            self.api_version.get(1).copied().unwrap_or(0),
        ];
        if major_minor[0] != MIN_API_VERSION[0] || major_minor[1] < MIN_API_VERSION[1] {
            let version = self
                .api_version
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".");
            return Err(AstError::UnsupportedVersion(version));
        }
        Ok(())
    }
}
