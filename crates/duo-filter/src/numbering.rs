//! Chapter/section numbering of generated images.
//!
//! Image filenames start with the position of the diagram in the document,
//! so a directory listing sorts in reading order:
//!
//! ```text
//! # Chapter            -> chapter [1], section []
//! ## Section           -> chapter [1], section [1]
//! <diagram>            -> 1_1_1_<hash>
//! <diagram>            -> 1_1_2_<hash>
//! ## Section           -> chapter [1], section [2]
//! <diagram>            -> 1_2_1_<hash>
//! ```

use std::collections::HashMap;

/// Position of one image in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNumber {
    /// Chapter label, `"0"` before the first level-1 heading.
    pub chapter: String,
    /// Section label, `"0"` before the first level-2 heading of the chapter.
    pub section: String,
    /// 1-based image index within the section.
    pub sequence: u32,
}

impl ImageNumber {
    /// Base filename shared by both theme images: `{chapter}_{section}_{sequence}_{hash}`.
    #[must_use]
    pub fn base_filename(&self, content_hash: &str) -> String {
        format!(
            "{}_{}_{}_{content_hash}",
            self.chapter, self.section, self.sequence
        )
    }
}

/// Heading-driven numbering state for one pass over a document.
#[derive(Debug, Default)]
pub struct NumberingTracker {
    chapter: Vec<u32>,
    section: Vec<u32>,
    images: HashMap<Vec<u32>, u32>,
}

impl NumberingTracker {
    /// Fresh state: no chapter, no section, no images.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a heading of the given level.
    ///
    /// Level 1 advances the chapter and resets sections and image counters.
    /// Level 2 advances the section. Deeper levels do not affect numbering.
    pub fn on_heading(&mut self, level: u32) {
        match level {
            1 => {
                advance(&mut self.chapter);
                self.section.clear();
                self.images.clear();
            }
            2 => {
                advance(&mut self.section);
                self.images.insert(self.section.clone(), 0);
            }
            _ => {}
        }
    }

    /// Allocate the next image number in the current section.
    pub fn next_image(&mut self) -> ImageNumber {
        let counter = self.images.entry(self.section.clone()).or_insert(0);
        *counter += 1;
        ImageNumber {
            chapter: label(&self.chapter),
            section: label(&self.section),
            sequence: *counter,
        }
    }
}

fn advance(counter: &mut Vec<u32>) {
    match counter.last_mut() {
        Some(last) => *last += 1,
        None => counter.push(1),
    }
}

fn label(parts: &[u32]) -> String {
    if parts.is_empty() {
        return "0".to_owned();
    }
    parts
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("_")
}
