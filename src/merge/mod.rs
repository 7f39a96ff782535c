//! Merge engine combining a base document with an overlay document.
//!
//! Output layout is fixed regardless of input order:
//! 1. overlay declarations without a base counterpart, in overlay order
//! 2. the aggregated `locals` block
//! 3. identity-keyed declarations, grouped by [`KeyedType`] priority
//! 4. base label-less declarations, grouped by [`LabelLessType`] priority

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::classify::{classify, Declaration, KeyedType, LabelLessType};
use crate::document::{Block, Document};
use crate::error::Result;

pub mod block;
pub mod locals;

pub use block::{merge_block, AppendNestedBlocks, NestedBlockStrategy};
pub use locals::LocalsAggregator;

/// Merges documents using a configurable nested-block strategy.
pub struct Merger {
    strategy: Box<dyn NestedBlockStrategy>,
}

impl Merger {
    /// Creates a merger that appends nested blocks.
    pub fn new() -> Self {
        Self::with_strategy(Box::new(AppendNestedBlocks))
    }

    pub fn with_strategy(strategy: Box<dyn NestedBlockStrategy>) -> Self {
        Self { strategy }
    }

    /// Merges `overlay` into `base` and returns the merged document.
    ///
    /// # Arguments
    /// * `base` - Concatenated base declarations
    /// * `overlay` - Concatenated overlay declarations
    ///
    /// # Returns
    /// * `Result<Document>` - The base document with its blocks replaced by
    ///   the merged declarations
    ///
    /// # Errors
    /// * Any error raised while merging a matched pair; no partial result is
    ///   returned
    pub fn merge(&self, mut base: Document, mut overlay: Document) -> Result<Document> {
        let mut keyed: IndexMap<(KeyedType, Vec<String>), Block> = IndexMap::new();
        let mut label_less: BTreeMap<LabelLessType, Vec<Block>> = BTreeMap::new();
        let mut base_locals = LocalsAggregator::new();
        let mut overlay_locals = LocalsAggregator::new();

        for block in base.take_blocks() {
            debug!("processing base block {} '{}'", block.ident, block.identity_key());
            match classify(&block.ident) {
                Declaration::Keyed(block_type) => {
                    let key = (block_type, block.labels.clone());
                    if let Some(previous) = keyed.insert(key, block) {
                        warn!(
                            "duplicate {} {:?} in base, keeping the last definition",
                            previous.ident, previous.labels
                        );
                    }
                }
                Declaration::Locals => base_locals.add(block),
                Declaration::LabelLess(block_type) => {
                    label_less.entry(block_type).or_default().push(block)
                }
                Declaration::Unrecognized => {
                    warn!("block type '{}' is not supported, skipped", block.ident)
                }
            }
        }

        for block in overlay.take_blocks() {
            debug!("processing overlay block {} '{}'", block.ident, block.identity_key());
            match classify(&block.ident) {
                Declaration::Keyed(block_type) => {
                    let key = (block_type, block.labels.clone());
                    match keyed.get_mut(&key) {
                        Some(existing) => {
                            *existing =
                                merge_block(existing.clone(), block, self.strategy.as_ref())?;
                        }
                        None => base.push_block(block),
                    }
                }
                Declaration::Locals => overlay_locals.add(block),
                Declaration::LabelLess(_) => base.push_block(block),
                Declaration::Unrecognized => {
                    warn!("block type '{}' is not supported, skipped", block.ident)
                }
            }
        }

        if let Some(locals) = LocalsAggregator::combine(base_locals, overlay_locals) {
            base.push_block(locals);
        }

        // Stable sort: discovery order is kept within a type.
        let mut keyed: Vec<_> = keyed.into_iter().collect();
        keyed.sort_by_key(|((block_type, _), _)| *block_type);
        for ((block_type, _), block) in keyed {
            debug!("emitting {} '{}'", block_type.as_str(), block.identity_key());
            base.push_block(block);
        }

        for (block_type, blocks) in label_less {
            debug!("emitting {} {} block(s)", blocks.len(), block_type.as_str());
            for block in blocks {
                base.push_block(block);
            }
        }

        Ok(base)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Merger::new()
    }
}

/// Merges `overlay` into `base` appending nested blocks.
pub fn merge(base: Document, overlay: Document) -> Result<Document> {
    Merger::new().merge(base, overlay)
}
