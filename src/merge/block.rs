//! Patching of one declaration with its overlay counterpart.

use indexmap::IndexMap;
use log::debug;

use crate::document::{Attribute, Block, Document};
use crate::error::Result;

/// Decides how nested blocks of a matched declaration pair are combined.
pub trait NestedBlockStrategy {
    /// Combines the nested blocks of a base and an overlay declaration.
    ///
    /// # Arguments
    /// * `base` - Nested blocks of the base declaration, in source order
    /// * `overlay` - Nested blocks of the overlay declaration, in source order
    ///
    /// # Returns
    /// * `Result<Vec<Block>>` - Nested blocks of the merged declaration
    fn merge_nested(&self, base: Vec<Block>, overlay: Vec<Block>) -> Result<Vec<Block>>;
}

/// Keeps every nested block: base blocks first, then overlay blocks.
///
/// Nested blocks are never matched against each other, so an overlay cannot
/// patch a single `filter` or `ingress` entry, only add more.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendNestedBlocks;

impl NestedBlockStrategy for AppendNestedBlocks {
    fn merge_nested(&self, mut base: Vec<Block>, overlay: Vec<Block>) -> Result<Vec<Block>> {
        base.extend(overlay);
        Ok(base)
    }
}

/// Unions attributes by name, the later value winning on conflicts, and
/// returns them sorted by name. Comments of both sides are kept.
pub(crate) fn union_attributes(
    base: impl IntoIterator<Item = Attribute>,
    overlay: impl IntoIterator<Item = Attribute>,
) -> Vec<Attribute> {
    let mut merged: IndexMap<String, Attribute> = IndexMap::new();
    for attr in base.into_iter().chain(overlay) {
        match merged.get_mut(&attr.name) {
            Some(current) => current.patch(attr),
            None => {
                merged.insert(attr.name.clone(), attr);
            }
        }
    }
    merged.sort_keys();
    merged.into_values().collect()
}

/// Merges an overlay declaration into the base declaration sharing its
/// identity.
///
/// Attributes are unioned with the overlay winning, then emitted in sorted
/// name order. Nested blocks are combined by `strategy`. The result keeps the
/// type and labels of `base` and the comments of both declarations.
pub fn merge_block(
    base: Block,
    overlay: Block,
    strategy: &dyn NestedBlockStrategy,
) -> Result<Block> {
    let Block {
        ident,
        labels,
        body: base_body,
        mut comments,
    } = base;
    comments.absorb(overlay.comments);
    let (base_attributes, base_blocks) = base_body.into_parts();
    let (overlay_attributes, overlay_blocks) = overlay.body.into_parts();

    let mut body = Document::new();
    for attr in union_attributes(base_attributes, overlay_attributes) {
        debug!("{} {:?}: {} = {}", ident, labels, attr.name, attr.expr);
        body.set_attribute(attr);
    }
    for nested in strategy.merge_nested(base_blocks, overlay_blocks)? {
        body.push_block(nested);
    }

    Ok(Block {
        ident,
        labels,
        body,
        comments,
    })
}
