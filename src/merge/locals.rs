//! Aggregation of `locals` blocks.
//!
//! All `locals` blocks of one side share a single namespace keyed by
//! attribute name, independent of how many blocks declare them.

use indexmap::IndexMap;
use log::debug;

use crate::classify::LOCALS;
use crate::document::{Attribute, Block};
use crate::merge::block::union_attributes;

/// Attributes collected from every `locals` block of one side.
#[derive(Debug, Default)]
pub struct LocalsAggregator {
    attributes: IndexMap<String, Attribute>,
}

impl LocalsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the attributes of a `locals` block. A later definition of a name
    /// replaces the value of an earlier one.
    pub fn add(&mut self, block: Block) {
        for attr in block.body.into_parts().0 {
            debug!("locals: collected {}", attr.name);
            match self.attributes.get_mut(&attr.name) {
                Some(current) => current.patch(attr),
                None => {
                    self.attributes.insert(attr.name.clone(), attr);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[cfg(test)]
    fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Builds the single result `locals` block, overlay winning on name
    /// conflicts and names sorted. Returns `None` when neither side declared
    /// any local.
    pub fn combine(base: Self, overlay: Self) -> Option<Block> {
        if base.is_empty() && overlay.is_empty() {
            return None;
        }

        let mut block = Block::new(LOCALS, Vec::new());
        let attributes =
            union_attributes(base.attributes.into_values(), overlay.attributes.into_values());
        for attr in attributes {
            block.body.set_attribute(attr);
        }
        Some(block)
    }
}
