//! Classification of top-level declarations.
//!
//! Every block type maps to exactly one [`Declaration`] category. Adding a
//! new declaration type is a matter of extending one of the enums below.

/// Declaration types matched between base and overlay by type and labels.
///
/// Variants are listed in output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyedType {
    Data,
    Module,
    Output,
    Provider,
    Resource,
    Terraform,
    Variable,
}

impl KeyedType {
    /// All identity-keyed types in the order they are emitted.
    pub const ALL: [KeyedType; 7] = [
        KeyedType::Data,
        KeyedType::Module,
        KeyedType::Output,
        KeyedType::Provider,
        KeyedType::Resource,
        KeyedType::Terraform,
        KeyedType::Variable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyedType::Data => "data",
            KeyedType::Module => "module",
            KeyedType::Output => "output",
            KeyedType::Provider => "provider",
            KeyedType::Resource => "resource",
            KeyedType::Terraform => "terraform",
            KeyedType::Variable => "variable",
        }
    }
}

/// Declaration types without identity-bearing labels.
///
/// Variants are listed in output priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelLessType {
    Import,
    Moved,
    Removed,
}

impl LabelLessType {
    /// All label-less types in the order they are emitted.
    pub const ALL: [LabelLessType; 3] = [
        LabelLessType::Import,
        LabelLessType::Moved,
        LabelLessType::Removed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelLessType::Import => "import",
            LabelLessType::Moved => "moved",
            LabelLessType::Removed => "removed",
        }
    }
}

/// Block type whose attributes are aggregated across all occurrences.
pub const LOCALS: &str = "locals";

/// Category of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// Merged with the counterpart sharing its type and labels
    Keyed(KeyedType),
    /// Always appended, never merged
    LabelLess(LabelLessType),
    /// Attributes unioned by name into a single block
    Locals,
    /// Dropped with a warning
    Unrecognized,
}

/// Classifies a block by its type name.
pub fn classify(block_type: &str) -> Declaration {
    if block_type == LOCALS {
        return Declaration::Locals;
    }
    if let Some(keyed) = KeyedType::ALL.into_iter().find(|t| t.as_str() == block_type) {
        return Declaration::Keyed(keyed);
    }
    if let Some(label_less) = LabelLessType::ALL
        .into_iter()
        .find(|t| t.as_str() == block_type)
    {
        return Declaration::LabelLess(label_less);
    }
    Declaration::Unrecognized
}
