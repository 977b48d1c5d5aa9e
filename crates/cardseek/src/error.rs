//! Error types for the cardseek crate.
//!
//! Only registry configuration defects are errors. Incomplete or malformed
//! queries are reported as validity state on the parsed clauses.

use thiserror::Error;

use crate::comparator::Category;

/// Configuration defects detected while building a field or comparator registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two fields share a canonical name.
    #[error("field '{0}' is registered more than once")]
    DuplicateField(String),

    /// A name or alias resolves to more than one field.
    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateFieldAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// A name or alias resolves to more than one comparator of one category.
    #[error("{category} comparator alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateComparatorAlias {
        category: Category,
        alias: String,
        first: &'static str,
        second: &'static str,
    },

    /// A comparator was registered under a category its evaluator cannot handle.
    #[error("comparator '{comparator}' evaluates {actual} values but is registered as {declared}")]
    CategoryMismatch {
        comparator: &'static str,
        declared: Category,
        actual: Category,
    },

    /// A category has no default comparator.
    #[error("no default comparator registered for {0} fields")]
    MissingDefault(Category),

    /// A category has more than one default comparator.
    #[error("more than one default comparator registered for {0} fields")]
    DuplicateDefault(Category),

    /// An alias is empty or only whitespace.
    #[error("empty alias registered for '{0}'")]
    EmptyAlias(String),
}

/// Result type for registry construction.
pub type Result<T> = std::result::Result<T, RegistryError>;
