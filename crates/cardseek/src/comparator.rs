//! Comparators and the comparator registry.
//!
//! Every field belongs to exactly one [`Category`], and a category decides
//! which comparators can be applied to it. [`Comparator`] is a tagged union
//! with one variant per category; each variant carries its own evaluation
//! rule, so a numeric comparator can never be handed a list and vice versa.
//!
//! The registry maps the textual tokens a user may type (`=`, `c`,
//! `contains`, `less than`, ...) to comparators, per category. Each category
//! has exactly one default comparator, used when a clause names a field and
//! a value but no recognizable comparator.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::clause::Operand;
use crate::error::{RegistryError, Result};
use crate::value::{Number, Value};

/// The comparator family a field is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Scalar numbers (`power`, `deploy`, ...).
    Numeric,
    /// Scalar strings (`lore`, `side`, ...).
    String,
    /// Lists of strings (`icons`, `characteristics`, ...).
    Array,
}

impl Category {
    /// All categories, in registry order.
    pub const ALL: [Category; 3] = [Category::Numeric, Category::String, Category::Array];

    /// Returns the display name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Numeric => "numeric",
            Category::String => "string",
            Category::Array => "array",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparators for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericComparator {
    Equals,
    NotEquals,
    LessThan,
    AtMost,
    GreaterThan,
    AtLeast,
}

impl NumericComparator {
    fn name(self) -> &'static str {
        match self {
            NumericComparator::Equals => "equals",
            NumericComparator::NotEquals => "not equals",
            NumericComparator::LessThan => "less than",
            NumericComparator::AtMost => "at most",
            NumericComparator::GreaterThan => "greater than",
            NumericComparator::AtLeast => "at least",
        }
    }

    /// Evaluates the comparator given the ordering of field value vs operand.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            NumericComparator::Equals => ordering == Ordering::Equal,
            NumericComparator::NotEquals => ordering != Ordering::Equal,
            NumericComparator::LessThan => ordering == Ordering::Less,
            NumericComparator::AtMost => ordering != Ordering::Greater,
            NumericComparator::GreaterThan => ordering == Ordering::Greater,
            NumericComparator::AtLeast => ordering != Ordering::Less,
        }
    }

    fn evaluate(self, field: &Value<'_>, operand: Number) -> bool {
        match field.to_number().and_then(|n| n.compare(operand)) {
            Some(ordering) => self.eval_ordering(ordering),
            None => false, // missing, non-numeric, or NaN
        }
    }
}

/// Comparators for string fields. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringComparator {
    Contains,
    Equals,
    NotEquals,
    /// Exact match; reads better than `equals` in some queries.
    Matches,
    StartsWith,
    EndsWith,
}

impl StringComparator {
    fn name(self) -> &'static str {
        match self {
            StringComparator::Contains => "contains",
            StringComparator::Equals => "equals",
            StringComparator::NotEquals => "not equals",
            StringComparator::Matches => "matches",
            StringComparator::StartsWith => "starts with",
            StringComparator::EndsWith => "ends with",
        }
    }

    fn evaluate(self, field: &Value<'_>, operand: &str) -> bool {
        let Some(text) = field.as_str() else {
            return false;
        };
        let text = text.to_lowercase();
        let operand = operand.to_lowercase();
        match self {
            StringComparator::Contains => text.contains(&operand),
            StringComparator::Equals | StringComparator::Matches => text == operand,
            StringComparator::NotEquals => text != operand,
            StringComparator::StartsWith => text.starts_with(&operand),
            StringComparator::EndsWith => text.ends_with(&operand),
        }
    }
}

/// Comparators for list-of-string fields. Membership is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayComparator {
    Includes,
    Excludes,
}

impl ArrayComparator {
    fn name(self) -> &'static str {
        match self {
            ArrayComparator::Includes => "includes",
            ArrayComparator::Excludes => "excludes",
        }
    }

    fn evaluate(self, field: &Value<'_>, operand: &str) -> bool {
        let operand = operand.to_lowercase();
        let member = |item: &str| item.to_lowercase() == operand;
        let included = match field {
            Value::List(items) => items.iter().any(|item| member(item.as_str())),
            // A scalar string behaves as a one-element list.
            Value::String(s) => member(*s),
            _ => return false,
        };
        match self {
            ArrayComparator::Includes => included,
            ArrayComparator::Excludes => !included,
        }
    }
}

/// A relational or textual test, tagged with the category it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Numeric(NumericComparator),
    String(StringComparator),
    Array(ArrayComparator),
}

impl Comparator {
    /// Returns the category this comparator evaluates.
    pub fn category(self) -> Category {
        match self {
            Comparator::Numeric(_) => Category::Numeric,
            Comparator::String(_) => Category::String,
            Comparator::Array(_) => Category::Array,
        }
    }

    /// Returns the canonical name of this comparator.
    pub fn name(self) -> &'static str {
        match self {
            Comparator::Numeric(c) => c.name(),
            Comparator::String(c) => c.name(),
            Comparator::Array(c) => c.name(),
        }
    }

    /// Evaluates this comparator against a record's field value.
    ///
    /// Returns `false` when the field is missing or the operand does not fit
    /// the comparator's category. Never mutates anything.
    pub fn evaluate(self, field: &Value<'_>, operand: &Operand) -> bool {
        match (self, operand) {
            (Comparator::Numeric(c), Operand::Number(n)) => c.evaluate(field, *n),
            (Comparator::String(c), Operand::Text(s)) => c.evaluate(field, s),
            (Comparator::Array(c), Operand::Text(s)) => c.evaluate(field, s),
            _ => false,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One registry entry: a comparator, the category it is registered under,
/// and the tokens that select it.
#[derive(Debug, Clone, Copy)]
pub struct ComparatorDef {
    pub category: Category,
    pub comparator: Comparator,
    pub aliases: &'static [&'static str],
    pub default: bool,
}

impl ComparatorDef {
    const fn numeric(
        comparator: NumericComparator,
        aliases: &'static [&'static str],
        default: bool,
    ) -> Self {
        ComparatorDef {
            category: Category::Numeric,
            comparator: Comparator::Numeric(comparator),
            aliases,
            default,
        }
    }

    const fn string(
        comparator: StringComparator,
        aliases: &'static [&'static str],
        default: bool,
    ) -> Self {
        ComparatorDef {
            category: Category::String,
            comparator: Comparator::String(comparator),
            aliases,
            default,
        }
    }

    const fn array(
        comparator: ArrayComparator,
        aliases: &'static [&'static str],
        default: bool,
    ) -> Self {
        ComparatorDef {
            category: Category::Array,
            comparator: Comparator::Array(comparator),
            aliases,
            default,
        }
    }
}

pub const NUMERIC_COMPARATORS: &[ComparatorDef] = &[
    ComparatorDef::numeric(NumericComparator::Equals, &["=", "==", "eq", "is"], true),
    ComparatorDef::numeric(NumericComparator::NotEquals, &["!=", "ne", "not", "isnt"], false),
    ComparatorDef::numeric(NumericComparator::LessThan, &["<", "lt"], false),
    ComparatorDef::numeric(NumericComparator::AtMost, &["<=", "lte"], false),
    ComparatorDef::numeric(
        NumericComparator::GreaterThan,
        &[">", "gt", "more than"],
        false,
    ),
    ComparatorDef::numeric(NumericComparator::AtLeast, &[">=", "gte"], false),
];

pub const STRING_COMPARATORS: &[ComparatorDef] = &[
    ComparatorDef::string(StringComparator::Contains, &["c", "has", "includes"], true),
    ComparatorDef::string(StringComparator::Equals, &["=", "==", "eq", "is"], false),
    ComparatorDef::string(StringComparator::NotEquals, &["!=", "ne", "isnt"], false),
    ComparatorDef::string(StringComparator::Matches, &["m", "~"], false),
    ComparatorDef::string(StringComparator::StartsWith, &["sw"], false),
    ComparatorDef::string(StringComparator::EndsWith, &["ew"], false),
];

pub const ARRAY_COMPARATORS: &[ComparatorDef] = &[
    ComparatorDef::array(ArrayComparator::Includes, &["has", "contains", "c", "=", "i"], true),
    ComparatorDef::array(ArrayComparator::Excludes, &["!=", "lacks"], false),
];

/// The built-in comparator registry.
pub static COMPARATORS: Lazy<ComparatorRegistry> = Lazy::new(|| {
    let defs: Vec<ComparatorDef> = NUMERIC_COMPARATORS
        .iter()
        .chain(STRING_COMPARATORS)
        .chain(ARRAY_COMPARATORS)
        .copied()
        .collect();
    ComparatorRegistry::new(&defs).unwrap_or_else(|e| panic!("invalid comparator registry: {e}"))
});

#[derive(Debug, Clone)]
struct AliasKey {
    key: String,
    comparator: Comparator,
    symbol: bool,
}

#[derive(Debug, Clone)]
struct CategoryTable {
    comparators: Vec<Comparator>,
    // Sorted longest first so the first hit is the longest match.
    keys: Vec<AliasKey>,
    default: Comparator,
}

/// Lookup tables from typed tokens to comparators, one per category.
///
/// The canonical name of a comparator is always accepted alongside its
/// aliases. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct ComparatorRegistry {
    tables: HashMap<Category, CategoryTable>,
}

impl ComparatorRegistry {
    /// Builds and validates a registry.
    ///
    /// Fails when an entry is registered under a category its evaluator
    /// cannot handle, when two comparators of one category share a token,
    /// when an alias is empty, or when a category does not have exactly one
    /// default.
    pub fn new(defs: &[ComparatorDef]) -> Result<Self> {
        let mut tables = HashMap::new();

        for category in Category::ALL {
            let mut comparators = Vec::new();
            let mut keys: Vec<AliasKey> = Vec::new();
            let mut default = None;

            for def in defs.iter().filter(|d| d.category == category) {
                let actual = def.comparator.category();
                if actual != def.category {
                    return Err(RegistryError::CategoryMismatch {
                        comparator: def.comparator.name(),
                        declared: def.category,
                        actual,
                    });
                }
                if def.default {
                    if default.is_some() {
                        return Err(RegistryError::DuplicateDefault(category));
                    }
                    default = Some(def.comparator);
                }
                if !comparators.contains(&def.comparator) {
                    comparators.push(def.comparator);
                }

                let name = std::iter::once(def.comparator.name());
                for alias in name.chain(def.aliases.iter().copied()) {
                    let key = alias.trim().to_lowercase();
                    if key.is_empty() {
                        return Err(RegistryError::EmptyAlias(def.comparator.name().to_string()));
                    }
                    match keys.iter().find(|k| k.key == key) {
                        Some(existing) if existing.comparator == def.comparator => continue,
                        Some(existing) => {
                            return Err(RegistryError::DuplicateComparatorAlias {
                                category,
                                alias: key,
                                first: existing.comparator.name(),
                                second: def.comparator.name(),
                            });
                        }
                        None => {}
                    }
                    let symbol = !key.chars().any(char::is_alphanumeric);
                    keys.push(AliasKey {
                        key,
                        comparator: def.comparator,
                        symbol,
                    });
                }
            }

            let default = default.ok_or(RegistryError::MissingDefault(category))?;
            keys.sort_by(|a, b| b.key.len().cmp(&a.key.len()));
            tables.insert(
                category,
                CategoryTable {
                    comparators,
                    keys,
                    default,
                },
            );
        }

        Ok(ComparatorRegistry { tables })
    }

    fn table(&self, category: Category) -> &CategoryTable {
        // `new` inserts every category or fails.
        &self.tables[&category]
    }

    /// Resolves an exact token (name or alias, case-insensitive).
    pub fn resolve(&self, category: Category, raw: &str) -> Option<Comparator> {
        let raw = raw.trim().to_lowercase();
        self.table(category)
            .keys
            .iter()
            .find(|k| k.key == raw)
            .map(|k| k.comparator)
    }

    /// Returns the comparator used when a clause names none.
    pub fn default_for(&self, category: Category) -> Comparator {
        self.table(category).default
    }

    /// Returns the comparators of `category` with a token starting with `raw`.
    ///
    /// Used for feedback while a comparator is still being typed. An empty
    /// `raw` has no candidates.
    pub fn prefix_candidates(&self, category: Category, raw: &str) -> Vec<Comparator> {
        let raw = raw.trim().to_lowercase();
        if raw.is_empty() {
            return Vec::new();
        }
        let mut found = Vec::new();
        for key in &self.table(category).keys {
            if key.key.starts_with(&raw) && !found.contains(&key.comparator) {
                found.push(key.comparator);
            }
        }
        found
    }

    /// Returns the comparators registered for `category`.
    pub fn comparators(&self, category: Category) -> &[Comparator] {
        &self.table(category).comparators
    }

    /// Finds the longest comparator token at the start of `text`.
    ///
    /// Symbol tokens (`=`, `!=`, ...) match as a literal prefix. Word tokens
    /// must be followed by whitespace or the end of the text, so `c` never
    /// matches the start of `character` or `c-3po`. Returns the comparator
    /// and the byte length of the token.
    pub(crate) fn leading_match(
        &self,
        category: Category,
        text: &str,
    ) -> Option<(Comparator, usize)> {
        self.table(category)
            .keys
            .iter()
            .find(|k| text.starts_with(&k.key) && (k.symbol || ends_word(&text[k.key.len()..])))
            .map(|k| (k.comparator, k.key.len()))
    }
}

fn ends_word(rest: &str) -> bool {
    rest.chars().next().map_or(true, char::is_whitespace)
}
