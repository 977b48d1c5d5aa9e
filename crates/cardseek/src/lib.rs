//! Cardseek - a type-as-you-go query language for filtering card collections.
//!
//! Queries are short, human-writable phrases such as
//! `lore contains isb and side=dark and type=character`. They are parsed on
//! every keystroke into clauses whose field, comparator, and value are each
//! resolved and validated independently, so a half-typed query produces
//! useful feedback instead of an error.
//!
//! # Quick Start
//!
//! ```rust
//! use cardseek::{Card, FilterQuerySet, Record};
//!
//! let cards: Vec<Card> = serde_json::from_str(r#"[
//!     {"title": "Darth Vader", "side": "Dark", "type": "Character", "power": 6},
//!     {"title": "Luke Skywalker", "side": "Light", "type": "Character", "power": 3},
//!     {"title": "Death Star", "side": "Dark", "type": "Location"}
//! ]"#).unwrap();
//!
//! let query = FilterQuerySet::parse("side=dark and type=character");
//! let results = query.execute(&cards, Card::accessor);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Darth Vader");
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! query  = clause { "and" clause }
//! clause = field [ comparator ] value
//! ```
//!
//! - **Fields** are matched by canonical name or alias, case-insensitively,
//!   longest first (`ls icons` beats `ls`). Each field belongs to one
//!   category: numeric, string, or array.
//! - **Comparators** are looked up only among the field's category. Symbol
//!   comparators (`=`, `!=`, `<=`) may touch the field and value; word
//!   comparators (`contains`, `c`, `includes`) must stand alone. Without
//!   one, the category default applies (`equals`, `contains`, `includes`).
//! - **Values** must be numeric literals for numeric fields. String and array
//!   values compare case-insensitively.
//! - A record is kept iff it passes every valid clause. Clauses that are not
//!   valid yet do not narrow the result, and order is always preserved.
//!
//! # Fields and Comparators
//!
//! | Category | Comparators |
//! |----------|-------------|
//! | Numeric | `equals`, `not equals`, `less than`, `at most`, `greater than`, `at least` |
//! | String | `contains`, `equals`, `not equals`, `matches`, `starts with`, `ends with` |
//! | Array | `includes`, `excludes` |

mod card;
mod clause;
mod comparator;
mod error;
pub mod eval;
mod field;
mod query;
mod traits;
mod value;

// Re-export public API
pub use card::{Card, Stat};
pub use clause::{FilterQuery, Operand};
pub use comparator::{
    ArrayComparator, Category, Comparator, ComparatorDef, ComparatorRegistry, NumericComparator,
    StringComparator, ARRAY_COMPARATORS, COMPARATORS, NUMERIC_COMPARATORS, STRING_COMPARATORS,
};
pub use error::{RegistryError, Result};
pub use field::{card_fields, Field, FieldRegistry, FIELDS};
pub use query::{split_clauses, ClauseReport, FilterQuerySet, QueryReport};
pub use traits::Record;
pub use value::{Number, Value};
