//! Clause parsing.
//!
//! A [`FilterQuery`] is one `field comparator value` fragment of a query,
//! parsed from text that may still be in the middle of being typed. Each of
//! the three parts is resolved independently and carries its own validity,
//! so callers can render live feedback without treating incomplete input as
//! an error.
//!
//! Resolution runs field, then comparator, then value:
//!
//! 1. The longest field name or alias at the start of the clause is the
//!    field. Without one, nothing else is resolved.
//! 2. The longest comparator token of the field's category right after the
//!    field is the comparator. Symbols (`=`, `!=`) need no surrounding space,
//!    words (`contains`, `c`) must stand alone. If no token matches but the
//!    remaining text is the beginning of one, the comparator is partially
//!    typed. Otherwise the category default is used and the remaining text
//!    is the value.
//! 3. The remaining text is the value. Numeric fields need a numeric literal;
//!    string and array fields take the text verbatim. Surrounding double
//!    quotes are removed.

use tracing::trace;

use crate::comparator::{Category, Comparator, ComparatorRegistry, COMPARATORS};
use crate::eval;
use crate::field::{Field, FieldRegistry, FIELDS};
use crate::value::{Number, Value};

/// Parsed operand of a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Operand of a numeric comparator.
    Number(Number),
    /// Operand of a string or array comparator.
    Text(String),
}

impl Operand {
    /// Parses a raw value for a field category.
    ///
    /// Returns `None` for an empty value, or for a numeric category when the
    /// text is not a numeric literal.
    pub fn parse(category: Category, raw: &str) -> Option<Operand> {
        let text = unquote(raw.trim());
        if text.is_empty() {
            return None;
        }
        match category {
            Category::Numeric => Number::parse(text).map(Operand::Number),
            Category::String | Category::Array => Some(Operand::Text(text.to_lowercase())),
        }
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

/// One parsed query clause.
///
/// Built fresh from the clause text on every parse; nothing is carried over
/// from earlier input.
///
/// A value that is itself a comparator token of the field's category is
/// read as that comparator: `rarity c` is `contains` with no value yet, so
/// searching for a short code like `c` needs an explicit comparator
/// (`rarity = c`).
///
/// # Example
///
/// ```
/// use cardseek::FilterQuery;
///
/// let clause = FilterQuery::parse("Power = 9");
/// assert!(clause.valid());
/// assert_eq!(clause.display_field_name(), "power");
/// assert_eq!(clause.display_comparator_name(), "equals");
/// assert_eq!(clause.raw_value(), "9");
///
/// let typing = FilterQuery::parse("po");
/// assert!(!typing.valid_field());
/// assert!(!typing.valid());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    query: String,
    raw_field: String,
    raw_comparator: String,
    raw_value: String,
    field: Option<Field>,
    comparator: Option<Comparator>,
    value: Option<Operand>,
    using_default_comparator: bool,
    partially_valid_comparator: bool,
}

impl FilterQuery {
    /// Parses a clause against the built-in card registries.
    pub fn parse(raw: &str) -> Self {
        FilterQuery::parse_with(raw, &FIELDS, &COMPARATORS)
    }

    /// Parses a clause against the given registries.
    pub fn parse_with(raw: &str, fields: &FieldRegistry, comparators: &ComparatorRegistry) -> Self {
        let query = normalize(raw);
        let mut clause = FilterQuery {
            query: query.clone(),
            raw_field: String::new(),
            raw_comparator: String::new(),
            raw_value: String::new(),
            field: None,
            comparator: None,
            value: None,
            using_default_comparator: false,
            partially_valid_comparator: false,
        };
        if query.is_empty() {
            return clause;
        }

        let Some((field, field_len)) = fields.leading_match(&query) else {
            clause.raw_field = if fields.is_prefix(&query) {
                query.clone()
            } else {
                leading_word(&query).to_string()
            };
            clause.trace();
            return clause;
        };
        clause.field = Some(*field);
        clause.raw_field = query[..field_len].to_string();

        let category = field.category;
        let rest = query[field_len..].trim_start();
        if rest.is_empty() {
            clause.trace();
            return clause;
        }

        let leading = comparators.leading_match(category, rest);
        let value_text = if let Some((comparator, len)) = leading {
            clause.comparator = Some(comparator);
            clause.raw_comparator = rest[..len].to_string();
            clause.partially_valid_comparator = true;
            rest[len..].trim()
        } else if !comparators.prefix_candidates(category, rest).is_empty() {
            clause.raw_comparator = rest.to_string();
            clause.partially_valid_comparator = true;
            clause.trace();
            return clause;
        } else {
            clause.comparator = Some(comparators.default_for(category));
            clause.using_default_comparator = true;
            rest
        };

        clause.raw_value = value_text.to_string();
        clause.value = Operand::parse(category, value_text);
        clause.trace();
        clause
    }

    fn trace(&self) {
        trace!(
            query = %self.query,
            raw_field = %self.raw_field,
            field = self.field.map(|f| f.name),
            valid_field = self.valid_field(),
            raw_comparator = %self.raw_comparator,
            comparator = self.comparator.map(Comparator::name),
            valid_comparator = self.valid_comparator(),
            using_default_comparator = self.using_default_comparator,
            raw_value = %self.raw_value,
            valid_value = self.valid_value(),
            valid = self.valid(),
            "parsed clause"
        );
    }

    /// The normalized clause text: lower-cased, with whitespace outside
    /// double quotes collapsed to single spaces.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The text taken as the field token.
    pub fn raw_field(&self) -> &str {
        &self.raw_field
    }

    /// The text taken as the comparator token; empty when none was typed.
    pub fn raw_comparator(&self) -> &str {
        &self.raw_comparator
    }

    /// The text taken as the value.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn comparator(&self) -> Option<Comparator> {
        self.comparator
    }

    /// The parsed operand, absent when the value is empty or not legal for
    /// the field's category.
    pub fn value(&self) -> Option<&Operand> {
        self.value.as_ref()
    }

    pub fn valid_field(&self) -> bool {
        self.field.is_some()
    }

    /// A comparator of the field's category is in effect, typed or default.
    pub fn valid_comparator(&self) -> bool {
        match (self.field, self.comparator) {
            (Some(field), Some(comparator)) => comparator.category() == field.category,
            _ => false,
        }
    }

    /// The typed comparator text is the beginning of (or equal to) some
    /// comparator token of the field's category.
    pub fn partially_valid_comparator(&self) -> bool {
        self.partially_valid_comparator
    }

    /// No comparator was typed and the category default was substituted.
    pub fn using_default_comparator(&self) -> bool {
        self.using_default_comparator
    }

    pub fn valid_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn valid(&self) -> bool {
        self.valid_field() && self.valid_comparator() && self.valid_value()
    }

    /// Canonical field name, or the raw field text when unresolved.
    pub fn display_field_name(&self) -> &str {
        match &self.field {
            Some(field) => field.name,
            None => &self.raw_field,
        }
    }

    /// Canonical comparator name, or the raw comparator text when unresolved.
    pub fn display_comparator_name(&self) -> &str {
        match self.comparator {
            Some(comparator) => comparator.name(),
            None => &self.raw_comparator,
        }
    }

    /// Tests a single record. A clause that is not valid matches everything.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        match (&self.field, self.comparator, &self.value) {
            (Some(field), Some(comparator), Some(operand)) if self.valid() => {
                eval::evaluate(item, field, comparator, operand, accessor)
            }
            _ => true,
        }
    }

    /// Number of records this clause alone keeps; 0 when it is not valid.
    pub fn length<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        if !self.valid() {
            return 0;
        }
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }
}

fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut quoted = false;
    let mut space = false;
    for c in raw.trim().chars() {
        if c == '"' {
            quoted = !quoted;
        }
        if c.is_whitespace() && !quoted {
            space = true;
            continue;
        }
        if space {
            out.push(' ');
            space = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}

fn leading_word(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_whitespace() || !c.is_alphanumeric())
        .unwrap_or(text.len());
    &text[..end]
}
