//! Query sets: clauses joined by `and`.
//!
//! A [`FilterQuerySet`] is parsed from the full text of a query. The text is
//! split on the word `and` (any case, not inside double quotes) and each
//! piece is parsed as a [`FilterQuery`].
//!
//! Execution keeps a record iff it passes every valid clause. Clauses that
//! are not valid (still being typed, unknown field, bad number) do not
//! narrow the result, so an empty or half-typed query shows the whole
//! collection. Output order is input order.

use serde::Serialize;
use tracing::debug;

use crate::clause::FilterQuery;
use crate::comparator::{ComparatorRegistry, COMPARATORS};
use crate::field::{FieldRegistry, FIELDS};
use crate::value::Value;

/// The clauses of one query, in the order they were typed.
///
/// # Example
///
/// ```
/// use cardseek::{FilterQuerySet, Number, Value};
///
/// struct Card {
///     title: &'static str,
///     side: &'static str,
///     power: i64,
/// }
///
/// fn accessor<'a>(card: &'a Card, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::String(card.title),
///         "side" => Value::String(card.side),
///         "power" => Value::Number(Number::I64(card.power)),
///         _ => Value::None,
///     }
/// }
///
/// let cards = vec![
///     Card { title: "Darth Vader", side: "Dark", power: 6 },
///     Card { title: "Luke Skywalker", side: "Light", power: 3 },
///     Card { title: "Boba Fett", side: "Dark", power: 3 },
/// ];
///
/// let query = FilterQuerySet::parse("side=dark and power >= 4");
/// assert_eq!(query.length(), 2);
/// assert!(query.valid());
///
/// let results = query.execute(&cards, accessor);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].title, "Darth Vader");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuerySet {
    query: String,
    filter_queries: Vec<FilterQuery>,
}

impl FilterQuerySet {
    /// Parses a query against the built-in card registries.
    pub fn parse(raw: &str) -> Self {
        FilterQuerySet::parse_with(raw, &FIELDS, &COMPARATORS)
    }

    /// Parses a query against the given registries.
    pub fn parse_with(raw: &str, fields: &FieldRegistry, comparators: &ComparatorRegistry) -> Self {
        let filter_queries: Vec<FilterQuery> = split_clauses(raw)
            .iter()
            .map(|clause| FilterQuery::parse_with(clause, fields, comparators))
            .collect();
        let set = FilterQuerySet {
            query: raw.to_string(),
            filter_queries,
        };
        debug!(
            query = %set.query,
            clauses = set.length(),
            valid = set.valid(),
            "parsed query"
        );
        set
    }

    /// The raw query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter_queries(&self) -> &[FilterQuery] {
        &self.filter_queries
    }

    /// Number of clauses.
    pub fn length(&self) -> usize {
        self.filter_queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filter_queries.is_empty()
    }

    /// `true` iff every clause is valid (vacuously true with no clauses).
    pub fn valid(&self) -> bool {
        self.filter_queries.iter().all(FilterQuery::valid)
    }

    /// Number of clauses that narrow the result.
    pub fn valid_count(&self) -> usize {
        self.filter_queries.iter().filter(|q| q.valid()).count()
    }

    /// Tests if a single record passes every valid clause.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter_queries
            .iter()
            .all(|clause| clause.matches(item, &accessor))
    }

    /// Returns the records passing every valid clause, in input order.
    ///
    /// With no valid clause this is the whole collection.
    pub fn execute<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .collect()
    }

    /// Counts the records [`execute`](Self::execute) would return.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    /// Builds the validity report for this query over `items`.
    pub fn report<T, F>(&self, items: &[T], accessor: F) -> QueryReport
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let clauses = self
            .filter_queries
            .iter()
            .map(|clause| ClauseReport {
                query: clause.query().to_string(),
                field: clause.display_field_name().to_string(),
                comparator: clause.display_comparator_name().to_string(),
                value: clause.raw_value().to_string(),
                valid_field: clause.valid_field(),
                valid_comparator: clause.valid_comparator(),
                partially_valid_comparator: clause.partially_valid_comparator(),
                using_default_comparator: clause.using_default_comparator(),
                valid_value: clause.valid_value(),
                valid: clause.valid(),
                result_count: clause.length(items, &accessor),
            })
            .collect();

        QueryReport {
            query: self.query.clone(),
            clause_count: self.length(),
            valid: self.valid(),
            result_count: self.count(items, &accessor),
            clauses,
        }
    }
}

/// Per-clause feedback: display names and every validity flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseReport {
    pub query: String,
    pub field: String,
    pub comparator: String,
    pub value: String,
    pub valid_field: bool,
    pub valid_comparator: bool,
    pub partially_valid_comparator: bool,
    pub using_default_comparator: bool,
    pub valid_value: bool,
    pub valid: bool,
    /// Records this clause alone keeps; 0 when it is not valid.
    pub result_count: usize,
}

/// Aggregate feedback for a whole query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub clause_count: usize,
    pub valid: bool,
    pub result_count: usize,
    pub clauses: Vec<ClauseReport>,
}

/// Splits query text into clause texts on the word `and`.
///
/// Splitting is case-insensitive and ignores `and` between double quotes.
/// Clause text is trimmed but otherwise kept as typed. Blank text has no
/// clauses; a dangling `and` leaves an empty clause behind it.
///
/// ```
/// use cardseek::split_clauses;
///
/// assert_eq!(
///     split_clauses("lore c isb AND side=dark"),
///     vec!["lore c isb", "side=dark"]
/// );
/// assert_eq!(split_clauses("title = \"han and leia\""), vec!["title = \"han and leia\""]);
/// assert!(split_clauses("  ").is_empty());
/// ```
pub fn split_clauses(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut clauses = Vec::new();
    let mut start = 0;
    let mut word: Option<usize> = None;
    let mut quoted = false;

    // A trailing space closes the last word.
    for (i, c) in raw.char_indices().chain(std::iter::once((raw.len(), ' '))) {
        if !c.is_whitespace() {
            word.get_or_insert(i);
            if c == '"' {
                quoted = !quoted;
            }
            continue;
        }
        if let Some(begin) = word.take() {
            if !quoted && raw[begin..i].eq_ignore_ascii_case("and") {
                clauses.push(raw[start..begin].trim().to_string());
                start = i;
            }
        }
    }
    clauses.push(raw[start..].trim().to_string());
    clauses
}
