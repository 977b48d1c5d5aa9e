//! Evaluation of a single resolved clause.
//!
//! Both functions are pure: records are only read through the accessor, and
//! [`filter`] keeps the input order.

use crate::clause::Operand;
use crate::comparator::Comparator;
use crate::field::Field;
use crate::value::Value;

/// Tests one record against a resolved `(field, comparator, operand)` triple.
///
/// A comparator from a different category than the field never matches.
pub fn evaluate<T, F>(
    record: &T,
    field: &Field,
    comparator: Comparator,
    operand: &Operand,
    accessor: F,
) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    if comparator.category() != field.category {
        return false;
    }
    comparator.evaluate(&accessor(record, field.name), operand)
}

/// Returns the records for which [`evaluate`] holds, in input order.
pub fn filter<'a, T, F>(
    items: &'a [T],
    field: &Field,
    comparator: Comparator,
    operand: &Operand,
    accessor: F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    items
        .iter()
        .filter(|item| evaluate(*item, field, comparator, operand, &accessor))
        .collect()
}
