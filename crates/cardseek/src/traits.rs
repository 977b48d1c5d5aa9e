//! The record trait.
//!
//! Query execution only needs attribute lookup by field name. Any type can
//! be queried by passing an accessor function; types implementing
//! [`Record`] get one for free.

use crate::value::Value;

/// Trait for types that can be filtered by a query.
///
/// # Example
///
/// ```
/// use cardseek::{FilterQuerySet, Number, Record, Value};
///
/// struct Card {
///     title: String,
///     power: u8,
/// }
///
/// impl Record for Card {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::String(&self.title),
///             "power" => Value::Number(Number::I64(i64::from(self.power))),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let cards = vec![
///     Card { title: "Darth Vader".into(), power: 6 },
///     Card { title: "Luke Skywalker".into(), power: 3 },
/// ];
/// let results = FilterQuerySet::parse("power > 4").execute(&cards, Card::accessor);
/// assert_eq!(results.len(), 1);
/// ```
pub trait Record {
    /// Returns the value of a field, keyed by the field's canonical name,
    /// or [`Value::None`] if the record has no such attribute.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns an accessor function suitable for query execution methods.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct TestItem {
        name: String,
        count: i32,
    }

    impl Record for TestItem {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "count" => Value::Number(Number::I64(self.count as i64)),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn record_manual_impl() {
        let item = TestItem {
            name: "test".to_string(),
            count: 42,
        };

        assert_eq!(item.field_value("name"), Value::String("test"));
        assert_eq!(item.field_value("count"), Value::Number(Number::I64(42)));
        assert_eq!(item.field_value("unknown"), Value::None);
    }

    #[test]
    fn record_accessor() {
        let item = TestItem {
            name: "test".to_string(),
            count: 42,
        };

        assert_eq!(TestItem::accessor(&item, "name"), Value::String("test"));
    }
}
