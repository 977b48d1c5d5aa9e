//! Queryable fields and the field registry.
//!
//! A [`Field`] names a record attribute, the [`Category`] of comparators it
//! accepts, and the alternate spellings a user may type for it. The registry
//! is built once; every name and alias must resolve to exactly one field.

use once_cell::sync::Lazy;

use crate::comparator::Category;
use crate::error::{RegistryError, Result};

/// Immutable descriptor of a queryable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Canonical name; also the key passed to record accessors.
    pub name: &'static str,
    pub category: Category,
    /// Alternate spellings, matched case-insensitively. May contain spaces.
    pub aliases: &'static [&'static str],
}

impl Field {
    pub const fn new(
        name: &'static str,
        category: Category,
        aliases: &'static [&'static str],
    ) -> Self {
        Field {
            name,
            category,
            aliases,
        }
    }

    fn numeric(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Field::new(name, Category::Numeric, aliases)
    }

    fn string(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Field::new(name, Category::String, aliases)
    }

    fn array(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Field::new(name, Category::Array, aliases)
    }
}

/// The card fields known to the query language.
pub fn card_fields() -> Vec<Field> {
    vec![
        Field::numeric("ability", &["a", "ab"]),
        Field::numeric("armor", &["arm"]),
        Field::numeric(
            "darksideicons",
            &["dark side icons", "ds icons", "dsicons", "dsi"],
        ),
        Field::numeric("deploy", &["d", "dep"]),
        Field::numeric(
            "destiny",
            &["dest", "des", "destiny number", "destiny value"],
        ),
        Field::numeric("ferocity", &["fer"]),
        Field::numeric("forfeit", &["ff"]),
        Field::numeric("hyperspeed", &["hs"]),
        Field::numeric("landspeed", &["ls"]),
        Field::numeric(
            "lightsideicons",
            &["light side icons", "ls icons", "lsicons", "lsi"],
        ),
        Field::numeric("maneuver", &["man"]),
        Field::numeric("parsec", &["parsec number", "par"]),
        Field::numeric("politics", &["pol"]),
        Field::numeric("power", &["p", "pow", "pwr"]),
        Field::string("extraText", &["extra text"]),
        Field::string("gametext", &["game text"]),
        Field::string("lore", &["l"]),
        Field::string("title", &["t"]),
        Field::string("type", &[]),
        Field::string("rarity", &["r"]),
        Field::string("set", &[]),
        Field::string("side", &[]),
        Field::string("subtype", &["sub-type"]),
        Field::string("uniqueness", &[]),
        Field::array("characteristics", &["characteristic", "is a"]),
        Field::array("icons", &["i"]),
        Field::array("pulls", &[]),
        Field::array("pulledBy", &["pulled by"]),
    ]
}

/// The built-in card field registry.
pub static FIELDS: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(card_fields()).unwrap_or_else(|e| panic!("invalid field registry: {e}"))
});

/// Case-insensitive lookup from names and aliases to fields.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<Field>,
    // (lowercased key, index into `fields`), longest key first.
    keys: Vec<(String, usize)>,
}

impl FieldRegistry {
    /// Builds and validates a registry.
    ///
    /// Fails when a field is listed twice, when a name or alias is shared by
    /// two fields, or when an alias is empty.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut keys: Vec<(String, usize)> = Vec::new();

        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|f| f.name == field.name) {
                return Err(RegistryError::DuplicateField(field.name.to_string()));
            }
            for alias in std::iter::once(field.name).chain(field.aliases.iter().copied()) {
                let key = normalize(alias);
                if key.is_empty() {
                    return Err(RegistryError::EmptyAlias(field.name.to_string()));
                }
                if let Some((_, other)) = keys.iter().find(|(k, _)| *k == key) {
                    if *other == index {
                        continue;
                    }
                    return Err(RegistryError::DuplicateFieldAlias {
                        alias: key,
                        first: fields[*other].name.to_string(),
                        second: field.name.to_string(),
                    });
                }
                keys.push((key, index));
            }
        }

        keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Ok(FieldRegistry { fields, keys })
    }

    /// Resolves a name or alias (case-insensitive, exact).
    pub fn resolve(&self, raw: &str) -> Option<&Field> {
        let raw = normalize(raw);
        self.keys
            .iter()
            .find(|(k, _)| *k == raw)
            .map(|(_, i)| &self.fields[*i])
    }

    /// Returns the field with the given canonical name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns every registered field, in registration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns `true` if `raw` is a non-empty prefix of some name or alias.
    pub fn is_prefix(&self, raw: &str) -> bool {
        let raw = normalize(raw);
        !raw.is_empty() && self.keys.iter().any(|(k, _)| k.starts_with(&raw))
    }

    /// Finds the longest name or alias at the start of `text`.
    ///
    /// `text` must already be lower-cased. The match has to end the text or
    /// be followed by a non-alphanumeric character, so `side=dark` resolves
    /// `side` while `powerful` resolves nothing. Returns the field and the
    /// byte length of the matched token.
    pub(crate) fn leading_match(&self, text: &str) -> Option<(&Field, usize)> {
        self.keys
            .iter()
            .find(|(k, _)| {
                text.starts_with(k.as_str())
                    && text[k.len()..]
                        .chars()
                        .next()
                        .map_or(true, |c| !c.is_alphanumeric())
            })
            .map(|(k, i)| (&self.fields[*i], k.len()))
    }
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
