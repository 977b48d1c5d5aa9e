//! A concrete card record.
//!
//! [`Card`] mirrors the attributes named by the built-in field registry and
//! deserializes from the JSON shape card data is distributed in. Stats are
//! accepted either as numbers or as text (`"3"`, `"*"`); text is coerced at
//! comparison time.

use serde::{Deserialize, Serialize};

use crate::traits::Record;
use crate::value::{Number, Value};

/// A card stat, stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Number(f64),
    Text(String),
}

impl Stat {
    fn value(&self) -> Value<'_> {
        match self {
            Stat::Number(n) => Value::Number(Number::F64(*n)),
            Stat::Text(s) => Value::String(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub title: String,
    pub side: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub subtype: Option<String>,
    pub set: Option<String>,
    pub rarity: Option<String>,
    pub uniqueness: Option<String>,
    pub lore: Option<String>,
    pub gametext: Option<String>,
    pub extra_text: Option<String>,

    pub ability: Option<Stat>,
    pub armor: Option<Stat>,
    #[serde(alias = "darksideicons")]
    pub dark_side_icons: Option<Stat>,
    pub deploy: Option<Stat>,
    pub destiny: Option<Stat>,
    pub ferocity: Option<Stat>,
    pub forfeit: Option<Stat>,
    pub hyperspeed: Option<Stat>,
    pub landspeed: Option<Stat>,
    #[serde(alias = "lightsideicons")]
    pub light_side_icons: Option<Stat>,
    pub maneuver: Option<Stat>,
    pub parsec: Option<Stat>,
    pub politics: Option<Stat>,
    pub power: Option<Stat>,

    pub characteristics: Vec<String>,
    pub icons: Vec<String>,
    pub pulls: Vec<String>,
    pub pulled_by: Vec<String>,
}

fn text(value: &Option<String>) -> Value<'_> {
    value.as_deref().map_or(Value::None, Value::String)
}

fn stat(value: &Option<Stat>) -> Value<'_> {
    value.as_ref().map_or(Value::None, Stat::value)
}

impl Record for Card {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "title" => Value::String(&self.title),
            "side" => text(&self.side),
            "type" => text(&self.card_type),
            "subtype" => text(&self.subtype),
            "set" => text(&self.set),
            "rarity" => text(&self.rarity),
            "uniqueness" => text(&self.uniqueness),
            "lore" => text(&self.lore),
            "gametext" => text(&self.gametext),
            "extraText" => text(&self.extra_text),

            "ability" => stat(&self.ability),
            "armor" => stat(&self.armor),
            "darksideicons" => stat(&self.dark_side_icons),
            "deploy" => stat(&self.deploy),
            "destiny" => stat(&self.destiny),
            "ferocity" => stat(&self.ferocity),
            "forfeit" => stat(&self.forfeit),
            "hyperspeed" => stat(&self.hyperspeed),
            "landspeed" => stat(&self.landspeed),
            "lightsideicons" => stat(&self.light_side_icons),
            "maneuver" => stat(&self.maneuver),
            "parsec" => stat(&self.parsec),
            "politics" => stat(&self.politics),
            "power" => stat(&self.power),

            "characteristics" => Value::List(&self.characteristics),
            "icons" => Value::List(&self.icons),
            "pulls" => Value::List(&self.pulls),
            "pulledBy" => Value::List(&self.pulled_by),
            _ => Value::None,
        }
    }
}
