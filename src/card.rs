//! Card record types.
//!
//! A [`RawCard`] holds the serialized markup node behind each field as the
//! extraction passes discover it. [`Card`] is the finished record after
//! normalization, with every field populated.

use serde::Serialize;

/// String written for a value that is absent on the card.
pub const NULL_SENTINEL: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Number,
    Name,
    Rarity,
    Type,
    Level,
    Color,
    Form,
    Attribute,
    DigiType,
    Dp,
    PlayCost,
    Digivolve1,
    Digivolve2,
    Effect,
    InheritedEffect,
    SecurityEffect,
}

impl Field {
    /// Every field in output column order.
    pub const ALL: [Field; 16] = [
        Field::Number,
        Field::Name,
        Field::Rarity,
        Field::Type,
        Field::Level,
        Field::Color,
        Field::Form,
        Field::Attribute,
        Field::DigiType,
        Field::Dp,
        Field::PlayCost,
        Field::Digivolve1,
        Field::Digivolve2,
        Field::Effect,
        Field::InheritedEffect,
        Field::SecurityEffect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Number => "number",
            Field::Name => "name",
            Field::Rarity => "rarity",
            Field::Type => "type",
            Field::Level => "level",
            Field::Color => "color",
            Field::Form => "form",
            Field::Attribute => "attribute",
            Field::DigiType => "digi_type",
            Field::Dp => "dp",
            Field::PlayCost => "play_cost",
            Field::Digivolve1 => "digivolve_1",
            Field::Digivolve2 => "digivolve_2",
            Field::Effect => "effect",
            Field::InheritedEffect => "inherited_effect",
            Field::SecurityEffect => "security_effect",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Column names in output order.
pub fn header() -> [&'static str; 16] {
    Field::ALL.map(Field::name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    values: [Option<String>; 16],
}

impl RawCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, raw: impl Into<String>) {
        self.values[field.slot()] = Some(raw.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.slot()].as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub number: String,
    pub name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub level: String,
    pub color: String,
    pub form: String,
    pub attribute: String,
    pub digi_type: String,
    pub dp: String,
    pub play_cost: String,
    pub digivolve_1: String,
    pub digivolve_2: String,
    pub effect: String,
    pub inherited_effect: String,
    pub security_effect: String,
}

impl Card {
    /// Builds a card by asking `value` for each field.
    pub fn from_fn(mut value: impl FnMut(Field) -> String) -> Self {
        Self {
            number: value(Field::Number),
            name: value(Field::Name),
            rarity: value(Field::Rarity),
            card_type: value(Field::Type),
            level: value(Field::Level),
            color: value(Field::Color),
            form: value(Field::Form),
            attribute: value(Field::Attribute),
            digi_type: value(Field::DigiType),
            dp: value(Field::Dp),
            play_cost: value(Field::PlayCost),
            digivolve_1: value(Field::Digivolve1),
            digivolve_2: value(Field::Digivolve2),
            effect: value(Field::Effect),
            inherited_effect: value(Field::InheritedEffect),
            security_effect: value(Field::SecurityEffect),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Number => &self.number,
            Field::Name => &self.name,
            Field::Rarity => &self.rarity,
            Field::Type => &self.card_type,
            Field::Level => &self.level,
            Field::Color => &self.color,
            Field::Form => &self.form,
            Field::Attribute => &self.attribute,
            Field::DigiType => &self.digi_type,
            Field::Dp => &self.dp,
            Field::PlayCost => &self.play_cost,
            Field::Digivolve1 => &self.digivolve_1,
            Field::Digivolve2 => &self.digivolve_2,
            Field::Effect => &self.effect,
            Field::InheritedEffect => &self.inherited_effect,
            Field::SecurityEffect => &self.security_effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_follows_column_order() {
        assert_eq!(
            header(),
            [
                "number",
                "name",
                "rarity",
                "type",
                "level",
                "color",
                "form",
                "attribute",
                "digi_type",
                "dp",
                "play_cost",
                "digivolve_1",
                "digivolve_2",
                "effect",
                "inherited_effect",
                "security_effect",
            ]
        );
    }

    #[test]
    fn card_fields_map_back_to_their_names() {
        let card = Card::from_fn(|field| field.name().to_uppercase());
        for field in Field::ALL {
            assert_eq!(card.get(field), field.name().to_uppercase());
        }
    }

    #[test]
    fn raw_card_starts_empty() {
        let mut raw = RawCard::new();
        assert_eq!(raw.get(Field::Level), None);
        raw.set(Field::Level, "<li>4</li>");
        assert_eq!(raw.get(Field::Level), Some("<li>4</li>"));
    }
}
