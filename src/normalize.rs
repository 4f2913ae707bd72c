//! Turns serialized markup nodes into plain field values.
//!
//! Each raw value is expected to be a single leaf element: one opening tag,
//! its text, one closing tag. Nested or multi-element content keeps only the
//! text before the first inner tag.

use crate::card::{Card, Field, RawCard, NULL_SENTINEL};

/// Drops everything up to the end of the first tag and everything from the
/// next `<` onward, then trims.
pub fn strip_tags(raw: &str) -> &str {
    let after_open = raw.find('>').map_or(raw, |end| &raw[end + 1..]);
    let inner = after_open
        .find('<')
        .map_or(after_open, |start| &after_open[..start]);
    inner.trim()
}

/// Normalizes one value. Absent values and a lone dash become [`NULL_SENTINEL`].
pub fn normalize_value(raw: Option<&str>) -> String {
    match raw.map(strip_tags) {
        None | Some("-") => NULL_SENTINEL.to_string(),
        Some(text) => text.to_string(),
    }
}

pub fn normalize_card(raw: &RawCard) -> Card {
    Card::from_fn(|field: Field| normalize_value(raw.get(field)))
}

pub fn normalize_cards(raw: &[RawCard]) -> Vec<Card> {
    raw.iter().map(normalize_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_a_single_leaf_element() {
        assert_eq!(strip_tags("<li>BT1-001</li>"), "BT1-001");
        assert_eq!(strip_tags(r#"<dd class="cardColor">  Red </dd>"#), "Red");
    }

    #[test]
    fn keeps_text_before_nested_markup() {
        assert_eq!(strip_tags("<dd>[On Play] Draw 1<br>More</dd>"), "[On Play] Draw 1");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_tags("  Agumon "), "Agumon");
    }

    #[test]
    fn dash_and_absent_become_null() {
        assert_eq!(normalize_value(Some("<dd>-</dd>")), "null");
        assert_eq!(normalize_value(Some("<li> - </li>")), "null");
        assert_eq!(normalize_value(None), "null");
    }

    #[test]
    fn other_text_is_preserved() {
        assert_eq!(normalize_value(Some("<dd>--</dd>")), "--");
        assert_eq!(normalize_value(Some("<dd>-1000 DP</dd>")), "-1000 DP");
        assert_eq!(normalize_value(Some("<dd></dd>")), "");
    }

    #[test]
    fn normalizes_every_field_of_a_card() {
        let mut raw = RawCard::new();
        raw.set(Field::Number, "<li>BT1-001</li>");
        raw.set(Field::Name, r#"<div class="card_name">Agumon</div>"#);
        raw.set(Field::Level, "<li>-</li>");

        let card = normalize_card(&raw);
        assert_eq!(card.number, "BT1-001");
        assert_eq!(card.name, "Agumon");
        assert_eq!(card.level, "null");
        assert_eq!(card.security_effect, "null");
    }
}
