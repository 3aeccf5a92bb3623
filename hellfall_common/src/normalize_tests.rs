//! Tests for raw entry normalization

use super::*;
use crate::raw::RawDatabase;

fn entry_from_json(json: &str) -> RawCardEntry {
    serde_json::from_str(json).unwrap()
}

mod card_fields {
    use super::*;

    #[test]
    fn copies_identity_fields() {
        let card = normalize_entry(&entry_from_json(
            r#"{
                "Name": "Goblin Guide",
                "Creator": "Someone",
                "Set": "HC1",
                "Constructed": ["Legal", "Legal"],
                "Rulings": "None.",
                "Component of": "Big Card",
                "isActualToken": false,
                "small alt image": "alt.png"
            }"#,
        ));

        assert_eq!(card.name, "Goblin Guide");
        assert_eq!(card.creator, "Someone");
        assert_eq!(card.set, "HC1");
        assert_eq!(card.legality, vec!["Legal", "Legal"]);
        assert_eq!(card.rulings, "None.");
        assert_eq!(card.component_of.as_deref(), Some("Big Card"));
        assert_eq!(card.is_actual_token, Some(false));
        assert_eq!(card.small_alt_image.as_deref(), Some("alt.png"));
    }

    #[test]
    fn splits_multi_value_strings() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Color(s)": "Blue;Black", "Tags": "flying;vanilla", "Constructed": "Legal;Banned"}"#,
        ));

        assert_eq!(card.colors, vec!["Blue", "Black"]);
        assert_eq!(card.tags, vec!["flying", "vanilla"]);
        assert_eq!(card.legality, vec!["Legal", "Banned"]);
    }

    #[test]
    fn empty_strings_split_to_single_empty_element() {
        let card = normalize_entry(&entry_from_json(r#"{"Color(s)": ""}"#));

        assert_eq!(card.colors, vec![""]);
        assert_eq!(card.tags, vec![""]);
        assert_eq!(card.legality, vec![""]);
    }

    #[test]
    fn numeric_cmc_keeps_original_text() {
        let card = normalize_entry(&entry_from_json(r#"{"CMC": 3}"#));
        assert_eq!(card.mana_value, Some(3.0));
        assert_eq!(card.mana_value_original.as_deref(), Some("3"));
    }

    #[test]
    fn textual_cmc_is_parsed_when_possible() {
        let card = normalize_entry(&entry_from_json(r#"{"CMC": "2.5"}"#));
        assert_eq!(card.mana_value, Some(2.5));
        assert_eq!(card.mana_value_original.as_deref(), Some("2.5"));

        let card = normalize_entry(&entry_from_json(r#"{"CMC": "lots"}"#));
        assert_eq!(card.mana_value, None);
        assert_eq!(card.mana_value_original.as_deref(), Some("lots"));
    }

    #[test]
    fn missing_cmc_is_absent() {
        let card = normalize_entry(&entry_from_json(r#"{"CMC": null}"#));
        assert_eq!(card.mana_value, None);
        assert_eq!(card.mana_value_original, None);
    }

    #[test]
    fn tokens_pass_through() {
        let card = normalize_entry(&entry_from_json(
            r#"{
                "Cost": ["{R}"],
                "tokens": [{"Name": "Goblin", "Power": "1", "Toughness": "1", "Type": "Creature", "Image": "g.png"}]
            }"#,
        ));

        assert_eq!(card.tokens.len(), 1);
        assert_eq!(card.tokens[0].name, "Goblin");
        assert_eq!(card.tokens[0].kind, "Creature");
        assert_eq!(card.sides[0].tokens, card.tokens);
    }
}

mod sides {
    use super::*;

    #[test]
    fn absent_side_arrays_yield_no_sides() {
        let card = normalize_entry(&entry_from_json(r#"{"Name": "Blank"}"#));
        assert!(card.sides.is_empty());
    }

    #[test]
    fn all_null_and_empty_entries_yield_no_sides() {
        let card = normalize_entry(&entry_from_json(
            r#"{
                "Cost": [null, "", null, null],
                "Text Box": ["", null, "", null],
                "power": ["", null, null, null]
            }"#,
        ));
        assert!(card.sides.is_empty());
    }

    #[test]
    fn only_populated_indices_become_sides() {
        let card = normalize_entry(&entry_from_json(
            r#"{
                "Cost": ["{1}{R}", null, null, null],
                "Card Type(s)": ["Creature", null, "Instant", null],
                "Text Box": [null, null, "Deal 2.", null]
            }"#,
        ));

        assert_eq!(card.sides.len(), 2);
        assert_eq!(card.sides[0].cost, "{1}{R}");
        assert_eq!(card.sides[0].card_types, vec!["Creature"]);
        assert_eq!(card.sides[1].cost, "");
        assert_eq!(card.sides[1].card_types, vec!["Instant"]);
        assert_eq!(card.sides[1].text_box, "Deal 2.");
    }

    #[test]
    fn numbers_in_text_columns_become_text() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Name": "X", "Cost": [3], "Text Box": [null, 42]}"#,
        ));

        assert_eq!(card.sides.len(), 2);
        assert_eq!(card.sides[0].cost, "3");
        assert_eq!(card.sides[1].cost, "");
        assert_eq!(card.sides[1].text_box, "42");
    }

    #[test]
    fn short_arrays_are_padded() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Cost": ["{W}", "{U}"], "Text Box": ["a"]}"#,
        ));
        assert_eq!(card.sides.len(), 2);
        assert_eq!(card.sides[1].text_box, "");
    }

    #[test]
    fn entries_past_four_are_ignored() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Cost": ["{1}", "{2}", "{3}", "{4}", "{5}"]}"#,
        ));
        assert_eq!(card.sides.len(), MAX_SIDES);
        assert_eq!(card.sides[3].cost, "{4}");
    }

    #[test]
    fn side_mana_value_from_cost() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Cost": ["{2}{W}{W}", "{2/W}", "", null], "Text Box": [null, null, "text", null]}"#,
        ));

        assert_eq!(card.sides[0].mana_value, 4.0);
        assert_eq!(card.sides[0].mana_value_original, None);
        assert_eq!(card.sides[1].mana_value, 2.0);
        assert_eq!(card.sides[2].mana_value, 0.0);
    }

    #[test]
    fn malformed_cost_keeps_original() {
        let card = normalize_entry(&entry_from_json(r#"{"Cost": ["{2}{W"]}"#));

        assert_eq!(card.sides[0].mana_value, 2.0);
        assert_eq!(card.sides[0].mana_value_original.as_deref(), Some("{2}{W"));
    }

    #[test]
    fn star_power_is_text_only() {
        let card = normalize_entry(&entry_from_json(r#"{"power": ["*"], "toughness": ["*"]}"#));

        let side = &card.sides[0];
        assert_eq!(side.power, None);
        assert_eq!(side.power_original.as_deref(), Some("*"));
        assert_eq!(side.toughness, None);
    }

    #[test]
    fn numeric_power_keeps_canonical_text() {
        let card = normalize_entry(&entry_from_json(r#"{"power": [3], "toughness": [2.5]}"#));

        let side = &card.sides[0];
        assert_eq!(side.power, Some(3.0));
        assert_eq!(side.power_original.as_deref(), Some("3"));
        assert_eq!(side.toughness, Some(2.5));
        assert_eq!(side.toughness_original.as_deref(), Some("2.5"));
    }

    #[test]
    fn textual_number_is_parsed() {
        let card = normalize_entry(&entry_from_json(r#"{"Loyalty": ["4"]}"#));

        let side = &card.sides[0];
        assert_eq!(side.loyalty, Some(4.0));
        assert_eq!(side.loyalty_original.as_deref(), Some("4"));
        assert_eq!(side.power, None);
        assert_eq!(side.power_original, None);
    }

    #[test]
    fn type_fields_split_and_default() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Supertype(s)": ["Legendary"], "Card Type(s)": ["Creature"], "Subtype(s)": ["Human;Noble"]}"#,
        ));

        let side = &card.sides[0];
        assert_eq!(side.supertypes, vec!["Legendary"]);
        assert_eq!(side.subtypes, vec!["Human", "Noble"]);
        assert_eq!(side.type_line(), "Legendary Creature Human Noble");

        let card = normalize_entry(&entry_from_json(r#"{"Text Box": ["Draw a card."]}"#));
        assert_eq!(card.sides[0].supertypes, vec![""]);
        assert_eq!(card.sides[0].type_line(), "");
    }

    #[test]
    fn sides_inherit_card_tags() {
        let card = normalize_entry(&entry_from_json(
            r#"{"Tags": "a;b", "Cost": ["{G}", "{U}"]}"#,
        ));
        assert_eq!(card.sides[0].tags, vec!["a", "b"]);
        assert_eq!(card.sides[1].tags, vec!["a", "b"]);
    }
}

#[test]
fn normalizes_whole_database_in_order() {
    let db = RawDatabase::from_json(
        r#"{"data": [
            {"Name": "First", "Cost": ["{1}"]},
            {"Name": "Second", "power": [true]},
            {"Name": "Third"}
        ]}"#,
    )
    .unwrap();

    let cards = normalize(&db.entries());
    let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert!(cards[1].sides.is_empty());
}
