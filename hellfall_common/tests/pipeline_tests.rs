use hellfall_common::{compile, normalize, Clause, RawDatabase, DEFAULT_EPSILON};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_DB: &str = r#"{
    "data": [
        {
            "Name": "Fire // Ice",
            "Creator": "Tester",
            "Set": "HC2",
            "Constructed": ["Legal"],
            "CMC": 4,
            "Color(s)": "Red;Blue",
            "Cost": ["{1}{R}", "{1}{U}", null, null],
            "Card Type(s)": ["Instant", "Instant", null, null],
            "Text Box": ["Fire deals 2 damage.", "Tap target permanent.", null, null],
            "Tags": "split"
        },
        {
            "Name": "Tarmogoyf Jr.",
            "Creator": "Tester",
            "Set": "HC3",
            "Constructed": ["Legal"],
            "CMC": "2",
            "Color(s)": "Green",
            "Cost": ["{1}{G}"],
            "Card Type(s)": ["Creature"],
            "Subtype(s)": ["Lhurgoyf"],
            "power": ["*"],
            "toughness": ["1+*"]
        },
        {
            "Name": "Nothing",
            "Color(s)": ""
        }
    ]
}"#;

#[test]
fn loads_and_normalizes_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_DB.as_bytes()).unwrap();

    let db = RawDatabase::from_path(file.path()).unwrap();
    let cards = normalize(&db.entries());

    assert_eq!(cards.len(), 3);

    let split = &cards[0];
    assert_eq!(split.sides.len(), 2);
    assert_eq!(split.sides[0].mana_value, 2.0);
    assert_eq!(split.sides[1].text_box, "Tap target permanent.");
    assert_eq!(split.colors, vec!["Red", "Blue"]);
    assert_eq!(split.mana_value, Some(4.0));

    let goyf = &cards[1];
    assert_eq!(goyf.mana_value, Some(2.0));
    assert_eq!(goyf.mana_value_original.as_deref(), Some("2"));
    assert_eq!(goyf.sides[0].power, None);
    assert_eq!(goyf.sides[0].power_original.as_deref(), Some("*"));
    assert_eq!(goyf.sides[0].toughness_original.as_deref(), Some("1+*"));

    let nothing = &cards[2];
    assert!(nothing.sides.is_empty());
    assert_eq!(nothing.colors, vec![""]);
}

#[test]
fn missing_file_is_an_error() {
    let result = RawDatabase::from_path(std::path::Path::new("/no/such/file/db.json"));
    assert!(matches!(result, Err(hellfall_common::Error::Io(_))));
}

#[test]
fn normalized_cards_round_trip_through_json() {
    let db = RawDatabase::from_json(SAMPLE_DB).unwrap();
    let cards = normalize(&db.entries());

    let json = serde_json::to_string(&cards).unwrap();
    assert!(json.contains("\"mv_original\":\"2\""));
    assert!(json.contains("\"textbox\":\"Fire deals 2 damage.\""));

    let back: Vec<hellfall_common::Card> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cards);
}

#[test]
fn query_compiles_to_and_of_clauses() {
    let set = compile(r#"t:instant mv<=2 o:"deals 2""#);
    let query = set.to_query(DEFAULT_EPSILON);

    assert_eq!(query.clauses.len(), 3);
    assert!(matches!(query.clauses[0], Clause::Match { .. }));
    assert!(matches!(
        query.clauses[1],
        Clause::Range { min: None, max: Some(_), .. }
    ));
}
