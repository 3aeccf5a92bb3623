//! Tests for query compilation

use super::*;

mod tokenizing {
    use super::*;

    #[test]
    fn single_numeric_filter() {
        let set = compile("mv>=3");
        assert_eq!(set.filters, vec![Filter::new("mv", Operator::GreaterOrEqual, "3")]);
        assert!(!set.fallback);
        assert_eq!(set.dropped, 0);
    }

    #[test]
    fn aliases_resolve_to_canonical_fields() {
        let set = compile("n:bolt c:red cmc<2 t:instant pow=3 tough>1 e:HC1 author:someone");
        let keys: Vec<_> = set.filters.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "colors", "mv", "type_line", "power", "toughness", "set", "creator"]
        );
    }

    #[test]
    fn every_operator_is_recognized() {
        let ops: Vec<_> = compile("mv:1 mv=1 mv>1 mv<1 mv>=1 mv<=1")
            .filters
            .iter()
            .map(|f| f.operator)
            .collect();
        assert_eq!(
            ops,
            vec![
                Operator::Match,
                Operator::Equal,
                Operator::Greater,
                Operator::Less,
                Operator::GreaterOrEqual,
                Operator::LessOrEqual,
            ]
        );
    }

    #[test]
    fn quoted_values_keep_spaces() {
        let set = compile(r#"o:"draw a card" t:creature"#);
        assert_eq!(set.filters[0], Filter::new("oracle", Operator::Match, "draw a card"));
        assert_eq!(set.filters[1], Filter::new("type_line", Operator::Match, "creature"));
    }

    #[test]
    fn unknown_keys_are_dropped_and_counted() {
        let set = compile("bogus:foo t:goblin");
        assert_eq!(set.filters, vec![Filter::new("type_line", Operator::Match, "goblin")]);
        assert_eq!(set.dropped, 1);
        assert!(!set.fallback);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let set = compile("T:goblin");
        assert!(set.fallback);
    }

    #[test]
    fn free_text_around_filters_is_ignored() {
        let set = compile("goblin t:creature extra words");
        assert_eq!(set.filters.len(), 1);
        assert_eq!(set.filters[0].key, "type_line");
    }

    #[test]
    fn operator_parse_round_trip() {
        for op in [":", "=", ">", "<", ">=", "<="] {
            assert_eq!(op.parse::<Operator>().unwrap().as_str(), op);
        }
        assert!("==".parse::<Operator>().is_err());
    }
}

mod fallback {
    use super::*;

    #[test]
    fn unknown_only_query_falls_back_to_name() {
        let set = compile("bogus:foo");
        assert_eq!(set.filters, vec![Filter::new("name", Operator::Match, "bogus:foo")]);
        assert!(set.fallback);
        assert_eq!(set.dropped, 1);
    }

    #[test]
    fn plain_text_falls_back_to_name() {
        let set = compile("lightning bolt");
        assert_eq!(
            set.filters,
            vec![Filter::new("name", Operator::Match, "lightning bolt")]
        );
        assert!(set.fallback);
        assert_eq!(set.dropped, 0);
    }

    #[test]
    fn malformed_token_falls_back() {
        // empty quotes never form a value
        let set = compile(r#"o:"""#);
        assert!(set.fallback);
        assert_eq!(set.filters[0].value, r#"o:"""#);
    }
}

mod clauses {
    use super::*;

    fn range(field: &str, min: Option<f64>, max: Option<f64>) -> Clause {
        Clause::Range {
            field: field.to_string(),
            min,
            max,
        }
    }

    #[test]
    fn greater_or_equal_is_open_above() {
        let query = compile("mv>=3").to_query(DEFAULT_EPSILON);
        assert_eq!(query.clauses, vec![range("mv", Some(3.0 - DEFAULT_EPSILON), None)]);
    }

    #[test]
    fn range_bounds_per_operator() {
        let eps = 0.5;
        let build = |q: &str| compile(q).to_query(eps).clauses;

        assert_eq!(build("pow=2"), vec![range("power", Some(1.5), Some(2.5))]);
        assert_eq!(build("pow>2"), vec![range("power", Some(2.5), None)]);
        assert_eq!(build("pow<2"), vec![range("power", None, Some(1.5))]);
        assert_eq!(build("pow>=2"), vec![range("power", Some(1.5), None)]);
        assert_eq!(build("pow<=2"), vec![range("power", None, Some(2.5))]);
    }

    #[test]
    fn colon_builds_match_clause() {
        let query = compile("name:goblin").to_query(DEFAULT_EPSILON);
        assert_eq!(
            query.clauses,
            vec![Clause::Match {
                field: "name".to_string(),
                text: "goblin".to_string(),
            }]
        );
        assert_eq!(query.clauses[0].field(), "name");
    }

    #[test]
    fn non_numeric_comparison_is_dropped() {
        let query = compile("pow>x t:goblin").to_query(DEFAULT_EPSILON);
        assert_eq!(query.clauses.len(), 1);
        assert_eq!(query.clauses[0].field(), "type_line");
        assert_eq!(query.dropped, 1);
    }

    #[test]
    fn clause_serializes_with_kind_tag() {
        let query = compile("mv<4").to_query(DEFAULT_EPSILON);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["clauses"][0]["kind"], "range");
        assert!(json["clauses"][0]["min"].is_null());
    }
}
