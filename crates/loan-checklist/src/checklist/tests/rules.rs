use std::io::Cursor;

use crate::checklist::evaluation::{Predicate, Rule, RuleSet, RuleSetError};

#[test]
fn standard_rule_set_lists_reference_rules_in_order() {
    let rules = RuleSet::standard();

    assert_eq!(
        rules.names().collect::<Vec<_>>(),
        vec![
            "Valuation Fee Paid",
            "UK Resident",
            "Risk Rating Medium",
            "LTV Below 60%"
        ]
    );
    assert_eq!(
        rules.rules()[3].predicate,
        Predicate::RatioBelow {
            numerator: "loanRequired".to_string(),
            denominator: "purchasePrice".to_string(),
            limit_percent: 60.0,
        }
    );
}

#[test]
fn rejects_duplicate_rule_names() {
    let err = RuleSet::new(vec![
        Rule::flag_set("UK Resident", "isUkResident"),
        Rule::flag_set("UK Resident", "isUkCitizen"),
    ])
    .expect_err("duplicates rejected");

    match err {
        RuleSetError::DuplicateName(name) => assert_eq!(name, "UK Resident"),
        other => panic!("expected duplicate name error, got {other:?}"),
    }
}

#[test]
fn rejects_blank_rule_names() {
    let err = RuleSet::new(vec![Rule::flag_set("  ", "isUkResident")])
        .expect_err("blank name rejected");

    assert!(matches!(err, RuleSetError::EmptyName));
}

#[test]
fn loads_rule_set_from_json() {
    let raw = r#"[
        {"name": "Valuation Fee Paid", "kind": "flag_set", "field": "isValuationFeePaid"},
        {"name": "Risk Rating Low", "kind": "text_equals", "field": "riskRating", "expected": "Low"},
        {"name": "LTV Below 75%", "kind": "ratio_below", "numerator": "loanRequired",
         "denominator": "purchasePrice", "limit_percent": 75}
    ]"#;

    let rules = RuleSet::from_json_reader(Cursor::new(raw)).expect("rule file parses");

    assert_eq!(rules.len(), 3);
    assert_eq!(
        rules.rules()[1],
        Rule::text_equals("Risk Rating Low", "riskRating", "Low")
    );
    assert_eq!(
        rules.rules()[2],
        Rule::ratio_below("LTV Below 75%", "loanRequired", "purchasePrice", 75.0)
    );
}

#[test]
fn json_loading_applies_name_validation() {
    let raw = r#"[
        {"name": "UK Resident", "kind": "flag_set", "field": "isUkResident"},
        {"name": "UK Resident", "kind": "flag_set", "field": "isUkResident"}
    ]"#;

    let err = RuleSet::from_json_reader(Cursor::new(raw)).expect_err("duplicate rejected");
    assert!(matches!(err, RuleSetError::DuplicateName(_)));
}

#[test]
fn unknown_predicate_kind_is_a_parse_error() {
    let raw = r#"[{"name": "Age", "kind": "older_than", "field": "age"}]"#;

    let err = RuleSet::from_json_reader(Cursor::new(raw)).expect_err("unknown kind rejected");
    assert!(matches!(err, RuleSetError::Parse(_)));
}

#[test]
fn standard_rules_round_trip_through_json() {
    let encoded = serde_json::to_string(RuleSet::standard().rules()).expect("serialize rules");
    let decoded = RuleSet::from_json_reader(Cursor::new(encoded)).expect("decode rules");

    assert_eq!(decoded, RuleSet::standard());
}

#[test]
fn missing_rule_file_reports_path() {
    let path = std::path::Path::new("/nonexistent/checklist-rules.json");

    let err = RuleSet::from_optional_path(Some(path)).expect_err("missing file");
    assert!(err.to_string().contains("checklist-rules.json"));
    assert_eq!(
        RuleSet::from_optional_path(None).expect("standard fallback"),
        RuleSet::standard()
    );
}
