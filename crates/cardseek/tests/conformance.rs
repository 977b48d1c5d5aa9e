//! Conformance tests against the documented example queries.

use cardseek::{
    ArrayComparator, Card, Comparator, FilterQuerySet, Number, NumericComparator, Operand, Record,
    StringComparator,
};

fn cards() -> Vec<Card> {
    serde_json::from_str(
        r#"[
            {
                "title": "Darth Vader",
                "side": "Dark",
                "type": "Character",
                "subtype": "Imperial",
                "lore": "Dark Lord of the Sith.",
                "gametext": "Adds 3 to power of anything he pilots.",
                "power": 6,
                "ability": 6,
                "destiny": "6",
                "icons": ["Warrior"],
                "characteristics": ["leader"]
            },
            {
                "title": "Agent Kallus",
                "side": "Dark",
                "type": "Character",
                "subtype": "Imperial",
                "lore": "ISB agent assigned to Lothal.",
                "power": 3,
                "destiny": 2
            },
            {
                "title": "Colonel Yularen",
                "side": "Dark",
                "type": "Character",
                "subtype": "Imperial",
                "lore": "ISB",
                "power": 2,
                "destiny": 3
            },
            {
                "title": "Han Solo",
                "side": "Light",
                "type": "Character",
                "subtype": "Rebel",
                "lore": "Smuggler. Corellian.",
                "power": 4,
                "ability": 3,
                "icons": ["Pilot", "Warrior"],
                "pulls": ["Falcon"]
            },
            {
                "title": "Millennium Falcon",
                "side": "Light",
                "type": "Starship",
                "subtype": "Starfighter",
                "power": 3,
                "hyperspeed": 6,
                "icons": ["Nav Computer", "Scomp Link"]
            },
            {
                "title": "Death Star",
                "side": "Dark",
                "type": "Location",
                "subtype": "System",
                "parsec": "*",
                "darkSideIcons": 2,
                "lightSideIcons": 1
            },
            {
                "title": "Jedi Training",
                "side": "Light",
                "type": "Effect",
                "subtype": "Starting",
                "gametext": "I have a bad feeling about this."
            },
            {
                "title": "Chewbacca",
                "side": "Light",
                "type": "Character",
                "subtype": "Alien",
                "power": 6,
                "pulledBy": ["SoS"]
            }
        ]"#,
    )
    .unwrap()
}

fn run(query: &str) -> Vec<String> {
    let cards = cards();
    FilterQuerySet::parse(query)
        .execute(&cards, Card::accessor)
        .into_iter()
        .map(|c| c.title.clone())
        .collect()
}

#[test]
fn three_clause_query_splits_and_resolves() {
    let query = FilterQuerySet::parse("lore c isb and side=dark and type=character");
    assert_eq!(query.length(), 3);
    assert!(query.valid());

    let names: Vec<_> = query
        .filter_queries()
        .iter()
        .map(|q| q.display_field_name())
        .collect();
    assert_eq!(names, vec!["lore", "side", "type"]);

    assert_eq!(
        run("lore c isb and side=dark and type=character"),
        vec!["Agent Kallus", "Colonel Yularen"]
    );
}

#[test]
fn single_numeric_clause() {
    let query = FilterQuerySet::parse("power=9");
    assert_eq!(query.length(), 1);
    let clause = &query.filter_queries()[0];
    assert!(clause.valid());
    assert_eq!(
        clause.comparator(),
        Some(Comparator::Numeric(NumericComparator::Equals))
    );
    assert_eq!(clause.display_comparator_name(), "equals");
    assert_eq!(clause.value(), Some(&Operand::Number(Number::I64(9))));
    assert!(run("power=9").is_empty());
}

#[test]
fn help_text_examples() {
    assert_eq!(run("gametext contains bad feeling"), vec!["Jedi Training"]);
    assert_eq!(run("lore matches isb"), vec!["Colonel Yularen"]);
    assert_eq!(run("power = 6"), vec!["Darth Vader", "Chewbacca"]);
    assert_eq!(run("pulls falcon"), vec!["Han Solo"]);
    assert_eq!(run("pulled by sos"), vec!["Chewbacca"]);
    assert_eq!(run("is a leader"), vec!["Darth Vader"]);
    assert_eq!(run("subtype contains starting"), vec!["Jedi Training"]);
    assert_eq!(run("icons includes pilot"), vec!["Han Solo"]);
}

#[test]
fn alias_spellings_agree() {
    let expected = run("power = 6");
    assert_eq!(run("Power = 6"), expected);
    assert_eq!(run("pwr=6"), expected);
    assert_eq!(run("POW = 6"), expected);
    assert_eq!(run("p 6"), expected);
}

#[test]
fn multi_word_fields() {
    assert_eq!(run("dark side icons = 2"), vec!["Death Star"]);
    assert_eq!(run("ds icons > 1"), vec!["Death Star"]);
    assert_eq!(run("ls icons = 1"), vec!["Death Star"]);
    assert_eq!(run("hs >= 6"), vec!["Millennium Falcon"]);
}

#[test]
fn numeric_stats_stored_as_text_are_coerced() {
    assert_eq!(run("destiny = 6"), vec!["Darth Vader"]);
    assert_eq!(
        run("destiny less than 6"),
        vec!["Agent Kallus", "Colonel Yularen"]
    );
    // `*` is not a number and never satisfies a numeric comparator.
    assert!(run("parsec != 3").is_empty());
}

#[test]
fn string_comparators() {
    assert_eq!(run("title starts with darth"), vec!["Darth Vader"]);
    assert_eq!(run("title ends with solo"), vec!["Han Solo"]);
    assert_eq!(run("side != dark and type = character"), vec!["Han Solo", "Chewbacca"]);
    assert_eq!(run("lore has corellian"), vec!["Han Solo"]);
}

#[test]
fn array_comparators() {
    assert_eq!(
        run("icons excludes warrior and type = character and side = light"),
        vec!["Chewbacca"]
    );
    assert_eq!(run("i warrior"), vec!["Darth Vader", "Han Solo"]);
    let query = FilterQuerySet::parse("icons pilot");
    assert_eq!(
        query.filter_queries()[0].comparator(),
        Some(Comparator::Array(ArrayComparator::Includes))
    );
    assert!(query.filter_queries()[0].using_default_comparator());
}

#[test]
fn intersection_equals_sequential_application() {
    let cards = cards();
    let both = FilterQuerySet::parse("side=light and power >= 4");
    let combined: Vec<&Card> = both.execute(&cards, Card::accessor);

    let light: Vec<Card> = FilterQuerySet::parse("side=light")
        .execute(&cards, Card::accessor)
        .into_iter()
        .cloned()
        .collect();
    let sequential: Vec<Card> = FilterQuerySet::parse("power >= 4")
        .execute(&light, Card::accessor)
        .into_iter()
        .cloned()
        .collect();

    let combined: Vec<Card> = combined.into_iter().cloned().collect();
    assert_eq!(combined, sequential);
    assert_eq!(
        combined.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
        vec!["Han Solo", "Chewbacca"]
    );
}

#[test]
fn empty_and_unresolved_queries_show_everything() {
    let all: Vec<String> = cards().into_iter().map(|c| c.title).collect();
    assert_eq!(run(""), all);
    assert_eq!(run("po"), all);
    assert_eq!(run("power = abc"), all);
}

#[test]
fn invalid_clause_does_not_narrow_valid_ones() {
    assert_eq!(
        run("side = dark and type = location and po"),
        vec!["Death Star"]
    );
}

#[test]
fn unknown_value_reports_invalid_not_empty() {
    let query = FilterQuerySet::parse("power = abc");
    let clause = &query.filter_queries()[0];
    assert!(!clause.valid_value());
    assert_eq!(clause.raw_value(), "abc");
    assert!(!query.valid());
}

#[test]
fn report_serializes_for_display() {
    let cards = cards();
    let query = FilterQuerySet::parse("side=dark and lore c isb and pow");
    let report = query.report(&cards, Card::accessor);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["clause_count"], 3);
    assert_eq!(json["valid"], false);
    assert_eq!(json["result_count"], 2);
    assert_eq!(json["clauses"][0]["field"], "side");
    assert_eq!(json["clauses"][0]["result_count"], 4);
    assert_eq!(json["clauses"][1]["comparator"], "contains");
    assert_eq!(json["clauses"][1]["value"], "isb");
    assert_eq!(json["clauses"][1]["result_count"], 2);
    assert_eq!(json["clauses"][2]["field"], "power");
    assert_eq!(json["clauses"][2]["valid_field"], true);
    assert_eq!(json["clauses"][2]["valid_comparator"], false);
}

#[test]
fn comparator_names_by_category() {
    let query = FilterQuerySet::parse("lore = isb and power = 3 and icons = pilot");
    let comparators: Vec<_> = query
        .filter_queries()
        .iter()
        .map(|q| q.comparator())
        .collect();
    assert_eq!(
        comparators,
        vec![
            Some(Comparator::String(StringComparator::Equals)),
            Some(Comparator::Numeric(NumericComparator::Equals)),
            Some(Comparator::Array(ArrayComparator::Includes)),
        ]
    );
}
