//! Property-based tests for the round-trip guarantee: any tree the parser can
//! produce, written under any configuration, parses back to the same tree.

use proptest::prelude::*;
use serde_kff::{
    from_str, to_string_with_config, validate, Around, Class, Document, FormatConfig, Indent,
    List, Name, Path, Segment, Tag, Value,
};

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn decimal_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => any::<f64>(),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => Just(-0.0),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        decimal_strategy().prop_map(Value::Decimal),
        any::<String>().prop_map(Value::String),
    ]
}

fn class_from(tags: Vec<(String, Value)>) -> Class {
    tags.into_iter()
        .map(|(name, value)| Tag::new(name, value).unwrap())
        .collect()
}

/// Lists are built from one element kind so they stay homogeneous.
fn list_from(kind: u8, values: Vec<Value>) -> List {
    let items: Vec<Value> = values
        .into_iter()
        .filter(|v| match kind % 4 {
            0 => v.is_boolean() || v.is_integer(),
            1 => v.is_class(),
            2 => v.is_list(),
            _ => v.is_string() || v.is_decimal(),
        })
        .collect();
    let first = items.first().map(Value::data_type);
    List::from_values(items.into_iter().filter(|v| Some(v.data_type()) == first)).unwrap()
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec((name_strategy(), inner.clone()), 0..5)
                .prop_map(|tags| Value::Class(class_from(tags))),
            (any::<u8>(), prop::collection::vec(inner, 0..6))
                .prop_map(|(kind, values)| Value::List(list_from(kind, values))),
        ]
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec((name_strategy(), value_strategy()), 0..6)
        .prop_map(|tags| Document::from_root("prop.kff", class_from(tags)))
}

fn around_strategy() -> impl Strategy<Value = Around> {
    prop_oneof![
        Just(Around::None),
        Just(Around::Before),
        Just(Around::After),
        Just(Around::Both),
    ]
}

fn config_strategy() -> impl Strategy<Value = FormatConfig> {
    (
        prop::array::uniform9(around_strategy()),
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(Indent::Tab), (0u8..5).prop_map(Indent::Spaces)],
    )
        .prop_map(|(a, indent_class, indent_list, indent)| FormatConfig {
            name_separator_newline: a[0],
            name_separator_space: a[1],
            tag_end_newline: a[2],
            class_opening_newline: a[3],
            class_closing_newline: a[4],
            list_opening_newline: a[5],
            list_closing_newline: a[6],
            list_separator_newline: a[7],
            list_separator_space: a[8],
            indent_class,
            indent_list,
            indent,
        })
}

proptest! {
    #[test]
    fn prop_round_trip_compact(document in document_strategy()) {
        let text = to_string_with_config(&document, &FormatConfig::compact());
        let back = from_str("prop.kff", &text).unwrap();
        prop_assert_eq!(back, document);
    }

    #[test]
    fn prop_round_trip_any_config(document in document_strategy(), config in config_strategy()) {
        let text = to_string_with_config(&document, &config);
        let back = from_str("prop.kff", &text);
        prop_assert!(back.is_ok(), "{:?} failed on {:?}", config, text);
        prop_assert_eq!(back.unwrap(), document);
    }

    #[test]
    fn prop_validate_accepts_written_text(document in document_strategy(), config in config_strategy()) {
        let text = to_string_with_config(&document, &config);
        prop_assert!(validate("prop.kff", &text).is_ok());
    }

    #[test]
    fn prop_decimal_bits_survive(x in any::<f64>().prop_filter("not NaN", |x| !x.is_nan())) {
        let mut document = Document::new("bits.kff");
        document.root_mut().set(Tag::new("X", x).unwrap());
        let text = to_string_with_config(&document, &FormatConfig::pretty());
        let back = from_str("bits.kff", &text).unwrap();
        let y = back.root().get("X").unwrap().as_f64().unwrap();
        prop_assert_eq!(x.to_bits(), y.to_bits());
    }

    #[test]
    fn prop_integers_survive(n in any::<i64>()) {
        let mut document = Document::new("int.kff");
        document.root_mut().set(Tag::new("N", n).unwrap());
        let back = from_str("int.kff", &document.to_string()).unwrap();
        prop_assert_eq!(back.root().get("N").unwrap(), &Value::Integer(n));
    }

    #[test]
    fn prop_strings_survive(s in any::<String>()) {
        let mut document = Document::new("str.kff");
        document.root_mut().set(Tag::new("S", s.as_str()).unwrap());
        let back = from_str("str.kff", &document.to_string()).unwrap();
        prop_assert_eq!(back.root().get("S").unwrap().as_str(), Some(s.as_str()));
    }

    #[test]
    fn prop_parser_and_validator_agree(text in "[A-Za-z0-9_ =;{}\\[\\],.\"\\\\/<-]{0,40}") {
        let parsed = from_str("fuzz.kff", &text);
        let validated = validate("fuzz.kff", &text);
        prop_assert_eq!(parsed.is_ok(), validated.is_ok());
        if let (Err(a), Err(b)) = (parsed, validated) {
            prop_assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn prop_path_display_round_trip(
        segments in prop::collection::vec(
            prop_oneof![
                name_strategy().prop_map(|n| Segment::Named(Name::new(n).unwrap())),
                (0usize..1000).prop_map(Segment::Indexed),
                Just(Segment::Backward),
            ],
            0..8,
        )
    ) {
        let path: Path = segments.into_iter().collect();
        let reparsed = Path::new(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn prop_placeholders_substitute(index in any::<usize>()) {
        let templated = Path::with_args("Objects.{0}.Name", &[index]).unwrap();
        let literal = Path::new(&format!("Objects.{}.Name", index)).unwrap();
        prop_assert_eq!(templated, literal);
    }
}
