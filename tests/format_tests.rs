//! Conformance tests for the KFF text format: lexical rules, numeric forms,
//! error positions and writer output.

use serde_kff::{
    from_str, to_string, to_string_with_config, validate, Around, DataType, Error, FormatConfig,
    Indent, Value,
};

fn first_value(text: &str) -> Value {
    let document = from_str("format.kff", text).unwrap();
    let (_, value) = document.root().get_index(0).unwrap();
    value.clone()
}

fn error_position(text: &str) -> (usize, usize) {
    from_str("format.kff", text)
        .unwrap_err()
        .position()
        .unwrap()
}

mod lexical {
    use super::*;

    #[test]
    fn test_whitespace_between_every_token() {
        let text = "\t A \r\n=\n [ 1 ,\t2 , 3 ] \n ; B={C=\"x\";};";
        let document = from_str("ws.kff", text).unwrap();
        assert_eq!(document.root().len(), 2);
    }

    #[test]
    fn test_whitespace_inside_string_is_kept() {
        assert_eq!(first_value("S = \" a\tb\nc \";"), Value::from(" a\tb\nc "));
    }

    #[test]
    fn test_comments() {
        let text = "// leading\nA = 1; // after a tag\n// B = 2;\nC = [1, // inside a list\n 2];";
        let document = from_str("c.kff", text).unwrap();
        assert_eq!(document.root().len(), 2);
        assert!(!document.root().has("B"));
    }

    #[test]
    fn test_comment_marker_inside_string() {
        assert_eq!(first_value("S = \"http://x\";"), Value::from("http://x"));
    }

    #[test]
    fn test_unicode_whitespace_is_not_whitespace() {
        assert!(from_str("u.kff", "A =\u{00A0}1;").is_err());
    }

    #[test]
    fn test_names() {
        assert!(from_str("n.kff", "_a1 = 1; B_ = 2; c = 3;").is_ok());
        assert!(from_str("n.kff", "1a = 1;").is_err());
        assert!(from_str("n.kff", "a-b = 1;").is_err());
        assert!(from_str("n.kff", "\"A\" = 1;").is_err());
    }

    #[test]
    fn test_unicode_in_strings() {
        assert_eq!(first_value("S = \"żółw 🐢\";"), Value::from("żółw 🐢"));
    }
}

mod numbers {
    use super::*;

    #[test]
    fn test_integer_forms() {
        assert_eq!(first_value("N = 0;"), Value::Integer(0));
        assert_eq!(first_value("N = -0;"), Value::Integer(0));
        assert_eq!(first_value("N = 9223372036854775807;"), Value::Integer(i64::MAX));
        assert_eq!(first_value("N = 007;"), Value::Integer(7));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(first_value("N = 0.25;"), Value::Decimal(0.25));
        assert_eq!(first_value("N = -1.5e2;"), Value::Decimal(-150.0));
        assert_eq!(first_value("N = 1E-2;"), Value::Decimal(0.01));
        assert_eq!(first_value("N = 7e0;"), Value::Decimal(7.0));
        assert_eq!(first_value("N = Infinity;"), Value::Decimal(f64::INFINITY));
    }

    #[test]
    fn test_rejected_forms() {
        for text in [
            "N = +1;",
            "N = 1.;",
            "N = .1;",
            "N = 1e+1;",
            "N = 1e;",
            "N = 1.e5;",
            "N = --1;",
            "N = -NaN;",
            "N = infinity;",
            "N = 0x10;",
        ] {
            assert!(from_str("n.kff", text).is_err(), "{} was accepted", text);
            assert!(validate("n.kff", text).is_err(), "{} was validated", text);
        }
    }

    #[test]
    fn test_integer_overflow() {
        let err = from_str("n.kff", "N = 99999999999999999999;").unwrap_err();
        assert!(matches!(err, Error::Parse { column: 5, .. }));
        assert!(from_str("n.kff", "N = -9223372036854775809;").is_err());
    }

    #[test]
    fn test_decimal_overflow() {
        assert!(from_str("n.kff", "N = 1e309;").is_err());
        assert!(from_str("n.kff", "N = -2e308;").is_err());
    }
}

mod strings {
    use super::*;

    #[test]
    fn test_valid_escapes() {
        assert_eq!(first_value(r#"S = "\"\\";"#), Value::from("\"\\"));
        assert_eq!(first_value(r#"S = "";"#), Value::from(""));
    }

    #[test]
    fn test_invalid_escapes() {
        for text in [r#"S = "\n";"#, r#"S = "\t";"#, r#"S = "\A";"#, r#"S = "\'";"#] {
            let err = from_str("s.kff", text).unwrap_err();
            assert!(matches!(err, Error::Parse { column: 6, .. }), "{}: {:?}", text, err);
        }
    }

    #[test]
    fn test_unterminated() {
        assert!(from_str("s.kff", "S = \"abc;").unwrap_err().is_eof());
        assert!(from_str("s.kff", "S = \"abc\\").unwrap_err().is_eof());
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(error_position("?"), (1, 1));
        assert_eq!(error_position("A = 1;\n  B = ?;"), (2, 7));
        assert_eq!(error_position("A = 1;\r\nB ! 2;"), (2, 3));
    }

    #[test]
    fn test_position_counts_characters() {
        assert_eq!(error_position("S = \"ąę\" ?"), (1, 10));
    }

    #[test]
    fn test_eof_position() {
        let err = from_str("eof.kff", "A = {\n  B = 1;\n").unwrap_err();
        assert!(err.is_eof());
        assert_eq!(err.position(), Some((3, 1)));
    }

    #[test]
    fn test_duplicate_points_at_second_tag() {
        assert_eq!(error_position("A = { X = 1;\n   X = 2; };"), (2, 4));
    }

    #[test]
    fn test_type_mismatch_points_at_element() {
        let err = from_str("t.kff", "L = [\n  [1],\n  2\n];").unwrap_err();
        match err {
            Error::TypeMismatch { expected, found, at } => {
                assert_eq!(expected, DataType::List);
                assert_eq!(found, DataType::Integer);
                let at = at.unwrap();
                assert_eq!(at.document, "t.kff");
                assert_eq!((at.line, at.column), (3, 3));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_lone_slash() {
        assert_eq!(error_position("A = 1; /B = 2;"), (1, 8));
        assert_eq!(error_position("A = 1/;"), (1, 6));
    }

    #[test]
    fn test_tag_needs_terminator() {
        assert!(from_str("t.kff", "A = 1 B = 2;").is_err());
        assert!(from_str("t.kff", "A = { B = 1 };").is_err());
        assert!(from_str("t.kff", "A = 1;;").is_err());
    }

    #[test]
    fn test_stray_closers() {
        assert!(from_str("t.kff", "}").is_err());
        assert!(from_str("t.kff", "A = [1]];").is_err());
    }
}

mod writer {
    use super::*;

    #[test]
    fn test_compact_has_no_whitespace() {
        let document = from_str("w.kff", "A = { B = [ 1 , 2 ]; };  C = \"a b\";").unwrap();
        assert_eq!(to_string(&document), "A={B=[1,2];};C=\"a b\";");
    }

    #[test]
    fn test_integer_and_boolean_rendering() {
        let document = from_str("w.kff", "A = -42; B = true; C = false;").unwrap();
        assert_eq!(to_string(&document), "A=-42;B=true;C=false;");
    }

    #[test]
    fn test_list_of_classes_indented() {
        let document = from_str("w.kff", "L = [{ A = 1; }, { B = 2; }];").unwrap();
        let config = FormatConfig::pretty()
            .with_list_newlines(Around::After, Around::Before)
            .with_list_separator_newline(Around::After)
            .with_indent(Indent::Spaces(2));
        assert_eq!(
            to_string_with_config(&document, &config),
            "L = [\n  {\n    A = 1;\n  },\n  {\n    B = 2;\n  }\n];\n"
        );
    }

    #[test]
    fn test_indentation_only_when_enabled() {
        let document = from_str("w.kff", "A = { B = 1; };").unwrap();
        let config = FormatConfig::pretty().with_indentation(false, false);
        assert_eq!(to_string_with_config(&document, &config), "A = {\nB = 1;\n};\n");
    }

    #[test]
    fn test_newline_before_tag_end() {
        let document = from_str("w.kff", "A = 1;").unwrap();
        let config = FormatConfig::compact().with_tag_end_newline(Around::Before);
        assert_eq!(to_string_with_config(&document, &config), "A=1\n;");
    }
}
