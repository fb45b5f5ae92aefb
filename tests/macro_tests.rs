use serde_kff::{kff, to_string, Class, DataType, Document, List, Tag, Value};

#[test]
fn test_kff_macro_booleans() {
    assert_eq!(kff!(true), Value::Boolean(true));
    assert_eq!(kff!(false), Value::Boolean(false));
}

#[test]
fn test_kff_macro_numbers() {
    assert_eq!(kff!(42), Value::Integer(42));
    assert_eq!(kff!(-123), Value::Integer(-123));
    assert_eq!(kff!(3.5), Value::Decimal(3.5));
    assert_eq!(kff!(f64::INFINITY), Value::Decimal(f64::INFINITY));
}

#[test]
fn test_kff_macro_strings() {
    assert_eq!(kff!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(kff!(""), Value::String(String::new()));

    let owned = String::from("owned");
    assert_eq!(kff!(owned), Value::from("owned"));
}

#[test]
fn test_kff_macro_lists() {
    assert_eq!(kff!([]), Value::List(List::new()));

    let list = kff!([1, 2, 3]);
    assert_eq!(
        list,
        Value::List(List::from_values([Value::Integer(1), Value::Integer(2), Value::Integer(3)]).unwrap())
    );

    let nested = kff!([[1], ["a", "b"], []]);
    let nested = nested.as_list().unwrap();
    assert_eq!(nested.list_type(), DataType::List);
    assert_eq!(nested.len(), 3);
}

#[test]
fn test_kff_macro_classes() {
    assert_eq!(kff!({}), Value::Class(Class::new()));

    let player = kff!({
        "Name": "Ann",
        "Stats": { "Health": 50, "Speed": 1.25 },
        "Tags": ["fast", "brave"],
    });
    let class = player.as_class().unwrap();
    assert_eq!(class.len(), 3);
    let stats = class.get("Stats").unwrap().as_class().unwrap();
    assert_eq!(stats.get("Health").unwrap(), &Value::Integer(50));
    assert_eq!(
        class.get("Tags").unwrap().as_list().unwrap().list_type(),
        DataType::String
    );
}

#[test]
fn test_kff_macro_repeated_key_replaces() {
    let value = kff!({ "A": 1, "B": 2, "A": 3 });
    let class = value.as_class().unwrap();
    assert_eq!(class.len(), 2);
    assert_eq!(class.get("A").unwrap(), &Value::Integer(3));
}

#[test]
fn test_kff_macro_into_document() {
    let root = match kff!({ "A": { "B": [true, false] } }) {
        Value::Class(class) => class,
        _ => unreachable!(),
    };
    let document = Document::from_root("macro.kff", root);
    assert_eq!(to_string(&document), "A={B=[true,false];};");
}

#[test]
fn test_kff_macro_as_tag_value() {
    let tag = Tag::new("Position", kff!([0.5, 1.5])).unwrap();
    assert_eq!(tag.to_string(), "Position=[0.5,1.5];");
}

#[test]
fn test_kff_macro_negative_numbers_in_containers() {
    assert_eq!(
        kff!([-1, 2]),
        Value::List(List::from_values([Value::Integer(-1), Value::Integer(2)]).unwrap())
    );
    let value = kff!({ "Position": [-0.5, 1.5], "Delta": -3 });
    let root = value.as_class().unwrap().clone();
    assert_eq!(
        to_string(&Document::from_root("m.kff", root)),
        "Position=[-0.5,1.5];Delta=-3;"
    );
}

#[test]
fn test_kff_macro_class_order_matters() {
    assert_ne!(kff!({ "A": 1, "B": 2 }), kff!({ "B": 2, "A": 1 }));
}

#[test]
#[should_panic(expected = "Invalid name")]
fn test_kff_macro_invalid_name_panics() {
    let _ = kff!({ "not a name": 1 });
}

#[test]
#[should_panic(expected = "List type mismatch")]
fn test_kff_macro_mixed_list_panics() {
    let _ = kff!([1, 2.5]);
}
