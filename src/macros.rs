/// Builds a [`Value`](crate::Value) from KFF-like syntax.
///
/// Class keys are string literals and must be valid tag names; list elements
/// must share one type. Either violation panics, the way `serde_json::json!`
/// panics on unserializable input. Values are nested brackets or any expression
/// with a `Value::from` conversion, so `kff!([-1, 2])` works.
///
/// # Examples
///
/// ```rust
/// use serde_kff::{kff, DataType};
///
/// let player = kff!({
///     "Name": "Ann",
///     "Health": 50,
///     "Position": [1.5, 2.0, -0.5],
///     "Alive": true
/// });
///
/// let class = player.as_class().unwrap();
/// assert_eq!(class.len(), 4);
/// assert_eq!(
///     class.try_get("Position").unwrap().as_list().unwrap().list_type(),
///     DataType::Decimal
/// );
/// ```
#[macro_export]
macro_rules! kff {
    // Lists: elements are munched one at a time so any expression works.
    (@list [$($done:expr,)*]) => {
        match $crate::List::from_values(vec![$($done),*]) {
            Ok(list) => $crate::Value::List(list),
            Err(err) => panic!("kff!: {}", err),
        }
    };

    (@list [$($done:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::kff!(@list [$($done,)* $crate::kff!([$($inner)*]),] $($($rest)*)?)
    };

    (@list [$($done:expr,)*] {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::kff!(@list [$($done,)* $crate::kff!({$($inner)*}),] $($($rest)*)?)
    };

    (@list [$($done:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::kff!(@list [$($done,)* $crate::kff!($next),] $($($rest)*)?)
    };

    // Classes: one `"Key": value` entry per step.
    (@class $class:ident) => {};

    (@class $class:ident $key:literal : [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::kff!(@set $class $key $crate::kff!([$($inner)*]));
        $crate::kff!(@class $class $($($rest)*)?);
    };

    (@class $class:ident $key:literal : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        $crate::kff!(@set $class $key $crate::kff!({$($inner)*}));
        $crate::kff!(@class $class $($($rest)*)?);
    };

    (@class $class:ident $key:literal : $value:expr $(, $($rest:tt)*)?) => {
        $crate::kff!(@set $class $key $crate::kff!($value));
        $crate::kff!(@class $class $($($rest)*)?);
    };

    (@set $class:ident $key:literal $value:expr) => {
        match $crate::Tag::new($key, $value) {
            Ok(tag) => {
                $class.set(tag);
            }
            Err(err) => panic!("kff!: {}", err),
        }
    };

    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::List($crate::List::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::kff!(@list [] $($tt)+)
    };

    ({}) => {
        $crate::Value::Class($crate::Class::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut class = $crate::Class::new();
        $crate::kff!(@class class $($tt)+);
        $crate::Value::Class(class)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Class, DataType, List, Value};

    #[test]
    fn test_kff_macro_primitives() {
        assert_eq!(kff!(true), Value::Boolean(true));
        assert_eq!(kff!(false), Value::Boolean(false));
        assert_eq!(kff!(42), Value::Integer(42));
        assert_eq!(kff!(3.5), Value::Decimal(3.5));
        assert_eq!(kff!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_kff_macro_lists() {
        assert_eq!(kff!([]), Value::List(List::new()));

        let list = kff!([1, 2, 3]);
        let list = list.as_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.list_type(), DataType::Integer);
        assert_eq!(list.get(2).unwrap(), &Value::Integer(3));
    }

    #[test]
    fn test_kff_macro_classes() {
        assert_eq!(kff!({}), Value::Class(Class::new()));

        let class = kff!({
            "Name": "Alice",
            "Age": 30
        });
        let class = class.as_class().unwrap();
        assert_eq!(class.len(), 2);
        assert_eq!(class.try_get("Name"), Some(&Value::from("Alice")));
        assert_eq!(class.try_get("Age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_kff_macro_negative_elements() {
        let list = kff!([-1, 2, -3]);
        let list = list.as_list().unwrap();
        assert_eq!(list.get(0).unwrap(), &Value::Integer(-1));
        assert_eq!(list.get(2).unwrap(), &Value::Integer(-3));

        let class = kff!({ "Offset": -0.5, "Range": [-2, 2] });
        let class = class.as_class().unwrap();
        assert_eq!(class.try_get("Offset"), Some(&Value::Decimal(-0.5)));
        assert_eq!(class.try_get("Range").unwrap().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_kff_macro_order_matters() {
        assert_ne!(kff!({ "A": 1, "B": 2 }), kff!({ "B": 2, "A": 1 }));
    }

    #[test]
    #[should_panic(expected = "kff!")]
    fn test_kff_macro_mixed_list_panics() {
        let _ = kff!([1, "two"]);
    }
}
