use pretty_assertions::assert_eq;

use super::*;

#[test]
fn booleans_display_as_hash_literals() {
    assert_eq!(Value::TRUE.to_string(), "#t");
    assert_eq!(Value::from(false).to_string(), "#f");
    assert!(Value::TRUE.is_true());
    assert!(!Value::Number(1.0).is_true());
}

#[test]
fn display() {
    let list = Value::List(vec![
        Value::Number(1.5),
        Value::Name(Name::new("foo")),
        Value::Str("bar".to_owned()),
    ]);
    assert_eq!(list.to_string(), "(1.5 foo bar)");
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Undefined.to_string(), "undefined");
}

#[test]
fn atoms_convert() {
    assert_eq!(Value::from(seni_ir::Atom::Number(2.0)), Value::Number(2.0));
    assert_eq!(
        Value::from(seni_ir::Atom::Symbol(Name::new("x"))),
        Value::Name(Name::new("x"))
    );
    assert_eq!(Value::from(seni_ir::Atom::Boolean(true)), Value::TRUE);
}

#[test]
fn named_args_insert_replaces() {
    let mut args = NamedArgs::new().with("a", 1.0).with("b", 2.0);
    args.insert(Name::new("a"), Value::Number(9.0));
    assert_eq!(args.len(), 2);
    assert_eq!(args.get("a"), Some(&Value::Number(9.0)));
    assert_eq!(args.to_string(), "{a: 9 b: 2}");
}

#[test]
fn named_args_merge_over_defaults() {
    let defaults = NamedArgs::new().with("x", 0.0).with("y", 0.0);
    let merged = NamedArgs::new().with("y", 5.0).merged_over(&defaults);
    assert_eq!(merged.get("x"), Some(&Value::Number(0.0)));
    assert_eq!(merged.get("y"), Some(&Value::Number(5.0)));
}

#[test]
fn named_args_number() {
    let args = NamedArgs::new().with("n", 4.0).with("s", true);
    assert_eq!(args.number("f", "n"), Ok(4.0));
    assert_eq!(
        args.number("f", "s").map_err(|error| error.to_string()),
        Err("f: s should be a number".to_owned())
    );
    assert!(args.number("f", "missing").is_err());
}

#[test]
fn functions_compare_by_identity() {
    let closure = Arc::new(Closure {
        name: Name::new("f"),
        defaults: NamedArgs::new(),
        body: Arc::from(Vec::<Form>::new()),
        env: Environment::new(),
    });
    let same = Value::Closure(Arc::clone(&closure));
    assert_eq!(same, Value::Closure(closure));

    let other = Value::Closure(Arc::new(Closure {
        name: Name::new("f"),
        defaults: NamedArgs::new(),
        body: Arc::from(Vec::<Form>::new()),
        env: Environment::new(),
    }));
    assert_ne!(same, other);
    assert_eq!(same.to_string(), "<fn f>");
}
