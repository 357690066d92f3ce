//! Built-in functions available in every environment.
//!
//! Classic (positional): `+ - * / sqrt mod = < > vector list vector/append`.
//! Named: `map` and `filter`, which call back into the interpreter.

use seni_ir::Name;

use crate::errors::{missing_arguments, non_numeric_arguments, wrong_arg_type};
use crate::native::{NativeBinding, NativeFn};
use crate::{Environment, EvalResult, Interpreter, NamedArgs, Value};

/// Registration records for the built-ins.
pub fn bindings() -> Vec<NativeBinding<()>> {
    vec![
        NativeBinding::new("+", "Sum of the arguments.", |_| {
            NativeFn::classic(|_, args| Ok(Value::Number(numbers("+", args)?.iter().sum())))
        }),
        NativeBinding::new("*", "Product of the arguments.", |_| {
            NativeFn::classic(|_, args| {
                Ok(Value::Number(numbers("*", args)?.iter().product()))
            })
        }),
        NativeBinding::new(
            "-",
            "Negates one argument, or subtracts the rest from the first.",
            |_| NativeFn::classic(|_, args| subtract(args)),
        ),
        NativeBinding::new("/", "Divides the first argument by the rest.", |_| {
            NativeFn::classic(|_, args| divide(args))
        }),
        NativeBinding::new("sqrt", "Square root.", |_| {
            NativeFn::classic(|_, args| {
                let args = numbers("sqrt", args)?;
                let first = args.first().ok_or_else(|| missing_arguments("sqrt"))?;
                Ok(Value::Number(first.sqrt()))
            })
        }),
        NativeBinding::new("mod", "Remainder of the first argument by the second.", |_| {
            NativeFn::classic(|_, args| match numbers("mod", args)?.as_slice() {
                [a, b, ..] => Ok(Value::Number(a % b)),
                _ => Err(missing_arguments("mod")),
            })
        }),
        NativeBinding::new("=", "#t when every argument equals the first.", |_| {
            NativeFn::classic(|_, args| {
                let equal = match args.split_first() {
                    Some((first, rest)) => rest.iter().all(|arg| arg == first),
                    None => true,
                };
                Ok(Value::from(equal))
            })
        }),
        NativeBinding::new("<", "#t when the arguments strictly increase.", |_| {
            NativeFn::classic(|_, args| {
                let args = numbers("<", args)?;
                Ok(Value::from(args.windows(2).all(|pair| pair[0] < pair[1])))
            })
        }),
        NativeBinding::new(">", "#t when the arguments strictly decrease.", |_| {
            NativeFn::classic(|_, args| {
                let args = numbers(">", args)?;
                Ok(Value::from(args.windows(2).all(|pair| pair[0] > pair[1])))
            })
        }),
        NativeBinding::new("vector", "A list of the arguments.", |_| {
            NativeFn::classic(|_, args| Ok(Value::List(args.to_vec())))
        }),
        NativeBinding::new("list", "A list of the arguments.", |_| {
            NativeFn::classic(|_, args| Ok(Value::List(args.to_vec())))
        }),
        NativeBinding::new(
            "vector/append",
            "A copy of the first argument with the rest appended.",
            |_| NativeFn::classic(|_, args| append(args)),
        ),
        NativeBinding::new("map", "Applies fn to each element of vector.", |_| {
            NativeFn::named(|interpreter, args| {
                let results = each_element("map", interpreter, args)?;
                Ok(Value::List(results.into_iter().map(|(_, result)| result).collect()))
            })
        })
        .with_default("bind", Value::Str("item".to_owned())),
        NativeBinding::new(
            "filter",
            "The elements of vector for which fn returns #t.",
            |_| {
                NativeFn::named(|interpreter, args| {
                    let results = each_element("filter", interpreter, args)?;
                    Ok(Value::List(
                        results
                            .into_iter()
                            .filter(|(_, keep)| keep.is_true())
                            .map(|(element, _)| element)
                            .collect(),
                    ))
                })
            },
        )
        .with_default("bind", Value::Str("item".to_owned())),
    ]
}

/// Environment holding only the built-ins.
pub fn builtin_environment() -> Environment {
    Environment::new().extend(
        bindings()
            .iter()
            .map(|binding| (Name::new(binding.name), binding.instantiate(&()))),
    )
}

fn numbers(function: &str, args: &[Value]) -> Result<Vec<f64>, crate::EvalError> {
    args.iter()
        .map(|arg| arg.as_number().ok_or_else(|| non_numeric_arguments(function)))
        .collect()
}

fn subtract(args: &[Value]) -> EvalResult {
    match numbers("-", args)?.as_slice() {
        [] => Err(missing_arguments("-")),
        [only] => Ok(Value::Number(-only)),
        [first, rest @ ..] => Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc - n))),
    }
}

fn divide(args: &[Value]) -> EvalResult {
    match numbers("/", args)?.as_slice() {
        [] => Err(missing_arguments("/")),
        [first, rest @ ..] => Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc / n))),
    }
}

fn append(args: &[Value]) -> EvalResult {
    match args.split_first() {
        Some((Value::List(items), rest)) => {
            let mut items = items.clone();
            items.extend_from_slice(rest);
            Ok(Value::List(items))
        }
        _ => Err(wrong_arg_type("vector/append", "the first argument", "list")),
    }
}

/// Call `fn` once per element of `vector`, binding the element to `bind`.
fn each_element(
    function: &str,
    interpreter: &Interpreter<'_>,
    args: &NamedArgs,
) -> Result<Vec<(Value, Value)>, crate::EvalError> {
    let callee = args
        .get("fn")
        .filter(|callee| callee.is_callable())
        .ok_or_else(|| wrong_arg_type(function, "fn", "function"))?;
    let Some(Value::List(elements)) = args.get("vector") else {
        return Err(wrong_arg_type(function, "vector", "list"));
    };
    let bind = args
        .get("bind")
        .and_then(Value::as_text)
        .ok_or_else(|| wrong_arg_type(function, "bind", "name"))?;

    elements
        .iter()
        .map(|element| {
            let call_args = NamedArgs::new().with(bind, element.clone());
            let result = interpreter.apply_named(callee, &call_args)?;
            Ok((element.clone(), result))
        })
        .collect()
}
