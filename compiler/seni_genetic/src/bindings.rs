//! Gene generators: the natives a bracket's generator expression can call.
//!
//! All of them draw from the environment's [`SharedPrng`], so evaluating the
//! genes of a script in order against a fresh generator is repeatable.

use seni_eval::errors::wrong_arg_type;
use seni_eval::{make_base_environment, EvalError, Environment, NativeBinding, NativeFn, Value};
use std::sync::Arc;

use crate::prng::SharedPrng;

pub fn bracket_bindings() -> Vec<NativeBinding<SharedPrng>> {
    vec![
        NativeBinding::new("identity", "Always value.", |_| {
            NativeFn::named(|_, args| Ok(args.get("value").cloned().unwrap_or_default()))
        })
        .with_default("value", 42.0),
        NativeBinding::new(
            "int",
            "A whole number between min and max.",
            |prng: &SharedPrng| {
                let prng = Arc::clone(prng);
                NativeFn::named(move |_, args| {
                    let min = args.number("int", "min")?;
                    let max = args.number("int", "max")?;
                    Ok(Value::Number(prng.lock().lerp(min, max).trunc()))
                })
            },
        )
        .with_default("min", 0.0)
        .with_default("max", 100.0),
        NativeBinding::new("scalar", "A number between min and max.", |prng: &SharedPrng| {
            let prng = Arc::clone(prng);
            NativeFn::named(move |_, args| {
                let min = args.number("scalar", "min")?;
                let max = args.number("scalar", "max")?;
                Ok(Value::Number(prng.lock().lerp(min, max)))
            })
        })
        .with_default("min", 0.0)
        .with_default("max", 1.0),
        NativeBinding::new(
            "vec2",
            "A point whose coordinates lie between min and max.",
            |prng: &SharedPrng| {
                let prng = Arc::clone(prng);
                NativeFn::named(move |_, args| {
                    let min = args.number("vec2", "min")?;
                    let max = args.number("vec2", "max")?;
                    let mut prng = prng.lock();
                    let x = prng.lerp(min, max);
                    let y = prng.lerp(min, max);
                    Ok(Value::List(vec![Value::Number(x), Value::Number(y)]))
                })
            },
        )
        .with_default("min", 0.0)
        .with_default("max", 1000.0),
        NativeBinding::new("select", "One element of from.", |prng: &SharedPrng| {
            let prng = Arc::clone(prng);
            NativeFn::named(move |_, args| select(&prng, args.get("from")))
        }),
    ]
}

/// The built-ins plus the bracket generators, drawing from `prng`.
pub fn gene_environment(prng: &SharedPrng) -> Environment {
    make_base_environment(prng, &bracket_bindings())
}

fn select(prng: &SharedPrng, from: Option<&Value>) -> Result<Value, EvalError> {
    match from {
        Some(Value::List(items)) if !items.is_empty() => {
            let index = prng.lock().index(items.len());
            Ok(items[index].clone())
        }
        _ => Err(wrong_arg_type("select", "from", "non-empty list")),
    }
}
