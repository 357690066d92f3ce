//! Tree-walking interpreter.
//!
//! # Dispatch
//!
//! Special forms were resolved by the compiler, so a [`Form::Special`] goes
//! straight to its handler with unevaluated operands. For any other call the
//! head is evaluated first and its value picks the convention:
//! - a classic native receives its evaluated arguments positionally;
//! - a closure or named native receives one evaluated argument map.
//!
//! # Errors
//!
//! [`Interpreter::eval`] returns a `Result`, but the forms built from several
//! steps do not stop at the first failure: they keep evaluating (so prints
//! and matrix pushes still happen), remember the first error, and attach the
//! last value they produced to it. [`Interpreter::evaluate`] unpacks that into
//! an [`Evaluation`] for the top-level caller.

mod special;

use seni_ir::{ArgMap, Form, GeneId};
use seni_stack::ensure_sufficient_stack;
use std::sync::Arc;

use crate::errors::{
    expected_named_arguments, expected_positional_arguments, missing_gene, not_callable,
    undefined_variable,
};
use crate::native::NativeFn;
use crate::{Closure, Environment, EvalError, EvalResult, NamedArgs, SharedPrintHandler, Value};

/// Outcome of a top-level evaluation.
#[derive(Debug)]
pub struct Evaluation {
    /// Environment after the form ran (definitions included).
    pub env: Environment,
    /// The value produced, partial if `error` is set.
    pub value: Value,
    /// The first error encountered, if any.
    pub error: Option<EvalError>,
}

impl Evaluation {
    fn from_result(env: Environment, result: EvalResult) -> Self {
        match result {
            Ok(value) => Evaluation {
                env,
                value,
                error: None,
            },
            Err(error) => {
                let (value, error) = error.into_parts();
                Evaluation {
                    env,
                    value,
                    error: Some(error),
                }
            }
        }
    }
}

/// Evaluates compiled forms against an environment and (optionally) a genotype.
///
/// Holds no mutable state, so one interpreter may be shared by any number of
/// evaluations of the same script.
pub struct Interpreter<'a> {
    genotype: &'a [Value],
    print: SharedPrintHandler,
}

impl<'a> Interpreter<'a> {
    /// An interpreter for scripts without genes.
    pub fn new(print: SharedPrintHandler) -> Self {
        Interpreter {
            genotype: &[],
            print,
        }
    }

    /// An interpreter that resolves gene references against `genotype`.
    pub fn with_genotype(genotype: &'a [Value], print: SharedPrintHandler) -> Self {
        Interpreter { genotype, print }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Evaluate one form, reporting the resulting environment, value and first error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&self, env: &Environment, form: &Form) -> Evaluation {
        let mut env = env.clone();
        let result = self.eval(&mut env, form);
        Evaluation::from_result(env, result)
    }

    /// Run a whole program: `define` and `fn` forms first, then everything
    /// else, each in source order. Stops at the first top-level error.
    #[tracing::instrument(level = "debug", skip_all, fields(forms = forms.len()))]
    pub fn run_program(&self, env: &Environment, forms: &[Form]) -> Evaluation {
        let mut env = env.clone();
        let definitions = forms.iter().filter(|form| form.is_definition());
        let rest = forms.iter().filter(|form| !form.is_definition());

        let mut value = Value::Undefined;
        for form in definitions.chain(rest) {
            match self.eval(&mut env, form) {
                Ok(result) => value = result,
                Err(error) => {
                    tracing::debug!(%error, "program stopped");
                    return Evaluation::from_result(env, Err(error));
                }
            }
        }
        Evaluation {
            env,
            value,
            error: None,
        }
    }

    /// Evaluate `form`, rebinding `env` if the form defines anything.
    pub fn eval(&self, env: &mut Environment, form: &Form) -> EvalResult {
        ensure_sufficient_stack(|| match form {
            Form::Number(n) => Ok(Value::Number(*n)),
            Form::Boolean(b) => Ok(Value::from(*b)),
            Form::Str(text) => Ok(Value::Str(text.clone())),
            Form::Name(name) => lookup(env, name.as_str()).cloned(),
            Form::Gene(id) => self.gene_value(env, *id),
            Form::List(items) => self.eval_call(env, items),
            Form::Args(args) => Ok(Value::Map(self.eval_args(env, args)?)),
            Form::Special(special, operands) => self.eval_special(env, *special, operands),
        })
    }

    /// Evaluate `forms` in order, threading `env`, continuing past errors.
    ///
    /// Returns the last value, or the first error carrying the last value.
    pub fn eval_sequence(&self, env: &mut Environment, forms: &[Form]) -> EvalResult {
        let mut last = Value::Undefined;
        let mut first_error = None;
        for form in forms {
            match self.eval(env, form) {
                Ok(value) => last = value,
                Err(error) => {
                    let (partial, error) = error.into_parts();
                    last = partial;
                    first_error.get_or_insert(error);
                }
            }
        }
        finish(last, first_error)
    }

    /// Call a closure or named native with an argument map.
    pub fn apply_named(&self, callee: &Value, args: &NamedArgs) -> EvalResult {
        match callee {
            Value::Closure(closure) => self.call_closure(closure, args),
            Value::Native(native) => match &native.func {
                NativeFn::Named(func) => func(self, &args.merged_over(&native.defaults)),
                NativeFn::Classic(_) => Err(expected_positional_arguments(native.name.as_str())),
            },
            other => Err(not_callable("value", other)),
        }
    }

    /// Call any function with no arguments.
    pub fn call_without_arguments(&self, callee: &Value) -> EvalResult {
        match callee {
            Value::Native(native) => match &native.func {
                NativeFn::Classic(func) => func(self, &[]),
                NativeFn::Named(func) => func(self, &native.defaults),
            },
            _ => self.apply_named(callee, &NamedArgs::new()),
        }
    }

    fn eval_call(&self, env: &mut Environment, items: &[Form]) -> EvalResult {
        let Some((head_form, rest)) = items.split_first() else {
            return Ok(Value::Undefined);
        };
        let callee_name = head_form.as_name().map_or("expression", |name| name.as_str());
        let head = self.eval(env, head_form)?;

        match &head {
            Value::Native(native) if native.is_classic() => {
                if let [Form::Args(_)] = rest {
                    return Err(expected_positional_arguments(callee_name));
                }
                let args = rest
                    .iter()
                    .map(|arg| self.eval(env, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                match &native.func {
                    NativeFn::Classic(func) => func(self, &args),
                    NativeFn::Named(_) => Err(expected_named_arguments(callee_name)),
                }
            }
            Value::Native(_) | Value::Closure(_) => {
                let args = match rest {
                    [] => NamedArgs::new(),
                    [Form::Args(args)] => self.eval_args(env, args)?,
                    _ => return Err(expected_named_arguments(callee_name)),
                };
                self.apply_named(&head, &args)
            }
            other => Err(not_callable(callee_name, other)),
        }
    }

    fn eval_args(&self, env: &mut Environment, args: &ArgMap) -> Result<NamedArgs, EvalError> {
        let mut evaluated = NamedArgs::new();
        for (name, form) in args {
            let value = self.eval(env, form)?;
            evaluated.insert(name.clone(), value);
        }
        Ok(evaluated)
    }

    fn call_closure(&self, closure: &Arc<Closure>, args: &NamedArgs) -> EvalResult {
        tracing::trace!(function = %closure.name, "call");
        let bindings = closure.defaults.iter().map(|(param, default)| {
            let value = args.get(param.as_str()).unwrap_or(default).clone();
            (param.clone(), value)
        });
        let mut scope = closure.env.extend(bindings);
        self.eval_sequence(&mut scope, &closure.body)
    }

    /// A gene's value from the genotype. Names stand for whatever they are
    /// bound to where the gene is used.
    fn gene_value(&self, env: &Environment, id: GeneId) -> EvalResult {
        match self.genotype.get(id.index()) {
            Some(Value::Name(name)) => lookup(env, name.as_str()).cloned(),
            Some(value) => Ok(value.clone()),
            None => Err(missing_gene(id.index())),
        }
    }

    /// The value a quoted form denotes.
    fn quote(&self, form: &Form) -> Value {
        match form {
            Form::Number(n) => Value::Number(*n),
            Form::Boolean(b) => Value::from(*b),
            Form::Str(text) => Value::Str(text.clone()),
            Form::Name(name) => Value::Name(name.clone()),
            Form::Gene(id) => self.genotype.get(id.index()).cloned().unwrap_or_default(),
            Form::List(items) => Value::List(items.iter().map(|item| self.quote(item)).collect()),
            Form::Args(args) => Value::Map(
                args.iter()
                    .map(|(name, value)| (name.clone(), self.quote(value)))
                    .collect(),
            ),
            Form::Special(special, operands) => {
                let mut items = Vec::with_capacity(operands.len() + 1);
                items.push(Value::Name(seni_ir::Name::new(special.name())));
                items.extend(operands.iter().map(|operand| self.quote(operand)));
                Value::List(items)
            }
        }
    }
}

fn lookup<'e>(env: &'e Environment, name: &str) -> Result<&'e Value, EvalError> {
    env.get(name).ok_or_else(|| undefined_variable(name))
}

/// `Ok(value)`, or the first error carrying `value` as its partial result.
fn finish(value: Value, first_error: Option<EvalError>) -> EvalResult {
    match first_error {
        None => Ok(value),
        Some(error) => Err(error.with_partial(value)),
    }
}
