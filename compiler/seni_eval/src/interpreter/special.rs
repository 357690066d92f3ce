//! Special-form handlers. Operands arrive unevaluated.

use seni_ir::{ArgMap, Form, Name, SpecialForm};
use std::sync::Arc;

use super::{finish, lookup, Interpreter};
use crate::errors::{malformed_form, odd_define, steps_not_positive, wrong_arg_type, zero_increment};
use crate::{Closure, Environment, EvalError, EvalResult, NamedArgs, Value};

impl Interpreter<'_> {
    pub(super) fn eval_special(
        &self,
        env: &mut Environment,
        special: SpecialForm,
        operands: &[Form],
    ) -> EvalResult {
        match special {
            SpecialForm::If => self.eval_if(env, operands),
            SpecialForm::Quote => Ok(operands.first().map_or(Value::Undefined, |operand| {
                // `''x` quotes the inner form once
                match operand {
                    Form::Special(SpecialForm::Quote, inner) if inner.len() == 1 => {
                        self.quote(&inner[0])
                    }
                    other => self.quote(other),
                }
            })),
            SpecialForm::StringLiteral => {
                Ok(operands.first().map_or(Value::Undefined, |operand| self.quote(operand)))
            }
            SpecialForm::Fn => match operands.split_first() {
                Some((signature, body)) => self.define_function(env, signature, body),
                None => Err(malformed_form("fn", "missing the function name")),
            },
            SpecialForm::Define => self.eval_define(env, operands),
            SpecialForm::Begin => self.eval_sequence(env, operands),
            SpecialForm::Print => self.eval_print(env, operands, false),
            SpecialForm::Log => self.eval_print(env, operands, true),
            SpecialForm::Loop => self.eval_loop(env, operands),
            SpecialForm::OnMatrixStack => self.eval_on_matrix_stack(env, operands),
        }
    }

    fn eval_if(&self, env: &mut Environment, operands: &[Form]) -> EvalResult {
        let Some((condition, branches)) = operands.split_first() else {
            return Err(malformed_form("if", "missing the condition"));
        };
        let branch = if self.eval(env, condition)?.is_true() {
            branches.first()
        } else {
            branches.get(1)
        };
        match branch {
            Some(form) => self.eval(env, form),
            None => Ok(Value::Undefined),
        }
    }

    /// `(fn (name param: default ...) body...)`: bind a closure to `name`.
    fn define_function(
        &self,
        env: &mut Environment,
        signature: &Form,
        body: &[Form],
    ) -> EvalResult {
        let (name, params) = named_header(signature)
            .ok_or_else(|| malformed_form("fn", "expected (name param: default ...)"))?;
        let defaults = match params {
            Some(params) => self.eval_args(env, params)?,
            None => NamedArgs::new(),
        };
        let closure = Value::Closure(Arc::new(Closure {
            name: name.clone(),
            defaults,
            body: Arc::from(body),
            env: env.clone(),
        }));
        *env = env.set(name, closure.clone());
        Ok(closure)
    }

    fn eval_define(&self, env: &mut Environment, operands: &[Form]) -> EvalResult {
        if let Some((signature @ (Form::List(_) | Form::Special(..)), body)) =
            operands.split_first()
        {
            return self.define_function(env, signature, body);
        }
        if operands.len() % 2 != 0 {
            return Err(odd_define());
        }

        let mut last = Value::Undefined;
        let mut first_error = None;
        for pair in operands.chunks_exact(2) {
            let result = match &pair[0] {
                Form::Name(name) => self.eval(env, &pair[1]).map(|value| {
                    *env = env.set(name.clone(), value.clone());
                    value
                }),
                _ => Err(malformed_form("define", "expected a name to bind")),
            };
            match result {
                Ok(value) => last = value,
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        finish(last, first_error)
    }

    /// `print` writes its evaluated operands on one line. `log` also labels
    /// each bare name as `<name:value>`.
    fn eval_print(&self, env: &mut Environment, operands: &[Form], annotate: bool) -> EvalResult {
        let mut parts = Vec::with_capacity(operands.len());
        let mut first_error = None;
        for operand in operands {
            match self.eval(env, operand) {
                Ok(value) => match operand {
                    Form::Name(name) if annotate => parts.push(format!("<{name}:{value}>")),
                    _ => parts.push(value.to_string()),
                },
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        self.print.line(&parts.join(" "));
        finish(Value::TRUE, first_error)
    }

    /// `(loop (var from: a to: b ...) body...)`.
    ///
    /// With `steps-upto` (or else `steps`) the variable takes that many evenly
    /// spaced values between `from` and the limit. Otherwise it counts by
    /// `increment` from `from` towards `to` (exclusive) or `upto` (inclusive).
    fn eval_loop(&self, env: &mut Environment, operands: &[Form]) -> EvalResult {
        let Some((header, body)) = operands.split_first() else {
            return Err(malformed_form("loop", "missing the loop header"));
        };
        let (var, params) = named_header(header)
            .ok_or_else(|| malformed_form("loop", "expected (variable param: value ...)"))?;
        let params = match params {
            Some(params) => self.eval_args(env, params)?,
            None => NamedArgs::new(),
        };

        let from = loop_param(&params, "from")?.unwrap_or(0.0);
        let to = loop_param(&params, "to")?.unwrap_or(1.0);
        let upto = loop_param(&params, "upto")?;
        let increment = loop_param(&params, "increment")?.unwrap_or(1.0);
        let steps = match (loop_param(&params, "steps")?, loop_param(&params, "steps-upto")?) {
            (_, Some(steps)) => Some((steps, steps)),
            (Some(steps), None) => Some((steps, steps - 1.0)),
            (None, None) => None,
        };

        let mut last = Value::Undefined;
        let mut first_error = None;
        let mut iterate = |value: f64| {
            let mut scope = env.set(var.clone(), Value::Number(value));
            match self.eval_sequence(&mut scope, body) {
                Ok(value) => last = value,
                Err(error) => {
                    let (partial, error) = error.into_parts();
                    last = partial;
                    first_error.get_or_insert(error);
                }
            }
        };

        if let Some((count, divisions)) = steps {
            if count < 1.0 {
                return Err(steps_not_positive());
            }
            let limit = upto.unwrap_or(to);
            let unit = if divisions > 0.0 {
                (limit - from) / divisions
            } else {
                0.0
            };
            let mut step = 0.0;
            while step < count {
                iterate(from + step * unit);
                step += 1.0;
            }
        } else {
            if increment == 0.0 {
                return Err(zero_increment());
            }
            let (limit, inclusive) = match upto {
                Some(upto) => (upto, true),
                None => (to, false),
            };
            let ascending = from <= limit;
            let delta = if ascending {
                increment.abs()
            } else {
                -increment.abs()
            };
            let mut value = from;
            loop {
                let more = match (ascending, inclusive) {
                    (true, true) => value <= limit,
                    (true, false) => value < limit,
                    (false, true) => value >= limit,
                    (false, false) => value > limit,
                };
                if !more {
                    break;
                }
                iterate(value);
                value += delta;
            }
        }
        finish(last, first_error)
    }

    /// Run the body between calls to `push-matrix` and `pop-matrix`.
    ///
    /// The pop runs even when the body fails, so pushes and pops stay paired.
    fn eval_on_matrix_stack(&self, env: &mut Environment, operands: &[Form]) -> EvalResult {
        let push = lookup(env, "push-matrix")?.clone();
        let pop = lookup(env, "pop-matrix")?.clone();

        self.call_without_arguments(&push)?;
        let body = self.eval_sequence(env, operands);
        let popped = self.call_without_arguments(&pop);
        match (body, popped) {
            (Err(error), _) => Err(error),
            (Ok(value), Err(error)) => Err(error.with_partial(value)),
            (Ok(value), Ok(_)) => Ok(value),
        }
    }
}

/// Split a `(name param: value ...)` header into its name and parameters.
///
/// The name may itself be a special-form keyword, which the compiler has
/// already turned into a [`Form::Special`].
fn named_header(form: &Form) -> Option<(Name, Option<&ArgMap>)> {
    match form {
        Form::List(items) => match items.as_slice() {
            [Form::Name(name)] => Some((name.clone(), None)),
            [Form::Name(name), Form::Args(params)] => Some((name.clone(), Some(params))),
            _ => None,
        },
        Form::Special(special, operands) => {
            let name = Name::new(special.name());
            match operands.as_slice() {
                [] => Some((name, None)),
                [Form::Args(params)] => Some((name, Some(params))),
                _ => None,
            }
        }
        _ => None,
    }
}

fn loop_param(params: &NamedArgs, name: &str) -> Result<Option<f64>, EvalError> {
    match params.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_number()
            .map(Some)
            .ok_or_else(|| wrong_arg_type("loop", name, "number")),
    }
}
