//! Evaluation errors.
//!
//! Errors are values: forms that keep going after a failing subform (`begin`,
//! `define`, `print`, `log`, `loop`, function bodies) report the first error
//! and carry the last value they produced in [`EvalError::partial`].
//!
//! Factory functions (e.g. [`undefined_variable`]) are the public way to
//! build errors; each fills in both `kind` and `message`.

use std::fmt;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UndefinedVariable { name: String },
    NotCallable { name: String, type_name: String },
    NonNumericArguments { function: String },
    MissingArguments { function: String },
    WrongArgType { function: String, argument: String, expected: String },
    ExpectedNamedArguments { function: String },
    ExpectedPositionalArguments { function: String },
    StepsNotPositive,
    ZeroIncrement,
    OddDefine,
    MalformedForm { form: String, reason: String },
    MissingGene { index: usize },
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::UndefinedVariable { name } => write!(f, "{name} is undefined"),
            EvalErrorKind::NotCallable { name, type_name } => {
                write!(f, "{name} is a {type_name}, not a function")
            }
            EvalErrorKind::NonNumericArguments { function } => {
                write!(f, "all arguments to {function} should be numbers")
            }
            EvalErrorKind::MissingArguments { function } => {
                write!(f, "{function} requires at least one argument")
            }
            EvalErrorKind::WrongArgType {
                function,
                argument,
                expected,
            } => write!(f, "{function}: {argument} should be a {expected}"),
            EvalErrorKind::ExpectedNamedArguments { function } => {
                write!(f, "{function} takes named arguments")
            }
            EvalErrorKind::ExpectedPositionalArguments { function } => {
                write!(f, "{function} takes positional arguments")
            }
            EvalErrorKind::StepsNotPositive => f.write_str("steps must be greater than 0"),
            EvalErrorKind::ZeroIncrement => f.write_str("increment of 0 given"),
            EvalErrorKind::OddDefine => f.write_str("define should have an even number of args"),
            EvalErrorKind::MalformedForm { form, reason } => write!(f, "{form}: {reason}"),
            EvalErrorKind::MissingGene { index } => {
                write!(f, "the genotype has no value for gene {index}")
            }
            EvalErrorKind::Custom { message } => f.write_str(message),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Last value produced by a form that kept going after this error.
    pub partial: Option<Box<Value>>,
}

impl EvalError {
    /// An error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            partial: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            partial: None,
        }
    }

    #[must_use]
    pub fn with_partial(mut self, value: Value) -> Self {
        self.partial = Some(Box::new(value));
        self
    }

    /// Split into the partial value (or `Undefined`) and the error itself.
    pub fn into_parts(mut self) -> (Value, EvalError) {
        let value = self.partial.take().map(|value| *value).unwrap_or_default();
        (value, self)
    }
}

impl PartialEq for EvalError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn not_callable(name: &str, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_owned(),
        type_name: value.type_name().to_owned(),
    })
}

#[cold]
pub fn non_numeric_arguments(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonNumericArguments {
        function: function.to_owned(),
    })
}

#[cold]
pub fn missing_arguments(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArguments {
        function: function.to_owned(),
    })
}

#[cold]
pub fn wrong_arg_type(function: &str, argument: &str, expected: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        function: function.to_owned(),
        argument: argument.to_owned(),
        expected: expected.to_owned(),
    })
}

#[cold]
pub fn expected_named_arguments(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedNamedArguments {
        function: function.to_owned(),
    })
}

#[cold]
pub fn expected_positional_arguments(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedPositionalArguments {
        function: function.to_owned(),
    })
}

#[cold]
pub fn steps_not_positive() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepsNotPositive)
}

#[cold]
pub fn zero_increment() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroIncrement)
}

#[cold]
pub fn odd_define() -> EvalError {
    EvalError::from_kind(EvalErrorKind::OddDefine)
}

#[cold]
pub fn malformed_form(form: &str, reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedForm {
        form: form.to_owned(),
        reason: reason.to_owned(),
    })
}

#[cold]
pub fn missing_gene(index: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingGene { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(undefined_variable("foo").to_string(), "foo is undefined");
        assert_eq!(
            non_numeric_arguments("+").to_string(),
            "all arguments to + should be numbers"
        );
        assert_eq!(steps_not_positive().to_string(), "steps must be greater than 0");
        assert_eq!(zero_increment().to_string(), "increment of 0 given");
        assert_eq!(
            odd_define().to_string(),
            "define should have an even number of args"
        );
    }

    #[test]
    fn partial_value_round_trips() {
        let (value, error) = zero_increment().with_partial(Value::Number(3.0)).into_parts();
        assert_eq!(value, Value::Number(3.0));
        assert_eq!(error.kind, EvalErrorKind::ZeroIncrement);
        assert!(error.partial.is_none());

        let (value, _) = zero_increment().into_parts();
        assert_eq!(value, Value::Undefined);
    }
}
