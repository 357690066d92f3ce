//! Compiled forms (back AST) and the gene table.
//!
//! The compiler lowers the front AST into [`Form`]s. Special-form heads are
//! resolved here, once, into [`SpecialForm`] so the interpreter dispatches on
//! an enum instead of comparing names on every call. Bracketed literals are
//! replaced by [`Form::Gene`] references into the gene table.

use super::Name;
use std::fmt;

/// Index of a gene in a script's gene table (and of its value in a genotype).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GeneId(u32);

impl GeneId {
    #[inline]
    pub fn new(index: usize) -> Self {
        GeneId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named arguments in the order they were written.
pub type ArgMap = Vec<(Name, Form)>;

/// A compiled expression.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Form {
    Number(f64),
    Boolean(bool),
    /// A string literal; never looked up.
    Str(String),
    /// A variable reference.
    Name(Name),
    /// The genotype value at this index.
    Gene(GeneId),
    /// A call: head followed by positional arguments, or by a single
    /// [`Form::Args`] for a named-parameter call.
    List(Vec<Form>),
    /// `label: value` pairs.
    Args(ArgMap),
    /// A special form with its unevaluated operands.
    Special(SpecialForm, Vec<Form>),
}

impl Form {
    /// The name this form refers to, if it is a plain variable reference.
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Form::Name(name) => Some(name),
            _ => None,
        }
    }

    /// True for `define` and `fn` forms, which a program runs before anything else.
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            Form::Special(SpecialForm::Define | SpecialForm::Fn, _)
        )
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Form]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Form::Number(value) => write!(f, "{value}"),
            Form::Boolean(true) => f.write_str("#t"),
            Form::Boolean(false) => f.write_str("#f"),
            Form::Str(text) => write!(f, "{text:?}"),
            Form::Name(name) => write!(f, "{name}"),
            Form::Gene(id) => write!(f, "<gene {}>", id.index()),
            Form::List(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                f.write_str(")")
            }
            Form::Args(args) => {
                f.write_str("{")?;
                for (i, (label, value)) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{label}: {value}")?;
                }
                f.write_str("}")
            }
            Form::Special(special, operands) => {
                write!(f, "({}", special.name())?;
                if !operands.is_empty() {
                    f.write_str(" ")?;
                    write_seq(f, operands)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Forms whose operands are handed over unevaluated.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialForm {
    If,
    Quote,
    Fn,
    Define,
    Begin,
    Print,
    Log,
    Loop,
    OnMatrixStack,
    /// `__string`: returns its operand as data.
    StringLiteral,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 10] = [
        SpecialForm::If,
        SpecialForm::Quote,
        SpecialForm::Fn,
        SpecialForm::Define,
        SpecialForm::Begin,
        SpecialForm::Print,
        SpecialForm::Log,
        SpecialForm::Loop,
        SpecialForm::OnMatrixStack,
        SpecialForm::StringLiteral,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let special = match name {
            "if" => SpecialForm::If,
            "quote" => SpecialForm::Quote,
            "fn" => SpecialForm::Fn,
            "define" => SpecialForm::Define,
            "begin" => SpecialForm::Begin,
            "print" => SpecialForm::Print,
            "log" => SpecialForm::Log,
            "loop" => SpecialForm::Loop,
            "on-matrix-stack" => SpecialForm::OnMatrixStack,
            "__string" => SpecialForm::StringLiteral,
            _ => return None,
        };
        Some(special)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::If => "if",
            SpecialForm::Quote => "quote",
            SpecialForm::Fn => "fn",
            SpecialForm::Define => "define",
            SpecialForm::Begin => "begin",
            SpecialForm::Print => "print",
            SpecialForm::Log => "log",
            SpecialForm::Loop => "loop",
            SpecialForm::OnMatrixStack => "on-matrix-stack",
            SpecialForm::StringLiteral => "__string",
        }
    }
}

/// The literal written inside a bracketed form.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Atom {
    Number(f64),
    Boolean(bool),
    Str(String),
    Symbol(Name),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(value) => write!(f, "{value}"),
            Atom::Boolean(true) => f.write_str("#t"),
            Atom::Boolean(false) => f.write_str("#f"),
            Atom::Str(text) => write!(f, "{text:?}"),
            Atom::Symbol(name) => write!(f, "{name}"),
        }
    }
}

/// One trait of a script: the authored value of a bracketed literal and the
/// compiled generator that draws new values for it.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Gene {
    pub initial_value: Atom,
    pub compiled_ast: Vec<Form>,
}
