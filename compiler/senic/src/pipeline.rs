//! Source text to front AST and compiled program.

use seni_canon::CompiledProgram;
use seni_ir::Node;
use seni_lexer::LexError;
use seni_parse::ParseError;

/// A structural error: the script cannot be compiled at all.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Parse keeping whitespace and comments, so the tree can be unparsed
/// faithfully.
#[tracing::instrument(level = "debug", skip_all)]
pub fn front_ast(script: &str) -> Result<Vec<Node>, ScriptError> {
    let tokens = seni_lexer::tokenize_with_trivia(script)?;
    Ok(seni_parse::parse_with_trivia(tokens)?)
}

/// Lex, parse and compile.
pub fn compile_script(script: &str) -> Result<CompiledProgram, ScriptError> {
    let ast = front_ast(script)?;
    Ok(seni_canon::compile(&ast))
}
