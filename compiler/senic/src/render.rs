//! Evaluating a script against a renderer environment.
//!
//! Drawing itself happens outside this crate. The render context here only
//! tracks the matrix stack, which is enough to run scripts that use
//! `on-matrix-stack` and to check that pushes and pops stay paired.

use parking_lot::Mutex;
use seni_eval::{
    buffer_handler, make_base_environment, EvalError, Interpreter, NativeBinding, NativeFn, Value,
};
use std::sync::Arc;

use crate::pipeline::{compile_script, ScriptError};

/// Depth of the renderer's transform stack.
#[derive(Clone, Debug, Default)]
pub struct MatrixStack(Arc<Mutex<usize>>);

impl MatrixStack {
    pub fn depth(&self) -> usize {
        *self.0.lock()
    }

    fn push(&self) {
        *self.0.lock() += 1;
    }

    fn pop(&self) -> Result<(), EvalError> {
        let mut depth = self.0.lock();
        if *depth == 0 {
            return Err(EvalError::new("pop-matrix without a matching push-matrix"));
        }
        *depth -= 1;
        Ok(())
    }
}

pub fn render_bindings() -> Vec<NativeBinding<MatrixStack>> {
    vec![
        NativeBinding::new("push-matrix", "Save the current transform.", |stack| {
            let stack = stack.clone();
            NativeFn::classic(move |_, _| {
                stack.push();
                Ok(Value::Undefined)
            })
        }),
        NativeBinding::new("pop-matrix", "Restore the last saved transform.", |stack| {
            let stack = stack.clone();
            NativeFn::classic(move |_, _| {
                stack.pop()?;
                Ok(Value::Undefined)
            })
        }),
    ]
}

/// What a script produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendering {
    /// Lines written by `print` and `log`.
    pub output: Vec<String>,
    /// The value of the last top-level form evaluated.
    pub value: Value,
    /// The first runtime error, if any. Output before it is kept.
    pub error: Option<EvalError>,
    /// Matrix stack depth when evaluation stopped.
    pub matrix_depth: usize,
}

/// Compile and evaluate `script`. Without a genotype the authored values are used.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render(script: &str, genotype: Option<&[Value]>) -> Result<Rendering, ScriptError> {
    let program = compile_script(script)?;
    let authored: Vec<Value>;
    let genotype = match genotype {
        Some(genotype) => genotype,
        None => {
            authored = program
                .genes
                .iter()
                .map(|gene| Value::from(gene.initial_value.clone()))
                .collect();
            &authored
        }
    };

    let stack = MatrixStack::default();
    let env = make_base_environment(&stack, &render_bindings());
    let print = buffer_handler();
    let interpreter = Interpreter::with_genotype(genotype, print.clone());
    let evaluation = interpreter.run_program(&env, &program.forms);
    if let Some(error) = &evaluation.error {
        tracing::debug!(%error, "runtime error");
    }

    Ok(Rendering {
        output: print.lines(),
        value: evaluation.value,
        error: evaluation.error,
        matrix_depth: stack.depth(),
    })
}
