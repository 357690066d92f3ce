//! Output emitter.

/// Sink for unparsed text.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a single character.
    fn emit_char(&mut self, c: char);

    /// Emit a single space.
    fn emit_space(&mut self) {
        self.emit_char(' ');
    }
}

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_char(&mut self, c: char) {
        self.buffer.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_fragments() {
        let mut emitter = StringEmitter::with_capacity(8);
        emitter.emit("(+");
        emitter.emit_space();
        emitter.emit_char('1');
        emitter.emit(")");
        assert_eq!(emitter.as_str(), "(+ 1)");
        assert_eq!(emitter.output(), "(+ 1)");
    }
}
