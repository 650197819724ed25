//! Text layout helpers shared by the unparser and the code generator.

/// Indentation-aware line writer for generated text.
///
/// Indentation is inserted once, at the start of each line. Text handed to
/// `write` is copied verbatim, so a newline inside a string constant never
/// picks up indentation.
#[derive(Debug)]
pub struct CodeFormatter {
    output: String,
    indent_level: usize,
    indent_str: String,
    line_end: &'static str,
    at_line_start: bool,
}

impl CodeFormatter {
    /// Create a new formatter with the given indent string.
    pub fn new(indent_str: &str) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: indent_str.to_string(),
            line_end: "\n",
            at_line_start: true,
        }
    }

    /// A formatter that lays every line out on one line, separated by
    /// spaces. Used for statements nested inside an expression.
    pub fn single_line() -> Self {
        Self {
            line_end: " ",
            ..Self::new("")
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Append text to the current line.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_str);
            }
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    /// Write a line.
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.output.push_str(self.line_end);
        self.at_line_start = true;
    }

    /// Write `header {`, the indented body, then `}`.
    pub fn block<F: FnOnce(&mut Self)>(&mut self, header: &str, f: F) {
        if header.is_empty() {
            self.writeln("{");
        } else {
            self.write(header);
            self.writeln(" {");
        }
        self.indent();
        f(self);
        self.dedent();
        self.writeln("}");
    }

    /// Get the formatted output.
    pub fn finish(mut self) -> String {
        if self.line_end != "\n" {
            let len = self.output.trim_end_matches(self.line_end).len();
            self.output.truncate(len);
        }
        self.output
    }
}
