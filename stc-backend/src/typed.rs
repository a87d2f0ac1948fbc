//! Brace-delimited typed dialect
//!
//! Statically typed, C-like surface: explicitly typed declarations,
//! brace-closed blocks, `//` comment markers, and a whole-program entry
//! frame wrapping top-level code.

use crate::dialect::Dialect;
use stc_common::{label_name, LabelId};
use stc_frontend::Value;

pub struct TypedDialect;

impl Dialect for TypedDialect {
    fn name(&self) -> &'static str {
        "typed"
    }

    fn program_open(&self) -> Option<String> {
        Some("int main(void) {".to_string())
    }

    fn program_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(b) => b.to_string(),
            Value::Number(_) => value.to_string(),
            Value::Str(s) => format!("\"{}\"", s),
        }
    }

    fn declaration(&self, name: &str) -> String {
        format!("int {};", name)
    }

    fn assignment(&self, dest: &str, src: &str) -> String {
        format!("{} = {};", dest, src)
    }

    fn conditional_open(&self, condition: &str, negated: bool) -> String {
        if negated {
            format!("if (!{}) {{", condition)
        } else {
            format!("if ({}) {{", condition)
        }
    }

    fn block_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn jump_marker(&self, label: LabelId) -> String {
        format!("// jump {}", label_name(label))
    }

    fn label_marker(&self, label: LabelId) -> String {
        format!("// {}:", label_name(label))
    }

    fn function_open(&self, name: &str, params: &[String]) -> String {
        let params = params
            .iter()
            .map(|p| format!("int {}", p))
            .collect::<Vec<_>>()
            .join(", ");
        format!("int {}({}) {{", name, params)
    }

    fn return_line(&self, operand: Option<&str>) -> String {
        match operand {
            Some(value) => format!("return {};", value),
            None => "return;".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_spellings() {
        assert_eq!(TypedDialect.literal(&Value::Bool(true)), "true");
        assert_eq!(TypedDialect.literal(&Value::Number(2.5)), "2.5");
        assert_eq!(TypedDialect.literal(&Value::Str("hi".to_string())), "\"hi\"");
    }

    #[test]
    fn test_line_forms() {
        assert_eq!(TypedDialect.declaration("a"), "int a;");
        assert_eq!(TypedDialect.conditional_open("t0", false), "if (t0) {");
        assert_eq!(TypedDialect.conditional_open("t0", true), "if (!t0) {");
        assert_eq!(
            TypedDialect.function_open("f", &["a".to_string()]),
            "int f(int a) {"
        );
        assert_eq!(TypedDialect.return_line(Some("t0")), "return t0;");
        assert_eq!(TypedDialect.block_close(), Some("}".to_string()));
    }

    #[test]
    fn test_program_frame() {
        assert_eq!(TypedDialect.program_open(), Some("int main(void) {".to_string()));
        assert_eq!(TypedDialect.program_close(), Some("}".to_string()));
    }
}
