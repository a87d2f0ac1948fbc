//! Script-style dialect
//!
//! Dynamically typed, indentation-delimited surface in the manner of a
//! scripting language: declarations initialize a slot to the empty value,
//! blocks are closed by dedenting, and jump/label markers are `#` comments.

use crate::dialect::Dialect;
use stc_common::{label_name, LabelId};
use stc_frontend::Value;

pub struct ScriptDialect;

impl Dialect for ScriptDialect {
    fn name(&self) -> &'static str {
        "script"
    }

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Number(_) => value.to_string(),
            Value::Str(s) => format!("'{}'", s),
        }
    }

    fn declaration(&self, name: &str) -> String {
        format!("{} = None", name)
    }

    fn assignment(&self, dest: &str, src: &str) -> String {
        format!("{} = {}", dest, src)
    }

    fn conditional_open(&self, condition: &str, negated: bool) -> String {
        if negated {
            format!("if not {}:", condition)
        } else {
            format!("if {}:", condition)
        }
    }

    fn jump_marker(&self, label: LabelId) -> String {
        format!("# jump {}", label_name(label))
    }

    fn label_marker(&self, label: LabelId) -> String {
        format!("# {}:", label_name(label))
    }

    fn function_open(&self, name: &str, params: &[String]) -> String {
        format!("def {}({}):", name, params.join(", "))
    }

    fn return_line(&self, operand: Option<&str>) -> String {
        match operand {
            Some(value) => format!("return {}", value),
            None => "return".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_spellings() {
        assert_eq!(ScriptDialect.literal(&Value::Bool(true)), "True");
        assert_eq!(ScriptDialect.literal(&Value::Number(4.0)), "4");
        assert_eq!(ScriptDialect.literal(&Value::Str("hi".to_string())), "'hi'");
    }

    #[test]
    fn test_line_forms() {
        assert_eq!(ScriptDialect.declaration("a"), "a = None");
        assert_eq!(ScriptDialect.conditional_open("t0", false), "if t0:");
        assert_eq!(ScriptDialect.conditional_open("t0", true), "if not t0:");
        assert_eq!(
            ScriptDialect.function_open("f", &["a".to_string(), "b".to_string()]),
            "def f(a, b):"
        );
        assert_eq!(ScriptDialect.return_line(None), "return");
        assert!(ScriptDialect.block_close().is_none());
    }
}
