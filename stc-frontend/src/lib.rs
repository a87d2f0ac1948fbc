//! Script-to-TAC Translator - Frontend
//!
//! This crate defines the syntax-tree data model consumed by lowering.
//! Parsing itself is delegated to an external ESTree-compatible parser;
//! what crosses the boundary is the parser's JSON serialization of the
//! tree, which [`parse_tree`] turns into a [`SyntaxNode`].

pub mod ast;

pub use ast::{SyntaxNode, Value};

/// Deserialize an externally produced syntax-tree document.
///
/// A document that is not valid JSON, or whose root `type` tag is not a
/// node kind the data model represents, is a boundary failure and is
/// reported through the parser error, not as a translation error.
pub fn parse_tree(json: &str) -> Result<SyntaxNode, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_program() {
        let tree = parse_tree(r#"{ "type": "Program", "body": [] }"#).unwrap();
        match tree {
            SyntaxNode::Program { body } => assert!(body.is_empty()),
            other => panic!("expected program, got {}", other.kind()),
        }
    }

    #[test]
    fn test_parse_tree_rejects_garbage() {
        assert!(parse_tree("not json").is_err());
        assert!(parse_tree(r#"{ "type": "LabeledStatement" }"#).is_err());
    }
}
