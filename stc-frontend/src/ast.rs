//! Syntax tree definitions
//!
//! This module defines the node kinds the translator understands. The tree
//! itself is produced by an external ESTree-compatible parser and arrives
//! as JSON; the variants below mirror that format's `type` tags and field
//! names, so a parsed document deserializes directly into [`SyntaxNode`].
//!
//! The enum also carries a handful of kinds the external parser can
//! produce but the translator does not lower (calls, unary operators,
//! member access, ...). Those deserialize fine and are rejected during
//! lowering with an error naming the kind, so out-of-subset input surfaces
//! as a translation failure instead of a silent skip.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the externally parsed syntax tree. Read-only to the core;
/// lowering never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyntaxNode {
    Program {
        body: Vec<SyntaxNode>,
    },

    VariableDeclaration {
        declarations: Vec<SyntaxNode>,
    },

    VariableDeclarator {
        id: Box<SyntaxNode>,
        #[serde(default)]
        init: Option<Box<SyntaxNode>>,
    },

    Literal {
        value: Value,
    },

    Identifier {
        name: String,
    },

    BinaryExpression {
        operator: String,
        left: Box<SyntaxNode>,
        right: Box<SyntaxNode>,
    },

    LogicalExpression {
        operator: String,
        left: Box<SyntaxNode>,
        right: Box<SyntaxNode>,
    },

    AssignmentExpression {
        operator: String,
        left: Box<SyntaxNode>,
        right: Box<SyntaxNode>,
    },

    ExpressionStatement {
        expression: Box<SyntaxNode>,
    },

    BlockStatement {
        body: Vec<SyntaxNode>,
    },

    IfStatement {
        test: Box<SyntaxNode>,
        consequent: Box<SyntaxNode>,
        #[serde(default)]
        alternate: Option<Box<SyntaxNode>>,
    },

    WhileStatement {
        test: Box<SyntaxNode>,
        body: Box<SyntaxNode>,
    },

    ForStatement {
        #[serde(default)]
        init: Option<Box<SyntaxNode>>,
        #[serde(default)]
        test: Option<Box<SyntaxNode>>,
        #[serde(default)]
        update: Option<Box<SyntaxNode>>,
        body: Box<SyntaxNode>,
    },

    FunctionDeclaration {
        id: Box<SyntaxNode>,
        params: Vec<SyntaxNode>,
        body: Box<SyntaxNode>,
    },

    ReturnStatement {
        #[serde(default)]
        argument: Option<Box<SyntaxNode>>,
    },

    // Kinds the external parser produces but lowering rejects.
    UnaryExpression {
        operator: String,
        argument: Box<SyntaxNode>,
    },

    UpdateExpression {
        operator: String,
        argument: Box<SyntaxNode>,
    },

    CallExpression {
        callee: Box<SyntaxNode>,
        arguments: Vec<SyntaxNode>,
    },

    MemberExpression {
        object: Box<SyntaxNode>,
        property: Box<SyntaxNode>,
    },

    ArrayExpression {
        elements: Vec<SyntaxNode>,
    },

    ConditionalExpression {
        test: Box<SyntaxNode>,
        consequent: Box<SyntaxNode>,
        alternate: Box<SyntaxNode>,
    },

    DoWhileStatement {
        body: Box<SyntaxNode>,
        test: Box<SyntaxNode>,
    },

    BreakStatement {},

    ContinueStatement {},

    EmptyStatement {},
}

impl SyntaxNode {
    /// The ESTree `type` tag of this node, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::Program { .. } => "Program",
            SyntaxNode::VariableDeclaration { .. } => "VariableDeclaration",
            SyntaxNode::VariableDeclarator { .. } => "VariableDeclarator",
            SyntaxNode::Literal { .. } => "Literal",
            SyntaxNode::Identifier { .. } => "Identifier",
            SyntaxNode::BinaryExpression { .. } => "BinaryExpression",
            SyntaxNode::LogicalExpression { .. } => "LogicalExpression",
            SyntaxNode::AssignmentExpression { .. } => "AssignmentExpression",
            SyntaxNode::ExpressionStatement { .. } => "ExpressionStatement",
            SyntaxNode::BlockStatement { .. } => "BlockStatement",
            SyntaxNode::IfStatement { .. } => "IfStatement",
            SyntaxNode::WhileStatement { .. } => "WhileStatement",
            SyntaxNode::ForStatement { .. } => "ForStatement",
            SyntaxNode::FunctionDeclaration { .. } => "FunctionDeclaration",
            SyntaxNode::ReturnStatement { .. } => "ReturnStatement",
            SyntaxNode::UnaryExpression { .. } => "UnaryExpression",
            SyntaxNode::UpdateExpression { .. } => "UpdateExpression",
            SyntaxNode::CallExpression { .. } => "CallExpression",
            SyntaxNode::MemberExpression { .. } => "MemberExpression",
            SyntaxNode::ArrayExpression { .. } => "ArrayExpression",
            SyntaxNode::ConditionalExpression { .. } => "ConditionalExpression",
            SyntaxNode::DoWhileStatement { .. } => "DoWhileStatement",
            SyntaxNode::BreakStatement { .. } => "BreakStatement",
            SyntaxNode::ContinueStatement { .. } => "ContinueStatement",
            SyntaxNode::EmptyStatement { .. } => "EmptyStatement",
        }
    }
}

/// A literal payload: numeric, boolean, or string. Literals pass through
/// the translator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                // Whole numbers print without a trailing ".0".
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}
