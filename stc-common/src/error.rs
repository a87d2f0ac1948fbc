//! Error handling for the translator
//!
//! Every failure is terminal for the call that raised it: lowering and
//! emission abort on the first error and return no partial instruction
//! sequence or text.

use serde::Serialize;
use thiserror::Error;

/// Main error type covering both translation phases.
///
/// `UnsupportedConstruct`, `UnsupportedOperator` and
/// `InvalidAssignmentTarget` are raised during lowering for input outside
/// the supported grammar subset. `MalformedControlFlow` is raised during
/// emission when the instruction stream violates the nesting invariant,
/// which can only happen through an upstream defect.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum TranslationError {
    #[error("unsupported syntax construct: {kind}")]
    UnsupportedConstruct { kind: String },

    #[error("unsupported operator: {operator}")]
    UnsupportedOperator { operator: String },

    #[error("invalid assignment target: {kind}")]
    InvalidAssignmentTarget { kind: String },

    #[error("malformed control flow: {detail}")]
    MalformedControlFlow { detail: String },
}

impl TranslationError {
    pub fn unsupported_construct(kind: impl Into<String>) -> Self {
        TranslationError::UnsupportedConstruct { kind: kind.into() }
    }

    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        TranslationError::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    pub fn invalid_assignment_target(kind: impl Into<String>) -> Self {
        TranslationError::InvalidAssignmentTarget { kind: kind.into() }
    }

    pub fn malformed_control_flow(detail: impl Into<String>) -> Self {
        TranslationError::MalformedControlFlow {
            detail: detail.into(),
        }
    }
}
