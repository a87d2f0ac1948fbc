//! Script-to-TAC Translator - Structured-Text Backends
//!
//! This crate provides:
//! - the generic emission engine that rebuilds block nesting from the flat
//!   instruction stream (`engine`)
//! - the per-backend surface syntax seam (`dialect`) with its two
//!   implementations (`script`, `typed`)
//! - the whole-pipeline entry point [`translate`]

pub mod dialect;
pub mod engine;
pub mod script;
pub mod typed;

pub use dialect::Dialect;
pub use engine::emit;
pub use script::ScriptDialect;
pub use typed::TypedDialect;

use stc_common::TranslationError;
use stc_frontend::SyntaxNode;
use stc_ir::Program;

/// The complete result of one translation: the instruction sequence plus
/// both rendered surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub program: Program,
    pub script: String,
    pub typed: String,
}

/// Lower a syntax tree and render it in both dialects.
///
/// The whole tree is lowered before either backend runs; on any failure no
/// instructions and no text are returned. A translation is a pure function
/// of its input: calling this twice on the same tree yields identical
/// names, instruction order, and text.
pub fn translate(tree: &SyntaxNode) -> Result<Translation, TranslationError> {
    let program = stc_ir::lower(tree)?;
    let script = engine::emit(&program, &ScriptDialect)?;
    let typed = engine::emit(&program, &TypedDialect)?;
    Ok(Translation {
        program,
        script,
        typed,
    })
}
