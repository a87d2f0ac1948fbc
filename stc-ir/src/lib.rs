//! Script-to-TAC Translator - Intermediate Instruction Sequence
//!
//! This crate defines the flat three-address instruction sequence that sits
//! between the syntax tree and the textual backends, and the lowering pass
//! that produces it. The sequence is built once per translation, is
//! immutable afterwards, and keeps its branch/label pairs properly nested
//! so a backend can reconstruct block structure from a depth counter alone.

pub mod instr;
pub mod lowering;

pub use instr::{ArithOp, CompareOp, Instr, Operand, Program};
pub use lowering::lower;
