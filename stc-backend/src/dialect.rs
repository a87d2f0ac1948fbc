//! Per-backend surface syntax
//!
//! The emission engine is generic; everything target-specific lives behind
//! this trait: operator spellings, literal formatting, and the line forms
//! for declarations, assignments, block openers, markers, and function
//! framing. A dialect never sees the instruction stream or the depth
//! stack, only individual spelling requests.

use stc_common::{temp_name, LabelId};
use stc_frontend::Value;
use stc_ir::{ArithOp, CompareOp, Operand};

pub trait Dialect {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// One indentation step.
    fn indent_unit(&self) -> &'static str {
        "    "
    }

    /// Optional whole-program frame. A dialect returning an opener raises
    /// the emission base depth by one; the closer is appended at depth 0.
    fn program_open(&self) -> Option<String> {
        None
    }

    fn program_close(&self) -> Option<String> {
        None
    }

    /// Spelling of a literal in this surface syntax.
    fn literal(&self, value: &Value) -> String;

    /// Spelling of an operand. Variables and temporaries read the same in
    /// both surfaces; only literals differ.
    fn operand(&self, operand: &Operand) -> String {
        match operand {
            Operand::Literal(value) => self.literal(value),
            Operand::Var(name) => name.clone(),
            Operand::Temp(id) => temp_name(*id),
        }
    }

    fn arith_symbol(&self, op: ArithOp) -> &'static str {
        op.symbol()
    }

    fn compare_symbol(&self, op: CompareOp) -> &'static str {
        op.symbol()
    }

    /// Declaration line for a source variable.
    fn declaration(&self, name: &str) -> String;

    /// Plain assignment line.
    fn assignment(&self, dest: &str, src: &str) -> String;

    /// Three-address binary line. Both dialects spell this as an
    /// assignment of an infix expression.
    fn binary(&self, dest: &str, lhs: &str, op: &str, rhs: &str) -> String {
        self.assignment(dest, &format!("{} {} {}", lhs, op, rhs))
    }

    /// Conditional block opener. `negated` is true when the guarded block
    /// runs on the condition being false (a `jmp_if_true` branch).
    fn conditional_open(&self, condition: &str, negated: bool) -> String;

    /// Optional explicit block terminator (the brace dialect's `}`).
    /// Indentation-only dialects return `None` and close by dedenting.
    fn block_close(&self) -> Option<String> {
        None
    }

    /// Non-executing marker documenting an unconditional jump edge.
    fn jump_marker(&self, label: LabelId) -> String;

    /// Non-executing marker naming a label position.
    fn label_marker(&self, label: LabelId) -> String;

    /// Function header line; opens one level of nesting.
    fn function_open(&self, name: &str, params: &[String]) -> String;

    /// Optional function terminator, mirroring [`Dialect::block_close`].
    fn function_close(&self) -> Option<String> {
        self.block_close()
    }

    /// Return line, with the dialect's empty-return spelling when no
    /// operand is present.
    fn return_line(&self, operand: Option<&str>) -> String;
}
