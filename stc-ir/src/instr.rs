//! Three-address instruction definitions
//!
//! Instructions reference operands by name: declared source variables keep
//! their source spelling, temporaries are `t0, t1, ...` and labels are
//! `L0, L1, ...` drawn from two independent counters.

use serde::Serialize;
use stc_common::{label_name, temp_name, LabelId, TempId};
use stc_frontend::Value;
use std::fmt;

/// Arithmetic operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// Listing mnemonic (`add t0, a, b`).
    pub fn mnemonic(&self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
        }
    }

    /// Infix spelling shared by both surface syntaxes.
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Comparison operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    /// Listing mnemonic (`lt t0, a, b`).
    pub fn mnemonic(&self) -> &'static str {
        match self {
            CompareOp::Lt => "lt",
            CompareOp::Gt => "gt",
            CompareOp::Le => "lte",
            CompareOp::Ge => "gte",
            CompareOp::Eq => "eq",
            CompareOp::Ne => "neq",
        }
    }

    /// Infix spelling shared by both surface syntaxes.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }
}

/// The storage location holding an expression result: a literal passed
/// through from the source, a declared variable, or a fresh temporary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operand {
    Literal(Value),
    Var(String),
    Temp(TempId),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Var(name) => write!(f, "{}", name),
            Operand::Temp(id) => write!(f, "{}", temp_name(*id)),
        }
    }
}

/// A single three-address instruction.
///
/// `Mov` destinations are always a `Var` or `Temp` operand; lowering never
/// produces a literal destination. Every `Jump`/`JumpIfFalse`/`JumpIfTrue`
/// target has exactly one later `Label` with the same id, and a conditional
/// branch is always immediately preceded by a `Cmp` of the tested operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instr {
    /// Introduce a variable name: `decl a`
    Decl(String),
    /// Copy a value: `mov a, t0`
    Mov(Operand, Operand),
    /// Arithmetic into a fresh temporary: `add t0, a, b`
    Arith(ArithOp, TempId, Operand, Operand),
    /// Comparison into a fresh temporary: `lt t0, a, b`
    Compare(CompareOp, TempId, Operand, Operand),
    /// Stage an operand for the branch that follows: `cmp t0`
    Cmp(Operand),
    /// Branch taken when the staged operand is false: `jmp_if_false L0`
    JumpIfFalse(LabelId),
    /// Branch taken when the staged operand is true: `jmp_if_true L0`
    JumpIfTrue(LabelId),
    /// Unconditional jump: `jmp L0`
    Jump(LabelId),
    /// Jump target: `L0:`
    Label(LabelId),
    /// Function framing: `func f`
    FuncBegin(String),
    /// Formal parameter, in declaration order: `param a`
    Param(String),
    /// End of function body: `end_func`
    FuncEnd,
    /// Return with optional value: `ret t0` / `ret`
    Return(Option<Operand>),
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Decl(name) => write!(f, "decl {}", name),
            Instr::Mov(dest, src) => write!(f, "mov {}, {}", dest, src),
            Instr::Arith(op, dest, lhs, rhs) => {
                write!(f, "{} {}, {}, {}", op.mnemonic(), temp_name(*dest), lhs, rhs)
            }
            Instr::Compare(op, dest, lhs, rhs) => {
                write!(f, "{} {}, {}, {}", op.mnemonic(), temp_name(*dest), lhs, rhs)
            }
            Instr::Cmp(operand) => write!(f, "cmp {}", operand),
            Instr::JumpIfFalse(label) => write!(f, "jmp_if_false {}", label_name(*label)),
            Instr::JumpIfTrue(label) => write!(f, "jmp_if_true {}", label_name(*label)),
            Instr::Jump(label) => write!(f, "jmp {}", label_name(*label)),
            Instr::Label(label) => write!(f, "{}:", label_name(*label)),
            Instr::FuncBegin(name) => write!(f, "func {}", name),
            Instr::Param(name) => write!(f, "param {}", name),
            Instr::FuncEnd => write!(f, "end_func"),
            Instr::Return(Some(operand)) => write!(f, "ret {}", operand),
            Instr::Return(None) => write!(f, "ret"),
        }
    }
}

/// The complete instruction sequence for one translation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub instructions: Vec<Instr>,
}

impl Program {
    /// Render the canonical listing, one instruction per line.
    pub fn listing(&self) -> String {
        self.instructions
            .iter()
            .map(|instr| instr.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.listing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instruction_listing() {
        let program = Program {
            instructions: vec![
                Instr::Decl("a".to_string()),
                Instr::Arith(
                    ArithOp::Mul,
                    0,
                    Operand::Var("a".to_string()),
                    Operand::Var("b".to_string()),
                ),
                Instr::Cmp(Operand::Temp(0)),
                Instr::JumpIfFalse(0),
                Instr::Mov(
                    Operand::Var("a".to_string()),
                    Operand::Literal(stc_frontend::Value::Number(1.0)),
                ),
                Instr::Label(0),
                Instr::Return(None),
            ],
        };

        assert_eq!(
            program.listing(),
            "decl a\n\
             mul t0, a, b\n\
             cmp t0\n\
             jmp_if_false L0\n\
             mov a, 1\n\
             L0:\n\
             ret"
        );
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::Var("x".to_string()).to_string(), "x");
        assert_eq!(Operand::Temp(12).to_string(), "t12");
        assert_eq!(
            Operand::Literal(stc_frontend::Value::Bool(true)).to_string(),
            "true"
        );
    }

    #[test]
    fn test_compare_mnemonics() {
        assert_eq!(CompareOp::Le.mnemonic(), "lte");
        assert_eq!(CompareOp::Ne.mnemonic(), "neq");
        assert_eq!(CompareOp::Ge.symbol(), ">=");
    }
}
