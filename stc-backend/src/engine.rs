//! Generic structured-emission engine
//!
//! Consumes an instruction sequence exactly once, in order, and rebuilds
//! block nesting from the flat label/jump stream. State is a line buffer,
//! a depth counter, a LIFO stack of pending-branch records, and the
//! operand staged by the last `cmp`. No control-flow graph is ever built;
//! the properly nested branch/label pairs produced by lowering are enough
//! for a depth counter to recover the original structure.
//!
//! A branch closes exactly at the label that terminates it: either the
//! unconditional jump immediately preceding that label pops the record
//! (the jump marker then prints inside the block), or the label itself
//! does. A label matching a pending branch that is not the innermost one
//! means the stream is not properly nested, which is an upstream defect
//! and fails rather than guessing a layout.

use crate::dialect::Dialect;
use log::{debug, trace};
use stc_common::{label_name, temp_name, LabelId, TranslationError};
use stc_ir::{Instr, Operand, Program};

/// Render one instruction sequence in one dialect.
pub fn emit(program: &Program, dialect: &dyn Dialect) -> Result<String, TranslationError> {
    Emitter::new(dialect).run(program)
}

/// A conditional branch whose target label has not been reached yet.
struct PendingBranch {
    /// Depth at which the branch opened; restored when it closes.
    depth: usize,
    target: LabelId,
}

struct Emitter<'a> {
    dialect: &'a dyn Dialect,
    lines: Vec<String>,
    depth: usize,
    base_depth: usize,
    pending: Vec<PendingBranch>,
    staged: Option<Operand>,
}

impl<'a> Emitter<'a> {
    fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            lines: Vec::new(),
            depth: 0,
            base_depth: 0,
            pending: Vec::new(),
            staged: None,
        }
    }

    fn push_line(&mut self, text: String) {
        let mut line = self.dialect.indent_unit().repeat(self.depth);
        line.push_str(&text);
        self.lines.push(line);
    }

    fn run(mut self, program: &Program) -> Result<String, TranslationError> {
        debug!(
            "emitting {} instructions as {}",
            program.instructions.len(),
            self.dialect.name()
        );

        if let Some(open) = self.dialect.program_open() {
            self.lines.push(open);
            self.depth = 1;
            self.base_depth = 1;
        }

        let instrs = &program.instructions;
        let mut i = 0;
        while i < instrs.len() {
            trace!("depth {} | {}", self.depth, instrs[i]);
            match &instrs[i] {
                Instr::Decl(name) => {
                    let line = self.dialect.declaration(name);
                    self.push_line(line);
                }

                Instr::Mov(dest, src) => {
                    let line = self
                        .dialect
                        .assignment(&self.dialect.operand(dest), &self.dialect.operand(src));
                    self.push_line(line);
                }

                Instr::Arith(op, dest, lhs, rhs) => {
                    let line = self.dialect.binary(
                        &temp_name(*dest),
                        &self.dialect.operand(lhs),
                        self.dialect.arith_symbol(*op),
                        &self.dialect.operand(rhs),
                    );
                    self.push_line(line);
                }

                Instr::Compare(op, dest, lhs, rhs) => {
                    let line = self.dialect.binary(
                        &temp_name(*dest),
                        &self.dialect.operand(lhs),
                        self.dialect.compare_symbol(*op),
                        &self.dialect.operand(rhs),
                    );
                    self.push_line(line);
                }

                // Stages the tested operand; emits nothing.
                Instr::Cmp(operand) => {
                    self.staged = Some(operand.clone());
                }

                Instr::JumpIfFalse(target) => self.open_branch(*target, false)?,
                Instr::JumpIfTrue(target) => self.open_branch(*target, true)?,

                Instr::Jump(target) => {
                    let closes = matches!(
                        instrs.get(i + 1),
                        Some(Instr::Label(next))
                            if self.pending.last().map_or(false, |p| p.target == *next)
                    );
                    let marker = self.dialect.jump_marker(*target);
                    self.push_line(marker);
                    if closes {
                        self.close_innermost_branch()?;
                    }
                }

                Instr::Label(label) => {
                    if self.pending.last().map_or(false, |p| p.target == *label) {
                        self.close_innermost_branch()?;
                    } else if self.pending.iter().any(|p| p.target == *label) {
                        return Err(TranslationError::malformed_control_flow(format!(
                            "label {} crosses an open branch",
                            label_name(*label)
                        )));
                    }
                    let marker = self.dialect.label_marker(*label);
                    self.push_line(marker);
                }

                Instr::FuncBegin(name) => {
                    // The parameter run immediately follows the header.
                    let mut params = Vec::new();
                    while let Some(Instr::Param(param)) = instrs.get(i + 1 + params.len()) {
                        params.push(param.clone());
                    }
                    let header = self.dialect.function_open(name, &params);
                    self.push_line(header);
                    self.depth += 1;
                    i += params.len();
                }

                Instr::Param(name) => {
                    return Err(TranslationError::malformed_control_flow(format!(
                        "param {} outside a function header",
                        name
                    )));
                }

                Instr::FuncEnd => {
                    if self.depth <= self.base_depth {
                        return Err(TranslationError::malformed_control_flow(
                            "end_func without a matching func".to_string(),
                        ));
                    }
                    self.depth -= 1;
                    if let Some(close) = self.dialect.function_close() {
                        self.push_line(close);
                    }
                }

                Instr::Return(operand) => {
                    let value = operand.as_ref().map(|o| self.dialect.operand(o));
                    let line = self.dialect.return_line(value.as_deref());
                    self.push_line(line);
                }
            }
            i += 1;
        }

        if let Some(record) = self.pending.last() {
            return Err(TranslationError::malformed_control_flow(format!(
                "branch targeting {} still open at end of program",
                label_name(record.target)
            )));
        }
        if self.depth != self.base_depth {
            return Err(TranslationError::malformed_control_flow(
                "unbalanced nesting at end of program".to_string(),
            ));
        }

        if let Some(close) = self.dialect.program_close() {
            self.lines.push(close);
        }

        if self.lines.is_empty() {
            Ok(String::new())
        } else {
            Ok(self.lines.join("\n") + "\n")
        }
    }

    /// Emit a conditional block opener and push its pending record.
    fn open_branch(&mut self, target: LabelId, negated: bool) -> Result<(), TranslationError> {
        let Some(condition) = self.staged.take() else {
            let branch = if negated { "jmp_if_true" } else { "jmp_if_false" };
            return Err(TranslationError::malformed_control_flow(format!(
                "{} {} without a preceding cmp",
                branch,
                label_name(target)
            )));
        };
        let line = self
            .dialect
            .conditional_open(&self.dialect.operand(&condition), negated);
        self.push_line(line);
        self.pending.push(PendingBranch {
            depth: self.depth,
            target,
        });
        self.depth += 1;
        Ok(())
    }

    /// Pop the innermost pending branch and restore its opening depth.
    /// Both call sites check the stack top first, so an empty stack here
    /// is an engine defect; it surfaces as an error all the same.
    fn close_innermost_branch(&mut self) -> Result<(), TranslationError> {
        let Some(record) = self.pending.pop() else {
            return Err(TranslationError::malformed_control_flow(
                "no pending branch to close".to_string(),
            ));
        };
        self.depth = record.depth;
        if let Some(close) = self.dialect.block_close() {
            self.push_line(close);
        }
        Ok(())
    }
}
