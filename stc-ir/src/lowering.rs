//! Syntax tree to instruction-sequence lowering
//!
//! One depth-first pass over the externally parsed tree. Expression nodes
//! yield the [`Operand`] holding their result; side-effect-free nodes
//! (literals, identifiers) emit no instructions. Lowering is all-or-nothing:
//! on the first unsupported construct or operator the pass aborts and no
//! partial sequence is returned.

use crate::instr::{ArithOp, CompareOp, Instr, Operand, Program};
use log::{debug, trace};
use stc_common::{label_name, temp_name, LabelId, TempId, TranslationError};
use stc_frontend::SyntaxNode;

/// Lower a syntax tree to its instruction sequence.
pub fn lower(tree: &SyntaxNode) -> Result<Program, TranslationError> {
    let mut lowerer = Lowerer::new();
    lowerer.lower_statement(tree)?;
    Ok(lowerer.finish())
}

/// Per-call lowering context. Each translation gets fresh counters and a
/// fresh instruction list; nothing is shared across calls.
struct Lowerer {
    instructions: Vec<Instr>,
    next_temp: TempId,
    next_label: LabelId,
    in_function: bool,
}

impl Lowerer {
    fn new() -> Self {
        Self {
            instructions: Vec::new(),
            next_temp: 0,
            next_label: 0,
            in_function: false,
        }
    }

    fn finish(self) -> Program {
        Program {
            instructions: self.instructions,
        }
    }

    // Temporaries and labels come from separate counters so the two name
    // spaces can never collide.
    fn new_temp(&mut self) -> TempId {
        let id = self.next_temp;
        self.next_temp += 1;
        trace!("allocated temporary {}", temp_name(id));
        id
    }

    fn new_label(&mut self) -> LabelId {
        let id = self.next_label;
        self.next_label += 1;
        trace!("allocated label {}", label_name(id));
        id
    }

    fn emit(&mut self, instr: Instr) {
        self.instructions.push(instr);
    }

    fn lower_statement(&mut self, node: &SyntaxNode) -> Result<(), TranslationError> {
        debug!("lowering statement {}", node.kind());
        match node {
            // Structural passthrough: traverse children, contribute nothing.
            SyntaxNode::Program { body } | SyntaxNode::BlockStatement { body } => {
                for child in body {
                    self.lower_statement(child)?;
                }
                Ok(())
            }

            SyntaxNode::VariableDeclaration { declarations } => {
                for declarator in declarations {
                    self.lower_declarator(declarator)?;
                }
                Ok(())
            }

            SyntaxNode::ExpressionStatement { expression } => {
                self.lower_expression(expression)?;
                Ok(())
            }

            SyntaxNode::IfStatement {
                test,
                consequent,
                alternate,
            } => self.lower_if(test, consequent, alternate.as_deref()),

            SyntaxNode::WhileStatement { test, body } => self.lower_while(test, body),

            SyntaxNode::ForStatement {
                init,
                test,
                update,
                body,
            } => self.lower_for(
                init.as_deref(),
                test.as_deref(),
                update.as_deref(),
                body,
            ),

            SyntaxNode::FunctionDeclaration { id, params, body } => {
                self.lower_function(id, params, body)
            }

            SyntaxNode::ReturnStatement { argument } => {
                let operand = match argument {
                    Some(expr) => Some(self.lower_expression(expr)?),
                    None => None,
                };
                self.emit(Instr::Return(operand));
                Ok(())
            }

            other => Err(TranslationError::unsupported_construct(other.kind())),
        }
    }

    fn lower_declarator(&mut self, node: &SyntaxNode) -> Result<(), TranslationError> {
        let SyntaxNode::VariableDeclarator { id, init } = node else {
            return Err(TranslationError::unsupported_construct(node.kind()));
        };
        let SyntaxNode::Identifier { name } = id.as_ref() else {
            // Destructuring patterns and the like.
            return Err(TranslationError::unsupported_construct(id.kind()));
        };

        self.emit(Instr::Decl(name.clone()));
        if let Some(init) = init {
            let value = self.lower_expression(init)?;
            self.emit(Instr::Mov(Operand::Var(name.clone()), value));
        }
        Ok(())
    }

    fn lower_if(
        &mut self,
        test: &SyntaxNode,
        consequent: &SyntaxNode,
        alternate: Option<&SyntaxNode>,
    ) -> Result<(), TranslationError> {
        let condition = self.lower_expression(test)?;
        let else_label = self.new_label();
        self.emit(Instr::Cmp(condition));
        self.emit(Instr::JumpIfFalse(else_label));
        self.lower_statement(consequent)?;

        match alternate {
            Some(alternate) => {
                let end_label = self.new_label();
                self.emit(Instr::Jump(end_label));
                self.emit(Instr::Label(else_label));
                self.lower_statement(alternate)?;
                self.emit(Instr::Label(end_label));
            }
            // Without an alternate the else label doubles as the end.
            None => self.emit(Instr::Label(else_label)),
        }
        Ok(())
    }

    fn lower_while(
        &mut self,
        test: &SyntaxNode,
        body: &SyntaxNode,
    ) -> Result<(), TranslationError> {
        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instr::Label(start_label));
        let condition = self.lower_expression(test)?;
        self.emit(Instr::Cmp(condition));
        self.emit(Instr::JumpIfFalse(end_label));
        self.lower_statement(body)?;
        self.emit(Instr::Jump(start_label));
        self.emit(Instr::Label(end_label));
        Ok(())
    }

    fn lower_for(
        &mut self,
        init: Option<&SyntaxNode>,
        test: Option<&SyntaxNode>,
        update: Option<&SyntaxNode>,
        body: &SyntaxNode,
    ) -> Result<(), TranslationError> {
        // The init clause runs once, before the loop. It may be a
        // declaration or a plain expression.
        if let Some(init) = init {
            match init {
                SyntaxNode::VariableDeclaration { .. } => self.lower_statement(init)?,
                _ => {
                    self.lower_expression(init)?;
                }
            }
        }

        let start_label = self.new_label();
        self.emit(Instr::Label(start_label));

        // A missing test clause means an unconditional loop; termination
        // then has to come from a return inside the body.
        let end_label = match test {
            Some(test) => {
                let condition = self.lower_expression(test)?;
                let end_label = self.new_label();
                self.emit(Instr::Cmp(condition));
                self.emit(Instr::JumpIfFalse(end_label));
                Some(end_label)
            }
            None => None,
        };

        self.lower_statement(body)?;

        // The update clause runs at the end of each iteration, right
        // before the back edge.
        if let Some(update) = update {
            self.lower_expression(update)?;
        }
        self.emit(Instr::Jump(start_label));

        if let Some(end_label) = end_label {
            self.emit(Instr::Label(end_label));
        }
        Ok(())
    }

    fn lower_function(
        &mut self,
        id: &SyntaxNode,
        params: &[SyntaxNode],
        body: &SyntaxNode,
    ) -> Result<(), TranslationError> {
        if self.in_function {
            return Err(TranslationError::unsupported_construct(
                "nested FunctionDeclaration",
            ));
        }
        let SyntaxNode::Identifier { name } = id else {
            return Err(TranslationError::unsupported_construct(id.kind()));
        };

        self.emit(Instr::FuncBegin(name.clone()));
        for param in params {
            let SyntaxNode::Identifier { name } = param else {
                return Err(TranslationError::unsupported_construct(param.kind()));
            };
            self.emit(Instr::Param(name.clone()));
        }

        self.in_function = true;
        let result = self.lower_statement(body);
        self.in_function = false;
        result?;

        self.emit(Instr::FuncEnd);
        Ok(())
    }

    fn lower_expression(&mut self, node: &SyntaxNode) -> Result<Operand, TranslationError> {
        match node {
            SyntaxNode::Literal { value } => Ok(Operand::Literal(value.clone())),
            SyntaxNode::Identifier { name } => Ok(Operand::Var(name.clone())),

            SyntaxNode::BinaryExpression {
                operator,
                left,
                right,
            } => self.lower_binary(operator, left, right),

            SyntaxNode::LogicalExpression {
                operator,
                left,
                right,
            } => self.lower_logical(operator, left, right),

            SyntaxNode::AssignmentExpression {
                operator,
                left,
                right,
            } => self.lower_assignment(operator, left, right),

            other => Err(TranslationError::unsupported_construct(other.kind())),
        }
    }

    fn lower_binary(
        &mut self,
        operator: &str,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> Result<Operand, TranslationError> {
        // Strict left-to-right evaluation, matching source semantics for
        // expressions with evaluation-order-sensitive effects.
        let lhs = self.lower_expression(left)?;
        let rhs = self.lower_expression(right)?;
        let dest = self.new_temp();

        let instr = match operator {
            "+" => Instr::Arith(ArithOp::Add, dest, lhs, rhs),
            "-" => Instr::Arith(ArithOp::Sub, dest, lhs, rhs),
            "*" => Instr::Arith(ArithOp::Mul, dest, lhs, rhs),
            "/" => Instr::Arith(ArithOp::Div, dest, lhs, rhs),
            "<" => Instr::Compare(CompareOp::Lt, dest, lhs, rhs),
            ">" => Instr::Compare(CompareOp::Gt, dest, lhs, rhs),
            "<=" => Instr::Compare(CompareOp::Le, dest, lhs, rhs),
            ">=" => Instr::Compare(CompareOp::Ge, dest, lhs, rhs),
            "==" => Instr::Compare(CompareOp::Eq, dest, lhs, rhs),
            "!=" => Instr::Compare(CompareOp::Ne, dest, lhs, rhs),
            _ => return Err(TranslationError::unsupported_operator(operator)),
        };
        self.emit(instr);
        Ok(Operand::Temp(dest))
    }

    /// Short-circuit lowering: the right operand is only evaluated on the
    /// path where the left operand does not already decide the result.
    fn lower_logical(
        &mut self,
        operator: &str,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> Result<Operand, TranslationError> {
        let lhs = self.lower_expression(left)?;
        let result = self.new_temp();
        let short_circuit = self.new_label();
        let end = self.new_label();

        self.emit(Instr::Cmp(lhs.clone()));
        match operator {
            "&&" => self.emit(Instr::JumpIfFalse(short_circuit)),
            "||" => self.emit(Instr::JumpIfTrue(short_circuit)),
            _ => return Err(TranslationError::unsupported_operator(operator)),
        }

        let rhs = self.lower_expression(right)?;
        self.emit(Instr::Mov(Operand::Temp(result), rhs));
        self.emit(Instr::Jump(end));
        self.emit(Instr::Label(short_circuit));
        self.emit(Instr::Mov(Operand::Temp(result), lhs));
        self.emit(Instr::Label(end));
        Ok(Operand::Temp(result))
    }

    fn lower_assignment(
        &mut self,
        operator: &str,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> Result<Operand, TranslationError> {
        // Compound assignment (`+=` and friends) is outside the subset.
        if operator != "=" {
            return Err(TranslationError::unsupported_operator(operator));
        }
        let SyntaxNode::Identifier { name } = left else {
            return Err(TranslationError::invalid_assignment_target(left.kind()));
        };

        let value = self.lower_expression(right)?;
        self.emit(Instr::Mov(Operand::Var(name.clone()), value));
        Ok(Operand::Var(name.clone()))
    }
}
