//! Statement handlers, plus variable declarations.

use kiln_ir::{Function, Name, NodeId, ParseTree, Statement, Value};

use super::{required_child, unresolvable, visit, visit_converting, Interpreter, Visit};
use crate::completion::CompletionRecord;
use crate::context::ContextKind;
use crate::errors::{unimplemented, EvalError};

impl Interpreter {
    pub(super) fn execute_statement(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        statement: Statement,
    ) -> Result<CompletionRecord, EvalError> {
        match statement {
            Statement::TranslationUnit | Statement::Block => self.execute_sequence(code, node),
            Statement::Expression => self.execute_pass_through(code, node),
            Statement::If => self.execute_if(code, node),
            Statement::While => self.execute_while(code, node),
            Statement::DoWhile => self.execute_do_while(code, node),
            Statement::Return => self.execute_return(code, node),
            Statement::Function => self.execute_function_declaration(code, node),
            Statement::Break => Ok(CompletionRecord::Break),
            Statement::Continue => Ok(CompletionRecord::Continue),
            Statement::For | Statement::Throw => Err(unimplemented(statement.name())),
        }
    }

    /// Statements in order; the running result is kept under the node itself.
    ///
    /// At the root of a context the sequence ends the context: a translation
    /// unit returns its last value, a function body returns `undefined`.
    fn execute_sequence(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        let next = match visit(code, frame, node)? {
            Visit::Enter => code.first_child(node),
            Visit::Resume(statement) => {
                let value = frame.take(statement);
                frame.store(node, value);
                code.next_sibling(statement)
            }
        };
        if let Some(next) = next {
            return Ok(frame.descend(next));
        }

        let value = frame.take(node);
        if code.parent(node).is_some() {
            return Ok(CompletionRecord::Normal(value));
        }
        Ok(match frame.kind {
            ContextKind::TopLevel => CompletionRecord::Return(value),
            ContextKind::Function | ContextKind::Conversion { .. } => {
                CompletionRecord::Return(Value::Undefined)
            }
        })
    }

    /// Nodes whose value is the value of their only child.
    pub(super) fn execute_pass_through(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        Ok(match visit(code, frame, node)? {
            Visit::Enter => match code.first_child(node) {
                Some(child) => frame.descend(child),
                None => CompletionRecord::Normal(Value::Undefined),
            },
            Visit::Resume(child) => CompletionRecord::Normal(frame.take(child)),
        })
    }

    fn execute_if(&mut self, code: &ParseTree, node: NodeId) -> Result<CompletionRecord, EvalError> {
        let condition = required_child(code, node, 0)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(condition)),
            Some(Visit::Resume(branch)) if branch != condition => {
                return Ok(CompletionRecord::Normal(frame.take(branch)));
            }
            Some(Visit::Resume(_)) | None => {}
        }
        let branch = match self.take_condition(condition)? {
            Ok(true) => Some(required_child(code, node, 1)?),
            Ok(false) => code.child(node, 2),
            Err(suspended) => return Ok(suspended),
        };
        let frame = self.frame()?;
        Ok(match branch {
            Some(branch) => frame.descend(branch),
            None => CompletionRecord::Normal(Value::Undefined),
        })
    }

    /// `while (condition) body`; the loop itself evaluates to `undefined`.
    fn execute_while(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let condition = required_child(code, node, 0)?;
        let body = required_child(code, node, 1)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(condition)),
            Some(Visit::Resume(child)) if child != condition => {
                frame.discard(body);
                return Ok(frame.descend(condition));
            }
            Some(Visit::Resume(_)) | None => {}
        }
        self.loop_test(condition, body)
    }

    fn execute_do_while(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let body = required_child(code, node, 0)?;
        let condition = required_child(code, node, 1)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(body)),
            Some(Visit::Resume(child)) if child == body => {
                frame.discard(body);
                return Ok(frame.descend(condition));
            }
            Some(Visit::Resume(_)) | None => {}
        }
        self.loop_test(condition, body)
    }

    /// Run `body` again if the finished `condition` holds; otherwise the loop
    /// is done and evaluates to `undefined`.
    fn loop_test(&mut self, condition: NodeId, body: NodeId) -> Result<CompletionRecord, EvalError> {
        Ok(match self.take_condition(condition)? {
            Ok(true) => self.frame()?.descend(body),
            Ok(false) => CompletionRecord::Normal(Value::Undefined),
            Err(suspended) => suspended,
        })
    }

    fn execute_return(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        Ok(match visit(code, frame, node)? {
            Visit::Enter => match code.first_child(node) {
                Some(operand) => frame.descend(operand),
                None => CompletionRecord::Return(Value::Undefined),
            },
            Visit::Resume(operand) => CompletionRecord::Return(frame.take(operand)),
        })
    }

    /// Evaluate the function literal and bind it under its own name.
    fn execute_function_declaration(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        match visit(code, frame, node)? {
            Visit::Enter => Ok(frame.descend(required_child(code, node, 0)?)),
            Visit::Resume(literal) => {
                let value = frame.take(literal);
                if let Value::Function(Function::Script(script)) = &value {
                    if let Some(name) = &script.name {
                        if frame.environment.set(name, value.clone()).is_err() {
                            return Ok(unresolvable(name));
                        }
                    }
                }
                Ok(CompletionRecord::Normal(value))
            }
        }
    }

    /// `var name [= initializer]`, always bound in the innermost scope.
    pub(super) fn execute_var_decl(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        name: &Name,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        let value = match visit(code, frame, node)? {
            Visit::Enter => match code.first_child(node) {
                Some(initializer) => return Ok(frame.descend(initializer)),
                None => Value::Undefined,
            },
            Visit::Resume(initializer) => frame.take(initializer),
        };
        if frame.environment.set(name, value.clone()).is_err() {
            return Ok(unresolvable(name));
        }
        Ok(CompletionRecord::Normal(value))
    }
}
