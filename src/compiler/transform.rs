//! Input AST → output AST
//!
//! The transformer is a [`Visitor`] whose context is the `Vec` the next
//! emitted node is appended to. Each call appends its output node first and
//! then lends that node's empty argument list to its children, so nested
//! calls land inside their parent call rather than in the program body.

use crate::compiler::errors::CompileError;
use crate::compiler::output;
use crate::compiler::traverse::{walk, walk_node, Step, Visitor};
use crate::parser::ast::{Node, NodeKind, Program};

type Context = Vec<output::Node>;

/// Build the output tree for an (already optimized) program.
pub fn transform(mut program: Program) -> Result<output::Program, CompileError> {
    let mut target = output::Program::default();
    walk(&mut program, &mut Transformer, &mut target.body)?;
    Ok(target)
}

struct Transformer;

impl Transformer {
    /// Transform one binary operand into its own single-node slot.
    fn operand(&mut self, node: &mut Node) -> Result<output::Node, CompileError> {
        let mut slot = Context::with_capacity(1);
        walk_node(node, NodeKind::BinaryExpression, self, &mut slot)?;

        let [operand]: [output::Node; 1] = slot.try_into().map_err(|_| {
            CompileError::internal(
                NodeKind::BinaryExpression.to_string(),
                "operand did not produce exactly one node",
            )
        })?;
        Ok(operand)
    }
}

fn copy_literal(node: &Node) -> Result<output::Node, CompileError> {
    match node {
        Node::NumberLiteral(value) => Ok(output::Node::NumberLiteral(value.clone())),
        Node::StringLiteral(value) => Ok(output::Node::StringLiteral(value.clone())),
        Node::BooleanLiteral(value) => Ok(output::Node::BooleanLiteral(value.clone())),
        other => Err(CompileError::internal(
            other.kind().to_string(),
            "literal callback on a non-literal",
        )),
    }
}

impl Visitor<Context> for Transformer {
    fn visit_number_literal<'c>(
        &mut self,
        node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut Context,
    ) -> Result<Step<'c, Context>, CompileError> {
        ctx.push(copy_literal(node)?);
        Ok(Step::Skip)
    }

    fn visit_string_literal<'c>(
        &mut self,
        node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut Context,
    ) -> Result<Step<'c, Context>, CompileError> {
        ctx.push(copy_literal(node)?);
        Ok(Step::Skip)
    }

    fn visit_boolean_literal<'c>(
        &mut self,
        node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut Context,
    ) -> Result<Step<'c, Context>, CompileError> {
        ctx.push(copy_literal(node)?);
        Ok(Step::Skip)
    }

    fn visit_binary_expression<'c>(
        &mut self,
        node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut Context,
    ) -> Result<Step<'c, Context>, CompileError> {
        let Node::BinaryExpression {
            operator,
            left,
            right,
        } = node
        else {
            return Err(CompileError::internal(
                "node",
                "binary callback on another kind",
            ));
        };

        let left = self.operand(left)?;
        let right = self.operand(right)?;
        ctx.push(output::Node::BinaryExpression {
            operator: operator.clone(),
            left: Box::new(left),
            right: Box::new(right),
        });
        // Operands were already emitted into their own slots
        Ok(Step::Skip)
    }

    fn visit_call_expression<'c>(
        &mut self,
        node: &mut Node,
        parent: NodeKind,
        ctx: &'c mut Context,
    ) -> Result<Step<'c, Context>, CompileError> {
        let Node::CallExpression { name, .. } = node else {
            return Err(CompileError::internal("node", "call callback on another kind"));
        };

        let call = output::Node::call(name.clone(), Vec::new());
        let emitted = match parent {
            NodeKind::CallExpression | NodeKind::BinaryExpression => call,
            _ => output::Node::statement(call),
        };
        ctx.push(emitted);

        let arguments = ctx
            .last_mut()
            .and_then(output::Node::arguments_mut)
            .ok_or_else(|| {
                CompileError::internal(
                    NodeKind::CallExpression.to_string(),
                    "emitted call has no argument list",
                )
            })?;
        Ok(Step::Descend(arguments))
    }
}
