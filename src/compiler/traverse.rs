//! Generic depth-first traversal of the input AST
//!
//! A [`Visitor`] is the per-kind callback table: one method per node kind,
//! each defaulting to "do nothing and descend". [`walk`] calls
//! [`Visitor::enter_node`], visits the node (pre-order), then its children
//! in source order, then calls [`Visitor::leave_node`] (post-order).
//!
//! Callbacks receive the node mutably, the kind of its syntactic parent, and
//! a context value of type `C`. The [`Step`] a callback returns names the
//! context its children see: the same one, a slot borrowed out of it, or
//! none at all ([`Step::Skip`]). This is how the transformer rebinds its
//! append target per call without storing anything on the tree.
//!
//! Children order:
//! - Program → body
//! - CallExpression → params
//! - BinaryExpression → left, right
//! - ExpressionStatement → expression
//!
//! Children are read after the pre-order callback returns, so a callback
//! that replaces its node is followed by a walk of the replacement.

use crate::compiler::errors::CompileError;
use crate::parser::ast::{Node, NodeKind, Program};

/// What to do with a node's children after its callback ran
pub enum Step<'c, C: ?Sized> {
    /// Visit the children, handing them this context
    Descend(&'c mut C),
    /// Leave the children unvisited
    Skip,
}

/// Per-kind callback table
pub trait Visitor<C: ?Sized = ()> {
    fn visit_program<'c>(
        &mut self,
        _program: &mut Program,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_number_literal<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_string_literal<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_boolean_literal<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_binary_expression<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_call_expression<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    fn visit_expression_statement<'c>(
        &mut self,
        _node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut C,
    ) -> Result<Step<'c, C>, CompileError> {
        Ok(Step::Descend(ctx))
    }

    /// Runs before the per-kind callback of every node
    fn enter_node(&mut self, _node: &Node, _parent: NodeKind) -> Result<(), CompileError> {
        Ok(())
    }

    /// Runs after the node's children, whatever the pre-order step was
    fn leave_node(&mut self, _node: &mut Node, _parent: NodeKind) -> Result<(), CompileError> {
        Ok(())
    }
}

/// Walk a whole program
pub fn walk<C, V>(program: &mut Program, visitor: &mut V, ctx: &mut C) -> Result<(), CompileError>
where
    C: ?Sized,
    V: Visitor<C> + ?Sized,
{
    let Step::Descend(ctx) = visitor.visit_program(program, ctx)? else {
        return Ok(());
    };

    for node in program.body.iter_mut() {
        walk_node(node, NodeKind::Program, visitor, ctx)?;
    }
    Ok(())
}

/// Walk one subtree whose parent has kind `parent`
pub fn walk_node<C, V>(
    node: &mut Node,
    parent: NodeKind,
    visitor: &mut V,
    ctx: &mut C,
) -> Result<(), CompileError>
where
    C: ?Sized,
    V: Visitor<C> + ?Sized,
{
    visitor.enter_node(node, parent)?;

    let step = match *node {
        Node::NumberLiteral(_) => visitor.visit_number_literal(node, parent, ctx)?,
        Node::StringLiteral(_) => visitor.visit_string_literal(node, parent, ctx)?,
        Node::BooleanLiteral(_) => visitor.visit_boolean_literal(node, parent, ctx)?,
        Node::BinaryExpression { .. } => visitor.visit_binary_expression(node, parent, ctx)?,
        Node::CallExpression { .. } => visitor.visit_call_expression(node, parent, ctx)?,
        Node::ExpressionStatement { .. } => {
            visitor.visit_expression_statement(node, parent, ctx)?
        }
    };

    if let Step::Descend(child_ctx) = step {
        match node {
            Node::CallExpression { params, .. } => {
                for param in params.iter_mut() {
                    walk_node(param, NodeKind::CallExpression, visitor, child_ctx)?;
                }
            }
            Node::BinaryExpression { left, right, .. } => {
                walk_node(left, NodeKind::BinaryExpression, visitor, child_ctx)?;
                walk_node(right, NodeKind::BinaryExpression, visitor, child_ctx)?;
            }
            Node::ExpressionStatement { expression } => {
                walk_node(expression, NodeKind::ExpressionStatement, visitor, child_ctx)?;
            }
            Node::NumberLiteral(_) | Node::StringLiteral(_) | Node::BooleanLiteral(_) => {}
        }
    }

    visitor.leave_node(node, parent)
}
