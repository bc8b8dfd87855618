//! Constant folding
//!
//! A call named after an arithmetic operator whose params are all number
//! literals is replaced by a single number literal. Arithmetic is `f64`
//! throughout, so `(/ 7 2)` folds to `3.5` and division by zero yields
//! `inf` or `NaN` rather than an error.
//!
//! Folding happens in the post-order hook: by the time a call is checked,
//! its params have already been folded, so a purely literal call tree
//! collapses to one number in a single pass.
//!
//! Prefix binary expressions (`+ 1 2`) are never folded, only calls.

use crate::compiler::errors::CompileError;
use crate::compiler::optimize::Pass;
use crate::compiler::traverse::{walk, Visitor};
use crate::parser::ast::{Node, NodeKind, Program};

/// Constant folding pass
pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn run(&self, program: &mut Program) -> Result<(), CompileError> {
        let mut folder = Folder { folded: 0 };
        walk(program, &mut folder, &mut ())?;
        tracing::debug!(folded = folder.folded, "constant folding finished");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "constant-folding"
    }
}

/// Arithmetic operators a call name can fold through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "+" => Some(ArithOp::Add),
            "-" => Some(ArithOp::Sub),
            "*" => Some(ArithOp::Mul),
            "/" => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            ArithOp::Add => left + right,
            ArithOp::Sub => left - right,
            ArithOp::Mul => left * right,
            ArithOp::Div => left / right,
        }
    }
}

struct Folder {
    folded: usize,
}

impl Visitor for Folder {
    fn leave_node(&mut self, node: &mut Node, _parent: NodeKind) -> Result<(), CompileError> {
        if let Some(value) = evaluate(node) {
            let text = value.to_string();
            tracing::trace!(%text, "folded arithmetic call");
            *node = Node::NumberLiteral(text);
            self.folded += 1;
        }
        Ok(())
    }
}

/// Value of an arithmetic call over number literals, reduced left to right.
/// Calls with fewer than two params are not folded.
fn evaluate(node: &Node) -> Option<f64> {
    let Node::CallExpression { name, params } = node else {
        return None;
    };
    let op = ArithOp::from_name(name)?;
    if params.len() < 2 {
        return None;
    }

    let mut operands = params.iter().map(|param| match param {
        Node::NumberLiteral(text) => text.parse::<f64>().ok(),
        _ => None,
    });
    let first = operands.next()??;
    operands.try_fold(first, |acc, operand| Some(op.apply(acc, operand?)))
}
