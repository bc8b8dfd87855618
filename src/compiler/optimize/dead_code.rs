//! Dead-code elimination
//!
//! Drops top-level statements whose whole expression is a bare number: they
//! compute nothing and call nothing. Only the program body is inspected;
//! call arguments are never touched.

use crate::compiler::errors::CompileError;
use crate::compiler::optimize::Pass;
use crate::compiler::traverse::{walk, Step, Visitor};
use crate::parser::ast::{Node, Program};

/// Dead code elimination pass
pub struct DeadCodeElimination;

impl Pass for DeadCodeElimination {
    fn run(&self, program: &mut Program) -> Result<(), CompileError> {
        let mut pruner = Pruner { removed: 0 };
        walk(program, &mut pruner, &mut ())?;
        tracing::debug!(removed = pruner.removed, "dead code eliminated");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dead-code-elimination"
    }
}

struct Pruner {
    removed: usize,
}

impl Visitor for Pruner {
    fn visit_program<'c>(
        &mut self,
        program: &mut Program,
        _ctx: &'c mut (),
    ) -> Result<Step<'c, ()>, CompileError> {
        let before = program.body.len();
        program.body.retain(|node| !is_dead(node));
        self.removed = before - program.body.len();
        Ok(Step::Skip)
    }
}

fn is_dead(node: &Node) -> bool {
    matches!(
        node,
        Node::ExpressionStatement { expression } if matches!(**expression, Node::NumberLiteral(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_numeric_statements_in_order() {
        let mut program = Program {
            body: vec![
                Node::statement(Node::number("1")),
                Node::call("a", vec![]),
                Node::statement(Node::number("2")),
                Node::statement(Node::string("kept")),
                Node::call("b", vec![]),
            ],
        };

        DeadCodeElimination.run(&mut program).unwrap();

        assert_eq!(
            program.body,
            vec![
                Node::call("a", vec![]),
                Node::statement(Node::string("kept")),
                Node::call("b", vec![]),
            ]
        );
    }

    #[test]
    fn test_bare_top_level_number_is_not_a_statement() {
        let mut program = Program {
            body: vec![Node::number("5")],
        };

        DeadCodeElimination.run(&mut program).unwrap();
        assert_eq!(program.body, vec![Node::number("5")]);
    }

    #[test]
    fn test_nested_statements_are_left_alone() {
        let nested = Node::call("f", vec![Node::statement(Node::number("1"))]);
        let mut program = Program {
            body: vec![nested.clone()],
        };

        DeadCodeElimination.run(&mut program).unwrap();
        assert_eq!(program.body, vec![nested]);
    }
}
