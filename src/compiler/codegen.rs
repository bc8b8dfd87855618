// Code generation: output AST → target text

use crate::compiler::errors::CompileError;
use crate::compiler::output::{Node, Program};

/// Render a whole program, one entry per line.
pub fn generate(program: &Program) -> Result<String, CompileError> {
    let lines = program
        .body
        .iter()
        .map(generate_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Top-level entries may be statements; everything else renders as an expression.
fn generate_entry(node: &Node) -> Result<String, CompileError> {
    match node {
        Node::ExpressionStatement { expression } => {
            Ok(format!("{};", generate_expression(expression)?))
        }
        other => generate_expression(other),
    }
}

/// Render a node in expression position.
///
/// String literals are wrapped in quotes without escaping embedded quotes.
pub fn generate_expression(node: &Node) -> Result<String, CompileError> {
    match node {
        Node::Identifier(name) => Ok(name.clone()),
        Node::NumberLiteral(value) | Node::BooleanLiteral(value) => Ok(value.clone()),
        Node::StringLiteral(value) => Ok(format!("\"{}\"", value)),
        Node::CallExpression { callee, arguments } => {
            let Node::Identifier(name) = callee.as_ref() else {
                return Err(CompileError::internal(
                    callee.kind_name(),
                    "callee is not an identifier",
                ));
            };
            let arguments = arguments
                .iter()
                .map(generate_expression)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{}({})", name, arguments.join(", ")))
        }
        Node::BinaryExpression {
            operator,
            left,
            right,
        } => Ok(format!(
            "{} {} {}",
            generate_expression(left)?,
            operator,
            generate_expression(right)?
        )),
        Node::ExpressionStatement { .. } => Err(CompileError::internal(
            node.kind_name(),
            "statement in expression position",
        )),
    }
}
