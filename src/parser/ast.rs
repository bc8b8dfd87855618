// AST (Abstract Syntax Tree) definitions for the source language

use std::fmt;

/// Node kinds, used to tell a callback what its parent is without lending
/// out the parent itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    BinaryExpression,
    CallExpression,
    ExpressionStatement,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Input AST nodes, shaped after the source syntax
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    NumberLiteral(String),
    StringLiteral(String),
    BooleanLiteral(String),
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    CallExpression {
        name: String,
        params: Vec<Node>,
    },
    /// Never produced by the parser; only rewrites and hand-built trees
    /// create statements in the input tree.
    ExpressionStatement {
        expression: Box<Node>,
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::NumberLiteral(_) => NodeKind::NumberLiteral,
            Node::StringLiteral(_) => NodeKind::StringLiteral,
            Node::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            Node::BinaryExpression { .. } => NodeKind::BinaryExpression,
            Node::CallExpression { .. } => NodeKind::CallExpression,
            Node::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
        }
    }

    /// Literal text of a number, string or boolean literal
    pub fn literal_text(&self) -> Option<&str> {
        match self {
            Node::NumberLiteral(v) | Node::StringLiteral(v) | Node::BooleanLiteral(v) => Some(v),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, itself included
    pub fn size(&self) -> usize {
        match self {
            Node::NumberLiteral(_) | Node::StringLiteral(_) | Node::BooleanLiteral(_) => 1,
            Node::BinaryExpression { left, right, .. } => 1 + left.size() + right.size(),
            Node::CallExpression { params, .. } => {
                1 + params.iter().map(Node::size).sum::<usize>()
            }
            Node::ExpressionStatement { expression } => 1 + expression.size(),
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Node::NumberLiteral(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::StringLiteral(value.into())
    }

    pub fn call(name: impl Into<String>, params: Vec<Node>) -> Self {
        Node::CallExpression {
            name: name.into(),
            params,
        }
    }

    pub fn binary(operator: impl Into<String>, left: Node, right: Node) -> Self {
        Node::BinaryExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn statement(expression: Node) -> Self {
        Node::ExpressionStatement {
            expression: Box::new(expression),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
