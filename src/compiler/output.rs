// Output AST: shaped after the target call-expression syntax

use std::fmt;

/// Output AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    NumberLiteral(String),
    StringLiteral(String),
    BooleanLiteral(String),
    Identifier(String),
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    CallExpression {
        callee: Box<Node>, // always an Identifier when built by the transformer
        arguments: Vec<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
}

impl Node {
    /// A call whose callee is an identifier with the given name
    pub fn call(name: impl Into<String>, arguments: Vec<Node>) -> Self {
        Node::CallExpression {
            callee: Box::new(Node::Identifier(name.into())),
            arguments,
        }
    }

    pub fn statement(expression: Node) -> Self {
        Node::ExpressionStatement {
            expression: Box::new(expression),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::NumberLiteral(_) => "NumberLiteral",
            Node::StringLiteral(_) => "StringLiteral",
            Node::BooleanLiteral(_) => "BooleanLiteral",
            Node::Identifier(_) => "Identifier",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
        }
    }

    /// The argument list new children are appended to, if this node has one.
    /// A statement lends out the arguments of the call it wraps.
    pub(crate) fn arguments_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::CallExpression { arguments, .. } => Some(arguments),
            Node::ExpressionStatement { expression } => expression.arguments_mut(),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

/// Root of the output tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Node>,
}
