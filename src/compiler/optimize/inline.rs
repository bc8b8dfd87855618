//! Naive function inlining
//!
//! `(define NAME PARAMS BODY)` records `BODY` under the literal text of
//! `NAME`; `PARAMS` is ignored, so definitions behave as zero-argument
//! macros. Every call whose name matches a definition is then replaced by a
//! fresh copy of the body, and the copy is inlined in turn.
//!
//! Substitution is not hygienic. Copies never share structure with each
//! other or with the definition. A body that reaches its own name again
//! fails with [`CompileError::RecursiveInline`], and a chain of nested
//! substitutions longer than the configured limit fails with
//! [`CompileError::InlineDepthExceeded`].
//!
//! Two more limits keep acyclic definitions from blowing up: at most
//! [`MAX_INLINED_NODES`] nodes are copied per program
//! ([`CompileError::InlineExpansionTooLarge`]), and the rewritten tree may
//! not nest deeper than [`MAX_NESTING`] ([`CompileError::NestingTooDeep`]).

use rustc_hash::FxHashMap;

use crate::compiler::constants::{MAX_INLINED_NODES, MAX_NESTING};
use crate::compiler::errors::CompileError;
use crate::compiler::optimize::Pass;
use crate::compiler::traverse::{walk, walk_node, Step, Visitor};
use crate::parser::ast::{Node, NodeKind, Program};

/// Call name that introduces a definition
pub const DEFINE: &str = "define";

/// Function inlining pass
pub struct Inlining {
    max_depth: usize,
    max_nodes: usize,
}

impl Inlining {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_nodes: MAX_INLINED_NODES,
        }
    }

    /// Override the copied-node budget
    pub fn with_node_limit(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Pass for Inlining {
    fn run(&self, program: &mut Program) -> Result<(), CompileError> {
        let mut collector = Collector::default();
        walk(program, &mut collector, &mut ())?;
        if collector.definitions.is_empty() {
            return Ok(());
        }

        let mut inliner = Inliner {
            definitions: collector.definitions,
            active: Vec::new(),
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
            copied: 0,
            nesting: 0,
            inlined: 0,
        };
        walk(program, &mut inliner, &mut ())?;
        tracing::debug!(
            definitions = inliner.definitions.len(),
            inlined = inliner.inlined,
            copied = inliner.copied,
            "inlining finished"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "inlining"
    }
}

/// First pass: gather `define` calls.
#[derive(Default)]
struct Collector {
    definitions: FxHashMap<String, Node>,
}

impl Visitor for Collector {
    fn visit_call_expression<'c>(
        &mut self,
        node: &mut Node,
        _parent: NodeKind,
        ctx: &'c mut (),
    ) -> Result<Step<'c, ()>, CompileError> {
        if let Node::CallExpression { name, params } = node {
            if name.as_str() == DEFINE && params.len() == 3 {
                // Only literal names can be looked up later
                if let Some(key) = params[0].literal_text() {
                    tracing::trace!(name = key, "collected definition");
                    self.definitions.insert(key.to_string(), params[2].clone());
                }
            }
        }
        Ok(Step::Descend(ctx))
    }
}

/// Second pass: splice bodies over matching calls.
struct Inliner {
    definitions: FxHashMap<String, Node>,
    /// Names currently being expanded, outermost first
    active: Vec<String>,
    max_depth: usize,
    max_nodes: usize,
    /// Nodes copied out of definitions so far
    copied: usize,
    /// Depth of the node being walked
    nesting: usize,
    inlined: usize,
}

impl Visitor for Inliner {
    fn enter_node(&mut self, _node: &Node, _parent: NodeKind) -> Result<(), CompileError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(CompileError::NestingTooDeep { limit: MAX_NESTING });
        }
        Ok(())
    }

    fn leave_node(&mut self, _node: &mut Node, _parent: NodeKind) -> Result<(), CompileError> {
        self.nesting -= 1;
        Ok(())
    }

    fn visit_call_expression<'c>(
        &mut self,
        node: &mut Node,
        parent: NodeKind,
        ctx: &'c mut (),
    ) -> Result<Step<'c, ()>, CompileError> {
        let Node::CallExpression { name, .. } = node else {
            return Ok(Step::Descend(ctx));
        };
        let Some(body) = self.definitions.get(name.as_str()) else {
            return Ok(Step::Descend(ctx));
        };

        if self.active.iter().any(|active| active.as_str() == name.as_str()) {
            return Err(CompileError::RecursiveInline { name: name.clone() });
        }
        if self.active.len() >= self.max_depth {
            return Err(CompileError::InlineDepthExceeded {
                name: name.clone(),
                limit: self.max_depth,
            });
        }

        let size = body.size();
        if self.copied + size > self.max_nodes {
            return Err(CompileError::InlineExpansionTooLarge {
                name: name.clone(),
                limit: self.max_nodes,
            });
        }
        self.copied += size;

        let name = name.clone();
        *node = body.clone();
        tracing::trace!(%name, depth = self.active.len(), "inlined call");
        self.inlined += 1;

        // The copy takes the call's place, so it is entered at the call's depth
        self.active.push(name);
        self.nesting -= 1;
        let result = walk_node(node, parent, self, ctx);
        self.nesting += 1;
        self.active.pop();
        result?;

        // The spliced copy was just walked
        Ok(Step::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::constants::MAX_INLINE_DEPTH;

    fn define(name: &str, body: Node) -> Node {
        Node::call(
            DEFINE,
            vec![Node::string(name), Node::call("params", vec![]), body],
        )
    }

    fn run(body: Vec<Node>) -> Result<Program, CompileError> {
        let mut program = Program { body };
        Inlining::new(MAX_INLINE_DEPTH).run(&mut program)?;
        Ok(program)
    }

    #[test]
    fn test_call_site_is_replaced() {
        let program = run(vec![
            define("greeting", Node::string("hi")),
            Node::call("print", vec![Node::call("greeting", vec![])]),
        ])
        .unwrap();

        assert_eq!(
            program.body[1],
            Node::call("print", vec![Node::string("hi")])
        );
    }

    #[test]
    fn test_call_arguments_are_discarded() {
        let program = run(vec![
            define("one", Node::number("1")),
            Node::call("one", vec![Node::number("99")]),
        ])
        .unwrap();

        assert_eq!(program.body[1], Node::number("1"));
    }

    #[test]
    fn test_definition_needs_three_params() {
        let two = Node::call(DEFINE, vec![Node::string("x"), Node::number("1")]);
        let program = run(vec![two, Node::call("x", vec![])]).unwrap();

        assert_eq!(program.body[1], Node::call("x", vec![]));
    }

    #[test]
    fn test_non_literal_name_is_not_a_definition() {
        let weird = Node::call(
            DEFINE,
            vec![Node::call("x", vec![]), Node::number("0"), Node::number("1")],
        );
        let program = run(vec![weird.clone()]).unwrap();

        assert_eq!(program.body, vec![weird]);
    }

    #[test]
    fn test_later_definition_wins() {
        let program = run(vec![
            define("v", Node::number("1")),
            define("v", Node::number("2")),
            Node::call("v", vec![]),
        ])
        .unwrap();

        assert_eq!(program.body[2], Node::number("2"));
    }

    #[test]
    fn test_chained_definitions_expand_fully() {
        let program = run(vec![
            define("a", Node::call("wrap", vec![Node::call("b", vec![])])),
            define("b", Node::number("7")),
            Node::call("a", vec![]),
        ])
        .unwrap();

        assert_eq!(
            program.body[2],
            Node::call("wrap", vec![Node::number("7")])
        );
    }

    #[test]
    fn test_inlined_copies_do_not_alias() {
        let mut program = run(vec![
            define("pair", Node::call("list", vec![Node::number("1")])),
            Node::call("pair", vec![]),
            Node::call("pair", vec![]),
        ])
        .unwrap();

        if let Node::CallExpression { params, .. } = &mut program.body[1] {
            params.push(Node::number("2"));
        }

        assert_eq!(
            program.body[1],
            Node::call("list", vec![Node::number("1"), Node::number("2")])
        );
        assert_eq!(
            program.body[2],
            Node::call("list", vec![Node::number("1")])
        );
        // The definition itself is untouched as well
        let Node::CallExpression { params, .. } = &program.body[0] else {
            panic!("definition was rewritten");
        };
        assert_eq!(params[2], Node::call("list", vec![Node::number("1")]));
    }

    #[test]
    fn test_self_recursive_definition_is_rejected() {
        let err = run(vec![
            define("loop", Node::call("loop", vec![])),
            Node::call("loop", vec![]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            CompileError::RecursiveInline {
                name: "loop".to_string()
            }
        );
    }

    #[test]
    fn test_mutual_recursion_is_rejected() {
        let err = run(vec![
            define("ping", Node::call("pong", vec![])),
            define("pong", Node::call("ping", vec![])),
        ])
        .unwrap_err();

        assert!(matches!(err, CompileError::RecursiveInline { .. }));
    }

    /// `(define "d" 0 (w (dd) (dd)))`, `(define "dd" 0 (w (ddd) (ddd)))`, ...
    fn doubling_chain(levels: usize) -> Vec<Node> {
        let mut body: Vec<Node> = (1..levels)
            .map(|i| {
                let next = || Node::call("d".repeat(i + 1), vec![]);
                define(&"d".repeat(i), Node::call("w", vec![next(), next()]))
            })
            .collect();
        body.push(define(&"d".repeat(levels), Node::number("1")));
        body.push(Node::call("d", vec![]));
        body
    }

    #[test]
    fn test_small_doubling_chain_expands() {
        let program = run(doubling_chain(3)).unwrap();
        let leaf = || Node::call("w", vec![Node::number("1"), Node::number("1")]);

        assert_eq!(
            program.body.last(),
            Some(&Node::call("w", vec![leaf(), leaf()]))
        );
    }

    #[test]
    fn test_exponential_expansion_is_rejected() {
        let err = run(doubling_chain(26)).unwrap_err();

        assert!(matches!(
            err,
            CompileError::InlineExpansionTooLarge { limit, .. } if limit == MAX_INLINED_NODES
        ));
    }

    #[test]
    fn test_node_limit_is_configurable() {
        let mut program = Program {
            body: doubling_chain(3),
        };
        let err = Inlining::new(MAX_INLINE_DEPTH)
            .with_node_limit(4)
            .run(&mut program)
            .unwrap_err();

        assert!(matches!(err, CompileError::InlineExpansionTooLarge { limit: 4, .. }));
    }

    fn nest(depth: usize, leaf: Node) -> Node {
        (0..depth).fold(leaf, |inner, _| Node::call("n", vec![inner]))
    }

    #[test]
    fn test_inlining_past_nesting_limit_is_rejected() {
        let half = MAX_NESTING / 2 + 1;
        let err = run(vec![
            define("outer", nest(half, Node::call("inner", vec![]))),
            define("inner", nest(half, Node::number("0"))),
            Node::call("outer", vec![]),
        ])
        .unwrap_err();

        assert_eq!(err, CompileError::NestingTooDeep { limit: MAX_NESTING });
    }

    #[test]
    fn test_inlining_within_nesting_limit() {
        let quarter = MAX_NESTING / 4;
        let program = run(vec![
            define("outer", nest(quarter, Node::call("inner", vec![]))),
            define("inner", nest(quarter, Node::number("0"))),
            Node::call("outer", vec![]),
        ])
        .unwrap();

        assert_eq!(
            program.body[2],
            nest(quarter, nest(quarter, Node::number("0")))
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut program = Program {
            body: vec![
                define("a", Node::call("b", vec![])),
                define("b", Node::call("c", vec![])),
                define("c", Node::number("0")),
                Node::call("a", vec![]),
            ],
        };

        let err = Inlining::new(2).run(&mut program).unwrap_err();
        assert_eq!(
            err,
            CompileError::InlineDepthExceeded {
                name: "c".to_string(),
                limit: 2
            }
        );
    }

    #[test]
    fn test_no_definitions_is_a_no_op() {
        let program = run(vec![Node::call("f", vec![Node::number("1")])]).unwrap();
        assert_eq!(program.body, vec![Node::call("f", vec![Node::number("1")])]);
    }
}
