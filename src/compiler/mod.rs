//! Compile pipeline
//!
//! This module turns a parsed program into target text:
//! - [`traverse`]: the shared visitor engine every later stage is built on
//! - [`optimize`]: constant folding, dead-code elimination, inlining
//! - [`transform`]: input AST → [`output`] AST
//! - [`codegen`]: output AST → text
//! - [`errors`]: the [`CompileError`] every stage reports through
//!
//! # Pipeline
//!
//! ```text
//! source → tokenize → parse → optimize (in place) → transform → generate
//! ```
//!
//! [`Compiler`] owns no state besides its [`CompileOptions`]; tokens, cursor
//! and trees all live inside a single `compile` call, so one compiler can be
//! shared across threads.

pub mod codegen;
pub mod constants;
pub mod errors;
pub mod optimize;
pub mod output;
pub mod transform;
pub mod traverse;

pub use errors::CompileError;

use crate::parser::ast::Program;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::parse;
use constants::MAX_INLINE_DEPTH;

/// Knobs for a [`Compiler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run the optimizer passes between parsing and transforming
    pub optimize: bool,
    /// How many inlined bodies may nest inside each other
    pub max_inline_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            max_inline_depth: MAX_INLINE_DEPTH,
        }
    }
}

/// Main compiler interface
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    pub options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile one source string to target text.
    pub fn compile(&self, source: &str) -> Result<String, CompileError> {
        let result = self.run(source);
        match &result {
            Ok(output) => tracing::debug!(bytes = output.len(), "compiled"),
            Err(err) if err.is_internal() => {
                tracing::error!(%err, source, "internal compiler error")
            }
            Err(err) => tracing::debug!(%err, "rejected input"),
        }
        result
    }

    /// Lex only.
    pub fn tokens(&self, source: &str) -> Result<Vec<Token>, CompileError> {
        Ok(tokenize(source)?)
    }

    /// Lex, parse and (if enabled) optimize, stopping before the transform.
    pub fn optimized_ast(&self, source: &str) -> Result<Program, CompileError> {
        let tokens = self.tokens(source)?;
        tracing::debug!(tokens = tokens.len(), "lexed");

        let mut program = parse(&tokens)?;
        tracing::debug!(nodes = program.body.len(), "parsed");

        if self.options.optimize {
            optimize::default_pipeline(&self.options).run(&mut program)?;
        }
        Ok(program)
    }

    fn run(&self, source: &str) -> Result<String, CompileError> {
        let program = self.optimized_ast(source)?;
        let target = transform::transform(program)?;
        codegen::generate(&target)
    }
}

/// Compile with default options.
///
/// The optimizer is on, so operator calls over literals fold:
/// `(+ 5 (* 3 2))` gives `11`. Use a [`Compiler`] with
/// `optimize: false` to get `+(5, *(3, 2));`.
pub fn compile(source: &str) -> Result<String, CompileError> {
    Compiler::default().compile(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unoptimized() -> Compiler {
        Compiler::new(CompileOptions {
            optimize: false,
            ..CompileOptions::default()
        })
    }

    #[test]
    fn test_compiler_creation() {
        let compiler = Compiler::default();
        assert!(compiler.options.optimize);
        assert_eq!(compiler.options.max_inline_depth, MAX_INLINE_DEPTH);
    }

    #[test]
    fn test_unoptimized_operator_calls() {
        assert_eq!(unoptimized().compile("(+ 5 (* 3 2))").unwrap(), "+(5, *(3, 2));");
    }

    #[test]
    fn test_optimized_operator_calls_fold() {
        assert_eq!(compile("(+ 5 (* 3 2))").unwrap(), "11");
    }

    #[test]
    fn test_optimized_ast_respects_switch() {
        let folded = Compiler::default().optimized_ast("(* 2 2)").unwrap();
        let raw = unoptimized().optimized_ast("(* 2 2)").unwrap();

        assert_eq!(folded.body, vec![crate::parser::ast::Node::number("4")]);
        assert_ne!(folded, raw);
    }

    #[test]
    fn test_compiler_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compiler>();
    }
}
