//! Error types for the compile pipeline
//!
//! [`CompileError`] covers every way a single `compile` call can fail. Lexing
//! and parsing failures wrap the front end's own error types; the inliner adds
//! its four rejections; [`CompileError::Internal`] marks a tree shape the
//! transformer or code generator cannot handle, which is a pipeline bug rather
//! than bad input.
//!
//! All errors are fatal to the call that raised them. No partial output is
//! returned.

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;

/// Errors that can occur while compiling one source string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// Unrecognised character or unterminated string
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    /// Token where the grammar forbids it, or input ending mid-expression
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A definition reaches itself through inlining
    #[error("cannot inline '{name}': definition is recursive")]
    RecursiveInline { name: String },

    /// Inlining nested deeper than the configured limit
    #[error("cannot inline '{name}': inlining depth exceeds {limit}")]
    InlineDepthExceeded { name: String, limit: usize },

    /// Inlined bodies would copy more nodes than the budget allows
    #[error("cannot inline '{name}': expansion exceeds {limit} nodes")]
    InlineExpansionTooLarge { name: String, limit: usize },

    /// Inlining nested the tree deeper than the nesting limit
    #[error("expression nested deeper than {limit} levels after inlining")]
    NestingTooDeep { limit: usize },

    /// A node shape no later stage knows how to handle
    #[error("internal error: unexpected {kind} ({reason})")]
    Internal { kind: String, reason: &'static str },
}

impl CompileError {
    pub(crate) fn internal(kind: impl Into<String>, reason: &'static str) -> Self {
        CompileError::Internal {
            kind: kind.into(),
            reason,
        }
    }

    /// Whether this error indicates a pipeline bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::Internal { .. })
    }
}
