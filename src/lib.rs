//! # Introduction
//!
//! parenc compiles a small Lisp-like S-expression language into C-style
//! call-expression text:
//!
//! ```text
//! (add 10 (subtract 10 6))  →  add(10, subtract(10, 6));
//! ```
//!
//! ## Compile pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Optimizer → Transformer → Output AST → Codegen
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the input AST.
//! 2. [`compiler::traverse`]: the visitor engine the later stages are built on.
//! 3. [`compiler::optimize`]: constant folding, dead-code elimination and
//!    inlining of `define`d bodies, run in place on the input AST.
//! 4. [`compiler::transform`] and [`compiler::codegen`]: build the output AST
//!    and render it.
//! 5. [`session`]: bounded history backing the REPL.
//! 6. [`ui`]: ratatui-based REPL; not part of the stable library API.
//!
//! The one-call entry point is [`compile`]; [`Compiler`] carries
//! [`CompileOptions`] for callers that want the optimizer off or a different
//! inlining limit.

pub mod compiler;
pub mod parser;
pub mod session;
pub mod ui;

pub use compiler::{compile, CompileError, CompileOptions, Compiler};
