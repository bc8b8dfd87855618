//! Optimization passes over the input AST
//!
//! Passes rewrite the parsed tree in place before it is transformed. Each one
//! is a [`Pass`] built on the shared traversal engine; a [`PassManager`] runs
//! them in the order they were added. [`default_pipeline`] is the fixed
//! sequence every compile uses:
//!
//! 1. [`fold::ConstantFolding`]: literal arithmetic calls become numbers
//! 2. [`dead_code::DeadCodeElimination`]: side-effect-free top-level statements go
//! 3. [`inline::Inlining`]: calls to `define`d names are replaced by their bodies

pub mod dead_code;
pub mod fold;
pub mod inline;

use crate::compiler::errors::CompileError;
use crate::compiler::CompileOptions;
use crate::parser::ast::Program;

/// Optimization pass trait
pub trait Pass {
    /// Run the optimization pass on a program
    fn run(&self, program: &mut Program) -> Result<(), CompileError>;

    /// Get pass name
    fn name(&self) -> &'static str;
}

/// Pass manager - runs optimization passes in order
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create an empty pass manager
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add an optimization pass
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Names of the registered passes, in run order
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Run all passes on a program
    pub fn run(&self, program: &mut Program) -> Result<(), CompileError> {
        for pass in &self.passes {
            tracing::trace!(pass = pass.name(), "running optimization pass");
            pass.run(program)?;
        }
        Ok(())
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Folding, then dead-code elimination, then inlining
pub fn default_pipeline(options: &CompileOptions) -> PassManager {
    let mut manager = PassManager::new();
    manager.add_pass(Box::new(fold::ConstantFolding));
    manager.add_pass(Box::new(dead_code::DeadCodeElimination));
    manager.add_pass(Box::new(inline::Inlining::new(options.max_inline_depth)));
    manager
}
