// Constants for the compile pipeline and the REPL

/// Default cap on how deeply inlined bodies may themselves be inlined
pub const MAX_INLINE_DEPTH: usize = 64;

/// Number of REPL entries kept before the oldest are dropped
pub const HISTORY_LIMIT: usize = 500;

/// Deepest expression nesting accepted, in the parser and after inlining
pub const MAX_NESTING: usize = 256;

/// Total nodes the inliner may copy into one program
pub const MAX_INLINED_NODES: usize = 100_000;
