//! Terminal REPL built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: REPL state, keyboard event loop, input editing and history recall
//! - **[`panes`]**: stateless render functions for each visible pane (transcript,
//!   input line, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Compiler`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Compiler`]: crate::compiler::Compiler
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
