//! TUI pane rendering modules
//!
//! - [`transcript`]: banner plus every submitted line with its output or error
//! - [`input`]: the prompt line being edited
//! - [`status`]: status bar with keybindings and compiler settings
//!
//! Each module exports one `render_*` function that draws into the area it is
//! given and keeps no state of its own.

pub mod input;
pub mod status;
pub mod transcript;

pub use input::render_input_pane;
pub use status::render_status_bar;
pub use transcript::{render_transcript_pane, transcript_lines, BANNER};
