//! Main TUI application state and logic

use crate::compiler::constants::HISTORY_LIMIT;
use crate::compiler::Compiler;
use crate::session::{Entry, History, Outcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Lines moved per PageUp/PageDown
const PAGE: usize = 10;

/// The main application state
pub struct App {
    pub compiler: Compiler,

    /// Submitted lines and what they produced
    pub history: History,

    /// Line being edited
    pub input: String,

    /// Cursor position in `input`, in chars
    pub cursor: usize,

    /// Transcript scroll offset (`usize::MAX` follows the newest entry)
    pub transcript_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the last submission failed
    pub last_failed: bool,
}

impl App {
    pub fn new(compiler: Compiler) -> Self {
        App {
            compiler,
            history: History::new(HISTORY_LIMIT),
            input: String::new(),
            cursor: 0,
            transcript_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_failed: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        super::panes::render_transcript_pane(
            frame,
            chunks[0],
            self.history.entries(),
            &mut self.transcript_scroll,
        );

        super::panes::render_input_pane(frame, chunks[1], &self.input, self.cursor);

        super::panes::render_status_bar(
            frame,
            chunks[2],
            &self.status_message,
            self.last_failed,
            self.history.len(),
            self.compiler.options.optimize,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
            }
            KeyCode::Up => {
                if let Some(previous) = self.history.recall_previous() {
                    let previous = previous.to_string();
                    self.set_input(previous);
                }
            }
            KeyCode::Down => {
                let next = self.history.recall_next().unwrap_or_default().to_string();
                self.set_input(next);
            }
            KeyCode::PageUp => {
                // Offset was clamped to the content by the last render
                self.transcript_scroll = self.transcript_scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(PAGE);
            }
            _ => {}
        }
    }

    /// Compile the current line and append it to the transcript
    pub fn submit(&mut self) {
        let line = self.input.trim().to_string();
        self.set_input(String::new());
        self.history.reset_recall();

        if line.is_empty() {
            return;
        }
        if line == "exit" {
            self.should_quit = true;
            return;
        }

        let result = self.compiler.compile(&line);
        let entry = Entry::new(line, result);
        self.last_failed = matches!(entry.outcome, Outcome::Error { .. });
        self.status_message = match &entry.outcome {
            Outcome::Output(_) => "Compiled".to_string(),
            Outcome::Error { internal: true, .. } => "Internal compiler error".to_string(),
            Outcome::Error { .. } => "Compile error".to_string(),
        };
        self.history.push(entry);
        self.transcript_scroll = usize::MAX;
    }

    fn set_input(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.input = text;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}
