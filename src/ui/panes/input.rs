//! Prompt line rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PROMPT: &str = "> ";

/// Render the input line and place the terminal cursor at `cursor` (a char index)
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let inner_width = area.width.saturating_sub(2) as usize;
    let prompt_width = PROMPT.chars().count();

    // Scroll horizontally so the cursor stays visible on long lines
    let visible_width = inner_width.saturating_sub(prompt_width).max(1);
    let skip = (cursor + 1).saturating_sub(visible_width);
    let shown: String = input.chars().skip(skip).take(visible_width).collect();

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(shown, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let x = area.x + 1 + (prompt_width + cursor - skip) as u16;
    let y = area.y + 1;
    frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
}
