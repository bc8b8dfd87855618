//! Transcript pane rendering

use crate::session::{Entry, Outcome};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Shown above the first entry
pub const BANNER: [&str; 2] = [
    "parenc: type an S-expression and press Enter to compile it",
    "Type 'exit' or press Esc to quit",
];

/// Every transcript line with the style it is drawn in
pub fn transcript_lines(entries: &[Entry]) -> Vec<(String, Style)> {
    let mut lines: Vec<(String, Style)> = BANNER
        .iter()
        .map(|line| (line.to_string(), Style::default().fg(DEFAULT_THEME.comment)))
        .collect();

    for entry in entries {
        let result_style = match &entry.outcome {
            Outcome::Output(_) => Style::default().fg(DEFAULT_THEME.success),
            Outcome::Error { internal: false, .. } => Style::default().fg(DEFAULT_THEME.error),
            Outcome::Error { internal: true, .. } => Style::default()
                .fg(DEFAULT_THEME.internal_error)
                .add_modifier(Modifier::BOLD),
        };

        let mut rendered = entry.transcript_lines().into_iter();
        if let Some(echo) = rendered.next() {
            lines.push((echo, Style::default().fg(DEFAULT_THEME.primary)));
        }
        lines.extend(rendered.map(|line| (line, result_style)));
    }
    lines
}

/// Render the transcript pane.
///
/// `scroll_offset` is clamped to the content; `usize::MAX` pins the view to the
/// newest entry.
pub fn render_transcript_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[Entry],
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Transcript ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.comment))
        .padding(Padding::new(1, 0, 0, 0));

    let all_items: Vec<ListItem> = transcript_lines(entries)
        .into_iter()
        .map(|(text, style)| ListItem::new(text).style(style))
        .collect();

    let total_items = all_items.len();
    // Account for borders, min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
