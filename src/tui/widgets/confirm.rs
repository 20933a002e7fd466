//! Centered yes/no confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::{Styles, Theme};

/// Renders a popup asking `question`, with `accept` keys and Esc/n to cancel.
pub fn render_confirm(frame: &mut Frame, area: Rect, title: &str, question: &str, accept: &str) {
    let popup_area = popup_rect(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::ACCENT));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = vec![
        Line::from(Span::styled(question.to_string(), Styles::default())),
        Line::from(""),
        Line::from(vec![
            Span::styled(accept.to_string(), Styles::help_key()),
            Span::styled(" → confirm", Styles::dim()),
        ]),
        Line::from(vec![
            Span::styled("Esc", Styles::help_key()),
            Span::styled(" or ", Styles::dim()),
            Span::styled("n", Styles::help_key()),
            Span::styled(" → cancel", Styles::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Styles::default());
    frame.render_widget(paragraph, inner);
}

/// Half the width within 40..=60 columns, 7..=9 rows, centered in `area`.
fn popup_rect(area: Rect) -> Rect {
    let width = (area.width / 2).clamp(40, 60).min(area.width);
    let height = area.height.clamp(7, 9).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
