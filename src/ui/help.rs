//! Help screen and message overlays

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 20, frame.area());

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let help_text = vec![
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw("  h / ←       Previous day"),
        Line::raw("  l / →       Next day"),
        Line::raw("  1 - 9       Pick a visible day"),
        Line::raw("  g / Home    First day"),
        Line::raw("  G / End     Last day"),
        Line::raw("  t           Today"),
        Line::raw("  [ / ]       Shift range by a week"),
        Line::raw("  click       Pick a day or arrow"),
        Line::raw(""),
        Line::from(Span::styled(
            "Other",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw("  b           Toggle busy lock"),
        Line::raw("  ?           Show this help"),
        Line::raw("  q / Esc     Quit"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

pub fn render_message(frame: &mut Frame, message: &str, color: Color) {
    let area = frame.area();

    let height = message_height(message, area.width);

    let msg_area = Rect {
        x: 2,
        y: area.height.saturating_sub(2 + height),
        width: area.width.saturating_sub(4),
        height,
    };

    let text = format!(" {} ", message);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White).bg(color))
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, msg_area);
    frame.render_widget(paragraph, msg_area);
}

/// Rows for a message overlay: 1 to 3, by display width
fn message_height(message: &str, area_width: u16) -> u16 {
    let max_width = usize::from(area_width.saturating_sub(6));
    if max_width == 0 {
        return 1;
    }
    let rows = (message.width() / max_width + 1).min(3);
    rows as u16
}

/// Create a centered rectangle of the given size within the parent area
pub fn centered_rect(width: u16, height: u16, parent: Rect) -> Rect {
    let x = parent.x + (parent.width.saturating_sub(width)) / 2;
    let y = parent.y + (parent.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width: width.min(parent.width),
        height: height.min(parent.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_height_uses_display_width() {
        // 20 columns leave 14 for text
        assert_eq!(message_height("short", 20), 1);
        assert_eq!(message_height(&"x".repeat(20), 20), 2);
        // Ten accented letters are 20 bytes but only 10 columns
        assert_eq!(message_height(&"é".repeat(10), 20), 1);
        // Wide characters take two columns each
        assert_eq!(message_height("日日日日日日日日", 20), 2);
        assert_eq!(message_height(&"x".repeat(500), 20), 3);
        assert_eq!(message_height("anything", 4), 1);
    }

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(20, 4, parent), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_rect(60, 20, parent), Rect::new(0, 0, 40, 10));
    }
}
