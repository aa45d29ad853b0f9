//! UI rendering for the TUI application
//!
//! This module provides all rendering functionality:
//! - Main layout (header, day carousel, day details, status, footer)
//! - Click regions for the carousel row
//! - Help screen and message overlays

mod help;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, HitTarget, Mode};
use crate::carousel::{CarouselView, DaySlot};
use crate::days;

/// Render the application UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Main layout: header, carousel row, details, status bar, footer
    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Carousel
        Constraint::Min(3),    // Details
        Constraint::Length(1), // Status bar
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, layout[0]);
    let regions = {
        let view = app.view();
        render_carousel(frame, &view, layout[1])
    };
    app.hit_regions = regions;
    render_details(frame, app, layout[2]);
    render_status_bar(frame, app, layout[3]);
    render_footer(frame, app, layout[4]);

    if app.mode == Mode::Help {
        help::render_help(frame);
    }

    // Render error/message overlay
    if let Some(ref error) = app.error {
        help::render_message(frame, error, Color::Red);
    } else if let Some(ref message) = app.message {
        help::render_message(frame, message, Color::Green);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = format!(
        "─ day-carousel {:─>width$}",
        "",
        width = (area.width as usize).saturating_sub(15)
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

/// Draw ◀, the visible days and ▶. Returns the clickable regions.
fn render_carousel(frame: &mut Frame, view: &CarouselView, area: Rect) -> Vec<(Rect, HitTarget)> {
    let [prev_area, days_area, next_area] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    let mut regions = Vec::with_capacity(view.slots.len() + 2);

    frame.render_widget(arrow("◀", view.prev_disabled), prev_area);
    regions.push((prev_area, HitTarget::Prev));

    if view.slots.is_empty() {
        let empty = Paragraph::new("No days")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(dim()));
        frame.render_widget(empty, days_area);
    } else {
        // Column count is bounded by the list length and the available width
        let columns = view
            .capacity
            .min(view.total.max(1))
            .min(usize::from(days_area.width))
            .max(1);
        let ratio = u32::try_from(columns).unwrap_or(u32::MAX);
        let slot_areas =
            Layout::horizontal((0..columns).map(|_| Constraint::Ratio(1, ratio))).split(days_area);

        for (slot, slot_area) in view.slots.iter().zip(slot_areas.iter()) {
            frame.render_widget(day_button(slot, slot_area.width), *slot_area);
            regions.push((*slot_area, HitTarget::Day(slot.item.id.clone())));
        }
    }

    frame.render_widget(arrow("▶", view.next_disabled), next_area);
    regions.push((next_area, HitTarget::Next));

    regions
}

fn arrow(symbol: &str, disabled: bool) -> Paragraph<'_> {
    let style = if disabled {
        dim()
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    Paragraph::new(symbol)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style))
}

fn day_button<'a>(slot: &DaySlot<'a>, width: u16) -> Paragraph<'a> {
    // Brighter colors for the active day so it reads on the highlight
    let (text_style, border_style, border_type) = match (slot.active, slot.disabled) {
        (true, false) => (
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Cyan),
            BorderType::Thick,
        ),
        (true, true) => (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            dim(),
            BorderType::Thick,
        ),
        (false, false) => (Style::default().fg(Color::White), dim(), BorderType::Plain),
        (false, true) => (dim(), dim(), BorderType::Plain),
    };

    let label = fit_label(&slot.item.label, width.saturating_sub(2) as usize);
    Paragraph::new(Line::from(Span::styled(label, text_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(border_style),
        )
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(dim())
        .title(" Selected ");

    let mut lines = Vec::new();
    match app.selected_day() {
        Some(day) => {
            let title = days::describe(&day.id).unwrap_or_else(|| day.label.clone());
            lines.push(Line::from(Span::styled(
                format!("  {}", title),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(index) = app.view().current_index {
                lines.push(Line::styled(
                    format!("  Day {} of {}", index + 1, app.days.len()),
                    dim(),
                ));
            }
        }
        None if app.selected_id.is_empty() => {
            lines.push(Line::styled("  Nothing selected", dim()));
        }
        None => {
            lines.push(Line::styled(
                format!("  {} is not in the carousel", app.selected_id),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    if app.is_busy() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("  Loading…", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();

    let mut parts = Vec::new();
    if view.slots.is_empty() {
        parts.push(format!("0 of {} days", view.total));
    } else {
        let first = view.offset + 1;
        let last = view.offset + view.slots.len();
        parts.push(format!("days {}–{} of {}", first, last, view.total));
    }
    parts.push(format!(
        "showing {} (width {})",
        view.capacity,
        app.viewport_width()
    ));
    if app.is_busy() {
        parts.push("busy".to_string());
    }

    let text = format!("  {}", parts.join(" │ "));
    let bar = Paragraph::new(text).style(dim());

    frame.render_widget(bar, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => "  ? help  h/l prev/next  1-9 pick  g/G ends  t today  [ ] week  b busy  q quit",
        Mode::Help => "  q close",
    };

    let footer = Paragraph::new(hints).style(dim());

    frame.render_widget(footer, area);
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Truncate `label` to `width` display columns, marking the cut with `…`
fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::capacity::CapacityPolicy;
    use crate::carousel::ClampMode;
    use crate::config::Settings;

    fn app(capacity: usize) -> App {
        let settings = Settings {
            start: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            days: 10,
            capacity: Some(capacity),
            policy: CapacityPolicy::default(),
            load_delay: Duration::ZERO,
            clamp: ClampMode::Eager,
        };
        App::new(&settings, 640)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("Sun 01", 10), "Sun 01");
        assert_eq!(fit_label("Sun 01", 6), "Sun 01");
        assert_eq!(fit_label("Sun 01", 4), "Sun…");
        assert_eq!(fit_label("Sun 01", 0), "");
        // Wide characters count double
        assert_eq!(fit_label("日曜日", 4), "日…");
    }

    #[test]
    fn test_renders_visible_days_only() {
        let mut app = app(3);
        let screen = draw(&mut app);

        assert!(screen.contains("Sun 01"));
        assert!(screen.contains("Tue 03"));
        assert!(!screen.contains("Wed 04"));
        assert!(screen.contains("days 1–3 of 10"));
    }

    #[test]
    fn test_huge_capacity_lays_out_one_column_per_day() {
        let mut app = app(10_000);
        let screen = draw(&mut app);

        assert!(screen.contains("days 1–10 of 10"));
        // Prev, ten days, next
        assert_eq!(app.hit_regions.len(), 12);
        assert!(app.hit_regions.iter().all(|(area, _)| area.width > 0));
    }

    #[test]
    fn test_render_records_hit_regions() {
        let mut app = app(3);
        draw(&mut app);

        // Prev, three days, next
        assert_eq!(app.hit_regions.len(), 5);
        assert_eq!(app.hit_regions[0].1, HitTarget::Prev);
        assert_eq!(app.hit_regions[4].1, HitTarget::Next);

        // Click the middle of the third day button
        let (area, target) = app.hit_regions[3].clone();
        assert_eq!(target, HitTarget::Day("2020-03-03".to_string()));
        assert!(app.click(area.x + area.width / 2, area.y + 1));
        assert_eq!(app.selected_id, "2020-03-03");

        // Click the next arrow
        let next = app.hit_regions[4].0;
        assert!(app.click(next.x + 1, next.y + 1));
        assert_eq!(app.selected_id, "2020-03-04");

        draw(&mut app);
        let ids: Vec<_> = app
            .hit_regions
            .iter()
            .filter_map(|(_, t)| match t {
                HitTarget::Day(id) => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["2020-03-03", "2020-03-04", "2020-03-05"]);
    }
}
