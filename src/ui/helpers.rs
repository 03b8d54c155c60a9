use chrono::{DateTime, Duration, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::EditForm;
use crate::model::{Field, StatusKind};
use crate::ui::constants::{
    DETAIL_MIN_WIDTH, LABEL_WIDTH, LIST_MIN_WIDTH, LIST_WIDTH_PERCENT, POPUP_MIN_HEIGHT,
    POPUP_MIN_WIDTH, RECENT_DAYS, TWO_COLUMN_MIN_WIDTH,
};

/// Width of the list column and, when there is room for it, the detail panel.
pub(crate) fn column_widths(width: u16) -> (u16, Option<u16>) {
    if width < TWO_COLUMN_MIN_WIDTH {
        return (width, None);
    }
    let list = (width.saturating_mul(LIST_WIDTH_PERCENT) / 100)
        .max(LIST_MIN_WIDTH)
        .min(width.saturating_sub(DETAIL_MIN_WIDTH));
    (list, Some(width - list))
}

pub(crate) fn humanize_last_connected(now: DateTime<Local>, at: Option<DateTime<Local>>) -> String {
    let Some(at) = at else {
        return "Never".to_string();
    };
    let today = now.date_naive();
    let day = at.date_naive();
    if day == today {
        return format!("Today, {}", at.format("%H:%M"));
    }
    if today.pred_opt() == Some(day) {
        return format!("Yesterday, {}", at.format("%H:%M"));
    }
    if now.signed_duration_since(at) < Duration::days(RECENT_DAYS) {
        return at.format("%a, %-d %b %H:%M").to_string();
    }
    at.format("%-d %b %Y").to_string()
}

pub(crate) fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Neutral => Style::default().fg(Color::Gray),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

pub(crate) fn field_line(
    label: &str,
    value: &str,
    active: bool,
    label_width: usize,
    max_value_width: usize,
) -> Line<'static> {
    let display = tail_text(value, max_value_width);
    let indicator = if active { "> " } else { "  " };
    let indicator_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let label_style = if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(indicator, indicator_style),
        Span::styled(format!("{label:<label_width$}: "), label_style),
        Span::raw(display),
    ])
}

pub(crate) fn detail_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.into()),
    ])
}

pub(crate) fn truncate_text(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let count = value.chars().count();
    if count <= max_width {
        return value.to_string();
    }
    if max_width <= 3 {
        return value.chars().take(max_width).collect();
    }
    let mut trimmed: String = value.chars().take(max_width - 3).collect();
    trimmed.push_str("...");
    trimmed
}

/// Keeps the end of `value` visible so the text under the cursor is shown.
pub(crate) fn tail_text(value: &str, max_width: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(max_width)).collect()
}

pub(crate) fn render_input_cursor(
    frame: &mut Frame<'_>,
    form: &EditForm,
    area: Rect,
    max_value_width: usize,
) {
    let Some(row) = Field::ORDER.iter().position(|field| *field == form.focus) else {
        return;
    };
    if row >= area.height as usize {
        return;
    }
    let col = form.input(form.focus).value.chars().count().min(max_value_width);
    let indicator_len = 2u16;
    let label_len = LABEL_WIDTH as u16 + 2;
    let cursor_x = area.x + indicator_len + label_len + col as u16;
    if cursor_x >= area.x.saturating_add(area.width) {
        return;
    }
    frame.set_cursor_position((cursor_x, area.y + row as u16));
}

pub(crate) fn centered_rect_by_height(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width.saturating_mul(percent_x) / 100).min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    centered_rect_abs(width, height, area)
}

pub(crate) fn centered_rect_abs(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.max(POPUP_MIN_WIDTH).min(area.width);
    let height = height.max(POPUP_MIN_HEIGHT).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub(crate) fn padded_rect(area: Rect, pad: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(pad),
        y: area.y.saturating_add(pad),
        width: area.width.saturating_sub(pad * 2),
        height: area.height.saturating_sub(pad * 2),
    }
}

pub(crate) fn modal_height(content_lines: usize, footer_lines: usize) -> u16 {
    let total = content_lines + footer_lines;
    u16::try_from(total).unwrap_or(u16::MAX).saturating_add(2 + 2)
}

pub(crate) fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: &str, style: Style) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(block, area);
    let inner = padded_rect(area, 1);
    if inner.height < 2 {
        return inner;
    }
    let title_line = Paragraph::new(title)
        .alignment(Alignment::Center)
        .style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(
        title_line,
        Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        },
    );
    let separator = Paragraph::new("-".repeat(inner.width as usize)).style(style);
    frame.render_widget(
        separator,
        Rect {
            x: inner.x,
            y: inner.y + 1,
            width: inner.width,
            height: 1,
        },
    );
    Rect {
        x: inner.x,
        y: inner.y + 2,
        width: inner.width,
        height: inner.height.saturating_sub(2),
    }
}

pub(crate) fn list_state(selected: usize, len: usize) -> ratatui::widgets::ListState {
    let mut state = ratatui::widgets::ListState::default();
    if len == 0 {
        state.select(None);
    } else {
        state.select(Some(selected.min(len.saturating_sub(1))));
    }
    state
}
