use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::App;
use crate::model::{ListEntry, Mode, key_preview};
use crate::ui::constants::{APP_TITLE, FILTER_HELP_TEXT, HELP_TEXT, KEY_PREVIEW_LEN};
use crate::ui::helpers::{
    detail_line, humanize_last_connected, list_state, status_style, truncate_text,
};

pub(crate) fn draw_title(frame: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(APP_TITLE)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

pub(crate) fn draw_connection_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let list = &app.session.list;
    let visible = list.visible();
    let block = Block::default()
        .title(Line::from(Span::styled(
            format!("Connections ({}/{})", visible.len(), list.items.len()),
            header_style,
        )))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let filtering = app.session.mode == Mode::Filtering;
    let show_filter = filtering || list.has_filter();
    let list_area = if show_filter && inner.height > 0 {
        let filter_line = Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::raw(list.filter.clone()),
        ]);
        let filter_area = Rect {
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(filter_line), filter_area);
        if filtering {
            let cursor_x = inner
                .x
                .saturating_add(2)
                .saturating_add(list.filter.chars().count() as u16);
            if cursor_x < inner.x.saturating_add(inner.width) {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
        Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        }
    } else {
        inner
    };

    let text_width = list_area.width.saturating_sub(2) as usize;
    if visible.is_empty() {
        let message = if list.is_empty() {
            "No saved connections. Press 'a' to add one.".to_string()
        } else {
            format!("No matches for '{}'", list.filter)
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, list_area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let description = item.description();
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_text(item.title(), text_width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_text(&description, text_width),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let widget = List::new(items)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol(Span::styled(
            "> ",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let mut state = list_state(list.selected, visible.len());
    frame.render_stateful_widget(widget, list_area, &mut state);
}

pub(crate) fn draw_details(frame: &mut Frame<'_>, app: &App, area: Rect, now: DateTime<Local>) {
    let header_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled("Details", header_style)));

    let Some(item) = app.session.list.selected_item() else {
        let empty = Paragraph::new("No connection selected")
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };
    let conn = &item.connection;
    let key = if conn.key.chars().count() > KEY_PREVIEW_LEN {
        format!("{}...", key_preview(&conn.key, KEY_PREVIEW_LEN))
    } else {
        conn.key.clone()
    };
    let tags = if conn.tags.is_empty() {
        "-".to_string()
    } else {
        conn.tags.join(", ")
    };
    let lines = vec![
        detail_line("Name", conn.name.clone()),
        detail_line("Key", key),
        detail_line("Tags", tags),
        Line::from(""),
        detail_line("Usage", format!("{} times", conn.usage)),
        detail_line(
            "Last Seen",
            humanize_last_connected(now, conn.last_connected),
        ),
    ];
    let details = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(details, area);
}

pub(crate) fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(status) = &app.session.status else {
        return;
    };
    let line = Paragraph::new(truncate_text(&status.message, area.width as usize))
        .style(status_style(status.kind));
    frame.render_widget(line, area);
}

pub(crate) fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = if app.session.mode == Mode::Filtering {
        FILTER_HELP_TEXT
    } else {
        HELP_TEXT
    };
    let footer = Paragraph::new(truncate_text(text, area.width as usize))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, area);
}
