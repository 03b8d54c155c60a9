use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::model::{EditTarget, Field, StatusKind};
use crate::ui::constants::{
    CONFIRM_WIDTH_PERCENT, LABEL_WIDTH, MODAL_MIN_WIDTH, MODAL_WIDTH_PERCENT,
};
use crate::ui::helpers::{
    centered_rect_abs, centered_rect_by_height, draw_popup_frame, field_line, modal_height,
    render_input_cursor,
};

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Key => "Key",
        Field::Tags => "Tags",
    }
}

pub(crate) fn draw_edit_modal(frame: &mut Frame<'_>, app: &App) {
    let form = &app.session.form;
    let footer_lines = vec![Line::from(vec![
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" or "),
        Span::styled("Up/Down", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to move, "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to save, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to cancel"),
    ])];

    let area_width = (frame.area().width.saturating_mul(MODAL_WIDTH_PERCENT) / 100)
        .min(frame.area().width.saturating_sub(2))
        .max(MODAL_MIN_WIDTH);
    let pad = 1u16;
    let content_width = area_width.saturating_sub(2 + pad * 2);
    let value_width = content_width.saturating_sub(2 + LABEL_WIDTH as u16 + 2) as usize;

    let is_new = form.target == Some(EditTarget::New);
    let title = if is_new {
        "Add Connection"
    } else {
        "Edit Connection"
    };

    let mut lines: Vec<Line> = Field::ORDER
        .iter()
        .map(|field| {
            let input = form.input(*field);
            field_line(
                field_label(*field),
                &input.value,
                input.focused,
                LABEL_WIDTH,
                value_width,
            )
        })
        .collect();
    lines.push(Line::from(""));
    if is_new {
        lines.push(Line::from(Span::styled(
            "Leave Name empty to generate one from the key.",
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tags are comma separated.",
        Style::default().fg(Color::Gray),
    )));
    if let Some(status) = app
        .session
        .status
        .as_ref()
        .filter(|status| status.kind == StatusKind::Error)
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            status.message.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let height = modal_height(lines.len(), footer_lines.len() + 1);
    let area = centered_rect_abs(area_width, height, frame.area());
    let inner = draw_popup_frame(frame, area, title, Style::default().fg(Color::Yellow));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(footer_lines.len() as u16 + 1),
            ]
            .as_ref(),
        )
        .split(inner);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, layout[0]);
    render_input_cursor(frame, form, layout[0], value_width);

    let footer = Paragraph::new(footer_lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, layout[1]);
}

pub(crate) fn draw_confirm_delete_modal(frame: &mut Frame<'_>, app: &App) {
    let height = modal_height(1, 2);
    let area = centered_rect_by_height(CONFIRM_WIDTH_PERCENT, height, frame.area());
    let inner = draw_popup_frame(
        frame,
        area,
        "Delete connection?",
        Style::default().fg(Color::Red),
    );

    let name = app
        .session
        .pending_delete
        .as_ref()
        .map(|pending| pending.name.as_str())
        .unwrap_or("Unknown");

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)].as_ref())
        .split(inner);

    let message = Paragraph::new(format!("Delete '{name}'?")).wrap(Wrap { trim: true });
    frame.render_widget(message, layout[0]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Y", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to confirm, "),
        Span::styled("N", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" or "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to cancel"),
    ]))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, layout[1]);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::EditForm;
    use crate::model::{Connection, DeleteConfirmation, Mode};
    use crate::storage::MemoryStore;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn edit_modal_shows_fields_and_cursor() {
        let mut app = App::for_test(MemoryStore::default());
        app.session.mode = Mode::Editing;
        app.session.form = EditForm::for_new();
        app.session.form.insert('E');
        app.session.form.insert('c');

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw_edit_modal(frame, &app)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Add Connection"));
        assert!(content.contains("> Name : Ec"));
        assert!(content.contains("Key"));
        assert!(content.contains("Tags"));
        assert!(content.contains("Leave Name empty"));
        // 56 wide modal at x=12, one column of padding, "> ", label, ": ", "Ec".
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, 12 + 1 + 2 + LABEL_WIDTH as u16 + 2 + 2);
    }

    #[test]
    fn edit_modal_surfaces_validation_errors() {
        let conn = Connection::new("Echo", "abc123", vec![]);
        let mut app = App::for_test(MemoryStore::with(vec![conn.clone()]));
        app.session.mode = Mode::Editing;
        app.session.form = EditForm::for_existing(0, &conn);
        app.set_status(StatusKind::Error, "GSocket key cannot be empty!");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw_edit_modal(frame, &app)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Edit Connection"));
        assert!(content.contains("GSocket key cannot be empty!"));
        assert!(!content.contains("Leave Name empty"));
    }

    #[test]
    fn delete_modal_names_target() {
        let mut app = App::for_test(MemoryStore::default());
        app.session.mode = Mode::ConfirmingDelete;
        app.session.pending_delete = Some(DeleteConfirmation {
            index: 0,
            name: "Echo".into(),
        });
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| draw_confirm_delete_modal(frame, &app))
            .unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Delete 'Echo'?"));
        assert!(content.contains("to confirm"));
    }
}
