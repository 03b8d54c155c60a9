use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::App;
use crate::model::Mode;
use crate::ui::constants::{FOOTER_HEIGHT, STATUS_HEIGHT, TITLE_HEIGHT};
use crate::ui::helpers::column_widths;
use crate::ui::modals::{draw_confirm_delete_modal, draw_edit_modal};
use crate::ui::panels::{
    draw_connection_list, draw_details, draw_footer, draw_status, draw_title,
};

pub(crate) mod constants;
mod helpers;
mod modals;
mod panels;

pub(crate) fn draw_ui(frame: &mut Frame<'_>, app: &App) {
    draw_main_ui(frame, app, frame.area());

    match app.mode() {
        Mode::Editing => draw_edit_modal(frame, app),
        Mode::ConfirmingDelete => draw_confirm_delete_modal(frame, app),
        Mode::Browsing | Mode::Filtering => {}
    }
}

fn draw_main_ui(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(STATUS_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ]
            .as_ref(),
        )
        .split(area);

    draw_title(frame, layout[0]);

    let body = layout[1];
    let (list_width, detail_width) = column_widths(body.width);
    match detail_width {
        Some(detail_width) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    [
                        Constraint::Length(list_width),
                        Constraint::Length(detail_width),
                    ]
                    .as_ref(),
                )
                .split(body);
            draw_connection_list(frame, app, columns[0]);
            draw_details(frame, app, columns[1], Local::now());
        }
        None => draw_connection_list(frame, app, body),
    }

    draw_status(frame, app, layout[2]);
    draw_footer(frame, app, layout[3]);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::{AppEvent, Connection};
    use crate::storage::MemoryStore;

    fn sample_app() -> App {
        App::for_test(MemoryStore::with(vec![
            Connection::new("Echo", "abc123", vec!["work".into()]),
            Connection::new("Foxtrot", "def456", vec![]),
        ]))
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_ui(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn wide_terminal_shows_detail_panel() {
        let app = sample_app();
        let content = render(&app, 100, 20);
        assert!(content.contains("GSM | GSocket Manager"));
        assert!(content.contains("Details"));
        assert!(content.contains("0 times"));
    }

    #[test]
    fn narrow_terminal_hides_detail_panel() {
        let app = sample_app();
        let content = render(&app, 45, 20);
        assert!(content.contains("Echo"));
        assert!(!content.contains("Details"));
    }

    #[test]
    fn tiny_terminals_never_panic() {
        let mut app = sample_app();
        for (width, height) in [(0, 0), (1, 1), (3, 2), (10, 3), (49, 5), (50, 4)] {
            render(&app, width, height);
        }
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )));
        for (width, height) in [(0, 0), (1, 1), (5, 5), (20, 6)] {
            render(&app, width, height);
        }
        app.handle_event(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
        )));
        for (width, height) in [(0, 0), (2, 2), (12, 5)] {
            render(&app, width, height);
        }
    }

    #[test]
    fn modals_draw_over_main_view() {
        let mut app = sample_app();
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
        )));
        let content = render(&app, 80, 20);
        assert!(content.contains("Delete 'Echo'?"));
    }
}
