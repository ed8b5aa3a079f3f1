use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::ui::centered_rect;
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;
use crate::widgets::field_form::FieldFormWidget;
use crate::widgets::pip_board::PipBoardWidget;

pub mod presets;

pub fn render_board(app: &mut App, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    render_status(app, main_layout[0], buf);
    render_search_bar(app, main_layout[1], buf);

    let content_layout = if app.board_open {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(40),
                Constraint::Percentage(20),
            ])
            .split(main_layout[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(main_layout[2])
    };

    if app.board_open {
        PipBoardWidget::new().render(
            &app.form,
            app.board_cursor,
            app.focus == Focus::Board,
            content_layout[0],
            buf,
        );
        FieldFormWidget::new().render(&app.form, content_layout[1], buf);
        presets::render_presets(app, content_layout[2], buf);
    } else {
        FieldFormWidget::new().render(&app.form, content_layout[0], buf);
        presets::render_presets(app, content_layout[1], buf);
    }

    UiComponent::help(&help_text(app)).render(main_layout[3], buf);
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let loading = if app.form.pending_len() > 0 {
        format!(" (loading {} more)", app.form.pending_len())
    } else {
        String::new()
    };
    let status = format!(
        "{} fields{} | {} active | sort: {}",
        app.form.loaded_len(),
        loading,
        app.form.active_field_ids().len(),
        app.form.sort_mode().label(),
    );
    UiComponent::status(&status).render(area, buf);
}

fn render_search_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let is_focused = app.focus == Focus::Search;
    let kind = match app.search.kind() {
        Some(kind) => kind.label(),
        None => "any",
    };
    let query = if app.search.query().is_empty() && !is_focused {
        "press / to search".to_string()
    } else {
        format!("{}_", app.search.query())
    };
    let text = format!("{query}    [kind: {kind}]");

    Paragraph::new(text)
        .block(
            Block::bordered()
                .title(" Search ")
                .border_type(BorderType::Rounded)
                .border_style(dim_unless_focused(
                    is_focused,
                    Style::default().fg(Color::Cyan),
                )),
        )
        .style(dim_unless_focused(is_focused, Style::default().fg(Color::Cyan)))
        .render(area, buf);
}

fn help_text(app: &App) -> String {
    let focus_hint = match app.focus {
        Focus::Board => {
            "Enter: Toggle | 'f': Favourite | 's': Sort | left/right: Page | 'b': Board | 'p': Preset"
        }
        Focus::Search => "Type to filter | Tab: Kind | Esc: Clear | Enter: Done",
        Focus::Presets => "Enter: Apply | 'd': Delete",
    };
    format!("{focus_hint} | Tab: Focus | 'q': Quit")
}

pub fn render_capture_popup(app: &App, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(50, 20, area);
    Clear.render(popup, buf);
    Paragraph::new(format!("{}_", app.capture_input))
        .block(
            Block::bordered()
                .title(" Preset name (Enter: save, Esc: cancel) ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .alignment(Alignment::Left)
        .render(popup, buf);
}
