// src/widgets/pip_board/widget.rs

//! The pip board pane: the form manager's pip columns rendered side by
//! side, with a pager line underneath when the catalog spans pages. Purely
//! presentational; selection and toggling live in the app layer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::form::FormManager;
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;

#[derive(Debug, Default)]
pub struct PipBoardWidget;

impl PipBoardWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        form: &FormManager,
        cursor: usize,
        is_focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let border_style = dim_unless_focused(is_focused, Style::default().fg(Color::Yellow));
        let container = Block::bordered()
            .title(format!(
                " Fields ({}/{}) ",
                form.visible_count(),
                form.loaded_len()
            ))
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = container.inner(area);
        container.render(area, buf);

        if form.pip_columns().is_empty() {
            UiComponent::empty_message("No fields match the current filter.", None)
                .render(inner, buf);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        self.render_columns(form, cursor, is_focused, rows[0], buf);
        self.render_pager(form, rows[1], buf);
    }

    fn render_columns(
        &self,
        form: &FormManager,
        cursor: usize,
        is_focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let columns = form.pip_columns().columns();
        let constraints = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let mut flat_index = 0usize;
        for (column, cell) in columns.iter().zip(cells.iter()) {
            let lines: Vec<Line> = column
                .items()
                .iter()
                .map(|id| {
                    let selected = is_focused && flat_index == cursor;
                    flat_index += 1;
                    self.pip_line(form, id, selected)
                })
                .collect();
            Paragraph::new(lines).render(*cell, buf);
        }
    }

    fn pip_line<'a>(&self, form: &'a FormManager, id: &'a str, selected: bool) -> Line<'a> {
        // Every board id comes from the entry table, but a missing one
        // still renders rather than panicking mid-draw.
        let Some(entry) = form.entry(id) else {
            return Line::from(Span::raw(id));
        };
        let marker = if entry.pip.active { "[x] " } else { "[ ] " };
        let star = if entry.pip.favourite { "* " } else { "  " };

        let mut style = if entry.pip.active {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        Line::from(Span::styled(
            format!("{marker}{star}{}", entry.descriptor.name),
            style,
        ))
    }

    fn render_pager(&self, form: &FormManager, area: Rect, buf: &mut Buffer) {
        // a single page needs no pager
        if form.total_pages() <= 1 {
            return;
        }
        let prev = if form.page() > 1 { "<" } else { " " };
        let next = if form.page() < form.total_pages() { ">" } else { " " };
        Paragraph::new(format!(
            "{prev} page {}/{} {next}",
            form.page(),
            form.total_pages()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}
