// src/widgets/field_form/widget.rs

//! The form pane: active fields laid out in their capacity-bounded columns,
//! each with its current value underneath. A lone column is centered; more
//! than one renders top-aligned from the left edge.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::form::FormManager;
use crate::ui::components::UiComponent;

/// Rendered height of one field: name line plus value line.
const FIELD_HEIGHT: u16 = 2;

#[derive(Debug, Default)]
pub struct FieldFormWidget;

impl FieldFormWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, form: &FormManager, area: Rect, buf: &mut Buffer) {
        let active = form.field_columns().len();
        let container = Block::bordered()
            .title(format!(" Search Form ({active} active) "))
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue));
        let inner = container.inner(area);
        container.render(area, buf);

        if form.field_columns().is_empty() {
            UiComponent::empty_message(
                "No fields placed.\n\nToggle pips on the board to build the form.",
                None,
            )
            .render(inner, buf);
            return;
        }

        let columns = form.field_columns().columns();
        let constraints = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for (column, cell) in columns.iter().zip(cells.iter()) {
            let content_height = column.len() as u16 * FIELD_HEIGHT;
            let cell = if form.single_column_centered() {
                Layout::vertical([Constraint::Length(content_height.min(cell.height))])
                    .flex(Flex::Center)
                    .split(*cell)[0]
            } else {
                *cell
            };

            let mut lines: Vec<Line> = Vec::with_capacity(column.len() * FIELD_HEIGHT as usize);
            for id in column.items() {
                let (name, value) = match form.entry(id) {
                    Some(entry) => (entry.descriptor.name.clone(), entry.value.summary()),
                    None => (id.clone(), String::new()),
                };
                lines.push(Line::from(Span::styled(
                    name,
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    format!("  {value}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Paragraph::new(lines).render(cell, buf);
        }
    }
}
