use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::app::{App, Focus};
use crate::ui::components::UiComponent;
use crate::ui::style::dim_unless_focused;

pub fn render_presets(app: &App, area: Rect, buf: &mut Buffer) {
    let is_focused = app.focus == Focus::Presets;
    let border_style = dim_unless_focused(is_focused, Style::default().fg(Color::Magenta));

    let container = Block::bordered()
        .title(format!(" Presets ({}) ", app.presets.len()))
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = container.inner(area);
    container.render(area, buf);

    if app.presets.is_empty() {
        UiComponent::empty_message(
            "No presets saved.\n\nActivate fields and press 'p' to capture one.",
            None,
        )
        .render(inner, buf);
        return;
    }

    let lines: Vec<Line> = app
        .presets
        .presets()
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let marker = if is_focused && i == app.preset_cursor {
                "> "
            } else {
                "  "
            };
            let style = if is_focused && i == app.preset_cursor {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}", preset.name), style),
                Span::styled(
                    format!(" ({} fields, used {}x)", preset.field_ids.len(), preset.usage_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}
