//! Week map screen: one tinted cell per forecast day

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{colors, rgb_color, weather_glyph, CARD_BACKGROUND};
use crate::data::ForecastPayload;
use crate::view::{week_cells, WeekCell};

/// Cells per grid row
const CELLS_PER_ROW: usize = 4;

pub fn render(frame: &mut Frame, forecast: &ForecastPayload, area: Rect) {
    let cells = week_cells(&forecast.daily);
    if cells.is_empty() {
        frame.render_widget(
            Paragraph::new("No daily data").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let row_count = cells.len().div_ceil(CELLS_PER_ROW);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(6); row_count])
        .split(area);

    for (row_cells, row_area) in cells.chunks(CELLS_PER_ROW).zip(rows.iter()) {
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, CELLS_PER_ROW as u32);
                CELLS_PER_ROW
            ])
            .split(*row_area);
        for (cell, slot) in row_cells.iter().zip(slots.iter()) {
            render_cell(frame, cell, *slot);
        }
    }
}

fn render_cell(frame: &mut Frame, cell: &WeekCell, area: Rect) {
    let (from, to) = cell.tint.over(CARD_BACKGROUND);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                cell.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(weather_glyph(cell.icon)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}°", cell.temperature_max),
                Style::default()
                    .fg(colors::TEMPERATURE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" / {}°", cell.temperature_min),
                Style::default().fg(colors::SECONDARY),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{} mm", cell.rain), Style::default().fg(colors::RAIN)),
            Span::raw("  "),
            Span::styled(
                format!("{} km/h", cell.wind_max),
                Style::default().fg(colors::PRIMARY),
            ),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(rgb_color(to)))
        .style(Style::default().bg(rgb_color(from)));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
