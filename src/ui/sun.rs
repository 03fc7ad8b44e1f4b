//! Sun screen: seven-day PV outlook from PVGIS

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::colors;
use super::widgets::BarSparkline;
use crate::app::App;
use crate::pipeline::format_number;
use crate::view::{solar_assumptions, solar_cells, SolarCell};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    let Some(outlook) = app.session.outlook() else {
        let message = if app.session.coordinates().is_some() {
            "No PV outlook yet, press r to load"
        } else {
            "Location unknown."
        };
        frame.render_widget(
            Paragraph::new(message).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );
        render_footer(frame, app.peak_kwc, app.peak_kwc, chunks[2]);
        return;
    };

    let cells = solar_cells(&outlook.days);
    if cells.is_empty() {
        frame.render_widget(
            Paragraph::new("PVGIS returned no days for this week")
                .block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );
    } else {
        render_cells(frame, &cells, chunks[0]);
        let energy: Vec<Option<f64>> = outlook.days.iter().map(|d| Some(d.energy_kwh)).collect();
        let max = outlook
            .days
            .iter()
            .map(|d| d.energy_kwh)
            .fold(0.0_f64, f64::max);
        let block = Block::default()
            .title(Span::styled(" Energy kWh ", Style::default().fg(colors::SELECTED)))
            .borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let bar_width = (inner.width / energy.len().max(1) as u16).max(1);
        frame.render_widget(
            BarSparkline::new(&energy, 0.0, max)
                .bar_width(bar_width)
                .style(Style::default().fg(colors::SELECTED)),
            inner,
        );
    }

    render_footer(frame, outlook.peak_kwc, app.peak_kwc, chunks[2]);
}

fn render_cells(frame: &mut Frame, cells: &[SolarCell], area: Rect) {
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cells.len() as u32); cells.len()])
        .split(area);

    for (cell, slot) in cells.iter().zip(slots.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                cell.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} h sun", cell.sun_hours),
                Style::default().fg(colors::SELECTED),
            )),
            Line::from(Span::styled(
                format!("{} kWh", cell.energy_kwh),
                Style::default().fg(colors::PRIMARY),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
            *slot,
        );
    }
}

/// Assumptions of the outlook on screen, then the peak the next reload uses
fn render_footer(frame: &mut Frame, shown_peak_kwc: f64, pending_peak_kwc: f64, area: Rect) {
    let mut hint = vec![Span::styled(
        "+/- peak  r reload",
        Style::default().fg(Color::DarkGray),
    )];
    if (pending_peak_kwc - shown_peak_kwc).abs() > f64::EPSILON {
        hint.push(Span::styled(
            format!(
                "  (next reload: {} kWc)",
                format_number(Some(pending_peak_kwc), 1)
            ),
            Style::default().fg(colors::SELECTED),
        ));
    }
    let lines = vec![
        Line::from(Span::styled(
            solar_assumptions(shown_peak_kwc),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(hint),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
