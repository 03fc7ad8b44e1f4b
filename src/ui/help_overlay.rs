//! Key help modal, drawn over whichever tab is active

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, colors};

const KEY_COLUMN: usize = 12;
const OVERLAY_WIDTH: u16 = 52;

/// Key bindings grouped by the tab they act on
const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("1-4, Tab", "Switch tab"),
            ("/", "Search for a place"),
            ("↑/↓, Enter", "Pick a place from the list"),
            ("R", "Refetch the forecast"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
    ("Overview", &[("c", "Line / bar chart"), ("g", "Mean wind / gusts")]),
    (
        "Week by hour",
        &[
            ("←/h, →/l", "Previous / next day"),
            ("t, r, w", "Toggle temperature, rain, wind"),
        ],
    ),
    (
        "Sun",
        &[("+, -", "Adjust peak by 0.5 kWc"), ("r", "Reload PVGIS")],
    ),
];

fn key_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (group, bindings) in KEYS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            *group,
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(bindings.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", key, width = KEY_COLUMN),
                    Style::default().fg(colors::SELECTED),
                ),
                Span::raw(*action),
            ])
        }));
    }
    lines
}

pub fn render(frame: &mut Frame) {
    let mut lines = key_lines();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Esc or ? closes",
        Style::default().fg(Color::DarkGray),
    )));

    // Two rows of border
    let height = lines.len() as u16 + 2;
    let area = centered_rect(OVERLAY_WIDTH, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::HEADER)),
        ),
        area,
    );
}
