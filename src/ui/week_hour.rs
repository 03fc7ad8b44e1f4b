//! Week-by-hour screen: the selected day's hours as columns

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{colors, weather_glyph};
use crate::app::App;
use crate::data::ForecastPayload;
use crate::view::{day_hours, DayHourRow, RowToggles};

/// Hour columns per block; a day is drawn as two blocks
const HOURS_PER_BLOCK: usize = 12;
const LABEL_WIDTH: usize = 8;
const COLUMN_WIDTH: usize = 7;

pub fn render(frame: &mut Frame, app: &App, forecast: &ForecastPayload, area: Rect) {
    let day_count = forecast.daily.time.len();
    let breakdown = day_hours(forecast, app.selected_day);

    let title = match &breakdown {
        Some(day) => format!(
            " \u{25C0} {} \u{25B6}  day {}/{} ",
            day.label,
            app.selected_day + 1,
            day_count
        ),
        None => " Week by hour ".to_string(),
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);

    let rows = breakdown.map(|day| day.rows).unwrap_or_default();
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No hourly data for this day").block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for chunk in rows.chunks(HOURS_PER_BLOCK) {
        lines.extend(hour_block(chunk, app.row_toggles));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "\u{2190}/\u{2192} day  t temperature  r rain  w wind",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines for one block of hours, skipping the rows turned off
fn hour_block(rows: &[DayHourRow], toggles: RowToggles) -> Vec<Line<'static>> {
    let mut lines = vec![
        grid_line("Hour", colors::SECONDARY, rows, |r| r.hour.clone()),
        grid_line("Sky", colors::PRIMARY, rows, |r| {
            weather_glyph(r.icon).to_string()
        }),
    ];
    if toggles.temperature {
        lines.push(grid_line("Temp", colors::TEMPERATURE, rows, |r| {
            format!("{}°", r.temperature)
        }));
    }
    if toggles.rain {
        lines.push(grid_line("Rain %", colors::RAIN, rows, |r| {
            r.precipitation_probability.clone()
        }));
    }
    if toggles.wind {
        lines.push(grid_line("Wind", colors::WIND, rows, |r| r.wind.clone()));
    }
    lines
}

fn grid_line(
    label: &str,
    color: Color,
    rows: &[DayHourRow],
    value: impl Fn(&DayHourRow) -> String,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:<width$}", label, width = LABEL_WIDTH),
        Style::default().fg(colors::SECONDARY),
    )];
    spans.extend(rows.iter().map(|row| {
        Span::styled(
            format!("{:<width$}", value(row), width = COLUMN_WIDTH),
            Style::default().fg(color),
        )
    }));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{app_with_forecast, render_to_string, sample_payload};

    fn draw(app: &App) -> String {
        let payload = sample_payload();
        render_to_string(|frame| {
            let area = frame.area();
            render(frame, app, &payload, area)
        })
    }

    #[test]
    fn test_renders_selected_day() {
        let mut app = app_with_forecast();
        app.selected_day = 2;
        let content = draw(&app);
        assert!(content.contains("Wed 17"));
        assert!(content.contains("day 3/7"));
        assert!(content.contains("00:00"));
        assert!(content.contains("23:00"));
        assert!(content.contains("Temp"));
        assert!(content.contains("Rain %"));
    }

    #[test]
    fn test_toggled_rows_are_hidden() {
        let mut app = app_with_forecast();
        app.row_toggles.temperature = false;
        app.row_toggles.wind = false;
        let content = draw(&app);
        assert!(!content.contains("Temp "));
        assert!(content.contains("Rain %"));
        assert!(!content.contains("Wind "));
    }

    #[test]
    fn test_day_out_of_range() {
        let mut app = app_with_forecast();
        app.selected_day = 30;
        let content = draw(&app);
        assert!(content.contains("No hourly data for this day"));
    }
}
