//! Overview screen
//!
//! Current conditions, the 24-hour chart and the daily cards.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph},
    Frame,
};

use super::widgets::BarSparkline;
use super::{colors, rgb_color, weather_glyph, CARD_BACKGROUND};
use crate::app::App;
use crate::data::ForecastPayload;
use crate::pipeline::format_number;
use crate::view::{
    current_view, day_cards, hourly_chart, AxisBounds, ChartStyle, CurrentView, DayCard,
};

pub fn render(frame: &mut Frame, app: &App, forecast: &ForecastPayload, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(9),
            Constraint::Length(6),
        ])
        .split(area);

    render_current(frame, &current_view(forecast), rows[0]);
    render_hourly(frame, app, forecast, rows[1]);
    render_day_cards(frame, &day_cards(&forecast.daily), rows[2]);
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}

fn render_current(frame: &mut Frame, view: &CurrentView, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Now ({}) ", view.observed_at),
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(inner);

    let left = vec![
        Line::from(Span::styled(
            format!("{}°C", view.temperature),
            Style::default()
                .fg(colors::TEMPERATURE)
                .add_modifier(Modifier::BOLD),
        )),
        field("Feels like", view.feels_like.clone()),
        field("Dew point", view.dew_point.clone()),
        field("UV", view.uv.clone()),
    ];
    let middle = vec![
        field("Rain", format!("{} mm", view.rain_now)),
        field("Rain prob.", format!("{}%", view.precipitation_probability)),
        field("Clouds", format!("{}%", view.clouds)),
        field("Pressure", format!("{} hPa", view.pressure)),
    ];
    let right = vec![
        field("Wind", view.wind.clone()),
        field("Gusts", view.gust.clone()),
        field("Direction", view.direction.clone()),
        field("Beaufort", view.beaufort.to_string()),
    ];

    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(Paragraph::new(middle), columns[1]);

    let wind_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1)])
        .split(columns[2]);
    frame.render_widget(Paragraph::new(right), wind_rows[0]);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(colors::WIND))
        .percent(view.wind_gauge_pct.round() as u16)
        .label("");
    frame.render_widget(gauge, wind_rows[1]);
}

/// Points for a line chart; missing samples are skipped
fn points(values: &[Option<f64>]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| x.is_finite()).map(|x| (i as f64, x)))
        .collect()
}

/// One of the three hourly panels
struct SeriesPanel<'a> {
    title: &'a str,
    values: &'a [Option<f64>],
    bounds: AxisBounds,
    color: Color,
}

fn render_series(
    frame: &mut Frame,
    style: ChartStyle,
    labels: &[String],
    panel: SeriesPanel,
    area: Rect,
) {
    let SeriesPanel {
        title,
        values,
        bounds,
        color,
    } = panel;
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(color)))
        .borders(Borders::ALL);

    match style {
        ChartStyle::Line => {
            let data = points(values);
            let dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&data);
            let last = labels.len().saturating_sub(1);
            let x_labels: Vec<Span> = [0, last / 2, last]
                .iter()
                .filter_map(|&i| labels.get(i))
                .map(|l| Span::raw(l.clone()))
                .collect();
            let chart = Chart::new(vec![dataset])
                .block(block)
                .x_axis(
                    Axis::default()
                        .bounds([0.0, last.max(1) as f64])
                        .labels(x_labels)
                        .style(Style::default().fg(colors::SECONDARY)),
                )
                .y_axis(
                    Axis::default()
                        .bounds([bounds.min, bounds.max])
                        .labels(vec![
                            Span::raw(format_number(Some(bounds.min), 0)),
                            Span::raw(format_number(Some(bounds.max), 0)),
                        ])
                        .style(Style::default().fg(colors::SECONDARY)),
                );
            frame.render_widget(chart, area);
        }
        ChartStyle::Bar => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let bar_width = (inner.width / values.len().max(1) as u16).max(1);
            frame.render_widget(
                BarSparkline::new(values, bounds.min, bounds.max)
                    .bar_width(bar_width)
                    .style(Style::default().fg(color)),
                inner,
            );
        }
    }
}

fn render_hourly(frame: &mut Frame, app: &App, forecast: &ForecastPayload, area: Rect) {
    let chart = hourly_chart(&forecast.hourly, app.wind_series);
    if chart.is_empty() {
        frame.render_widget(
            Paragraph::new("No hourly data").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let panels = [
        SeriesPanel {
            title: "Temperature °C",
            values: &chart.temperature,
            bounds: chart.temperature_axis,
            color: colors::TEMPERATURE,
        },
        SeriesPanel {
            title: "Rain prob. %",
            values: &chart.precipitation_probability,
            bounds: chart.probability_axis,
            color: colors::RAIN,
        },
        SeriesPanel {
            title: chart.wind_series.label(),
            values: &chart.wind,
            bounds: chart.wind_axis,
            color: colors::WIND,
        },
    ];
    for (panel, area) in panels.into_iter().zip(rows.iter()) {
        render_series(frame, app.chart_style, &chart.labels, panel, *area);
    }
}

fn render_day_cards(frame: &mut Frame, cards: &[DayCard], area: Rect) {
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, slot) in cards.iter().zip(slots.iter()) {
        let (from, to) = card.gradient.over(CARD_BACKGROUND);
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    card.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(weather_glyph(card.icon)),
            ]),
            Line::from(Span::styled(
                format!("{}° / {}°", card.temperature_max, card.temperature_min),
                Style::default().fg(colors::PRIMARY),
            )),
            Line::from(Span::styled(
                format!("{} mm", card.rain),
                Style::default().fg(colors::RAIN),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb_color(to)))
            .style(Style::default().bg(rgb_color(from)));
        frame.render_widget(Paragraph::new(lines).block(block), *slot);
    }
}
