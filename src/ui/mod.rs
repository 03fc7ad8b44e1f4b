//! UI rendering module for meteodash
//!
//! This module contains all the rendering logic for the terminal dashboard,
//! using the ratatui library for TUI components. Screens read view models
//! from [`crate::view`]; they do no derivation of their own.

pub mod help_overlay;
pub mod overview;
pub mod place_picker;
pub mod sun;
pub mod week_hour;
pub mod week_map;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, InputMode, StatusLevel, Tab};
use crate::pipeline::{Rgb, WeatherIcon};

/// Color scheme shared by the screens
pub(crate) mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Highlighted selection
    pub const SELECTED: Color = Color::Yellow;
    pub const TEMPERATURE: Color = Color::LightRed;
    pub const RAIN: Color = Color::LightBlue;
    pub const WIND: Color = Color::Gray;
}

/// Background that card gradients are blended over
pub const CARD_BACKGROUND: Rgb = Rgb(24, 26, 33);

/// Weather category to glyph mapping
pub fn weather_glyph(icon: WeatherIcon) -> &'static str {
    match icon {
        WeatherIcon::Clear => "\u{2600}",        // ☀
        WeatherIcon::PartlyCloudy => "\u{26C5}", // ⛅
        WeatherIcon::Cloudy => "\u{2601}",       // ☁
        WeatherIcon::Rain => "\u{1F327}",        // 🌧
        WeatherIcon::Thunderstorm => "\u{26C8}", // ⛈
        WeatherIcon::Snow => "\u{2744}",         // ❄
        WeatherIcon::Fog => "\u{1F32B}",         // 🌫
    }
}

pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Renders the whole dashboard for the current app state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.session.forecast() {
        None => render_waiting(frame, chunks[1]),
        Some(forecast) => match app.tab {
            Tab::Overview => overview::render(frame, app, forecast, chunks[1]),
            Tab::WeekMap => week_map::render(frame, forecast, chunks[1]),
            Tab::WeekHours => week_hour::render(frame, app, forecast, chunks[1]),
            Tab::Sun => sun::render(frame, app, chunks[1]),
        },
    }

    render_status_line(frame, app, chunks[2]);

    if let InputMode::Pick {
        candidates,
        selected,
    } = &app.mode
    {
        place_picker::render(frame, candidates, *selected);
    }
    if app.show_help {
        help_overlay::render(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .session
        .place()
        .map(|p| format!(" {} ", p.label))
        .unwrap_or_else(|| " meteodash ".to_string());

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(colors::HEADER)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(colors::SECONDARY))
        .highlight_style(
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Shown until the first forecast arrives
fn render_waiting(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading forecast...")
        .style(Style::default().fg(colors::HEADER))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

fn status_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Info => colors::SECONDARY,
        StatusLevel::Ok => Color::Green,
        StatusLevel::Warn => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

/// Bottom line: the search prompt while typing, otherwise the status message
fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.mode, &app.status) {
        (InputMode::Search { query }, _) => Line::from(vec![
            Span::styled("Place: ", Style::default().fg(colors::HEADER)),
            Span::styled(format!("{}_", query), Style::default().fg(colors::PRIMARY)),
            Span::styled(
                "  (Enter search, Esc cancel)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        (_, Some(status)) => Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(status_color(status.level)),
        )),
        (_, None) => Line::from(Span::styled(
            "/ search  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Rect of `width` x `height` centered in `area`, clipped to it
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
