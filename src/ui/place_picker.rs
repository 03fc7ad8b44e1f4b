//! Pick list shown when a search matches several places

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::{centered_rect, colors};
use crate::data::PlaceCandidate;

const PICKER_WIDTH: u16 = 60;

pub fn render(frame: &mut Frame, candidates: &[PlaceCandidate], selected: usize) {
    let height = (candidates.len() as u16).saturating_add(4);
    let area = centered_rect(PICKER_WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = candidates
        .iter()
        .map(|candidate| {
            ListItem::new(Line::from(vec![
                Span::raw(candidate.label()),
                Span::styled(
                    format!(
                        "  {:.2}, {:.2}",
                        candidate.latitude, candidate.longitude
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Choose a place ")
                .title_bottom(" \u{2191}/\u{2193} move  Enter load  Esc cancel ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::HEADER)),
        )
        .highlight_style(
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}
